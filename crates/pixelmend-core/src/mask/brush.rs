//! Stroke segment rasterization.
//!
//! A segment with round caps is the set of points within `width / 2` of the
//! line between its endpoints, a capsule. Consecutive capsules of one stroke
//! overlap in a full disc at every vertex, which gives round joins for free.
//! Pixel coverage is taken at pixel centers with a one pixel linear ramp at
//! the boundary.

use crate::decode::CHANNELS;
use crate::geometry::Point;

/// Distance from `p` to the segment `a..b`.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * abx, a.y + t * aby))
}

/// Paint a round-capped segment into an RGBA buffer.
///
/// Coverage only ever grows: a pixel's alpha becomes the maximum of its
/// current alpha and the segment's coverage, and its color becomes `color`
/// wherever the segment raises it. Zero-length segments paint nothing.
///
/// # Returns
///
/// `true` if any pixel changed.
pub fn paint_segment(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    from: Point,
    to: Point,
    line_width: f64,
    color: [u8; 4],
) -> bool {
    if from == to || line_width.is_nan() || line_width <= 0.0 || width == 0 || height == 0 {
        return false;
    }
    debug_assert_eq!(pixels.len(), width as usize * height as usize * CHANNELS);

    let radius = line_width / 2.0;
    let reach = radius + 1.0;

    let clamp_x = |v: f64| v.clamp(0.0, width as f64) as usize;
    let clamp_y = |v: f64| v.clamp(0.0, height as f64) as usize;
    let x_start = clamp_x((from.x.min(to.x) - reach).floor());
    let x_end = clamp_x((from.x.max(to.x) + reach).ceil());
    let y_start = clamp_y((from.y.min(to.y) - reach).floor());
    let y_end = clamp_y((from.y.max(to.y) + reach).ceil());

    let stride = width as usize * CHANNELS;
    let mut changed = false;

    for py in y_start..y_end {
        for px in x_start..x_end {
            let center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
            let dist = distance_to_segment(center, from, to);
            let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let alpha = (coverage * color[3] as f64).round() as u8;
            let idx = py * stride + px * CHANNELS;
            let Some(dst) = pixels.get_mut(idx..idx + CHANNELS) else {
                continue;
            };
            if alpha > dst[3] {
                dst[..3].copy_from_slice(&color[..3]);
                dst[3] = alpha;
                changed = true;
            }
        }
    }

    changed
}
