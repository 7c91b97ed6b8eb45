//! Bilinear sampling shared by rotation and cropping.
//!
//! Coordinates are continuous pixel indices: `(0.0, 0.0)` is the center of
//! the top-left pixel. Interpolation happens on alpha-premultiplied values so
//! transparent neighbours never bleed their color into the result.

use crate::decode::{RasterImage, CHANNELS};

/// What a tap outside the raster reads as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    /// Fully transparent black.
    Transparent,
    /// The nearest edge pixel.
    Clamp,
}

#[inline]
fn texel(image: &RasterImage, x: i64, y: i64, edge: Edge) -> [f64; 4] {
    let (w, h) = (image.width as i64, image.height as i64);
    let (x, y) = match edge {
        Edge::Transparent => {
            if x < 0 || y < 0 || x >= w || y >= h {
                return [0.0; 4];
            }
            (x, y)
        }
        Edge::Clamp => (x.clamp(0, w - 1), y.clamp(0, h - 1)),
    };
    let idx = (y as usize * image.width as usize + x as usize) * CHANNELS;
    let px = &image.pixels[idx..idx + CHANNELS];
    [px[0] as f64, px[1] as f64, px[2] as f64, px[3] as f64]
}

/// Sample `image` at continuous index `(x, y)` with bilinear interpolation.
///
/// The raster must be non-empty.
pub(crate) fn sample_bilinear(image: &RasterImage, x: f64, y: f64, edge: Edge) -> [u8; 4] {
    if edge == Edge::Transparent {
        let (w, h) = (image.width as f64, image.height as f64);
        if !(x > -1.0 && y > -1.0 && x < w && y < h) {
            return [0; 4];
        }
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut alpha = 0.0;
    let mut color = [0.0f64; 3];
    for (tx, ty, weight) in taps {
        if weight == 0.0 {
            continue;
        }
        let p = texel(image, tx, ty, edge);
        let wa = weight * p[3];
        alpha += wa;
        for c in 0..3 {
            color[c] += wa * p[c];
        }
    }

    if alpha <= 0.0 {
        return [0; 4];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = (color[c] / alpha).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = alpha.round().clamp(0.0, 255.0) as u8;
    out
}
