//! Image rotation onto an expanded, transparent canvas.
//!
//! Positive angles rotate clockwise on screen (y axis pointing down). The
//! output canvas is sized by [`compute_rotated_bounds`] and the source is
//! drawn rotated about its own center into the canvas center.
//!
//! # Algorithm
//!
//! Arbitrary angles use inverse mapping: for each destination pixel center
//! we find the source position and sample it bilinearly. For rotation by θ
//! with `(dx, dy)` measured from the destination center:
//!
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + src_cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//!
//! Whole quarter turns are pure pixel permutations and skip resampling.

use super::sample::{sample_bilinear, Edge};
use crate::decode::{DecodeError, RasterImage, CHANNELS};
use crate::error::{alloc_pixels, try_clone_pixels, EditError};

/// A rotation by a whole number of quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterTurn {
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl QuarterTurn {
    fn from_degrees(angle_degrees: f64) -> Option<Self> {
        match angle_degrees.rem_euclid(360.0) {
            a if a == 0.0 => Some(QuarterTurn::None),
            a if a == 90.0 => Some(QuarterTurn::Cw90),
            a if a == 180.0 => Some(QuarterTurn::Cw180),
            a if a == 270.0 => Some(QuarterTurn::Cw270),
            _ => None,
        }
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
///
/// # Returns
///
/// `(floor(w*|cos| + h*|sin|), floor(w*|sin| + h*|cos|))`, each at least 1.
///
/// # Example
///
/// ```ignore
/// use pixelmend_core::transform::compute_rotated_bounds;
///
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match QuarterTurn::from_degrees(angle_degrees) {
        Some(QuarterTurn::None | QuarterTurn::Cw180) => return (width.max(1), height.max(1)),
        Some(QuarterTurn::Cw90 | QuarterTurn::Cw270) => return (height.max(1), width.max(1)),
        None => {}
    }

    let angle_rad = (angle_degrees % 360.0).to_radians();
    let sin = angle_rad.sin().abs();
    let cos = angle_rad.cos().abs();

    let w = width as f64;
    let h = height as f64;

    // Float-to-int casts saturate, so NaN lands on 0 and is lifted to 1.
    let new_w = (w * cos + h * sin).floor() as u32;
    let new_h = (w * sin + h * cos).floor() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise by `angle_degrees` about its center.
///
/// The canvas is expanded to hold the whole rotated source; uncovered
/// canvas area is fully transparent.
///
/// # Errors
///
/// `EditError::AllocationFailed` when the output canvas cannot be allocated.
///
/// # Example
///
/// ```ignore
/// use pixelmend_core::transform::apply_rotation;
///
/// let rotated = apply_rotation(&image, 15.0)?;
/// ```
pub fn apply_rotation(image: &RasterImage, angle_degrees: f64) -> Result<RasterImage, EditError> {
    if let Some(turn) = QuarterTurn::from_degrees(angle_degrees) {
        return rotate_quarter(image, turn);
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);
    let mut output = alloc_pixels(dst_w, dst_h)?;

    if image.is_empty() {
        return Ok(RasterImage::new(dst_w, dst_h, output));
    }

    log::debug!(
        "rotating {}x{} by {} deg onto {}x{}",
        image.width,
        image.height,
        angle_degrees,
        dst_w,
        dst_h
    );

    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    for (dst_y, row) in output
        .chunks_exact_mut(dst_w as usize * CHANNELS)
        .enumerate()
    {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for (dst_x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            px.copy_from_slice(&sample_bilinear(image, src_x, src_y, Edge::Transparent));
        }
    }

    Ok(RasterImage::new(dst_w, dst_h, output))
}

fn rotate_quarter(image: &RasterImage, turn: QuarterTurn) -> Result<RasterImage, EditError> {
    let pixels = try_clone_pixels(&image.pixels, image.width, image.height)?;
    if turn == QuarterTurn::None || image.is_empty() {
        return Ok(RasterImage::new(image.width, image.height, pixels));
    }

    let actual = pixels.len();
    let rgba = image::RgbaImage::from_raw(image.width, image.height, pixels).ok_or(
        DecodeError::BufferMismatch {
            width: image.width,
            height: image.height,
            expected: image.pixel_count() * CHANNELS,
            actual,
        },
    )?;
    let rotated = match turn {
        QuarterTurn::Cw90 => image::imageops::rotate90(&rgba),
        QuarterTurn::Cw180 => image::imageops::rotate180(&rgba),
        QuarterTurn::Cw270 => image::imageops::rotate270(&rgba),
        QuarterTurn::None => rgba,
    };
    Ok(RasterImage::from_rgba_image(rotated))
}
