//! Scale-corrected rectangular extraction.
//!
//! The crop rectangle arrives in the coordinate space of the displayed
//! (possibly zoomed) image together with the display-to-natural scale
//! factors. Every rectangle field is scaled into natural pixels, clamped to
//! the image, and the region is copied (or resampled when it does not sit on
//! whole pixels) into a new raster.
//!
//! # Example
//!
//! ```ignore
//! // Crop the center 50x50 region of a 100x100 image shown at half size
//! let cropped = crop(&image, Rect::new(12.5, 12.5, 25.0, 25.0), ScaleFactors::new(2.0, 2.0))?;
//! ```

use super::sample::{sample_bilinear, Edge};
use crate::decode::{RasterImage, CHANNELS};
use crate::error::{alloc_pixels, EditError};
use crate::geometry::{Rect, ScaleFactors};

/// Natural-space region resolved from a display rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Region {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    out_width: u32,
    out_height: u32,
}

impl Region {
    fn resolve(image: &RasterImage, rect: Rect, scale: ScaleFactors) -> Option<Self> {
        let natural = scale.apply(rect);
        let (nat_w, nat_h) = (image.width as f64, image.height as f64);

        let left = natural.x.clamp(0.0, nat_w);
        let top = natural.y.clamp(0.0, nat_h);
        let right = natural.right().clamp(0.0, nat_w);
        let bottom = natural.bottom().clamp(0.0, nat_h);

        let width = right - left;
        let height = bottom - top;

        // NaN and negative extents saturate to zero.
        let out_width = width.floor() as u32;
        let out_height = height.floor() as u32;
        if out_width == 0 || out_height == 0 {
            return None;
        }

        Some(Self {
            left,
            top,
            width,
            height,
            out_width,
            out_height,
        })
    }

    /// Whole-pixel origin and a 1:1 size, so a plain copy is exact.
    fn is_pixel_aligned(&self) -> bool {
        self.left.fract() == 0.0
            && self.top.fract() == 0.0
            && self.width == self.out_width as f64
            && self.height == self.out_height as f64
    }
}

/// Extract a display-space rectangle from `image`.
///
/// # Arguments
///
/// * `image` - Source raster in natural pixels
/// * `rect` - Crop rectangle in display coordinates
/// * `scale` - Natural / displayed size on each axis
///
/// # Returns
///
/// A raster of `floor(scaled width) x floor(scaled height)` pixels.
///
/// # Errors
///
/// - `EditError::EmptyCrop` when the clamped rectangle has zero area
/// - `EditError::AllocationFailed` when the output cannot be allocated
pub fn crop(
    image: &RasterImage,
    rect: Rect,
    scale: ScaleFactors,
) -> Result<RasterImage, EditError> {
    let region = Region::resolve(image, rect, scale).ok_or_else(|| {
        log::warn!("crop rectangle {:?} at scale {:?} has zero area", rect, scale);
        EditError::EmptyCrop
    })?;

    let mut output = alloc_pixels(region.out_width, region.out_height)?;
    let out_row_len = region.out_width as usize * CHANNELS;

    if region.is_pixel_aligned() {
        let src_row_len = image.width as usize * CHANNELS;
        let x0 = region.left as usize * CHANNELS;
        let y0 = region.top as usize;

        for (y, dst_row) in output.chunks_exact_mut(out_row_len).enumerate() {
            let src_start = (y0 + y) * src_row_len + x0;
            dst_row.copy_from_slice(&image.pixels[src_start..src_start + out_row_len]);
        }
    } else {
        log::debug!(
            "resampling crop region {:?} into {}x{}",
            region,
            region.out_width,
            region.out_height
        );

        let step_x = region.width / region.out_width as f64;
        let step_y = region.height / region.out_height as f64;

        for (y, dst_row) in output.chunks_exact_mut(out_row_len).enumerate() {
            let src_y = region.top + (y as f64 + 0.5) * step_y - 0.5;
            for (x, px) in dst_row.chunks_exact_mut(CHANNELS).enumerate() {
                let src_x = region.left + (x as f64 + 0.5) * step_x - 0.5;
                px.copy_from_slice(&sample_bilinear(image, src_x, src_y, Edge::Clamp));
            }
        }
    }

    Ok(RasterImage::new(region.out_width, region.out_height, output))
}

/// Crop with a rectangle measured on the image as currently displayed.
///
/// The scale factors come from the image's natural size and its on-screen
/// `displayed_width x displayed_height`.
///
/// # Errors
///
/// - `EditError::InvalidDisplaySize` when a displayed dimension is not positive
/// - otherwise the errors of [`crop`]
pub fn crop_displayed(
    image: &RasterImage,
    rect: Rect,
    displayed_width: f64,
    displayed_height: f64,
) -> Result<RasterImage, EditError> {
    let scale = ScaleFactors::from_dimensions(
        image.width as f64,
        image.height as f64,
        displayed_width,
        displayed_height,
    )
    .ok_or(EditError::InvalidDisplaySize {
        width: displayed_width,
        height: displayed_height,
    })?;
    crop(image, rect, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop_is_identity() {
        let img = test_image(100, 80);
        let result = crop(&img, Rect::from_dimensions(100, 80), ScaleFactors::IDENTITY).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(100, 100);
        let result = crop(&img, Rect::new(25.0, 25.0, 50.0, 50.0), ScaleFactors::IDENTITY).unwrap();

        assert_eq!((result.width, result.height), (50, 50));
        // First pixel of the crop is source (25, 25)
        assert_eq!(result.pixel(0, 0), img.pixel(25, 25));
        assert_eq!(result.pixel(49, 49), img.pixel(74, 74));
    }

    #[test]
    fn test_scale_factors_convert_display_rect() {
        // Image shown at half size: display rect 10..20 covers natural 20..40.
        let img = test_image(100, 100);
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        let result = crop(&img, rect, ScaleFactors::new(2.0, 2.0)).unwrap();

        assert_eq!((result.width, result.height), (20, 20));
        assert_eq!(result.pixel(0, 0), img.pixel(20, 20));
    }

    #[test]
    fn test_out_of_range_rect_is_clamped() {
        let img = test_image(50, 40);
        let rect = Rect::new(-10.0, 30.0, 100.0, 100.0);
        let result = crop(&img, rect, ScaleFactors::IDENTITY).unwrap();

        assert_eq!((result.width, result.height), (50, 10));
        assert_eq!(result.pixel(0, 0), img.pixel(0, 30));
    }

    #[test]
    fn test_fractional_size_is_floored() {
        let img = test_image(50, 50);
        let result = crop(&img, Rect::new(0.0, 0.0, 10.9, 5.5), ScaleFactors::IDENTITY).unwrap();
        assert_eq!((result.width, result.height), (10, 5));
    }

    #[test]
    fn test_subpixel_origin_is_resampled() {
        let img = RasterImage::new(
            3,
            1,
            vec![0, 0, 0, 255, 100, 100, 100, 255, 200, 200, 200, 255],
        );
        let result = crop(&img, Rect::new(0.5, 0.0, 2.0, 1.0), ScaleFactors::IDENTITY).unwrap();

        assert_eq!((result.width, result.height), (2, 1));
        assert_eq!(result.pixel(0, 0), Some([50, 50, 50, 255]));
        assert_eq!(result.pixel(1, 0), Some([150, 150, 150, 255]));
    }

    #[test]
    fn test_zero_area_is_error() {
        let img = test_image(50, 50);

        let result = crop(&img, Rect::new(10.0, 10.0, 0.0, 10.0), ScaleFactors::IDENTITY);
        assert!(matches!(result, Err(EditError::EmptyCrop)));

        let result = crop(&img, Rect::new(60.0, 60.0, 10.0, 10.0), ScaleFactors::IDENTITY);
        assert!(matches!(result, Err(EditError::EmptyCrop)));

        let result = crop(&img, Rect::new(0.0, 0.0, 0.5, 10.0), ScaleFactors::IDENTITY);
        assert!(matches!(result, Err(EditError::EmptyCrop)));
    }

    #[test]
    fn test_non_finite_rect_is_error() {
        let img = test_image(10, 10);
        let result = crop(&img, Rect::new(f64::NAN, 0.0, 5.0, 5.0), ScaleFactors::IDENTITY);
        assert!(matches!(result, Err(EditError::EmptyCrop)));
    }

    #[test]
    fn test_crop_preserves_alpha() {
        let img = RasterImage::new(2, 2, vec![9, 9, 9, 10, 9, 9, 9, 20, 9, 9, 9, 30, 9, 9, 9, 40]);
        let result = crop(&img, Rect::new(1.0, 1.0, 1.0, 1.0), ScaleFactors::IDENTITY).unwrap();
        assert_eq!(result.pixels, vec![9, 9, 9, 40]);
    }

    #[test]
    fn test_crop_displayed_scales_selection() {
        // 100x100 image shown at 50x50
        let img = test_image(100, 100);
        let result = crop_displayed(&img, Rect::new(5.0, 5.0, 10.0, 10.0), 50.0, 50.0).unwrap();
        assert_eq!((result.width, result.height), (20, 20));
        assert_eq!(result.pixel(0, 0), img.pixel(10, 10));
    }

    #[test]
    fn test_crop_displayed_rejects_unusable_display_size() {
        let img = test_image(10, 10);
        let rect = Rect::new(0.0, 0.0, 5.0, 5.0);
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0)] {
            let result = crop_displayed(&img, rect, w, h);
            assert!(
                matches!(result, Err(EditError::InvalidDisplaySize { .. })),
                "{w}x{h} gave {result:?}"
            );
        }
    }
}
