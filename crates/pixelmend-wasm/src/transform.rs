//! WASM bindings for crop and rotation.
//!
//! Crop takes a rectangle in displayed coordinates together with the size the
//! image was displayed at, so the UI can pass its crop overlay straight
//! through.

use crate::to_js_error;
use crate::types::JsRasterImage;
use pixelmend_core::geometry::Rect;
use wasm_bindgen::prelude::*;

/// Rotate an image clockwise about its center.
///
/// The canvas grows to hold the whole rotated image; uncovered corners are
/// transparent.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = apply_rotation(sourceImage, 15.0);
/// ```
#[wasm_bindgen]
pub fn apply_rotation(image: &JsRasterImage, angle_degrees: f64) -> Result<JsRasterImage, JsValue> {
    pixelmend_core::apply_rotation(image.raster(), angle_degrees)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Canvas size needed to hold a `width x height` image rotated by
/// `angle_degrees`, as `[width, height]`.
#[wasm_bindgen]
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = pixelmend_core::compute_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}

/// Crop a region selected on the displayed image.
///
/// # Arguments
///
/// * `image` - Source image at natural size
/// * `x`, `y`, `width`, `height` - Crop rectangle in displayed pixels
/// * `displayed_width`, `displayed_height` - Size the image was shown at
///
/// The rectangle is clamped to the image; fractional edges are resampled.
///
/// # Errors
///
/// Fails when the rectangle has no area after clamping or the displayed
/// size is not positive.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const img = document.querySelector('img')!;
/// const cropped = apply_crop(sourceImage, sel.x, sel.y, sel.width, sel.height,
///                            img.width, img.height);
/// ```
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsRasterImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    displayed_width: f64,
    displayed_height: f64,
) -> Result<JsRasterImage, JsValue> {
    pixelmend_core::crop_displayed(
        image.raster(),
        Rect::new(x, y, width, height),
        displayed_width,
        displayed_height,
    )
    .map(JsRasterImage::from_raster)
    .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelmend_core::RasterImage;

    fn test_image(width: u32, height: u32) -> JsRasterImage {
        let pixels: Vec<u8> = (0..(width * height * 4) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsRasterImage::from_raster(RasterImage::new(width, height, pixels))
    }

    #[test]
    fn test_rotation_no_change() {
        let img = test_image(100, 100);
        let result = apply_rotation(&img, 0.0).unwrap();
        assert_eq!(result.width(), 100);
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_rotation_90_degrees() {
        let img = test_image(100, 50);
        let result = apply_rotation(&img, 90.0).unwrap();
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 100);
    }

    #[test]
    fn test_rotation_45_degrees_expands() {
        let img = test_image(100, 100);
        let result = apply_rotation(&img, 45.0).unwrap();
        assert!(result.width() > 100);
        assert!(result.height() > 100);
    }

    #[test]
    fn test_compute_rotated_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), vec![50, 100]);
        let img = test_image(40, 20);
        let rotated = apply_rotation(&img, 30.0).unwrap();
        assert_eq!(
            compute_rotated_bounds(40, 20, 30.0),
            vec![rotated.width(), rotated.height()]
        );
    }

    #[test]
    fn test_crop_full_image() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, 0.0, 0.0, 100.0, 100.0, 100.0, 100.0).unwrap();
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_crop_scaled_from_display() {
        // Shown at half size: a 25x25 selection is 50x50 natural pixels.
        let img = test_image(100, 100);
        let result = apply_crop(&img, 25.0, 25.0, 25.0, 25.0, 50.0, 50.0).unwrap();
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 50);
    }

    #[test]
    fn test_crop_non_square() {
        let img = test_image(200, 100);
        let result = apply_crop(&img, 0.0, 0.0, 100.0, 100.0, 200.0, 100.0).unwrap();
        assert_eq!(result.width(), 100);
        assert_eq!(result.height(), 100);
    }
}
