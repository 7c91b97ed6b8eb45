//! Adjustment pipeline: rotation, tone mapping and sharpening.
//!
//! ## Stage Order
//! 1. Rotation onto an expanded transparent canvas
//! 2. Brightness / contrast, then gamma
//! 3. Sharpening against a snapshot of stage 2
//!
//! The pipeline borrows its input and always returns a new raster. Neutral
//! settings short-circuit to an exact copy.

mod sharpen;
mod tone;

pub use sharpen::apply_sharpen;
pub use tone::{apply_tone, ToneLut};

use crate::decode::RasterImage;
use crate::error::{try_clone_pixels, EditError};
use crate::transform::apply_rotation;
use crate::AdjustmentParams;

/// Apply all adjustment settings to a raster.
///
/// # Arguments
/// * `image` - Source raster, never modified
/// * `params` - Slider settings
///
/// # Errors
///
/// - `EditError::InvalidParameter` when a setting is outside its range
/// - `EditError::AllocationFailed` when the rotated canvas or the sharpening
///   snapshot cannot be allocated; no partial result is returned
///
/// # Example
/// ```ignore
/// use pixelmend_core::{adjust, AdjustmentParams};
///
/// let params = AdjustmentParams { brightness: 120.0, ..AdjustmentParams::NEUTRAL };
/// let adjusted = adjust(&image, &params)?;
/// ```
pub fn adjust(image: &RasterImage, params: &AdjustmentParams) -> Result<RasterImage, EditError> {
    params.validate()?;

    if params.is_neutral() {
        let pixels = try_clone_pixels(&image.pixels, image.width, image.height)?;
        return Ok(RasterImage::new(image.width, image.height, pixels));
    }

    log::debug!(
        "adjusting {}x{} with {:?}",
        image.width,
        image.height,
        params
    );

    let mut output = apply_rotation(image, params.angle)?;

    apply_tone(&mut output.pixels, params);

    if params.sharpness > 0.0 {
        let snapshot = try_clone_pixels(&output.pixels, output.width, output.height)?;
        apply_sharpen(
            &mut output.pixels,
            &snapshot,
            output.width,
            output.height,
            params.sharpness,
        );
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, rgba: [u8; 4]) -> RasterImage {
        RasterImage::new(width, height, rgba.repeat((width * height) as usize))
    }

    fn gradient(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * x * 7) as u8, (y * 20) as u8, 128, 255]);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_neutral_params_return_exact_copy() {
        let img = gradient(7, 5);
        let out = adjust(&img, &AdjustmentParams::NEUTRAL).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_brightness_fixture() {
        let img = uniform(4, 4, [0, 0, 0, 255]);
        let params = AdjustmentParams {
            brightness: 120.0,
            ..AdjustmentParams::NEUTRAL
        };
        let out = adjust(&img, &params).unwrap();

        assert_eq!((out.width, out.height), (4, 4));
        for px in out.pixels.chunks_exact(4) {
            assert_eq!(px, &[20, 20, 20, 255]);
        }
    }

    /// Gray 3x4 image with a distinct value and alpha per pixel.
    fn gray_ramp() -> RasterImage {
        let rows: [[(u8, u8); 3]; 4] = [
            [(70, 255), (90, 250), (110, 245)],
            [(100, 240), (128, 235), (150, 230)],
            [(120, 225), (160, 220), (180, 215)],
            [(140, 210), (170, 205), (200, 200)],
        ];
        let pixels = rows
            .iter()
            .flatten()
            .flat_map(|&(v, a)| [v, v, v, a])
            .collect();
        RasterImage::new(3, 4, pixels)
    }

    #[test]
    fn test_full_pipeline_fixture() {
        // Rotate 90 -> 4x3, tone v' = 2v - 118 then (v'/255)^2 * 255,
        // sharpen with s = 1 on the two interior pixels.
        let params = AdjustmentParams {
            brightness: 110.0,
            contrast: 200.0,
            gamma: 50.0,
            sharpness: 250.0,
            angle: 90.0,
        };
        let out = adjust(&gray_ramp(), &params).unwrap();

        assert_eq!((out.width, out.height), (4, 3));
        let expected: [[(u8, u8); 4]; 3] = [
            [(103, 210), (58, 225), (26, 240), (2, 255)],
            [(193, 205), (244, 220), (44, 235), (15, 250)],
            [(255, 200), (230, 215), (130, 230), (41, 245)],
        ];
        for (y, row) in expected.iter().enumerate() {
            for (x, &(v, a)) in row.iter().enumerate() {
                assert_eq!(
                    out.pixel(x as u32, y as u32),
                    Some([v, v, v, a]),
                    "pixel ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        let img = uniform(2, 2, [0, 0, 0, 255]);
        let params = AdjustmentParams {
            sharpness: 301.0,
            ..AdjustmentParams::NEUTRAL
        };
        let err = adjust(&img, &params).unwrap_err();
        assert!(matches!(
            err,
            EditError::InvalidParameter {
                name: "sharpness",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_sharpness_matches_tone_only() {
        let img = gradient(6, 6);
        let params = AdjustmentParams {
            contrast: 140.0,
            gamma: 80.0,
            ..AdjustmentParams::NEUTRAL
        };
        let out = adjust(&img, &params).unwrap();

        let mut expected = img.pixels.clone();
        apply_tone(&mut expected, &params);
        assert_eq!(out.pixels, expected);
    }

    #[test]
    fn test_sharpen_leaves_border_tone_mapped() {
        let img = gradient(6, 6);
        let tone_only = AdjustmentParams {
            brightness: 110.0,
            ..AdjustmentParams::NEUTRAL
        };
        let with_sharpen = AdjustmentParams {
            sharpness: 200.0,
            ..tone_only
        };

        let a = adjust(&img, &tone_only).unwrap();
        let b = adjust(&img, &with_sharpen).unwrap();

        for x in 0..6 {
            assert_eq!(a.pixel(x, 0), b.pixel(x, 0));
            assert_eq!(a.pixel(x, 5), b.pixel(x, 5));
        }
        assert_ne!(a, b);
    }

    #[test]
    fn test_rotation_expands_canvas() {
        let img = uniform(40, 20, [200, 200, 200, 255]);
        let params = AdjustmentParams {
            angle: 30.0,
            ..AdjustmentParams::NEUTRAL
        };
        let out = adjust(&img, &params).unwrap();

        assert_eq!(
            (out.width, out.height),
            crate::transform::compute_rotated_bounds(40, 20, 30.0)
        );
        assert_eq!(out.pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn test_rotated_transparent_area_stays_transparent_after_tone() {
        let img = uniform(10, 10, [0, 0, 0, 255]);
        let params = AdjustmentParams {
            brightness: 200.0,
            angle: 45.0,
            ..AdjustmentParams::NEUTRAL
        };
        let out = adjust(&img, &params).unwrap();
        // Color is lifted everywhere, alpha still marks the uncovered corner.
        let corner = out.pixel(0, 0).unwrap();
        assert_eq!(corner[3], 0);
    }

    #[test]
    fn test_input_is_not_modified() {
        let img = gradient(5, 5);
        let before = img.clone();
        let params = AdjustmentParams {
            brightness: 180.0,
            sharpness: 300.0,
            angle: -90.0,
            ..AdjustmentParams::NEUTRAL
        };
        let out = adjust(&img, &params).unwrap();
        assert_eq!(img, before);
        assert_eq!((out.width, out.height), (5, 5));
    }
}
