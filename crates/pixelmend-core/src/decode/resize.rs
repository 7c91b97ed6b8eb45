//! Raster resampling to exact target dimensions.
//!
//! Uses the `image` crate's separable filters. All functions return new
//! `RasterImage` instances without modifying the input.

use serde::{Deserialize, Serialize};

use super::{byte_len, DecodeError, FilterType, RasterImage};
use crate::error::EditError;

/// Resize a raster to exact dimensions.
///
/// Aspect ratio is not preserved; the caller picks the target (for example
/// from a [`ResizePreset`]).
///
/// # Errors
///
/// Zero targets return `EditError::InvalidResizeTarget`; validate user input
/// with [`validate_resize_target`] first. Targets whose buffers cannot be
/// allocated return `EditError::AllocationFailed`.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, EditError> {
    if width == 0 || height == 0 {
        return Err(EditError::InvalidResizeTarget {
            width: f64::from(width),
            height: f64::from(height),
        });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    reserve_resample_buffers(image.width, width, height)?;

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    log::debug!(
        "resizing {}x{} -> {}x{} ({:?})",
        image.width,
        image.height,
        width,
        height,
        filter
    );
    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgba_image(resized))
}

/// Check that the resampler's buffers fit before handing off to `image`,
/// which aborts on allocation failure.
///
/// The vertical pass writes a `src_width x height` scratch of `f32` RGBA,
/// four times the size of a `u8` buffer, then the horizontal pass writes the
/// `width x height` output.
fn reserve_resample_buffers(src_width: u32, width: u32, height: u32) -> Result<(), EditError> {
    let failed = || EditError::AllocationFailed { width, height };
    let output = byte_len(width, height).ok_or_else(failed)?;
    let scratch = byte_len(src_width, height)
        .and_then(|len| len.checked_mul(4))
        .ok_or_else(failed)?;
    let total = output.checked_add(scratch).ok_or_else(failed)?;

    let mut reserved: Vec<u8> = Vec::new();
    if reserved.try_reserve_exact(total).is_err() {
        log::warn!("resize to {}x{} needs {} bytes, allocation failed", width, height, total);
        return Err(failed());
    }
    Ok(())
}

/// Validate user-entered resize dimensions.
///
/// Both values must be finite, positive and whole.
pub fn validate_resize_target(width: f64, height: f64) -> Result<(u32, u32), EditError> {
    let valid = |v: f64| v.is_finite() && v >= 1.0 && v.fract() == 0.0 && v <= u32::MAX as f64;
    if !valid(width) || !valid(height) {
        return Err(EditError::InvalidResizeTarget { width, height });
    }
    Ok((width as u32, height as u32))
}

/// Social media size presets offered by the resize tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizePreset {
    InstagramSquare,
    InstagramPortrait,
    InstagramStory,
    FacebookPost,
    TwitterPost,
}

impl ResizePreset {
    /// All presets in display order.
    pub const ALL: [ResizePreset; 5] = [
        ResizePreset::InstagramSquare,
        ResizePreset::InstagramPortrait,
        ResizePreset::InstagramStory,
        ResizePreset::FacebookPost,
        ResizePreset::TwitterPost,
    ];

    /// Target `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ResizePreset::InstagramSquare => (1080, 1080),
            ResizePreset::InstagramPortrait => (1080, 1350),
            ResizePreset::InstagramStory => (1080, 1920),
            ResizePreset::FacebookPost => (1200, 630),
            ResizePreset::TwitterPost => (1600, 900),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ResizePreset::InstagramSquare => "IG Square",
            ResizePreset::InstagramPortrait => "IG Portrait",
            ResizePreset::InstagramStory => "IG Story",
            ResizePreset::FacebookPost => "Facebook Post",
            ResizePreset::TwitterPost => "Twitter Post",
        }
    }
}

/// Resize a raster to one of the [`ResizePreset`] sizes.
pub fn resize_to_preset(
    image: &RasterImage,
    preset: ResizePreset,
) -> Result<RasterImage, EditError> {
    let (width, height) = preset.dimensions();
    resize(image, width, height, FilterType::Bilinear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions_is_copy() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let img = create_test_image(40, 10);
        let resized = resize(&img, 10, 40, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 10);
        assert_eq!(resized.height, 40);
    }

    #[test]
    fn test_resize_upscale() {
        let img = create_test_image(50, 25);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_uniform_color_preserved() {
        let img = RasterImage::new(8, 8, [10u8, 20, 30, 255].repeat(64));
        let resized = resize(&img, 3, 5, FilterType::Bilinear).unwrap();

        for px in resized.pixels.chunks_exact(4) {
            assert_eq!(px, &[10, 20, 30, 255]);
        }
    }

    #[test]
    fn test_resize_keeps_alpha_channel() {
        let img = RasterImage::new(4, 4, [0u8, 0, 0, 0].repeat(16));
        let resized = resize(&img, 2, 2, FilterType::Bilinear).unwrap();
        assert!(resized.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(matches!(
            resize(&img, 0, 50, FilterType::Bilinear),
            Err(EditError::InvalidResizeTarget { width, height }) if width == 0.0 && height == 50.0
        ));
        let err = resize(&img, 50, 0, FilterType::Bilinear).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_resize_huge_target_is_error() {
        let img = create_test_image(2, 2);
        let result = resize(&img, 3_000_000_000, 3_000_000_000, FilterType::Nearest);
        assert!(matches!(
            result,
            Err(EditError::AllocationFailed { width: 3_000_000_000, height: 3_000_000_000 })
        ));
        // The source is untouched and still usable.
        assert_eq!(resize(&img, 1, 1, FilterType::Nearest).unwrap().pixels.len(), 4);
    }

    #[test]
    fn test_validate_resize_target() {
        assert_eq!(validate_resize_target(1080.0, 1350.0).unwrap(), (1080, 1350));
        assert!(validate_resize_target(0.0, 10.0).is_err());
        assert!(validate_resize_target(10.0, -5.0).is_err());
        assert!(validate_resize_target(10.5, 10.0).is_err());
        assert!(validate_resize_target(f64::NAN, 10.0).is_err());
        assert!(validate_resize_target(10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_preset_dimensions() {
        assert_eq!(ResizePreset::InstagramSquare.dimensions(), (1080, 1080));
        assert_eq!(ResizePreset::InstagramPortrait.dimensions(), (1080, 1350));
        assert_eq!(ResizePreset::InstagramStory.dimensions(), (1080, 1920));
        assert_eq!(ResizePreset::FacebookPost.dimensions(), (1200, 630));
        assert_eq!(ResizePreset::TwitterPost.dimensions(), (1600, 900));
    }

    #[test]
    fn test_preset_labels_unique() {
        let mut labels: Vec<_> = ResizePreset::ALL.iter().map(|p| p.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), ResizePreset::ALL.len());
    }

    #[test]
    fn test_resize_to_preset() {
        let img = create_test_image(64, 48);
        let resized = resize_to_preset(&img, ResizePreset::FacebookPost).unwrap();
        assert_eq!((resized.width, resized.height), (1200, 630));
    }
}
