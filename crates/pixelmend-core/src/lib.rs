//! Pixelmend Core - local raster adjustment and masking engine
//!
//! This crate provides the pixel work behind the Pixelmend editor: rotation,
//! brightness/contrast/gamma, sharpening, cropping and resizing of RGBA
//! rasters, plus the pointer-to-pixel mapping and stroke rasterization used
//! to paint masks for the generative backend.

pub mod adjustments;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod transform;
pub mod transport;

pub use adjustments::{adjust, apply_sharpen, apply_tone, ToneLut};
pub use decode::{resize, DecodeError, FilterType, RasterImage, ResizePreset};
pub use encode::{encode_png, EncodeError};
pub use error::EditError;
pub use geometry::{map_pointer_to_image_space, Point, Rect, RenderGeometry, ScaleFactors};
pub use mask::{Mask, MaskMode, MaskPainter, MaskValue};
pub use transform::{apply_rotation, compute_rotated_bounds, crop, crop_displayed};
pub use transport::{decode_data_url, encode_png_data_url, DataUrl};

/// Adjustment settings chosen in the editor.
///
/// Fields are the slider values as the UI shows them. Missing fields
/// deserialize to their neutral value.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Brightness (0 to 200, neutral 100)
    pub brightness: f64,
    /// Contrast (0 to 200, neutral 100)
    pub contrast: f64,
    /// Gamma x 100 (10 to 300, neutral 100)
    pub gamma: f64,
    /// Sharpening amount (0 to 300, neutral 0)
    pub sharpness: f64,
    /// Rotation in degrees, clockwise (-180 to 180, neutral 0)
    pub angle: f64,
}

impl AdjustmentParams {
    /// The identity settings.
    pub const NEUTRAL: AdjustmentParams = AdjustmentParams {
        brightness: 100.0,
        contrast: 100.0,
        gamma: 100.0,
        sharpness: 0.0,
        angle: 0.0,
    };

    pub const BRIGHTNESS_RANGE: (f64, f64) = (0.0, 200.0);
    pub const CONTRAST_RANGE: (f64, f64) = (0.0, 200.0);
    pub const GAMMA_RANGE: (f64, f64) = (10.0, 300.0);
    pub const SHARPNESS_RANGE: (f64, f64) = (0.0, 300.0);
    pub const ANGLE_RANGE: (f64, f64) = (-180.0, 180.0);

    /// Create neutral adjustment settings.
    pub fn new() -> Self {
        Self::NEUTRAL
    }

    /// Check if every setting is neutral.
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Check if the per-pixel tone settings are neutral.
    pub fn is_tone_neutral(&self) -> bool {
        self.brightness == Self::NEUTRAL.brightness
            && self.contrast == Self::NEUTRAL.contrast
            && self.gamma == Self::NEUTRAL.gamma
    }

    /// Reject settings outside their slider range, including NaN.
    pub fn validate(&self) -> Result<(), EditError> {
        let checks = [
            ("brightness", self.brightness, Self::BRIGHTNESS_RANGE),
            ("contrast", self.contrast, Self::CONTRAST_RANGE),
            ("gamma", self.gamma, Self::GAMMA_RANGE),
            ("sharpness", self.sharpness, Self::SHARPNESS_RANGE),
            ("angle", self.angle, Self::ANGLE_RANGE),
        ];

        for (name, value, (min, max)) in checks {
            if !(value >= min && value <= max) {
                log::warn!("rejecting {} = {} (allowed {}..={})", name, value, min, max);
                return Err(EditError::InvalidParameter {
                    name,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
