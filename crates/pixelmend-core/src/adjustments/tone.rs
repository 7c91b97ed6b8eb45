//! Brightness, contrast and gamma as a 256-entry lookup table.
//!
//! Each color channel passes through two stages whose results are stored
//! back to 8 bits in between, exactly like writes into a clamped 8-bit
//! canvas buffer:
//!
//! ```text
//! v'  = clamp((v - 128) * contrast/100 + 128 + (brightness - 100))
//! v'' = clamp((v' / 255) ^ (100 / gamma) * 255)
//! ```
//!
//! The mapping only depends on the input byte, so it is evaluated once per
//! possible value and then applied with table lookups.

use crate::AdjustmentParams;

/// Store a channel value the way a clamped 8-bit buffer does: clamp to
/// `0..=255`, round to nearest with ties to even. NaN stores as 0.
#[inline]
pub(crate) fn store_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Precomputed tone mapping: `lut[input] = output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneLut {
    pub lut: [u8; 256],
}

impl ToneLut {
    /// Build the table for the tone part of `params`.
    pub fn from_params(params: &AdjustmentParams) -> Self {
        if params.is_tone_neutral() {
            return Self::identity();
        }

        let contrast = params.contrast / 100.0;
        let offset = params.brightness - 100.0;
        let apply_gamma = params.gamma != AdjustmentParams::NEUTRAL.gamma;
        let exponent = 1.0 / (params.gamma / 100.0);

        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            let v = i as f64;
            let mut out = store_channel((v - 128.0) * contrast + 128.0 + offset);
            if apply_gamma {
                out = store_channel((out as f64 / 255.0).powf(exponent) * 255.0);
            }
            *lut_value = out;
        }

        Self { lut }
    }

    /// Create identity LUT (no change).
    pub fn identity() -> Self {
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            *lut_value = i as u8;
        }
        Self { lut }
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    /// Map the color channels of RGBA `pixels` in place; alpha is untouched.
    pub fn apply(&self, pixels: &mut [u8]) {
        if self.is_identity() {
            return;
        }

        for chunk in pixels.chunks_exact_mut(4) {
            chunk[0] = self.lut[chunk[0] as usize];
            chunk[1] = self.lut[chunk[1] as usize];
            chunk[2] = self.lut[chunk[2] as usize];
        }
    }
}

impl Default for ToneLut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Apply brightness, contrast and gamma to RGBA pixel data in place.
///
/// Skipped entirely when the three tone settings are neutral.
///
/// # Example
///
/// ```ignore
/// use pixelmend_core::{apply_tone, AdjustmentParams};
///
/// let mut pixels = vec![128, 128, 128, 255];
/// let params = AdjustmentParams { brightness: 150.0, ..AdjustmentParams::NEUTRAL };
/// apply_tone(&mut pixels, &params);
/// assert_eq!(pixels, vec![178, 178, 178, 255]);
/// ```
pub fn apply_tone(pixels: &mut [u8], params: &AdjustmentParams) {
    if params.is_tone_neutral() {
        return;
    }
    ToneLut::from_params(params).apply(pixels);
}
