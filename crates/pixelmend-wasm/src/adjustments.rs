//! Adjustment WASM bindings.
//!
//! This module exposes the slider settings and the adjustment pipeline so the
//! editor can re-render its preview whenever a slider moves.

use crate::to_js_error;
use crate::types::JsRasterImage;
use wasm_bindgen::prelude::*;

/// Adjustment settings wrapper for JavaScript
#[wasm_bindgen]
pub struct AdjustmentParams {
    inner: pixelmend_core::AdjustmentParams,
}

#[wasm_bindgen]
impl AdjustmentParams {
    /// Create settings at their neutral values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: pixelmend_core::AdjustmentParams::new(),
        }
    }

    /// Get brightness (0 to 200)
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.inner.brightness
    }

    /// Set brightness
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f64) {
        self.inner.brightness = value;
    }

    /// Get contrast (0 to 200)
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f64 {
        self.inner.contrast
    }

    /// Set contrast
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f64) {
        self.inner.contrast = value;
    }

    /// Get gamma x 100 (10 to 300)
    #[wasm_bindgen(getter)]
    pub fn gamma(&self) -> f64 {
        self.inner.gamma
    }

    /// Set gamma
    #[wasm_bindgen(setter)]
    pub fn set_gamma(&mut self, value: f64) {
        self.inner.gamma = value;
    }

    /// Get sharpness (0 to 300)
    #[wasm_bindgen(getter)]
    pub fn sharpness(&self) -> f64 {
        self.inner.sharpness
    }

    /// Set sharpness
    #[wasm_bindgen(setter)]
    pub fn set_sharpness(&mut self, value: f64) {
        self.inner.sharpness = value;
    }

    /// Get rotation angle in degrees, clockwise
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.angle
    }

    /// Set rotation angle
    #[wasm_bindgen(setter)]
    pub fn set_angle(&mut self, value: f64) {
        self.inner.angle = value;
    }

    /// Check if every setting is neutral
    pub fn is_neutral(&self) -> bool {
        self.inner.is_neutral()
    }

    /// Reset every setting to neutral
    pub fn reset(&mut self) {
        self.inner = pixelmend_core::AdjustmentParams::NEUTRAL;
    }

    /// Serialize to a plain object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain object; missing fields are neutral
    pub fn from_json(value: JsValue) -> Result<AdjustmentParams, JsValue> {
        let inner: pixelmend_core::AdjustmentParams =
            serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjustmentParams {
    pub(crate) fn inner(&self) -> &pixelmend_core::AdjustmentParams {
        &self.inner
    }
}

/// Apply all adjustments to an image.
///
/// The source image is left untouched; a new image is returned. With a
/// non-zero angle the result is larger than the source and its uncovered
/// corners are transparent.
///
/// # Errors
/// Fails when a setting is out of range or the output cannot be allocated.
///
/// # Example (TypeScript)
/// ```typescript
/// const params = new AdjustmentParams();
/// params.contrast = 140;
/// params.angle = 15;
///
/// const adjusted = apply_adjustments(sourceImage, params);
/// ctx.putImageData(new ImageData(new Uint8ClampedArray(adjusted.pixels()), adjusted.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(
    image: &JsRasterImage,
    params: &AdjustmentParams,
) -> Result<JsRasterImage, JsValue> {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::time_with_label("apply_adjustments");

    let result = pixelmend_core::adjust(image.raster(), params.inner());

    #[cfg(target_arch = "wasm32")]
    web_sys::console::time_end_with_label("apply_adjustments");

    result.map(JsRasterImage::from_raster).map_err(to_js_error)
}
