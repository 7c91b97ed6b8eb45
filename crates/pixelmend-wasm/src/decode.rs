//! Image decoding and resizing WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG or PNG bytes with EXIF orientation applied
//! - [`decode_data_url`] - Decode a `data:` URL or bare base64 payload
//! - [`resize`] - Resize to exact dimensions
//! - [`resize_to_preset`] - Resize to a social media preset
//! - [`validate_resize_target`] - Check user-typed resize dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_data_url, resize_to_preset } from '@pixelmend/wasm';
//!
//! const image = decode_data_url(reader.result as string);
//! const story = resize_to_preset(image, 'instagram-story');
//! ```

use crate::to_js_error;
use crate::types::{filter_from_u8, JsRasterImage};
use pixelmend_core::decode::{self, ResizePreset};
use wasm_bindgen::prelude::*;

/// Decode image bytes (JPEG or PNG) to RGBA.
///
/// The format is detected from the content. EXIF orientation is applied so
/// the result matches what the browser displays.
///
/// # Errors
/// Fails for unrecognized or corrupted payloads.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Decode a `data:<mime>;base64,<payload>` URL, or bare base64, to RGBA.
///
/// # Example
///
/// ```typescript
/// const reader = new FileReader();
/// reader.onload = () => {
///   const image = decode_data_url(reader.result as string);
/// };
/// reader.readAsDataURL(file);
/// ```
#[wasm_bindgen]
pub fn decode_data_url(data_url: &str) -> Result<JsRasterImage, JsValue> {
    pixelmend_core::decode_data_url(data_url)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Resize an image to exact dimensions.
///
/// Aspect ratio is not preserved.
///
/// # Arguments
///
/// * `image` - The source image
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - 0=Nearest, 1=Bilinear (default), 2=Lanczos3
///
/// # Errors
/// Fails when width or height is zero, or when the result is too large to
/// allocate.
#[wasm_bindgen]
pub fn resize(
    image: &JsRasterImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    decode::resize(image.raster(), width, height, filter_from_u8(filter))
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Resize an image to a named preset.
///
/// Presets: `instagram-square` (1080x1080), `instagram-portrait`
/// (1080x1350), `instagram-story` (1080x1920), `facebook-post` (1200x630),
/// `twitter-post` (1600x900).
#[wasm_bindgen]
pub fn resize_to_preset(image: &JsRasterImage, preset: JsValue) -> Result<JsRasterImage, JsValue> {
    let preset: ResizePreset = serde_wasm_bindgen::from_value(preset).map_err(to_js_error)?;
    decode::resize_to_preset(image.raster(), preset)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Validate resize dimensions typed by the user.
///
/// Returns `[width, height]` as integers, or an error when either value is
/// not a positive whole number.
#[wasm_bindgen]
pub fn validate_resize_target(width: f64, height: f64) -> Result<Vec<u32>, JsValue> {
    let (w, h) = decode::validate_resize_target(width, height).map_err(to_js_error)?;
    Ok(vec![w, h])
}
