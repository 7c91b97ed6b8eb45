//! Image encoding WASM bindings.
//!
//! Results and masks leave the engine as lossless PNG, either as bytes or as
//! a `data:image/png;base64,...` URL ready for an `<img>` or an upload body.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png_data_url } from '@pixelmend/wasm';
//!
//! preview.src = encode_png_data_url(adjusted);
//! ```

use crate::to_js_error;
use crate::types::JsRasterImage;
use pixelmend_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to PNG bytes.
///
/// # Example
///
/// ```typescript
/// const png = encode_png(image);
/// const blob = new Blob([png], { type: 'image/png' });
/// ```
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.raster()).map_err(to_js_error)
}

/// Encode an image as a `data:image/png;base64,...` URL.
#[wasm_bindgen]
pub fn encode_png_data_url(image: &JsRasterImage) -> Result<String, JsValue> {
    pixelmend_core::encode_png_data_url(image.raster()).map_err(to_js_error)
}
