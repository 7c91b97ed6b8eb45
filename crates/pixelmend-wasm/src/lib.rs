//! Pixelmend WASM - WebAssembly bindings for Pixelmend
//!
//! This crate exposes the pixelmend-core editing engine to the browser UI
//! shell.
//!
//! # Module Structure
//!
//! - `adjustments` - Brightness, contrast, gamma, sharpness and rotation
//! - `types` - WASM-compatible wrapper types for raster data
//! - `decode` - Decoding from bytes or data URLs, resizing
//! - `encode` - PNG and PNG data URL export
//! - `transform` - Crop and standalone rotation
//! - `mask` - Pointer-driven mask painting
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_data_url, AdjustmentParams, apply_adjustments } from '@pixelmend/wasm';
//!
//! await init();
//!
//! const image = decode_data_url(dataUrl);
//! const params = new AdjustmentParams();
//! params.brightness = 120;
//! const adjusted = apply_adjustments(image, params);
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod encode;
mod mask;
mod transform;
mod types;

pub use adjustments::{apply_adjustments, AdjustmentParams};
pub use decode::{decode_data_url, decode_image, resize, resize_to_preset, validate_resize_target};
pub use encode::{encode_png, encode_png_data_url};
pub use mask::{map_pointer_to_image_space, MaskPainter};
pub use transform::{apply_crop, apply_rotation, compute_rotated_bounds};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // A second init (hot reload) finds the logger already installed.
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already initialized");
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert a core error into a JavaScript `Error`.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
