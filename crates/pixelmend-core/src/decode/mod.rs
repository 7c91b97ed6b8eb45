//! Raster decoding and resampling for Pixelmend.
//!
//! This module provides:
//! - The `RasterImage` RGBA8 buffer type shared by every operation
//! - Decoding of encoded sources (PNG intermediates, JPEG uploads)
//! - Exact-dimension resampling and the resize presets
//!
//! # Architecture
//!
//! All operations are synchronous and single-threaded. They borrow their
//! input and return a freshly allocated raster.
//!
//! # Examples
//!
//! ```ignore
//! use pixelmend_core::decode::{decode_image, resize, FilterType};
//!
//! let image = decode_image(&bytes)?;
//! let small = resize(&image, 1080, 1080, FilterType::Bilinear)?;
//! ```

mod resize;
mod source;
mod types;

pub use resize::{resize, resize_to_preset, validate_resize_target, ResizePreset};
pub use source::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{byte_len, DecodeError, FilterType, Orientation, RasterImage, CHANNELS};
