//! Raster encoding for Pixelmend.
//!
//! Only PNG is produced: every raster that leaves the core (adjusted
//! images, crops, masks) must stay lossless until final export.
//!
//! # Examples
//!
//! ```ignore
//! use pixelmend_core::encode::encode_png;
//!
//! let png_bytes = encode_png(&raster)?;
//! ```

mod png;

pub use png::{encode_png, encode_png_pixels, EncodeError};
