//! Error type for raster editing operations.
//!
//! Validation errors are recoverable and reported to the UI shell; an
//! allocation failure aborts the current operation only. No variant leaves a
//! caller-visible raster half-updated.

use thiserror::Error;

use crate::decode::{byte_len, DecodeError};
use crate::encode::EncodeError;

/// Errors produced by the editing operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// An adjustment parameter is outside its accepted range.
    #[error("Parameter {name} = {value} is outside {min}..={max}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Resize targets must be positive whole numbers.
    #[error(
        "Invalid resize target {width}x{height}: width and height must be positive whole numbers"
    )]
    InvalidResizeTarget { width: f64, height: f64 },

    /// The image's on-screen size must be positive to map display coordinates.
    #[error("Displayed size {width}x{height} must be positive")]
    InvalidDisplaySize { width: f64, height: f64 },

    /// The crop rectangle resolves to zero area.
    #[error("Crop rectangle has zero area")]
    EmptyCrop,

    /// A mask-dependent action was requested with nothing painted.
    #[error("Mask is empty: paint over the area to edit first")]
    EmptyMask,

    /// The output buffer could not be allocated.
    #[error("Failed to allocate a {width}x{height} RGBA buffer")]
    AllocationFailed { width: u32, height: u32 },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl EditError {
    /// True for errors caused by user input rather than resources or payloads.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EditError::InvalidParameter { .. }
                | EditError::InvalidResizeTarget { .. }
                | EditError::InvalidDisplaySize { .. }
                | EditError::EmptyCrop
                | EditError::EmptyMask
        )
    }
}

/// Allocate a zeroed RGBA buffer for a `width x height` raster.
///
/// Reports failure instead of aborting the process, so an oversized rotation
/// canvas or mask fails only the operation that requested it.
pub(crate) fn alloc_pixels(width: u32, height: u32) -> Result<Vec<u8>, EditError> {
    let len = byte_len(width, height).ok_or(EditError::AllocationFailed { width, height })?;
    let mut pixels = Vec::new();
    if pixels.try_reserve_exact(len).is_err() {
        log::warn!("allocation of {}x{} RGBA buffer failed", width, height);
        return Err(EditError::AllocationFailed { width, height });
    }
    pixels.resize(len, 0);
    Ok(pixels)
}

/// Clone a buffer, reporting allocation failure.
pub(crate) fn try_clone_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, EditError> {
    let mut copy = Vec::new();
    if copy.try_reserve_exact(pixels.len()).is_err() {
        log::warn!("snapshot of {}x{} RGBA buffer failed", width, height);
        return Err(EditError::AllocationFailed { width, height });
    }
    copy.extend_from_slice(pixels);
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_pixels_zeroed() {
        let pixels = alloc_pixels(3, 2).unwrap();
        assert_eq!(pixels.len(), 24);
        assert!(pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_alloc_pixels_overflow_is_error() {
        // u32::MAX^2 * 4 overflows usize on every target.
        let result = alloc_pixels(u32::MAX, u32::MAX);
        assert!(matches!(result, Err(EditError::AllocationFailed { .. })));
    }

    #[test]
    fn test_try_clone_pixels() {
        let src = vec![1u8, 2, 3, 4];
        assert_eq!(try_clone_pixels(&src, 1, 1).unwrap(), src);
    }

    #[test]
    fn test_validation_classification() {
        assert!(EditError::EmptyMask.is_validation());
        assert!(EditError::EmptyCrop.is_validation());
        assert!(EditError::InvalidDisplaySize {
            width: 0.0,
            height: 10.0
        }
        .is_validation());
        assert!(!EditError::AllocationFailed {
            width: 1,
            height: 1
        }
        .is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = EditError::InvalidResizeTarget {
            width: 0.0,
            height: 10.5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid resize target 0x10.5: width and height must be positive whole numbers"
        );
    }
}
