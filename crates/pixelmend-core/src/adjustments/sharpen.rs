//! 3x3 sharpening convolution.
//!
//! With strength `s = sharpness / 250` the kernel is
//!
//! ```text
//!  0   -s    0
//! -s  1+4s  -s
//!  0   -s    0
//! ```
//!
//! It reads from an immutable snapshot so already-sharpened neighbours never
//! feed back into the result. The outermost rows and columns are left as they
//! are in the snapshot.

use super::tone::store_channel;
use crate::decode::CHANNELS;

/// Sharpen the color channels of `pixels` in place.
///
/// # Arguments
///
/// * `pixels` - RGBA destination buffer (`width * height * 4` bytes)
/// * `snapshot` - Unmodified copy of `pixels` to read neighbours from
/// * `width`, `height` - Raster dimensions
/// * `sharpness` - Amount, 0 to 300; `<= 0` does nothing
///
/// Images narrower or shorter than 3 pixels have no interior and are left
/// unchanged. Alpha is never modified.
pub fn apply_sharpen(pixels: &mut [u8], snapshot: &[u8], width: u32, height: u32, sharpness: f64) {
    if sharpness.is_nan() || sharpness <= 0.0 || width < 3 || height < 3 {
        return;
    }

    let (w, h) = (width as usize, height as usize);
    let expected = w * h * CHANNELS;
    debug_assert_eq!(pixels.len(), expected, "Pixel buffer size mismatch");
    debug_assert_eq!(snapshot.len(), expected, "Snapshot size mismatch");
    if pixels.len() != expected || snapshot.len() != expected {
        return;
    }

    let s = sharpness / 250.0;
    let center = 1.0 + 4.0 * s;
    let stride = w * CHANNELS;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * stride + x * CHANNELS;
            for c in 0..3 {
                let i = idx + c;
                let neighbours = snapshot[i - stride] as f64
                    + snapshot[i + stride] as f64
                    + snapshot[i - CHANNELS] as f64
                    + snapshot[i + CHANNELS] as f64;
                pixels[i] = store_channel(center * snapshot[i] as f64 - s * neighbours);
            }
        }
    }
}
