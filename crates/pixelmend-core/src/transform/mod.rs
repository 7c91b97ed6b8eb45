//! Geometric raster transforms: rotation and cropping.
//!
//! # Transform Order
//!
//! Within [`crate::adjustments::adjust`] rotation runs first, before tone
//! mapping and sharpening. Cropping is a separate operation the UI applies to
//! an already adjusted raster.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop rectangles are in display coordinates plus display-to-natural
//!   scale factors
//! - Origin is top-left corner

mod crop;
mod rotation;
mod sample;

pub use crop::{crop, crop_displayed};
pub use rotation::{apply_rotation, compute_rotated_bounds};
