//! Freehand masks for region-based generative edits
//!
//! A mask is an RGBA raster with the same dimensions as the image it marks.
//! Each pixel is one of three states:
//!
//! - **Unpainted**: alpha 0
//! - **Primary**: red, marks a region to remove
//! - **Secondary**: white, marks a region to keep in focus or recolor
//!
//! Strokes are painted by [`MaskPainter`] from pointer events and the mask is
//! exported as PNG next to the image for the generative backend.

mod brush;
mod painter;

pub use brush::paint_segment;
pub use painter::{BrushConfig, MaskPainter, PainterState, PointerEvent, PointerPhase, Viewport};

use serde::{Deserialize, Serialize};

use crate::decode::{RasterImage, CHANNELS};
use crate::encode::{encode_png, EncodeError};
use crate::error::EditError;
use crate::geometry::Point;

/// The editing tool a mask is painted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskMode {
    /// Paint what the backend should erase.
    Remove,
    /// Paint the subject to keep sharp while the background is blurred.
    #[serde(alias = "background-blur")]
    KeepInFocus,
    /// Paint the object whose color should change.
    #[serde(alias = "change-color")]
    RecolorTarget,
}

impl MaskMode {
    /// Map an editor tool name to its mask mode, `None` for non-masking tools.
    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name {
            "remove" => Some(MaskMode::Remove),
            "background-blur" | "keep-in-focus" => Some(MaskMode::KeepInFocus),
            "change-color" | "recolor-target" => Some(MaskMode::RecolorTarget),
            _ => None,
        }
    }

    /// Opaque stroke color.
    pub fn color(self) -> [u8; 4] {
        match self {
            MaskMode::Remove => [255, 0, 0, 255],
            MaskMode::KeepInFocus | MaskMode::RecolorTarget => [255, 255, 255, 255],
        }
    }

    /// Value a stroke in this mode leaves behind.
    pub fn value(self) -> MaskValue {
        match self {
            MaskMode::Remove => MaskValue::Primary,
            MaskMode::KeepInFocus | MaskMode::RecolorTarget => MaskValue::Secondary,
        }
    }
}

/// State of a single mask pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskValue {
    Unpainted,
    Primary,
    Secondary,
}

/// One continuous stroke in natural pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Every mapped point since pointer down, oldest first.
    pub points: Vec<Point>,
    /// Line width in natural pixels.
    pub width: f64,
    pub color: [u8; 4],
}

impl Stroke {
    pub fn new(start: Point, width: f64, color: [u8; 4]) -> Self {
        Self {
            points: vec![start],
            width,
            color,
        }
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// A mask raster aligned with its source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    raster: RasterImage,
}

impl Mask {
    /// Create an unpainted mask.
    pub fn new(width: u32, height: u32) -> Result<Self, EditError> {
        Ok(Self {
            raster: RasterImage::transparent(width, height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.raster.width
    }

    pub fn height(&self) -> u32 {
        self.raster.height
    }

    /// RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.raster.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.raster.pixels
    }

    pub fn as_raster(&self) -> &RasterImage {
        &self.raster
    }

    pub fn into_raster(self) -> RasterImage {
        self.raster
    }

    /// Erase everything, keeping the dimensions.
    pub fn clear(&mut self) {
        self.raster.pixels.fill(0);
    }

    /// True when no channel of any pixel is non-zero.
    pub fn is_empty(&self) -> bool {
        self.raster.pixels.iter().all(|&v| v == 0)
    }

    /// Fail with a validation error when nothing has been painted.
    pub fn ensure_painted(&self) -> Result<(), EditError> {
        if self.is_empty() {
            return Err(EditError::EmptyMask);
        }
        Ok(())
    }

    /// Classify the pixel at `(x, y)`, `None` outside the mask.
    pub fn value_at(&self, x: u32, y: u32) -> Option<MaskValue> {
        let px = self.raster.pixel(x, y)?;
        Some(if px[3] == 0 {
            MaskValue::Unpainted
        } else if px[1] == 0 && px[2] == 0 {
            MaskValue::Primary
        } else {
            MaskValue::Secondary
        })
    }

    /// Number of pixels with any coverage.
    pub fn painted_pixel_count(&self) -> usize {
        self.raster
            .pixels
            .chunks_exact(CHANNELS)
            .filter(|px| px[3] != 0)
            .count()
    }

    /// Encode as PNG for the generative backend.
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        encode_png(&self.raster)
    }
}
