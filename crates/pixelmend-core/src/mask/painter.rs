//! Pointer-driven mask painting.
//!
//! [`MaskPainter`] turns a stream of pointer events over the displayed image
//! into strokes on a [`Mask`]. It is a two-state machine:
//!
//! ```text
//! Idle --down(mapped)--> Drawing
//! Drawing --move(mapped)--> Drawing (segment painted)
//! Drawing --move(unmapped) | up | leave--> Idle
//! ```
//!
//! Every event carries the current [`Viewport`], so layout changes and zoom
//! between events are picked up without extra calls.

use serde::{Deserialize, Serialize};

use super::brush::paint_segment;
use super::{Mask, MaskMode, Stroke};
use crate::error::EditError;
use crate::geometry::{map_pointer_to_image_space, Point, Rect, RenderGeometry};

/// Brush settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Stroke width in on-screen pixels.
    pub base_width: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self { base_width: 20.0 }
    }
}

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
}

/// A pointer or touch sample in client (display) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64, phase: PointerPhase) -> Self {
        Self {
            client_x,
            client_y,
            phase,
        }
    }
}

/// Where and how large the image is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// On-screen rectangle of the image element, already scaled by zoom.
    pub bounding_box: Rect,
    pub natural_width: u32,
    pub natural_height: u32,
    pub zoom: f64,
}

impl Viewport {
    /// Map a client position to natural pixel coordinates.
    pub fn map(&self, client_x: f64, client_y: f64) -> Option<Point> {
        map_pointer_to_image_space(
            client_x,
            client_y,
            self.bounding_box,
            self.natural_width,
            self.natural_height,
        )
    }

    /// Natural pixels per on-screen pixel.
    ///
    /// The bounding box is measured after zoom, so a brush sized with this
    /// factor keeps its on-screen thickness at any zoom.
    pub fn natural_per_display_pixel(&self) -> Option<f64> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return None;
        }
        let geometry = RenderGeometry::contain(
            self.natural_width as f64,
            self.natural_height as f64,
            self.bounding_box.width,
            self.bounding_box.height,
            1.0,
        )?;
        Some(self.natural_width as f64 / geometry.rendered_width)
    }
}

/// Painter state.
#[derive(Debug, Clone, PartialEq)]
pub enum PainterState {
    Idle,
    Drawing(Stroke),
}

/// Accumulates freehand strokes into a mask for one mode on one image.
#[derive(Debug, Clone)]
pub struct MaskPainter {
    mask: Mask,
    mode: MaskMode,
    brush: BrushConfig,
    state: PainterState,
}

impl MaskPainter {
    /// Start a painting session with an empty `width x height` mask.
    pub fn new(mode: MaskMode, width: u32, height: u32) -> Result<Self, EditError> {
        Ok(Self {
            mask: Mask::new(width, height)?,
            mode,
            brush: BrushConfig::default(),
            state: PainterState::Idle,
        })
    }

    pub fn with_brush(mut self, brush: BrushConfig) -> Self {
        self.brush = brush;
        self
    }

    /// Change the brush; a stroke in progress keeps its width.
    pub fn set_brush(&mut self, brush: BrushConfig) {
        self.brush = brush;
    }

    pub fn mode(&self) -> MaskMode {
        self.mode
    }

    pub fn brush(&self) -> BrushConfig {
        self.brush
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn state(&self) -> &PainterState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, PainterState::Drawing(_))
    }

    /// Feed one pointer event.
    ///
    /// # Returns
    ///
    /// `true` if the mask changed.
    pub fn handle_event(&mut self, event: PointerEvent, viewport: &Viewport) -> bool {
        match event.phase {
            PointerPhase::Down => {
                self.begin_stroke(event, viewport);
                false
            }
            PointerPhase::Move => self.extend_stroke(event, viewport),
            PointerPhase::Up | PointerPhase::Leave => {
                self.end_stroke();
                false
            }
        }
    }

    fn begin_stroke(&mut self, event: PointerEvent, viewport: &Viewport) {
        self.state = PainterState::Idle;

        let Some(start) = viewport.map(event.client_x, event.client_y) else {
            return;
        };
        let Some(scale) = viewport.natural_per_display_pixel() else {
            return;
        };

        let width = self.brush.base_width * scale;
        log::debug!(
            "stroke start at ({:.1}, {:.1}), width {:.2} ({:?})",
            start.x,
            start.y,
            width,
            self.mode
        );
        self.state = PainterState::Drawing(Stroke::new(start, width, self.mode.color()));
    }

    fn extend_stroke(&mut self, event: PointerEvent, viewport: &Viewport) -> bool {
        let PainterState::Drawing(stroke) = &mut self.state else {
            return false;
        };

        let Some(point) = viewport.map(event.client_x, event.client_y) else {
            self.end_stroke();
            return false;
        };

        let Some(from) = stroke.last_point() else {
            stroke.points.push(point);
            return false;
        };
        stroke.points.push(point);

        let (width, height) = (self.mask.width(), self.mask.height());
        paint_segment(
            self.mask.pixels_mut(),
            width,
            height,
            from,
            point,
            stroke.width,
            stroke.color,
        )
    }

    fn end_stroke(&mut self) {
        if let PainterState::Drawing(stroke) = &self.state {
            log::debug!("stroke end, {} points", stroke.points.len());
        }
        self.state = PainterState::Idle;
    }

    /// Erase the mask. Any stroke in progress continues on the blank mask.
    pub fn clear(&mut self) {
        self.mask.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Fail with `EditError::EmptyMask` when nothing has been painted.
    pub fn ensure_painted(&self) -> Result<(), EditError> {
        self.mask.ensure_painted()
    }

    /// Discard the mask and size a new one for a different image.
    pub fn reset_for_image(&mut self, width: u32, height: u32) -> Result<(), EditError> {
        self.mask = Mask::new(width, height)?;
        self.state = PainterState::Idle;
        Ok(())
    }

    /// Mask as PNG, rejecting an unpainted mask.
    pub fn export_png(&self) -> Result<Vec<u8>, EditError> {
        self.ensure_painted()?;
        Ok(self.mask.to_png()?)
    }

    /// Finish the session and take the mask.
    pub fn into_mask(self) -> Mask {
        self.mask
    }
}
