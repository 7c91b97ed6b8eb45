//! Mask painting WASM bindings.
//!
//! The UI forwards pointer and touch events from the displayed image to a
//! `MaskPainter`, draws `mask_pixels()` on its overlay canvas, and uploads
//! `export_png_data_url()` next to the image when the user applies the tool.

use crate::to_js_error;
use pixelmend_core::geometry::{self, Rect};
use pixelmend_core::mask::{BrushConfig, MaskMode, PointerEvent, PointerPhase, Viewport};
use wasm_bindgen::prelude::*;

/// Mask painting session for one tool on one image.
#[wasm_bindgen]
pub struct MaskPainter {
    inner: pixelmend_core::MaskPainter,
    viewport: Viewport,
}

#[wasm_bindgen]
impl MaskPainter {
    /// Start a session for the tool `mode` (`remove`, `background-blur`
    /// or `change-color`) on a `width x height` image.
    ///
    /// # Errors
    /// Fails for an unknown tool or when the mask cannot be allocated.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, width: u32, height: u32) -> Result<MaskPainter, JsValue> {
        let mode = MaskMode::from_tool_name(mode)
            .ok_or_else(|| to_js_error(format!("'{mode}' is not a masking tool")))?;
        let inner = pixelmend_core::MaskPainter::new(mode, width, height).map_err(to_js_error)?;
        Ok(Self {
            inner,
            viewport: unset_viewport(width, height),
        })
    }

    /// Brush width in on-screen pixels
    #[wasm_bindgen(getter)]
    pub fn brush_width(&self) -> f64 {
        self.inner.brush().base_width
    }

    /// Set the brush width; takes effect on the next stroke
    #[wasm_bindgen(setter)]
    pub fn set_brush_width(&mut self, value: f64) {
        self.inner.set_brush(BrushConfig { base_width: value });
    }

    /// Mask width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.mask().width()
    }

    /// Mask height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.mask().height()
    }

    /// Update where the image is shown.
    ///
    /// Pass the image element's `getBoundingClientRect()` and the current
    /// zoom. Call again after layout changes or zooming.
    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64, zoom: f64) {
        self.viewport = Viewport {
            bounding_box: Rect::new(left, top, width, height),
            natural_width: self.width(),
            natural_height: self.height(),
            zoom,
        };
    }

    /// Pointer pressed. Returns `true` if the mask changed.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> bool {
        self.handle(client_x, client_y, PointerPhase::Down)
    }

    /// Pointer moved. Returns `true` if the mask changed.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> bool {
        self.handle(client_x, client_y, PointerPhase::Move)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.handle(0.0, 0.0, PointerPhase::Up);
    }

    /// Pointer left the image element.
    pub fn pointer_leave(&mut self) {
        self.handle(0.0, 0.0, PointerPhase::Leave);
    }

    /// Whether a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.inner.is_drawing()
    }

    /// Whether nothing has been painted
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of pixels with any coverage
    pub fn painted_pixel_count(&self) -> usize {
        self.inner.mask().painted_pixel_count()
    }

    /// Erase the mask
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Start over on a new image of a different size
    pub fn reset_for_image(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner
            .reset_for_image(width, height)
            .map_err(to_js_error)?;
        self.viewport = unset_viewport(width, height);
        Ok(())
    }

    /// RGBA mask bytes for the overlay canvas
    pub fn mask_pixels(&self) -> Vec<u8> {
        self.inner.mask().pixels().to_vec()
    }

    /// Mask as PNG bytes.
    ///
    /// # Errors
    /// Fails when nothing has been painted.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.export_png().map_err(to_js_error)
    }

    /// Mask as a PNG data URL.
    ///
    /// # Errors
    /// Fails when nothing has been painted.
    pub fn export_png_data_url(&self) -> Result<String, JsValue> {
        self.inner.ensure_painted().map_err(to_js_error)?;
        pixelmend_core::encode_png_data_url(self.inner.mask().as_raster()).map_err(to_js_error)
    }
}

impl MaskPainter {
    fn handle(&mut self, client_x: f64, client_y: f64, phase: PointerPhase) -> bool {
        let event = PointerEvent::new(client_x, client_y, phase);
        self.inner.handle_event(event, &self.viewport)
    }
}

/// A viewport with no area, so events map nowhere until `set_viewport`.
fn unset_viewport(natural_width: u32, natural_height: u32) -> Viewport {
    Viewport {
        bounding_box: Rect::default(),
        natural_width,
        natural_height,
        zoom: 1.0,
    }
}

/// Map a client position over a displayed image to natural pixel
/// coordinates, as `[x, y]`, or `undefined` when it falls in the letterbox
/// or outside the image.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn map_pointer_to_image_space(
    client_x: f64,
    client_y: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    natural_width: u32,
    natural_height: u32,
) -> Option<Vec<f64>> {
    geometry::map_pointer_to_image_space(
        client_x,
        client_y,
        Rect::new(left, top, width, height),
        natural_width,
        natural_height,
    )
    .map(|p| vec![p.x, p.y])
}
