//! Display-space geometry: contain-fit letterboxing and pointer mapping.
//!
//! The UI shows the natural image scaled to fit inside a layout box while
//! preserving its aspect ratio ("contain" fit), leaving empty margins on one
//! axis. Pointer positions arrive in that display space and must be mapped
//! back to natural pixel coordinates before they can touch a mask.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y axis pointing down
//! - Display coordinates are CSS pixels in the same space as the bounding box
//! - Natural coordinates are continuous pixel positions in `[0, w] x [0, h]`

use serde::{Deserialize, Serialize};

/// A point in display or natural space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width x height` image.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Containment test with inclusive edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// Ratio of natural to displayed size on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ScaleFactors {
    /// The display rectangle is already in natural pixels.
    pub const IDENTITY: ScaleFactors = ScaleFactors {
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub const fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Scale factors for an image of natural size shown at display size.
    ///
    /// Returns `None` when a displayed dimension is not positive.
    pub fn from_dimensions(
        natural_width: f64,
        natural_height: f64,
        displayed_width: f64,
        displayed_height: f64,
    ) -> Option<Self> {
        if !(displayed_width > 0.0 && displayed_height > 0.0) {
            return None;
        }
        Some(Self::new(
            natural_width / displayed_width,
            natural_height / displayed_height,
        ))
    }

    /// Map a display rectangle into natural space.
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x * self.scale_x,
            rect.y * self.scale_y,
            rect.width * self.scale_x,
            rect.height * self.scale_y,
        )
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Placement of a contain-fitted image inside its layout box.
///
/// Offsets are relative to the box's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderGeometry {
    pub offset_x: f64,
    pub offset_y: f64,
    pub rendered_width: f64,
    pub rendered_height: f64,
}

impl RenderGeometry {
    /// Contain-fit a `natural_width x natural_height` image into a box,
    /// then scale it by `zoom` about the box center.
    ///
    /// Returns `None` for degenerate natural sizes, boxes, or zoom.
    pub fn contain(
        natural_width: f64,
        natural_height: f64,
        box_width: f64,
        box_height: f64,
        zoom: f64,
    ) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(natural_width)
            && valid(natural_height)
            && valid(box_width)
            && valid(box_height)
            && valid(zoom))
        {
            return None;
        }

        let natural_aspect = natural_width / natural_height;
        let box_aspect = box_width / box_height;

        let (fit_w, fit_h) = if natural_aspect > box_aspect {
            (box_width, box_width / natural_aspect)
        } else {
            (box_height * natural_aspect, box_height)
        };

        let rendered_width = fit_w * zoom;
        let rendered_height = fit_h * zoom;

        Some(Self {
            offset_x: (box_width - rendered_width) / 2.0,
            offset_y: (box_height - rendered_height) / 2.0,
            rendered_width,
            rendered_height,
        })
    }

    /// The rendered image rectangle in the coordinate space of a box whose
    /// top-left corner sits at `(origin_x, origin_y)`.
    pub fn rendered_rect(&self, origin_x: f64, origin_y: f64) -> Rect {
        Rect::new(
            origin_x + self.offset_x,
            origin_y + self.offset_y,
            self.rendered_width,
            self.rendered_height,
        )
    }
}

/// Map a pointer position to natural image coordinates.
///
/// `bounding_box` is the on-screen rectangle of the displayed image element
/// as reported by layout, so it already reflects any zoom. The image is
/// contain-fitted inside it.
///
/// # Returns
///
/// `None` when the pointer lies outside the rendered (letterboxed) image or
/// when the box or natural size is degenerate. Edges are inclusive.
///
/// # Example
///
/// ```ignore
/// use pixelmend_core::geometry::{map_pointer_to_image_space, Rect};
///
/// let bbox = Rect::new(0.0, 0.0, 400.0, 400.0);
/// let p = map_pointer_to_image_space(200.0, 200.0, bbox, 200, 100).unwrap();
/// assert_eq!((p.x, p.y), (100.0, 50.0));
/// ```
pub fn map_pointer_to_image_space(
    client_x: f64,
    client_y: f64,
    bounding_box: Rect,
    natural_width: u32,
    natural_height: u32,
) -> Option<Point> {
    let geometry = RenderGeometry::contain(
        natural_width as f64,
        natural_height as f64,
        bounding_box.width,
        bounding_box.height,
        1.0,
    )?;
    let rendered = geometry.rendered_rect(bounding_box.x, bounding_box.y);

    let pointer = Point::new(client_x, client_y);
    if !rendered.contains(pointer) {
        return None;
    }

    let rel_x = (client_x - rendered.x) / rendered.width;
    let rel_y = (client_y - rendered.y) / rendered.height;

    Some(Point::new(
        rel_x * natural_width as f64,
        rel_y * natural_height as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_point_maps_to_natural_center() {
        let bbox = Rect::new(0.0, 0.0, 400.0, 400.0);
        let p = map_pointer_to_image_space(200.0, 200.0, bbox, 200, 100).unwrap();
        assert_eq!(p, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_letterbox_margin_is_out_of_bounds() {
        // 200x100 in 400x400: rendered 400x200 at y = 100..300
        let bbox = Rect::new(0.0, 0.0, 400.0, 400.0);
        assert!(map_pointer_to_image_space(200.0, 50.0, bbox, 200, 100).is_none());
        assert!(map_pointer_to_image_space(200.0, 350.0, bbox, 200, 100).is_none());
        assert!(map_pointer_to_image_space(-1.0, 200.0, bbox, 200, 100).is_none());
    }

    #[test]
    fn test_edges_are_inclusive() {
        let bbox = Rect::new(0.0, 0.0, 400.0, 400.0);
        let top_left = map_pointer_to_image_space(0.0, 100.0, bbox, 200, 100).unwrap();
        let bottom_right = map_pointer_to_image_space(400.0, 300.0, bbox, 200, 100).unwrap();

        assert_eq!(top_left, Point::new(0.0, 0.0));
        assert_eq!(bottom_right, Point::new(200.0, 100.0));
    }

    #[test]
    fn test_tall_image_is_pillarboxed() {
        // 100x200 in 400x400: rendered 200x400 at x = 100..300
        let bbox = Rect::new(10.0, 20.0, 400.0, 400.0);
        assert!(map_pointer_to_image_space(50.0, 220.0, bbox, 100, 200).is_none());

        let p = map_pointer_to_image_space(110.0, 20.0, bbox, 100, 200).unwrap();
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_degenerate_inputs_return_none() {
        let bbox = Rect::new(0.0, 0.0, 0.0, 400.0);
        assert!(map_pointer_to_image_space(0.0, 0.0, bbox, 200, 100).is_none());

        let bbox = Rect::new(0.0, 0.0, 400.0, 400.0);
        assert!(map_pointer_to_image_space(200.0, 200.0, bbox, 0, 100).is_none());
    }

    #[test]
    fn test_zoomed_bounding_box() {
        // Layout box 400x400 zoomed 2x reports an 800x800 bounding box.
        let bbox = Rect::new(-200.0, -200.0, 800.0, 800.0);
        let p = map_pointer_to_image_space(200.0, 200.0, bbox, 200, 100).unwrap();
        assert_eq!(p, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_contain_geometry_with_zoom() {
        let g = RenderGeometry::contain(200.0, 100.0, 400.0, 400.0, 2.0).unwrap();
        assert_eq!(g.rendered_width, 800.0);
        assert_eq!(g.rendered_height, 400.0);
        assert_eq!(g.offset_x, -200.0);
        assert_eq!(g.offset_y, 0.0);
    }

    #[test]
    fn test_contain_rejects_bad_zoom() {
        assert!(RenderGeometry::contain(200.0, 100.0, 400.0, 400.0, 0.0).is_none());
        assert!(RenderGeometry::contain(200.0, 100.0, 400.0, 400.0, f64::NAN).is_none());
    }

    #[test]
    fn test_scale_factors_from_dimensions() {
        let s = ScaleFactors::from_dimensions(2000.0, 1000.0, 500.0, 250.0).unwrap();
        assert_eq!(s, ScaleFactors::new(4.0, 4.0));
        assert!(ScaleFactors::from_dimensions(10.0, 10.0, 0.0, 5.0).is_none());
        assert_eq!(ScaleFactors::default(), ScaleFactors::IDENTITY);
    }

    #[test]
    fn test_scale_factors_apply() {
        let s = ScaleFactors::new(2.0, 0.5);
        let r = s.apply(Rect::new(10.0, 10.0, 20.0, 40.0));
        assert_eq!(r, Rect::new(20.0, 5.0, 40.0, 20.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=5000, 1u32..=5000)
    }

    fn box_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f64..500.0, -500.0f64..500.0, 1.0f64..2000.0, 1.0f64..2000.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        /// Property: contain fit preserves the natural aspect ratio.
        #[test]
        fn prop_contain_preserves_aspect(
            (nw, nh) in dimensions_strategy(),
            bbox in box_strategy(),
            zoom in 0.1f64..8.0,
        ) {
            let g = RenderGeometry::contain(nw as f64, nh as f64, bbox.width, bbox.height, zoom)
                .unwrap();
            let natural = nw as f64 / nh as f64;
            let rendered = g.rendered_width / g.rendered_height;
            prop_assert!((natural - rendered).abs() <= natural * 1e-9);
        }

        /// Property: at zoom 1 the rendered image fits inside the box.
        #[test]
        fn prop_contain_fits_box((nw, nh) in dimensions_strategy(), bbox in box_strategy()) {
            let g = RenderGeometry::contain(nw as f64, nh as f64, bbox.width, bbox.height, 1.0)
                .unwrap();
            prop_assert!(g.rendered_width <= bbox.width * (1.0 + 1e-12));
            prop_assert!(g.rendered_height <= bbox.height * (1.0 + 1e-12));
            prop_assert!(g.offset_x >= -1e-9 && g.offset_y >= -1e-9);
        }

        /// Property: mapped points always land inside the natural image.
        #[test]
        fn prop_mapped_point_within_natural_bounds(
            (nw, nh) in dimensions_strategy(),
            bbox in box_strategy(),
            px in -600.0f64..2600.0,
            py in -600.0f64..2600.0,
        ) {
            if let Some(p) = map_pointer_to_image_space(px, py, bbox, nw, nh) {
                prop_assert!(p.x >= 0.0 && p.x <= nw as f64 * (1.0 + 1e-9));
                prop_assert!(p.y >= 0.0 && p.y <= nh as f64 * (1.0 + 1e-9));
            }
        }
    }
}
