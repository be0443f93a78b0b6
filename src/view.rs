// View transform: zoom and scroll between device pixels and canvas pixels.
//
// Along each axis the scaled canvas is either smaller than the viewport, in
// which case it is centred and scrolling has no effect, or larger, in which
// case the scroll offset picks the visible window and is clamped so the
// canvas always covers the viewport.

use crate::types::Point;

/// Wheel step towards the user.
pub const ZOOM_IN_FACTOR: f32 = 1.25;
/// Wheel step away from the user.
pub const ZOOM_OUT_FACTOR: f32 = 0.8;
/// Zoom range; steps that would leave it are dropped.
pub const MIN_ZOOM: f32 = 0.01;
pub const MAX_ZOOM: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    /// Device-space offset of the viewport into the scaled canvas.
    scroll: Point,
    viewport: (f32, f32),
    content: (f32, f32),
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { zoom: 1.0, scroll: Point::default(), viewport: (0.0, 0.0), content: (0.0, 0.0) }
    }
}

impl ViewTransform {
    pub fn new(viewport_width: usize, viewport_height: usize) -> Self {
        Self { viewport: (viewport_width as f32, viewport_height as f32), ..Self::default() }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.viewport = (width as f32, height as f32);
        self.clamp_scroll();
    }

    /// Size of the canvas in canvas pixels.
    pub fn set_content(&mut self, width: usize, height: usize) {
        self.content = (width as f32, height as f32);
        self.clamp_scroll();
    }

    pub fn zoom_in(&mut self) {
        self.apply_zoom(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.apply_zoom(ZOOM_OUT_FACTOR);
    }

    /// Multiply the zoom, keeping the canvas point under the viewport centre in place.
    /// A step that would leave [`MIN_ZOOM`]..=[`MAX_ZOOM`] is ignored.
    pub fn apply_zoom(&mut self, factor: f32) {
        let next = self.zoom * factor;
        if !factor.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&next) {
            return;
        }
        let centre = Point::new(self.viewport.0 / 2.0, self.viewport.1 / 2.0);
        let anchor = self.to_canvas(centre);
        self.zoom = next;
        self.scroll = Point::new(anchor.x * self.zoom - centre.x, anchor.y * self.zoom - centre.y);
        self.clamp_scroll();
    }

    /// Move the visible window by a device-space delta.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.scroll.x += dx;
        self.scroll.y += dy;
        self.clamp_scroll();
    }

    /// Device position of the canvas origin.
    pub fn origin(&self) -> Point {
        Point::new(
            axis_origin(self.content.0 * self.zoom, self.viewport.0, self.scroll.x),
            axis_origin(self.content.1 * self.zoom, self.viewport.1, self.scroll.y),
        )
    }

    pub fn to_canvas(&self, device: Point) -> Point {
        let o = self.origin();
        Point::new((device.x - o.x) / self.zoom, (device.y - o.y) / self.zoom)
    }

    pub fn to_device(&self, canvas: Point) -> Point {
        let o = self.origin();
        Point::new(canvas.x * self.zoom + o.x, canvas.y * self.zoom + o.y)
    }

    fn clamp_scroll(&mut self) {
        let max_x = (self.content.0 * self.zoom - self.viewport.0).max(0.0);
        let max_y = (self.content.1 * self.zoom - self.viewport.1).max(0.0);
        self.scroll.x = self.scroll.x.clamp(0.0, max_x);
        self.scroll.y = self.scroll.y.clamp(0.0, max_y);
    }
}

fn axis_origin(scaled: f32, viewport: f32, scroll: f32) -> f32 {
    if scaled <= viewport { (viewport - scaled) / 2.0 } else { -scroll }
}
