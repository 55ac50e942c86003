//! Viewport and coordinate transformation for the canvas.
//!
//! Maps between screen pixels and world pixels. Both use +Y down, so the
//! transform is a uniform scale plus an offset (the screen position of the
//! world origin). Zoom and pan never touch stored world coordinates.

use std::fmt;

use bubbleplan_core::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

use crate::model::{Bounds, Point};

/// Screen state captured when a pan gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanAnchor {
    screen: Point,
    offset: Point,
}

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Point,
    canvas_width: f64,
    canvas_height: f64,
    pan: Option<PanAnchor>,
}

impl Viewport {
    /// Creates a viewport at 100% zoom with the world origin at the screen origin.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            scale: 1.0,
            offset: Point::ORIGIN,
            canvas_width,
            canvas_height,
            pan: None,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom level (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Screen position of the world origin.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Sets the zoom level about the world origin, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Converts screen coordinates to world coordinates.
    ///
    /// ```text
    /// world = (screen - offset) / scale
    /// ```
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    /// Zooms so the world point under `screen` stays under `screen`.
    ///
    /// ```text
    /// new_offset = screen - world * new_scale
    /// ```
    pub fn zoom_at(&mut self, screen: Point, new_scale: f64) {
        if !new_scale.is_finite() || new_scale <= 0.0 {
            return;
        }
        let world = self.screen_to_world(screen);
        self.scale = new_scale.clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = screen - world * self.scale;
    }

    /// One wheel notch toward the cursor; negative `delta_y` zooms in.
    pub fn wheel_zoom(&mut self, screen: Point, delta_y: f64) {
        let factor = if delta_y < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.zoom_at(screen, self.scale * factor);
    }

    pub fn start_pan(&mut self, screen: Point) {
        self.pan = Some(PanAnchor {
            screen,
            offset: self.offset,
        });
    }

    /// Moves the view by the cumulative cursor delta since [`start_pan`](Self::start_pan).
    pub fn update_pan(&mut self, screen: Point) {
        if let Some(anchor) = self.pan {
            self.offset = anchor.offset + (screen - anchor.screen);
        }
    }

    pub fn end_pan(&mut self) {
        self.pan = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset = self.offset + Point::new(dx, dy);
    }

    /// A screen-space distance expressed in world units at the current zoom.
    pub fn world_threshold(&self, screen_px: f64) -> f64 {
        screen_px / self.scale
    }

    /// Fits `bounds` into the canvas, leaving `padding` (fraction of the canvas
    /// per side) free, and centers it.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        let padding_factor = (1.0 - padding * 2.0).max(0.05);
        let zoom_x = self.canvas_width * padding_factor / bounds.width();
        let zoom_y = self.canvas_height * padding_factor / bounds.height();
        self.scale = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

        let center = bounds.center();
        self.offset = Point::new(
            self.canvas_width / 2.0 - center.x * self.scale,
            self.canvas_height / 2.0 - center.y * self.scale,
        );
    }

    /// Resets to 1:1 zoom with the origin at the top-left.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Point::ORIGIN;
        self.pan = None;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Offset: ({:.1}, {:.1})",
            self.scale * 100.0,
            self.offset.x,
            self.offset.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance_to(&b) < 1e-9
    }

    #[test]
    fn test_round_trip() {
        let mut vp = Viewport::default();
        vp.set_scale(2.0);
        vp.set_offset(Point::new(30.0, -12.0));
        let world = Point::new(17.0, 99.0);
        assert!(close(vp.screen_to_world(vp.world_to_screen(world)), world));
        assert_eq!(vp.screen_to_world(Point::new(30.0, -12.0)), Point::ORIGIN);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut vp = Viewport::default();
        vp.set_scale(50.0);
        assert_eq!(vp.scale(), MAX_ZOOM);
        vp.zoom_at(Point::new(10.0, 10.0), 0.001);
        assert_eq!(vp.scale(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_keeps_cursor_anchored() {
        let mut vp = Viewport::default();
        vp.set_offset(Point::new(40.0, 25.0));
        let cursor = Point::new(300.0, 200.0);
        let before = vp.screen_to_world(cursor);
        vp.wheel_zoom(cursor, -1.0);
        assert!((vp.scale() - ZOOM_STEP).abs() < 1e-12);
        assert!(close(vp.screen_to_world(cursor), before));
    }

    #[test]
    fn test_pan_uses_cumulative_delta() {
        let mut vp = Viewport::default();
        vp.start_pan(Point::new(100.0, 100.0));
        vp.update_pan(Point::new(110.0, 90.0));
        vp.update_pan(Point::new(150.0, 120.0));
        vp.end_pan();
        assert_eq!(vp.offset(), Point::new(50.0, 20.0));
        assert!(!vp.is_panning());
    }

    #[test]
    fn test_fit_to_bounds_centers_content() {
        let mut vp = Viewport::new(1000.0, 500.0);
        vp.fit_to_bounds(&Bounds::new(0.0, 0.0, 200.0, 100.0), 0.1);
        assert!((vp.scale() - 4.0).abs() < 1e-9);
        assert!(close(vp.world_to_screen(Point::new(100.0, 50.0)), Point::new(500.0, 250.0)));
    }

    #[test]
    fn test_world_threshold() {
        let mut vp = Viewport::default();
        vp.set_scale(2.0);
        assert_eq!(vp.world_threshold(10.0), 5.0);
    }
}
