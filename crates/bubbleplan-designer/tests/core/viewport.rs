use bubbleplan_core::constants::{MAX_ZOOM, MIN_ZOOM};
use bubbleplan_designer::{Bounds, Point, Viewport};

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.offset(), Point::ORIGIN);
}

#[test]
fn test_screen_world_inverse() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_scale(2.5);
    vp.set_offset(Point::new(-40.0, 75.0));
    let world = Point::new(123.0, -45.5);
    let back = vp.screen_to_world(vp.world_to_screen(world));
    assert!((back.x - world.x).abs() < 1e-9);
    assert!((back.y - world.y).abs() < 1e-9);
}

#[test]
fn test_wheel_zoom_is_clamped() {
    let mut vp = Viewport::default();
    for _ in 0..200 {
        vp.wheel_zoom(Point::new(600.0, 400.0), -1.0);
    }
    assert_eq!(vp.scale(), MAX_ZOOM);
    for _ in 0..400 {
        vp.wheel_zoom(Point::new(600.0, 400.0), 1.0);
    }
    assert_eq!(vp.scale(), MIN_ZOOM);
}

#[test]
fn test_pan_is_cumulative_from_start() {
    let mut vp = Viewport::default();
    vp.start_pan(Point::new(10.0, 10.0));
    vp.update_pan(Point::new(30.0, 20.0));
    vp.update_pan(Point::new(50.0, 40.0));
    vp.end_pan();
    assert_eq!(vp.offset(), Point::new(40.0, 30.0));
    assert!(!vp.is_panning());
}

#[test]
fn test_fit_to_bounds_centers_content() {
    let mut vp = Viewport::new(1000.0, 500.0);
    let bounds = Bounds::new(0.0, 0.0, 400.0, 200.0);
    vp.fit_to_bounds(&bounds, 0.1);
    assert!((vp.scale() - 2.0).abs() < 1e-9);
    let center = vp.world_to_screen(bounds.center());
    assert!((center.x - 500.0).abs() < 1e-9);
    assert!((center.y - 250.0).abs() < 1e-9);
}

#[test]
fn test_fit_to_empty_bounds_is_noop() {
    let mut vp = Viewport::default();
    vp.fit_to_bounds(&Bounds::new(5.0, 5.0, 5.0, 5.0), 0.1);
    assert_eq!(vp.scale(), 1.0);
}
