use std::time::{Duration, Instant};

use bubbleplan_core::MagneticSettings;
use bubbleplan_designer::{Document, MagneticLoop, PhysicsNudger, Point, TickOutcome};

#[test]
fn test_same_zone_spaces_pull_together() {
    let mut doc = Document::default();
    let a = doc.add_space("Living", 25.0, "Public").unwrap();
    let b = doc.add_space("Dining", 25.0, "Public").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(400.0, 0.0), 0).unwrap();

    let nudger = PhysicsNudger::new(MagneticSettings::default());
    assert!(nudger.apply(&mut doc));
    assert_eq!(doc.space(&a).unwrap().position, Point::new(0.5, 0.0));
    assert_eq!(doc.space(&b).unwrap().position, Point::new(399.5, 0.0));
}

#[test]
fn test_overlap_pushes_along_shallow_axis() {
    let mut doc = Document::default();
    let a = doc.add_space("Bed", 25.0, "Private").unwrap();
    let b = doc.add_space("Store", 25.0, "Service").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(80.0, 10.0), 0).unwrap();

    let settings = MagneticSettings::default();
    let nudger = PhysicsNudger::new(settings);
    let TickOutcome::Moved(positions) = nudger.step(doc.spaces(), 0) else {
        panic!("overlapping spaces must move");
    };
    // 20 px of horizontal overlap versus 90 px vertical.
    let push = settings.repulsion * 20.0;
    assert!(positions.contains(&(a.clone(), Point::new(-push, 0.0))));
    assert!(positions.contains(&(b.clone(), Point::new(80.0 + push, 10.0))));
}

#[test]
fn test_settled_layout_is_left_alone() {
    let mut doc = Document::default();
    let a = doc.add_space("Bed", 25.0, "Private").unwrap();
    let b = doc.add_space("Store", 25.0, "Service").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(300.0, 0.0), 0).unwrap();
    let nudger = PhysicsNudger::new(MagneticSettings::default());
    assert_eq!(nudger.step(doc.spaces(), 0), TickOutcome::Unchanged);
    assert!(!nudger.apply(&mut doc));
}

#[test]
fn test_other_floors_are_untouched() {
    let mut doc = Document::default();
    let upstairs = doc.add_floor(None);
    let a = doc.add_space("Bed", 25.0, "Private").unwrap();
    let b = doc.add_space("Bed 2", 25.0, "Private").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), upstairs).unwrap();
    doc.place_space(&b, Point::new(300.0, 0.0), upstairs).unwrap();
    let nudger = PhysicsNudger::new(MagneticSettings::default());
    assert!(!nudger.apply(&mut doc));
    assert_eq!(doc.space(&a).unwrap().position, Point::ORIGIN);
}

#[test]
fn test_loop_ticks_on_interval_and_stops_when_disabled() {
    let mut doc = Document::default();
    let a = doc.add_space("Living", 25.0, "Public").unwrap();
    let b = doc.add_space("Dining", 25.0, "Public").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(400.0, 0.0), 0).unwrap();

    let mut magnet = MagneticLoop::new(MagneticSettings::default());
    let start = Instant::now();
    assert_eq!(magnet.run_due(&mut doc, start), 0);

    magnet.enable(start);
    assert!(magnet.is_enabled());
    assert_eq!(magnet.run_due(&mut doc, start + Duration::from_millis(10)), 0);
    assert_eq!(magnet.run_due(&mut doc, start + Duration::from_millis(50)), 1);
    assert_eq!(doc.space(&a).unwrap().position, Point::new(0.5, 0.0));

    // A long stall catches up by a bounded number of ticks.
    assert_eq!(magnet.run_due(&mut doc, start + Duration::from_secs(10)), 3);

    magnet.disable();
    let before = doc.space(&a).unwrap().position;
    assert_eq!(magnet.run_due(&mut doc, start + Duration::from_secs(20)), 0);
    assert_eq!(doc.space(&a).unwrap().position, before);
}
