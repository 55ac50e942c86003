use bubbleplan_core::constants::MIN_SPACE_SIZE_PX;
use bubbleplan_designer::interaction::Handle;
use bubbleplan_designer::snap::{Guide, GuideAxis};
use bubbleplan_designer::{
    Commit, Document, HitTarget, InteractionController, Modifiers, Point, Selection, Viewport,
};

#[test]
fn test_placed_space_gets_square_from_area() {
    let mut doc = Document::default();
    let id = doc.add_space("Living", 40.0, "Public").unwrap();
    doc.place_space(&id, Point::new(100.0, 100.0), 0).unwrap();

    let space = doc.space(&id).unwrap();
    assert!(space.placed);
    assert!((space.width - 126.49).abs() < 0.01);
    assert!((space.height - 126.49).abs() < 0.01);
    assert_eq!(space.position, Point::new(100.0, 100.0));
}

#[test]
fn test_drag_snaps_to_neighbor_edge_with_guide() {
    let mut doc = Document::default();
    // 25 m² at 20 px/m is a 100 px square.
    let a = doc.add_space("A", 25.0, "Public").unwrap();
    let b = doc.add_space("B", 9.0, "Public").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(250.0, 300.0), 0).unwrap();

    let vp = Viewport::default();
    let mut sel = Selection::new();
    let mut ctl = InteractionController::new();
    let hit = ctl.pointer_down(&mut doc, &mut sel, Point::new(280.0, 330.0), &vp, Modifiers::default());
    assert_eq!(hit, Some(HitTarget::Body));

    // Unsnapped, B's left edge would land at x = 98.
    ctl.pointer_move(&mut doc, Point::new(128.0, 330.0), &vp);
    assert_eq!(doc.space(&b).unwrap().position.x, 100.0);
    assert!(ctl.guides().contains(&Guide {
        axis: GuideAxis::Vertical,
        position: 100.0
    }));

    assert_eq!(ctl.pointer_up(&mut doc), Some(Commit::Moved(vec![b.clone()])));
    assert_eq!(doc.space(&b).unwrap().position, Point::new(100.0, 300.0));
    assert!(ctl.guides().is_empty());
}

#[test]
fn test_snap_threshold_scales_with_zoom() {
    let mut doc = Document::default();
    let a = doc.add_space("A", 25.0, "Public").unwrap();
    let b = doc.add_space("B", 9.0, "Public").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(250.0, 300.0), 0).unwrap();

    // At 4x zoom the 10 px threshold is 2.5 world px: a 6 px gap stays.
    let mut vp = Viewport::default();
    vp.set_scale(4.0);
    let mut sel = Selection::new();
    let mut ctl = InteractionController::new();
    ctl.pointer_down(&mut doc, &mut sel, Point::new(1120.0, 1320.0), &vp, Modifiers::default());
    ctl.pointer_move(&mut doc, Point::new(1120.0 - 4.0 * 144.0, 1320.0), &vp);
    ctl.pointer_up(&mut doc);
    assert_eq!(doc.space(&b).unwrap().position.x, 106.0);
}

#[test]
fn test_top_resize_clamps_and_keeps_bottom_edge() {
    let mut doc = Document::default();
    doc.settings.object_snap = false;
    let id = doc.add_space("Store", 25.0, "Service").unwrap();
    doc.place_space(&id, Point::new(0.0, 0.0), 0).unwrap();

    let vp = Viewport::default();
    let mut sel = Selection::new();
    sel.select_only(id.clone());
    let mut ctl = InteractionController::new();
    let hit = ctl.pointer_down(&mut doc, &mut sel, Point::new(50.0, 0.0), &vp, Modifiers::default());
    assert_eq!(hit, Some(HitTarget::ResizeHandle(Handle::Top)));
    ctl.pointer_move(&mut doc, Point::new(50.0, 400.0), &vp);
    assert_eq!(ctl.pointer_up(&mut doc), Some(Commit::Resized(id.clone())));

    let space = doc.space(&id).unwrap();
    assert_eq!(space.height, MIN_SPACE_SIZE_PX);
    assert_eq!(space.position.y + space.height, 100.0);
    assert!((space.area - 5.0).abs() < 1e-9);
}

#[test]
fn test_removed_space_takes_its_connections() {
    let mut doc = Document::default();
    let a = doc.add_space("A", 10.0, "Public").unwrap();
    let b = doc.add_space("B", 10.0, "Public").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(200.0, 0.0), 0).unwrap();
    doc.connect(&a, &b).unwrap();
    assert_eq!(doc.renderable_connections(0).len(), 1);

    doc.remove_space(&b).unwrap();
    assert!(doc.connections().is_empty());
    assert!(doc.renderable_connections(0).is_empty());
    assert!(doc.space(&b).is_none());
}

#[test]
fn test_vertex_removal_keeps_triangle() {
    let mut doc = Document::default();
    doc.settings.object_snap = false;
    let id = doc.add_space("Nook", 25.0, "Private").unwrap();
    doc.place_space(&id, Point::new(0.0, 0.0), 0).unwrap();

    let vp = Viewport::default();
    let mut sel = Selection::new();
    let mut ctl = InteractionController::new();
    ctl.double_click(&mut doc, &mut sel, Point::new(50.0, 50.0), &vp);
    let hit = ctl.double_click(&mut doc, &mut sel, Point::new(100.0, 100.0), &vp);
    assert_eq!(hit, Some(HitTarget::Vertex(2)));
    assert_eq!(doc.space(&id).unwrap().local_vertices().len(), 3);
    assert!((doc.space(&id).unwrap().area - 12.5).abs() < 1e-9);

    // A triangle keeps all of its vertices.
    ctl.double_click(&mut doc, &mut sel, Point::new(100.0, 0.0), &vp);
    assert_eq!(doc.space(&id).unwrap().local_vertices().len(), 3);
}

#[test]
fn test_double_click_commits_pending_resize() {
    let mut doc = Document::default();
    doc.settings.object_snap = false;
    let id = doc.add_space("Store", 25.0, "Service").unwrap();
    doc.place_space(&id, Point::new(0.0, 0.0), 0).unwrap();

    let vp = Viewport::default();
    let mut sel = Selection::new();
    sel.select_only(id.clone());
    let mut ctl = InteractionController::new();
    ctl.pointer_down(&mut doc, &mut sel, Point::new(50.0, 0.0), &vp, Modifiers::default());
    ctl.pointer_move(&mut doc, Point::new(50.0, 50.0), &vp);

    // No release: the double click must still re-derive the area.
    let hit = ctl.double_click(&mut doc, &mut sel, Point::new(50.0, 75.0), &vp);
    assert_eq!(hit, Some(HitTarget::Body));
    let space = doc.space(&id).unwrap();
    assert_eq!(space.height, 50.0);
    assert!((space.area - 12.5).abs() < 1e-9);
    assert!(space.is_polygon());
    assert_eq!(ctl.editing(), Some(&id));
}
