//! Pointer interaction: select, drag, resize and outline editing.
//!
//! The controller is a small state machine driven by discrete pointer
//! events. Pointer-down captures the start geometry; every move derives the
//! new geometry from that snapshot and the cumulative pointer delta, so the
//! result depends only on where the gesture started and where the pointer is
//! now. Pointer-up commits.

mod types;

pub use hit_test::{body_contains, hit_outline, hit_test};
pub use types::{Commit, Gesture, Handle, HitTarget, InteractionState, Modifiers};

use bubbleplan_core::area_from_size;
use bubbleplan_core::constants::{HIT_TOLERANCE_PX, MIN_SPACE_SIZE_PX};
use tracing::debug;

use crate::document::{Document, Selection};
use crate::geometry::polygon_area;
use crate::model::{Bounds, Point, Shape, Space, SpaceId};
use crate::snap::{snap_targets, Guide, SnapEngine};
use crate::viewport::Viewport;

/// Drives edits of the current floor from pointer events.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    gesture: Gesture,
    editing: Option<SpaceId>,
    guides: Vec<Guide>,
}

fn member_ids(members: &[(SpaceId, Point)]) -> Vec<SpaceId> {
    members.iter().map(|(id, _)| id.clone()).collect()
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The space whose outline is in vertex/edge editing mode.
    pub fn editing(&self) -> Option<&SpaceId> {
        self.editing.as_ref()
    }

    /// Guides reported by the most recent move.
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn state(&self) -> InteractionState {
        match &self.gesture {
            Gesture::Idle if self.editing.is_some() => InteractionState::EditingOutline,
            Gesture::Idle => InteractionState::Idle,
            Gesture::Dragging { .. } => InteractionState::Dragging,
            Gesture::Resizing { .. } => InteractionState::Resizing,
            Gesture::DraggingVertex { .. } => InteractionState::DraggingVertex,
            Gesture::DraggingEdge { .. } => InteractionState::DraggingEdge,
            Gesture::DraggingZone { .. } => InteractionState::DraggingZone,
        }
    }

    /// Leaves outline editing, if active.
    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    /// Handles a single press. Returns what was hit.
    pub fn pointer_down(
        &mut self,
        doc: &mut Document,
        selection: &mut Selection,
        screen: Point,
        viewport: &Viewport,
        modifiers: Modifiers,
    ) -> Option<HitTarget> {
        if self.gesture != Gesture::Idle {
            self.pointer_up(doc);
        }
        let world = viewport.screen_to_world(screen);
        let tolerance = viewport.world_threshold(HIT_TOLERANCE_PX);

        let Some((id, target)) = hit_test(doc, world, tolerance, self.editing.as_ref(), selection) else {
            if !modifiers.multi {
                selection.clear();
            }
            self.editing = None;
            return None;
        };

        match target {
            HitTarget::Vertex(index) => {
                let start = Box::new(doc.space(&id)?.clone());
                self.gesture = Gesture::DraggingVertex {
                    id,
                    index,
                    start_pointer: world,
                    start,
                };
            }
            HitTarget::Edge(index) => {
                let space = doc.space_mut(&id)?;
                let index = if modifiers.extrude {
                    extrude_edge(space, index)
                } else {
                    index
                };
                let start = Box::new(space.clone());
                self.gesture = Gesture::DraggingEdge {
                    id,
                    index,
                    start_pointer: world,
                    start,
                };
            }
            HitTarget::ResizeHandle(handle) => {
                let start = doc.space(&id)?.bounds();
                selection.set_primary(&id);
                self.gesture = Gesture::Resizing {
                    id,
                    handle,
                    start_pointer: world,
                    start,
                };
            }
            HitTarget::Body => {
                if modifiers.multi {
                    selection.toggle(id.clone());
                } else if !selection.contains(&id) {
                    selection.select_only(id.clone());
                } else {
                    selection.set_primary(&id);
                }
                if !selection.contains(&id) {
                    return Some(target);
                }
                if self.editing.as_ref().is_some_and(|e| e != &id) {
                    self.editing = None;
                }
                let floor = doc.current_floor();
                let members: Vec<(SpaceId, Point)> = selection
                    .ids()
                    .iter()
                    .filter_map(|sid| doc.space(sid))
                    .filter(|s| s.placed && s.floor == floor)
                    .map(|s| (s.id.clone(), s.position))
                    .collect();
                self.gesture = Gesture::Dragging {
                    primary: id,
                    start_pointer: world,
                    members,
                };
            }
        }
        Some(target)
    }

    /// Handles a double click.
    ///
    /// On a body or handle it toggles outline editing (materializing the
    /// rectangle into a four-point polygon on entry). On an edge of the
    /// edited outline it inserts a vertex at the click point and starts
    /// dragging it. On a vertex it removes the vertex if more than three
    /// remain.
    pub fn double_click(
        &mut self,
        doc: &mut Document,
        selection: &mut Selection,
        screen: Point,
        viewport: &Viewport,
    ) -> Option<HitTarget> {
        if self.gesture != Gesture::Idle {
            self.pointer_up(doc);
        }
        let world = viewport.screen_to_world(screen);
        let tolerance = viewport.world_threshold(HIT_TOLERANCE_PX);
        let ppm = doc.pixels_per_meter();

        let Some((id, target)) = hit_test(doc, world, tolerance, self.editing.as_ref(), selection) else {
            self.editing = None;
            return None;
        };

        match target {
            HitTarget::Edge(index) => {
                let space = doc.space_mut(&id)?;
                if let Shape::Polygon(points) = &mut space.shape {
                    points.insert(index + 1, world - space.position);
                }
                let start = Box::new(space.clone());
                self.gesture = Gesture::DraggingVertex {
                    id,
                    index: index + 1,
                    start_pointer: world,
                    start,
                };
            }
            HitTarget::Vertex(index) => {
                let space = doc.space_mut(&id)?;
                if let Shape::Polygon(points) = &mut space.shape {
                    if points.len() > 3 {
                        points.remove(index);
                        space.area = polygon_area(points, ppm);
                    }
                }
            }
            HitTarget::Body | HitTarget::ResizeHandle(_) => {
                if self.editing.as_ref() == Some(&id) {
                    self.editing = None;
                } else {
                    doc.space_mut(&id)?.materialize_polygon();
                    selection.select_only(id.clone());
                    debug!("Editing outline of {}", id);
                    self.editing = Some(id);
                }
            }
        }
        Some(target)
    }

    /// Starts moving every placed space of `zone` on the current floor as a
    /// unit. Returns the number of members.
    pub fn begin_zone_drag(&mut self, doc: &Document, zone: &str, screen: Point, viewport: &Viewport) -> usize {
        let members: Vec<(SpaceId, Point)> = doc
            .visible_spaces()
            .filter(|s| s.zone == zone)
            .map(|s| (s.id.clone(), s.position))
            .collect();
        let count = members.len();
        if count > 0 {
            self.gesture = Gesture::DraggingZone {
                zone: zone.to_string(),
                start_pointer: viewport.screen_to_world(screen),
                members,
            };
        }
        count
    }

    /// Updates the active gesture. Returns false when idle.
    pub fn pointer_move(&mut self, doc: &mut Document, screen: Point, viewport: &Viewport) -> bool {
        let world = viewport.screen_to_world(screen);
        let zoom = viewport.scale();
        let engine = SnapEngine::from_settings(&doc.settings);
        let floor = doc.current_floor();
        self.guides.clear();

        match &self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging {
                primary,
                start_pointer,
                members,
            } => {
                let delta = world - *start_pointer;
                let Some((_, primary_start)) = members.iter().find(|(id, _)| id == primary) else {
                    return false;
                };
                let Some(space) = doc.space(primary) else {
                    return false;
                };
                let proposed = Bounds::from_rect(
                    primary_start.x + delta.x,
                    primary_start.y + delta.y,
                    space.width,
                    space.height,
                );
                let targets = snap_targets(doc, floor, &member_ids(members));
                let snapped = engine.snap_move(&proposed, &targets, zoom);
                let applied = snapped.position - *primary_start;
                self.guides = snapped.guides;

                let positions: Vec<(SpaceId, Point)> = members
                    .iter()
                    .map(|(id, start)| (id.clone(), *start + applied))
                    .collect();
                doc.apply_positions(&positions);
                true
            }
            Gesture::Resizing {
                id,
                handle,
                start_pointer,
                start,
            } => {
                let delta = world - *start_pointer;
                let targets = snap_targets(doc, floor, std::slice::from_ref(id));
                let (bounds, guide) = resize_bounds(start, *handle, delta, &engine, &targets, zoom);
                self.guides.extend(guide);
                if let Some(space) = doc.space_mut(id) {
                    space.position = Point::new(bounds.min_x, bounds.min_y);
                    space.width = bounds.width();
                    space.height = bounds.height();
                }
                true
            }
            Gesture::DraggingVertex {
                id,
                index,
                start_pointer,
                start,
            } => {
                let delta = world - *start_pointer;
                let mut edited = (**start).clone();
                let ppm = doc.pixels_per_meter();
                if let Shape::Polygon(points) = &mut edited.shape {
                    let Some(vertex) = points.get(*index).copied() else {
                        return false;
                    };
                    let targets = snap_targets(doc, floor, std::slice::from_ref(id));
                    let snapped = engine.snap_point(start.position + vertex + delta, &targets, zoom);
                    points[*index] = snapped.position - start.position;
                    self.guides = snapped.guides;
                }
                commit_outline(doc, id, edited, ppm);
                true
            }
            Gesture::DraggingEdge {
                id,
                index,
                start_pointer,
                start,
            } => {
                let mut delta = world - *start_pointer;
                if delta.x.abs() >= delta.y.abs() {
                    delta.y = 0.0;
                } else {
                    delta.x = 0.0;
                }
                let mut edited = (**start).clone();
                let ppm = doc.pixels_per_meter();
                if let Shape::Polygon(points) = &mut edited.shape {
                    let n = points.len();
                    if *index >= n {
                        return false;
                    }
                    let (a, b) = (*index, (*index + 1) % n);
                    let targets = snap_targets(doc, floor, std::slice::from_ref(id));
                    let anchor = start.position + points[a];
                    if delta.y == 0.0 {
                        let (x, guide) = engine.snap_edge(anchor.x + delta.x, true, &targets, zoom);
                        delta.x = x - anchor.x;
                        self.guides.extend(guide);
                    } else {
                        let (y, guide) = engine.snap_edge(anchor.y + delta.y, false, &targets, zoom);
                        delta.y = y - anchor.y;
                        self.guides.extend(guide);
                    }
                    points[a] = points[a] + delta;
                    points[b] = points[b] + delta;
                }
                commit_outline(doc, id, edited, ppm);
                true
            }
            Gesture::DraggingZone {
                start_pointer,
                members,
                ..
            } => {
                let delta = world - *start_pointer;
                let positions: Vec<(SpaceId, Point)> = members
                    .iter()
                    .map(|(id, start)| (id.clone(), *start + delta))
                    .collect();
                doc.apply_positions(&positions);
                true
            }
        }
    }

    /// Ends the active gesture, committing its geometry.
    pub fn pointer_up(&mut self, doc: &mut Document) -> Option<Commit> {
        let gesture = std::mem::take(&mut self.gesture);
        self.guides.clear();
        let commit = match gesture {
            Gesture::Idle => None,
            Gesture::Dragging { members, .. } => Some(Commit::Moved(member_ids(&members))),
            Gesture::Resizing { id, .. } => {
                let ppm = doc.pixels_per_meter();
                if let Some(space) = doc.space_mut(&id) {
                    space.area = area_from_size(space.width, space.height, ppm);
                }
                Some(Commit::Resized(id))
            }
            Gesture::DraggingVertex { id, .. } | Gesture::DraggingEdge { id, .. } => Some(Commit::Reshaped(id)),
            Gesture::DraggingZone { zone, .. } => Some(Commit::ZoneMoved(zone)),
        };
        if let Some(commit) = &commit {
            debug!("Committed {:?}", commit);
        }
        commit
    }
}

/// Inserts two vertices coincident with edge `index`'s endpoints and
/// returns the index of the new edge between them.
fn extrude_edge(space: &mut Space, index: usize) -> usize {
    space.materialize_polygon();
    if let Shape::Polygon(points) = &mut space.shape {
        let n = points.len();
        if index < n {
            let a = points[index];
            let b = points[(index + 1) % n];
            points.insert(index + 1, a);
            points.insert(index + 2, b);
            return index + 1;
        }
    }
    index
}

/// Applies a reshaped copy of a space: rebases the polygon, grows the
/// bounds and re-derives the area from the outline.
fn commit_outline(doc: &mut Document, id: &SpaceId, mut edited: Space, ppm: f64) {
    edited.rebase_polygon();
    if let Shape::Polygon(points) = &edited.shape {
        edited.area = polygon_area(points, ppm);
    }
    if let Some(space) = doc.space_mut(id) {
        space.position = edited.position;
        space.width = edited.width;
        space.height = edited.height;
        space.area = edited.area;
        space.shape = edited.shape;
    }
}

/// New bounds for a resize gesture. Leading handles move the origin so
/// the opposite edge stays put; both axes are clamped to the minimum size.
fn resize_bounds(
    start: &Bounds,
    handle: Handle,
    delta: Point,
    engine: &SnapEngine,
    targets: &[Bounds],
    zoom: f64,
) -> (Bounds, Option<Guide>) {
    let mut b = *start;
    let guide = match handle {
        Handle::Right => {
            let (edge, guide) = engine.snap_edge(start.max_x + delta.x, true, targets, zoom);
            b.max_x = edge.max(start.min_x + MIN_SPACE_SIZE_PX);
            guide
        }
        Handle::Left => {
            let (edge, guide) = engine.snap_edge(start.min_x + delta.x, true, targets, zoom);
            b.min_x = edge.min(start.max_x - MIN_SPACE_SIZE_PX);
            guide
        }
        Handle::Bottom => {
            let (edge, guide) = engine.snap_edge(start.max_y + delta.y, false, targets, zoom);
            b.max_y = edge.max(start.min_y + MIN_SPACE_SIZE_PX);
            guide
        }
        Handle::Top => {
            let (edge, guide) = engine.snap_edge(start.min_y + delta.y, false, targets, zoom);
            b.min_y = edge.min(start.max_y - MIN_SPACE_SIZE_PX);
            guide
        }
    };
    (b, guide)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, Selection, Viewport, InteractionController, SpaceId) {
        let mut doc = Document::default();
        doc.settings.object_snap = false;
        let id = doc.add_space("Office", 25.0, "Work").unwrap();
        doc.place_space(&id, Point::new(100.0, 100.0), 0).unwrap();
        (doc, Selection::new(), Viewport::default(), InteractionController::new(), id)
    }

    #[test]
    fn test_drag_moves_by_world_delta() {
        let (mut doc, mut sel, mut vp, mut ctl, id) = setup();
        vp.set_scale(2.0);
        // World (150, 150) is at screen (300, 300).
        let hit = ctl.pointer_down(&mut doc, &mut sel, Point::new(300.0, 300.0), &vp, Modifiers::default());
        assert_eq!(hit, Some(HitTarget::Body));
        assert_eq!(ctl.state(), InteractionState::Dragging);
        ctl.pointer_move(&mut doc, Point::new(340.0, 320.0), &vp);
        assert_eq!(ctl.pointer_up(&mut doc), Some(Commit::Moved(vec![id.clone()])));
        assert_eq!(doc.space(&id).unwrap().position, Point::new(120.0, 110.0));
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_group_move_preserves_offsets() {
        let (mut doc, mut sel, vp, mut ctl, a) = setup();
        let b = doc.add_space("Meeting", 9.0, "Work").unwrap();
        doc.place_space(&b, Point::new(400.0, 50.0), 0).unwrap();
        sel.select_only(b.clone());
        ctl.pointer_down(&mut doc, &mut sel, Point::new(150.0, 150.0), &vp, Modifiers { multi: true, ..Default::default() });
        assert_eq!(sel.len(), 2);
        ctl.pointer_move(&mut doc, Point::new(160.0, 130.0), &vp);
        ctl.pointer_up(&mut doc);
        assert_eq!(doc.space(&a).unwrap().position, Point::new(110.0, 80.0));
        assert_eq!(doc.space(&b).unwrap().position, Point::new(410.0, 30.0));
    }

    #[test]
    fn test_left_resize_keeps_right_edge_and_clamps() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        sel.select_only(id.clone());
        let hit = ctl.pointer_down(&mut doc, &mut sel, Point::new(100.0, 150.0), &vp, Modifiers::default());
        assert_eq!(hit, Some(HitTarget::ResizeHandle(Handle::Left)));
        ctl.pointer_move(&mut doc, Point::new(5000.0, 150.0), &vp);
        ctl.pointer_up(&mut doc);
        let space = doc.space(&id).unwrap();
        assert_eq!(space.width, MIN_SPACE_SIZE_PX);
        assert_eq!(space.position.x + space.width, 200.0);
        assert_eq!(space.area, area_from_size(20.0, 100.0, 20.0));
    }

    #[test]
    fn test_right_resize_updates_area_on_commit() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        sel.select_only(id.clone());
        ctl.pointer_down(&mut doc, &mut sel, Point::new(200.0, 150.0), &vp, Modifiers::default());
        ctl.pointer_move(&mut doc, Point::new(300.0, 150.0), &vp);
        assert_eq!(doc.space(&id).unwrap().area, 25.0);
        assert_eq!(ctl.pointer_up(&mut doc), Some(Commit::Resized(id.clone())));
        assert_eq!(doc.space(&id).unwrap().area, 50.0);
    }

    #[test]
    fn test_double_click_enters_outline_editing() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        ctl.double_click(&mut doc, &mut sel, Point::new(150.0, 150.0), &vp);
        assert_eq!(ctl.state(), InteractionState::EditingOutline);
        assert!(doc.space(&id).unwrap().is_polygon());
        assert_eq!(doc.space(&id).unwrap().bounds(), Bounds::from_rect(100.0, 100.0, 100.0, 100.0));
        ctl.double_click(&mut doc, &mut sel, Point::new(150.0, 150.0), &vp);
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_vertex_drag_grows_bounds_and_updates_area() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        ctl.double_click(&mut doc, &mut sel, Point::new(150.0, 150.0), &vp);
        let hit = ctl.pointer_down(&mut doc, &mut sel, Point::new(200.0, 200.0), &vp, Modifiers::default());
        assert_eq!(hit, Some(HitTarget::Vertex(2)));
        ctl.pointer_move(&mut doc, Point::new(250.0, 200.0), &vp);
        let space = doc.space(&id).unwrap();
        assert_eq!(space.width, 150.0);
        // Trapezoid: (100 + 150) / 2 * 100 px² at 20 px/m.
        assert!((space.area - 31.25).abs() < 1e-9);
        ctl.pointer_up(&mut doc);
        assert_eq!(ctl.state(), InteractionState::EditingOutline);
    }

    #[test]
    fn test_edge_drag_locks_to_dominant_axis() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        ctl.double_click(&mut doc, &mut sel, Point::new(150.0, 150.0), &vp);
        let hit = ctl.pointer_down(&mut doc, &mut sel, Point::new(200.0, 150.0), &vp, Modifiers::default());
        assert_eq!(hit, Some(HitTarget::Edge(1)));
        ctl.pointer_move(&mut doc, Point::new(230.0, 160.0), &vp);
        ctl.pointer_up(&mut doc);
        let space = doc.space(&id).unwrap();
        assert_eq!(
            space.world_vertices(),
            vec![
                Point::new(100.0, 100.0),
                Point::new(230.0, 100.0),
                Point::new(230.0, 200.0),
                Point::new(100.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_extrude_inserts_coincident_vertices() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        ctl.double_click(&mut doc, &mut sel, Point::new(150.0, 150.0), &vp);
        let modifiers = Modifiers {
            extrude: true,
            ..Default::default()
        };
        ctl.pointer_down(&mut doc, &mut sel, Point::new(200.0, 150.0), &vp, modifiers);
        assert_eq!(doc.space(&id).unwrap().local_vertices().len(), 6);
        ctl.pointer_move(&mut doc, Point::new(240.0, 150.0), &vp);
        ctl.pointer_up(&mut doc);
        let space = doc.space(&id).unwrap();
        assert_eq!(
            space.world_vertices(),
            vec![
                Point::new(100.0, 100.0),
                Point::new(200.0, 100.0),
                Point::new(240.0, 100.0),
                Point::new(240.0, 200.0),
                Point::new(200.0, 200.0),
                Point::new(100.0, 200.0),
            ]
        );
        assert!((space.area - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_double_click_edge_inserts_vertex() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        ctl.double_click(&mut doc, &mut sel, Point::new(150.0, 150.0), &vp);
        let hit = ctl.double_click(&mut doc, &mut sel, Point::new(150.0, 100.0), &vp);
        assert_eq!(hit, Some(HitTarget::Edge(0)));
        assert_eq!(ctl.state(), InteractionState::DraggingVertex);
        ctl.pointer_move(&mut doc, Point::new(150.0, 80.0), &vp);
        ctl.pointer_up(&mut doc);
        let space = doc.space(&id).unwrap();
        assert_eq!(space.local_vertices().len(), 5);
        assert_eq!(space.position, Point::new(100.0, 80.0));
        assert_eq!(space.height, 120.0);
    }

    #[test]
    fn test_zone_drag_moves_members() {
        let (mut doc, _sel, vp, mut ctl, a) = setup();
        let b = doc.add_space("Lab", 9.0, "Work").unwrap();
        let c = doc.add_space("Lobby", 9.0, "Public").unwrap();
        doc.place_space(&b, Point::new(300.0, 0.0), 0).unwrap();
        doc.place_space(&c, Point::new(600.0, 0.0), 0).unwrap();
        assert_eq!(ctl.begin_zone_drag(&doc, "Work", Point::new(0.0, 0.0), &vp), 2);
        ctl.pointer_move(&mut doc, Point::new(-10.0, 25.0), &vp);
        assert_eq!(ctl.pointer_up(&mut doc), Some(Commit::ZoneMoved("Work".into())));
        assert_eq!(doc.space(&a).unwrap().position, Point::new(90.0, 125.0));
        assert_eq!(doc.space(&b).unwrap().position, Point::new(290.0, 25.0));
        assert_eq!(doc.space(&c).unwrap().position, Point::new(600.0, 0.0));
    }

    #[test]
    fn test_click_empty_canvas_clears_selection() {
        let (mut doc, mut sel, vp, mut ctl, id) = setup();
        sel.select_only(id);
        assert_eq!(
            ctl.pointer_down(&mut doc, &mut sel, Point::new(900.0, 900.0), &vp, Modifiers::default()),
            None
        );
        assert!(sel.is_empty());
    }
}
