use crate::model::{Bounds, Point, Space, SpaceId};

/// Edge resize handle of a rectangular space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Left,
    Right,
    Top,
    Bottom,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Left, Handle::Right, Handle::Top, Handle::Bottom];

    /// True for the handles that move the space's origin.
    pub fn is_leading(&self) -> bool {
        matches!(self, Handle::Left | Handle::Top)
    }
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Body,
    ResizeHandle(Handle),
    /// Polygon vertex index (outline editing only).
    Vertex(usize),
    /// Polygon edge from vertex `i` to `i + 1` (outline editing only).
    Edge(usize),
}

/// Keyboard state accompanying a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Accelerator held: clicking an edge extrudes a new edge from it.
    pub extrude: bool,
    /// Shift held: toggles selection membership.
    pub multi: bool,
}

/// An in-progress pointer gesture with its start-of-gesture snapshot.
///
/// Every move recomputes geometry from this snapshot and the cumulative
/// pointer delta.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        primary: SpaceId,
        start_pointer: Point,
        /// Every moving space with its start position; fixed at pointer-down.
        members: Vec<(SpaceId, Point)>,
    },
    Resizing {
        id: SpaceId,
        handle: Handle,
        start_pointer: Point,
        start: Bounds,
    },
    DraggingVertex {
        id: SpaceId,
        index: usize,
        start_pointer: Point,
        start: Box<Space>,
    },
    DraggingEdge {
        id: SpaceId,
        index: usize,
        start_pointer: Point,
        start: Box<Space>,
    },
    DraggingZone {
        zone: String,
        start_pointer: Point,
        members: Vec<(SpaceId, Point)>,
    },
}

/// Observable interaction state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Dragging,
    Resizing,
    EditingOutline,
    DraggingVertex,
    DraggingEdge,
    DraggingZone,
}

/// What a released gesture committed.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Moved(Vec<SpaceId>),
    Resized(SpaceId),
    Reshaped(SpaceId),
    ZoneMoved(String),
}
