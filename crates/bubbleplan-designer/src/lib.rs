//! # Bubbleplan Designer
//!
//! The interactive geometry engine behind a bubble-diagram space planner.
//! Spaces (rooms) carry a name, a target area and a zone; they are placed
//! on floors, dragged, resized and reshaped on a canvas, grouped into zones
//! with convex-hull outlines, and exported as calibrated drawings.
//!
//! ## Core Components
//!
//! - **Geometry**: shoelace area, convex hull, rounded and smooth outlines,
//!   three-point arcs, text wrapping
//! - **Viewport**: world/screen transform with anchored zoom and panning
//! - **Interaction**: hit testing and the drag/resize/vertex/edge gestures
//! - **Snap**: grid and object snapping with alignment guides
//! - **Zones**: per-zone hulls and net/circulation/gross totals
//! - **Physics**: the optional magnetic layout nudge
//! - **Export**: SVG, DXF, PNG, JPEG, JSON and PDF page layout
//! - **Serialization**: versioned JSON snapshots
//! - **Program**: the boundary to an external program-generation service
//!
//! ## Architecture
//!
//! ```text
//! Document (spaces, connections, floors, style)
//!   ├── InteractionController ── SnapEngine
//!   │         └── Viewport
//!   ├── Zones ── Geometry
//!   ├── PhysicsNudger
//!   └── Export ── Geometry
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bubbleplan_designer::{Document, Point};
//!
//! let mut doc = Document::default();
//! let id = doc.add_space("Living", 15.0, "Public").unwrap();
//! doc.place_space(&id, Point::new(0.0, 0.0), 0).unwrap();
//! assert_eq!(doc.visible_spaces().count(), 1);
//! ```

pub mod colors;
pub mod document;
pub mod export;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod physics;
pub mod program;
pub mod serialization;
pub mod snap;
pub mod viewport;
pub mod zones;

pub use colors::{ColorResolver, ZoneColors, ZonePalette};
pub use document::{AreaEditPolicy, Document, Selection};
pub use export::{export_document, ExportArtifact, ExportFormat, ExportOptions};
pub use interaction::{Commit, HitTarget, InteractionController, InteractionState, Modifiers};
pub use model::{
    Annotation, AnnotationKind, Bounds, Connection, Floor, OutlineStyle, Point, ReferenceImage, Shape,
    Space, SpaceId, SpaceStyle,
};
pub use physics::{MagneticLoop, PhysicsNudger, TickOutcome};
pub use program::{apply_program, parse_program_response, request_program, ProgramService, RetryPolicy};
pub use serialization::{document_from_json, document_to_json, load_from_file, save_to_file, LoadReport};
pub use snap::{Guide, GuideAxis, SnapEngine, SnapResult};
pub use viewport::Viewport;
pub use zones::{aggregate_zones, zone_totals, ZoneScope, ZoneSummary, ZoneTotals};
