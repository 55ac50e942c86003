//! # Bubbleplan Core
//!
//! Core types, units, and error taxonomy shared by every Bubbleplan crate.
//! Provides the project-wide settings context (pixels per meter, snapping,
//! circulation overhead) that geometry, snapping, and export code receive as
//! an explicit parameter.

pub mod color;
pub mod constants;
pub mod error;
pub mod project;
pub mod units;

pub use color::{default_palette, Color, PaletteEntry};
pub use error::{DocumentError, Error, ExportError, ProgramError, Result, SnapshotError};
pub use project::{ColorMode, DiagramStyle, MagneticSettings, ProjectSettings};
pub use units::{area_from_size, format_area, meters_to_px, px_to_meters, side_from_area};
