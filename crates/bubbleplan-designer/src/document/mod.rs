//! The in-memory document: spaces, connections, floors and style.
//!
//! Core components read the current floor's spaces through the accessors
//! here and write back only the spaces they are manipulating.

mod operations;
mod selection;

pub use operations::AreaEditPolicy;
pub use selection::Selection;

use std::collections::BTreeMap;

use bubbleplan_core::{Color, DiagramStyle, ProjectSettings};

use crate::colors::{ColorResolver, ZonePalette};
use crate::model::{Annotation, Connection, Floor, ReferenceImage, Space, SpaceId};

/// A single editable bubble diagram.
#[derive(Debug, Clone)]
pub struct Document {
    pub project_name: String,
    pub(crate) spaces: Vec<Space>,
    pub(crate) connections: Vec<Connection>,
    pub(crate) floors: Vec<Floor>,
    pub(crate) current_floor: usize,
    pub settings: ProjectSettings,
    pub style: DiagramStyle,
    /// Per-document zone fill overrides, keyed by zone label.
    pub zone_colors: BTreeMap<String, Color>,
    pub annotations: Vec<Annotation>,
    pub reference_images: Vec<ReferenceImage>,
    pub area_policy: AreaEditPolicy,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Untitled Project", ProjectSettings::default())
    }
}

impl Document {
    pub fn new(project_name: impl Into<String>, settings: ProjectSettings) -> Self {
        Self {
            project_name: project_name.into(),
            spaces: Vec::new(),
            connections: Vec::new(),
            floors: vec![Floor::new(0, Floor::default_label(0))],
            current_floor: 0,
            settings,
            style: DiagramStyle::default(),
            zone_colors: BTreeMap::new(),
            annotations: Vec::new(),
            reference_images: Vec::new(),
            area_policy: AreaEditPolicy::default(),
        }
    }

    pub fn pixels_per_meter(&self) -> f64 {
        self.settings.pixels_per_meter
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn space(&self, id: &SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| &s.id == id)
    }

    pub fn space_mut(&mut self, id: &SpaceId) -> Option<&mut Space> {
        self.spaces.iter_mut().find(|s| &s.id == id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, index: usize) -> Option<&Floor> {
        self.floors.iter().find(|f| f.index == index)
    }

    pub fn current_floor(&self) -> usize {
        self.current_floor
    }

    /// Placed spaces on `floor`, in document order.
    pub fn spaces_on_floor(&self, floor: usize) -> impl Iterator<Item = &Space> {
        self.spaces
            .iter()
            .filter(move |s| s.placed && s.floor == floor)
    }

    /// Placed spaces on the current floor.
    pub fn visible_spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces_on_floor(self.current_floor)
    }

    /// The inventory: spaces not yet on the canvas.
    pub fn unplaced_spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter().filter(|s| !s.placed)
    }

    /// Distinct zone labels in first-seen order.
    pub fn zones(&self) -> Vec<String> {
        let mut zones: Vec<String> = Vec::new();
        for space in &self.spaces {
            if !zones.iter().any(|z| z == &space.zone) {
                zones.push(space.zone.clone());
            }
        }
        zones
    }

    /// Connections whose endpoints are both placed on `floor`, with the
    /// resolved endpoints. Dangling references are skipped.
    pub fn renderable_connections(&self, floor: usize) -> Vec<(&Connection, &Space, &Space)> {
        self.connections
            .iter()
            .filter_map(|c| {
                let a = self.space(&c.from_id)?;
                let b = self.space(&c.to_id)?;
                let on_floor = |s: &Space| s.placed && s.floor == floor;
                (on_floor(a) && on_floor(b)).then_some((c, a, b))
            })
            .collect()
    }

    pub fn annotations_on_floor(&self, floor: usize) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.floor == floor)
    }

    pub fn reference_images_on_floor(&self, floor: usize) -> impl Iterator<Item = &ReferenceImage> {
        self.reference_images.iter().filter(move |r| r.floor == floor)
    }

    /// Color resolver for this document's overrides and style.
    pub fn color_resolver(&self, palette: ZonePalette) -> ColorResolver {
        ColorResolver::new(palette, self.zone_colors.clone(), self.style.color_mode)
    }
}
