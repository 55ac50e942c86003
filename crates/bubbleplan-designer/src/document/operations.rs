//! Edits against the document.

use bubbleplan_core::{side_from_area, DocumentError};
use tracing::debug;

use super::Document;
use crate::model::{Annotation, Connection, Floor, Point, ReferenceImage, Shape, Space, SpaceId};

/// What editing the numeric area does to a space's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaEditPolicy {
    /// Discard any custom outline and resize to the square implied by the
    /// new area.
    #[default]
    ResetToSquare,
    /// Keep the outline and scale it uniformly about its top-left so the
    /// geometric area matches.
    ScaleShape,
}

fn unknown(id: &SpaceId) -> DocumentError {
    DocumentError::UnknownSpace { id: id.to_string() }
}

fn validate_area(id: &str, area: f64) -> Result<(), DocumentError> {
    if area.is_finite() && area > 0.0 {
        Ok(())
    } else {
        Err(DocumentError::InvalidArea {
            id: id.to_string(),
            value: area,
        })
    }
}

impl Document {
    /// Adds a new unplaced space to the inventory.
    pub fn add_space(
        &mut self,
        name: impl Into<String>,
        area: f64,
        zone: impl Into<String>,
    ) -> Result<SpaceId, DocumentError> {
        let space = Space::new(name, area, zone, self.pixels_per_meter());
        validate_area(space.id.as_str(), area)?;
        let id = space.id.clone();
        self.spaces.push(space);
        Ok(id)
    }

    /// Inserts a fully formed space (used by loaders and program import).
    ///
    /// Ids are unique within a document.
    pub fn insert_space(&mut self, space: Space) -> Result<SpaceId, DocumentError> {
        if self.space(&space.id).is_some() {
            return Err(DocumentError::DuplicateSpace {
                id: space.id.to_string(),
            });
        }
        let id = space.id.clone();
        self.spaces.push(space);
        Ok(id)
    }

    /// Puts a space on the canvas at `position` on `floor`.
    ///
    /// A space coming out of the inventory as a plain rectangle gets the
    /// square derived from its area.
    pub fn place_space(&mut self, id: &SpaceId, position: Point, floor: usize) -> Result<(), DocumentError> {
        if self.floor(floor).is_none() {
            return Err(DocumentError::UnknownFloor { index: floor });
        }
        let ppm = self.pixels_per_meter();
        let space = self.space_mut(id).ok_or_else(|| unknown(id))?;
        if !space.placed && space.shape == Shape::Rect {
            let side = side_from_area(space.area, ppm);
            space.width = side;
            space.height = side;
        }
        space.placed = true;
        space.floor = floor;
        space.position = position;
        debug!("Placed space {} at ({:.1}, {:.1}) on floor {}", id, position.x, position.y, floor);
        Ok(())
    }

    /// Returns a space to the inventory. Its connections stay and are
    /// filtered at render time.
    pub fn unplace_space(&mut self, id: &SpaceId) -> Result<(), DocumentError> {
        let space = self.space_mut(id).ok_or_else(|| unknown(id))?;
        space.placed = false;
        Ok(())
    }

    /// Deletes a space and every connection touching it.
    pub fn remove_space(&mut self, id: &SpaceId) -> Result<Space, DocumentError> {
        let index = self
            .spaces
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| unknown(id))?;
        let removed = self.spaces.remove(index);
        let before = self.connections.len();
        self.connections.retain(|c| !c.involves(id));
        debug!(
            "Removed space {} and {} connection(s)",
            id,
            before - self.connections.len()
        );
        Ok(removed)
    }

    pub fn rename_space(&mut self, id: &SpaceId, name: impl Into<String>) -> Result<(), DocumentError> {
        self.space_mut(id).ok_or_else(|| unknown(id))?.name = name.into();
        Ok(())
    }

    pub fn set_zone(&mut self, id: &SpaceId, zone: impl Into<String>) -> Result<(), DocumentError> {
        self.space_mut(id).ok_or_else(|| unknown(id))?.zone = zone.into();
        Ok(())
    }

    pub fn set_description(&mut self, id: &SpaceId, description: Option<String>) -> Result<(), DocumentError> {
        self.space_mut(id).ok_or_else(|| unknown(id))?.description = description;
        Ok(())
    }

    /// Sets the numeric area and updates the geometry per [`AreaEditPolicy`].
    pub fn set_area(&mut self, id: &SpaceId, area: f64) -> Result<(), DocumentError> {
        validate_area(id.as_str(), area)?;
        let ppm = self.pixels_per_meter();
        let policy = self.area_policy;
        let space = self.space_mut(id).ok_or_else(|| unknown(id))?;
        match policy {
            AreaEditPolicy::ResetToSquare => {
                space.area = area;
                space.reset_to_square(ppm);
            }
            AreaEditPolicy::ScaleShape => {
                let current = space.geometric_area(ppm);
                space.area = area;
                if current > 0.0 {
                    let k = (area / current).sqrt();
                    space.width *= k;
                    space.height *= k;
                    if let Shape::Polygon(points) = &mut space.shape {
                        for p in points.iter_mut() {
                            *p = *p * k;
                        }
                    }
                } else {
                    space.reset_to_square(ppm);
                }
            }
        }
        Ok(())
    }

    /// Adds an adjacency requirement between two existing spaces.
    pub fn connect(&mut self, a: &SpaceId, b: &SpaceId) -> Result<String, DocumentError> {
        if a == b {
            return Err(DocumentError::SelfConnection { id: a.to_string() });
        }
        for id in [a, b] {
            if self.space(id).is_none() {
                return Err(unknown(id));
            }
        }
        if self.connections.iter().any(|c| c.joins(a, b)) {
            return Err(DocumentError::DuplicateConnection {
                from: a.to_string(),
                to: b.to_string(),
            });
        }
        let connection = Connection::new(a.clone(), b.clone());
        let id = connection.id.clone();
        self.connections.push(connection);
        Ok(id)
    }

    /// Removes the connection joining `a` and `b`, if any.
    pub fn disconnect(&mut self, a: &SpaceId, b: &SpaceId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| !c.joins(a, b));
        before != self.connections.len()
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != connection_id);
        before != self.connections.len()
    }

    /// Adds a floor after the highest existing one and returns its index.
    pub fn add_floor(&mut self, label: Option<String>) -> usize {
        let index = self.floors.iter().map(|f| f.index + 1).max().unwrap_or(0);
        let label = label.unwrap_or_else(|| Floor::default_label(index));
        self.floors.push(Floor::new(index, label));
        index
    }

    pub fn rename_floor(&mut self, index: usize, label: impl Into<String>) -> Result<(), DocumentError> {
        let floor = self
            .floors
            .iter_mut()
            .find(|f| f.index == index)
            .ok_or(DocumentError::UnknownFloor { index })?;
        floor.label = label.into();
        Ok(())
    }

    /// Removes a floor. Its spaces go back to the inventory and its
    /// annotations and reference images are dropped.
    pub fn remove_floor(&mut self, index: usize) -> Result<(), DocumentError> {
        if self.floor(index).is_none() {
            return Err(DocumentError::UnknownFloor { index });
        }
        if self.floors.len() == 1 {
            return Err(DocumentError::LastFloor);
        }
        self.floors.retain(|f| f.index != index);
        for space in self.spaces.iter_mut().filter(|s| s.floor == index) {
            space.placed = false;
            space.floor = 0;
        }
        self.annotations.retain(|a| a.floor != index);
        self.reference_images.retain(|r| r.floor != index);
        if self.current_floor == index {
            self.current_floor = self.floors.first().map(|f| f.index).unwrap_or(0);
        }
        Ok(())
    }

    pub fn set_current_floor(&mut self, index: usize) -> Result<(), DocumentError> {
        if self.floor(index).is_none() {
            return Err(DocumentError::UnknownFloor { index });
        }
        self.current_floor = index;
        Ok(())
    }

    /// Relabels every space carrying `old` (exact match). Returns how many
    /// spaces changed. A color override moves with the label.
    pub fn rename_zone(&mut self, old: &str, new: &str) -> usize {
        let mut count = 0;
        for space in self.spaces.iter_mut().filter(|s| s.zone == old) {
            space.zone = new.to_string();
            count += 1;
        }
        if let Some(color) = self.zone_colors.remove(old) {
            self.zone_colors.insert(new.to_string(), color);
        }
        count
    }

    /// Moves the given spaces by the same world delta.
    pub fn translate_spaces(&mut self, ids: &[SpaceId], dx: f64, dy: f64) {
        let delta = Point::new(dx, dy);
        for space in self.spaces.iter_mut().filter(|s| ids.contains(&s.id)) {
            space.position = space.position + delta;
        }
    }

    /// Writes new positions for the listed spaces; unknown ids are ignored.
    pub fn apply_positions(&mut self, positions: &[(SpaceId, Point)]) {
        for (id, position) in positions {
            if let Some(space) = self.space_mut(id) {
                space.position = *position;
            }
        }
    }

    pub fn add_annotation(&mut self, annotation: Annotation) -> String {
        let id = annotation.id.clone();
        self.annotations.push(annotation);
        id
    }

    pub fn remove_annotation(&mut self, id: &str) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id != id);
        before != self.annotations.len()
    }

    pub fn add_reference_image(&mut self, image: ReferenceImage) -> String {
        let id = image.id.clone();
        self.reference_images.push(image);
        id
    }

    /// Moves a reference image unless it is locked. Returns whether it moved.
    pub fn move_reference_image(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        self.reference_images
            .iter_mut()
            .find(|r| r.id == id)
            .map(|r| r.translate(dx, dy))
            .unwrap_or(false)
    }

    pub fn remove_reference_image(&mut self, id: &str) -> bool {
        let before = self.reference_images.len();
        self.reference_images.retain(|r| r.id != id);
        before != self.reference_images.len()
    }
}
