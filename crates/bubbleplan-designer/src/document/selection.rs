use crate::model::SpaceId;

use super::Document;

/// Manages the set of selected spaces.
///
/// One space is the "primary" selection: the one a group gesture is
/// computed from. Membership order is the order spaces were selected in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<SpaceId>,
    primary: Option<SpaceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[SpaceId] {
        &self.ids
    }

    pub fn primary(&self) -> Option<&SpaceId> {
        self.primary.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &SpaceId) -> bool {
        self.ids.contains(id)
    }

    /// Selects only `id`.
    pub fn select_only(&mut self, id: SpaceId) {
        self.ids = vec![id.clone()];
        self.primary = Some(id);
    }

    /// Adds `id` if absent, removes it if present (Shift+click).
    pub fn toggle(&mut self, id: SpaceId) {
        if let Some(index) = self.ids.iter().position(|s| s == &id) {
            self.ids.remove(index);
            if self.primary.as_ref() == Some(&id) {
                self.primary = self.ids.last().cloned();
            }
        } else {
            self.ids.push(id.clone());
            self.primary = Some(id);
        }
    }

    /// Makes `id` primary without changing membership; ignored if not selected.
    pub fn set_primary(&mut self, id: &SpaceId) {
        if self.contains(id) {
            self.primary = Some(id.clone());
        }
    }

    pub fn remove(&mut self, id: &SpaceId) {
        self.ids.retain(|s| s != id);
        if self.primary.as_ref() == Some(id) {
            self.primary = self.ids.last().cloned();
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.primary = None;
    }

    /// Drops ids that no longer resolve to a placed space on the current floor.
    pub fn prune(&mut self, doc: &Document) {
        let floor = doc.current_floor();
        let stale: Vec<SpaceId> = self
            .ids
            .iter()
            .filter(|id| {
                doc.space(id)
                    .map(|s| !s.placed || s.floor != floor)
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        for id in &stale {
            self.remove(id);
        }
    }
}
