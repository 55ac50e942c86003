//! Grid and object snapping.
//!
//! Thresholds are given in screen pixels and divided by the zoom scale, so
//! snapping feels the same at every zoom level. Per axis, an object-snap
//! match takes precedence over the grid.

use bubbleplan_core::ProjectSettings;

use crate::document::Document;
use crate::model::{Bounds, Point, SpaceId};

/// Orientation of an alignment guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    /// A vertical line at world `x = position`.
    Vertical,
    /// A horizontal line at world `y = position`.
    Horizontal,
}

/// An alignment guide to draw while a snap is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub axis: GuideAxis,
    pub position: f64,
}

/// Which target edges a moving feature may align with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feature {
    /// A leading or trailing edge: matches target edges.
    Edge,
    /// A center line: matches target centers.
    Center,
    /// A free point: matches anything.
    Any,
}

/// Result of snapping a position.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub position: Point,
    pub guides: Vec<Guide>,
}

/// Snap configuration for one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapEngine {
    pub grid_enabled: bool,
    pub grid_step: f64,
    pub object_enabled: bool,
    pub threshold_px: f64,
}

impl SnapEngine {
    pub fn from_settings(settings: &ProjectSettings) -> Self {
        Self {
            grid_enabled: settings.grid_snap,
            grid_step: settings.grid_step_px(),
            object_enabled: settings.object_snap,
            threshold_px: settings.snap_threshold_px,
        }
    }

    /// No snapping at all.
    pub fn disabled() -> Self {
        Self {
            grid_enabled: false,
            grid_step: 0.0,
            object_enabled: false,
            threshold_px: 0.0,
        }
    }

    /// Rounds to the nearest grid line; identity when the grid is off.
    pub fn snap_grid(&self, value: f64) -> f64 {
        if !self.grid_enabled || self.grid_step <= 0.0 {
            return value;
        }
        (value / self.grid_step).round() * self.grid_step
    }

    fn threshold(&self, zoom: f64) -> f64 {
        if zoom > 0.0 {
            self.threshold_px / zoom
        } else {
            self.threshold_px
        }
    }

    /// First target edge within the threshold of any feature, as
    /// `(adjustment, guide position)`.
    fn match_axis(
        &self,
        features: &[(f64, Feature)],
        targets: &[Bounds],
        horizontal: bool,
        threshold: f64,
    ) -> Option<(f64, f64)> {
        if !self.object_enabled {
            return None;
        }
        for target in targets {
            let (min, max, center) = if horizontal {
                (target.min_x, target.max_x, target.center().x)
            } else {
                (target.min_y, target.max_y, target.center().y)
            };
            for &(value, feature) in features {
                let candidates: &[f64] = match feature {
                    Feature::Edge => &[min, max],
                    Feature::Center => &[center],
                    Feature::Any => &[min, max, center],
                };
                for &edge in candidates {
                    if (edge - value).abs() <= threshold {
                        return Some((edge - value, edge));
                    }
                }
            }
        }
        None
    }

    /// Snaps the top-left of a moving box whose bounds would be `proposed`.
    pub fn snap_move(&self, proposed: &Bounds, targets: &[Bounds], zoom: f64) -> SnapResult {
        let threshold = self.threshold(zoom);
        let mut position = Point::new(proposed.min_x, proposed.min_y);
        let mut guides = Vec::new();

        let center = proposed.center();
        let xs = [
            (proposed.min_x, Feature::Edge),
            (proposed.max_x, Feature::Edge),
            (center.x, Feature::Center),
        ];
        match self.match_axis(&xs, targets, true, threshold) {
            Some((adjust, guide)) => {
                position.x += adjust;
                guides.push(Guide {
                    axis: GuideAxis::Vertical,
                    position: guide,
                });
            }
            None => position.x = self.snap_grid(position.x),
        }

        let ys = [
            (proposed.min_y, Feature::Edge),
            (proposed.max_y, Feature::Edge),
            (center.y, Feature::Center),
        ];
        match self.match_axis(&ys, targets, false, threshold) {
            Some((adjust, guide)) => {
                position.y += adjust;
                guides.push(Guide {
                    axis: GuideAxis::Horizontal,
                    position: guide,
                });
            }
            None => position.y = self.snap_grid(position.y),
        }

        SnapResult { position, guides }
    }

    /// Snaps a free point (a polygon vertex).
    pub fn snap_point(&self, point: Point, targets: &[Bounds], zoom: f64) -> SnapResult {
        let threshold = self.threshold(zoom);
        let mut position = point;
        let mut guides = Vec::new();

        match self.match_axis(&[(point.x, Feature::Any)], targets, true, threshold) {
            Some((adjust, guide)) => {
                position.x += adjust;
                guides.push(Guide {
                    axis: GuideAxis::Vertical,
                    position: guide,
                });
            }
            None => position.x = self.snap_grid(position.x),
        }
        match self.match_axis(&[(point.y, Feature::Any)], targets, false, threshold) {
            Some((adjust, guide)) => {
                position.y += adjust;
                guides.push(Guide {
                    axis: GuideAxis::Horizontal,
                    position: guide,
                });
            }
            None => position.y = self.snap_grid(position.y),
        }

        SnapResult { position, guides }
    }

    /// Snaps a single edge coordinate (resize handles, edge drags).
    /// `vertical_edge` is true for an edge at constant x.
    pub fn snap_edge(&self, value: f64, vertical_edge: bool, targets: &[Bounds], zoom: f64) -> (f64, Option<Guide>) {
        let threshold = self.threshold(zoom);
        match self.match_axis(&[(value, Feature::Edge)], targets, vertical_edge, threshold) {
            Some((adjust, guide)) => (
                value + adjust,
                Some(Guide {
                    axis: if vertical_edge {
                        GuideAxis::Vertical
                    } else {
                        GuideAxis::Horizontal
                    },
                    position: guide,
                }),
            ),
            None => (self.snap_grid(value), None),
        }
    }
}

/// Bounds of every placed space on `floor` except those in `exclude`, in
/// document order.
pub fn snap_targets(doc: &Document, floor: usize, exclude: &[SpaceId]) -> Vec<Bounds> {
    doc.spaces_on_floor(floor)
        .filter(|s| !exclude.contains(&s.id))
        .map(|s| s.bounds())
        .collect()
}
