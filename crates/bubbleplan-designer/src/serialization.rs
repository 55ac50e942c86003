//! JSON snapshots of a whole document.
//!
//! Saving writes the full document. Loading is tolerant: missing optional
//! fields take defaults, and a structurally invalid room entry is skipped
//! and reported instead of failing the whole load.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use bubbleplan_core::constants::SNAPSHOT_VERSION;
use bubbleplan_core::{side_from_area, Color, DiagramStyle, ProjectSettings, SnapshotError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::document::Document;
use crate::model::{
    Annotation, Connection, Floor, OutlineStyle, Point, ReferenceImage, Shape, Space, SpaceId, SpaceStyle,
};

/// Accepts string or numeric ids.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Int(i64),
        Float(f64),
    }
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Int(i) => i.to_string(),
        IdRepr::Float(f) => f.to_string(),
    })
}

/// Persisted form of a space (`rooms[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub area: f64,
    pub zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_placed: bool,
    #[serde(default)]
    pub floor: usize,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<Point>>,
    /// Outline style name; unknown names fall back to the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    /// Per-room color override; malformed values are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
}

impl RoomRecord {
    pub fn from_space(space: &Space) -> Self {
        Self {
            id: space.id.to_string(),
            name: space.name.clone(),
            area: space.area,
            zone: space.zone.clone(),
            description: space.description.clone(),
            is_placed: space.placed,
            floor: space.floor,
            x: space.position.x,
            y: space.position.y,
            width: Some(space.width),
            height: Some(space.height),
            polygon: match &space.shape {
                Shape::Rect => None,
                Shape::Polygon(points) => Some(points.clone()),
            },
            shape: Some(
                match space.outline {
                    OutlineStyle::Standard => "standard",
                    OutlineStyle::Bubble => "bubble",
                }
                .to_string(),
            ),
            style: space.style.and_then(|s| serde_json::to_value(s).ok()),
        }
    }

    /// Rebuilds a space. Fails with a reason for entries that cannot be used.
    pub fn into_space(self, pixels_per_meter: f64) -> std::result::Result<Space, String> {
        if self.id.trim().is_empty() {
            return Err("empty id".to_string());
        }
        if !(self.area.is_finite() && self.area > 0.0) {
            return Err(format!("invalid area {}", self.area));
        }
        let side = side_from_area(self.area, pixels_per_meter);
        let positive = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
        let mut space = Space::new(self.name, self.area, self.zone, pixels_per_meter);
        space.id = SpaceId(self.id);
        space.description = self.description;
        space.placed = self.is_placed;
        space.floor = self.floor;
        space.position = Point::new(self.x, self.y);
        space.width = positive(self.width).unwrap_or(side);
        space.height = positive(self.height).unwrap_or(side);
        space.shape = match self.polygon {
            Some(points) if points.len() >= 3 => Shape::Polygon(points),
            _ => Shape::Rect,
        };
        space.outline = match self.shape.as_deref() {
            Some("bubble") => OutlineStyle::Bubble,
            _ => OutlineStyle::Standard,
        };
        space.style = self
            .style
            .and_then(|v| serde_json::from_value::<SpaceStyle>(v).ok());
        space.rebase_polygon();
        Ok(space)
    }
}

/// Full document snapshot as written to disk.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub timestamp: String,
    pub project_name: String,
    pub rooms: Vec<RoomRecord>,
    pub connections: Vec<Connection>,
    pub floors: Vec<Floor>,
    pub current_floor: usize,
    pub zone_colors: BTreeMap<String, Color>,
    pub app_settings: ProjectSettings,
    pub diagram_style: DiagramStyle,
    pub annotations: Vec<Annotation>,
    pub reference_images: Vec<ReferenceImage>,
}

impl Snapshot {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            project_name: doc.project_name.clone(),
            rooms: doc.spaces().iter().map(RoomRecord::from_space).collect(),
            connections: doc.connections().to_vec(),
            floors: doc.floors().to_vec(),
            current_floor: doc.current_floor(),
            zone_colors: doc.zone_colors.clone(),
            app_settings: doc.settings.clone(),
            diagram_style: doc.style.clone(),
            annotations: doc.annotations.clone(),
            reference_images: doc.reference_images.clone(),
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loose shape of a snapshot on the way in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    rooms: Vec<Value>,
    #[serde(default)]
    connections: Vec<Value>,
    #[serde(default)]
    floors: Vec<Value>,
    #[serde(default)]
    current_floor: Option<usize>,
    #[serde(default)]
    zone_colors: BTreeMap<String, Value>,
    #[serde(default)]
    app_settings: Option<Value>,
    #[serde(default)]
    diagram_style: Option<Value>,
    #[serde(default)]
    annotations: Vec<Value>,
    #[serde(default)]
    reference_images: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(deserialize_with = "deserialize_id")]
    from_id: String,
    #[serde(deserialize_with = "deserialize_id")]
    to_id: String,
}

/// A `rooms[]` entry that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRoom {
    pub index: usize,
    pub reason: String,
}

/// What a tolerant load skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub rejected_rooms: Vec<RejectedRoom>,
    pub dropped_connections: usize,
    pub skipped_entries: usize,
    /// Project settings that were out of range and replaced by defaults.
    pub settings_warnings: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected_rooms.is_empty()
            && self.dropped_connections == 0
            && self.skipped_entries == 0
            && self.settings_warnings.is_empty()
    }
}

/// Replaces unusable project settings with defaults, one warning per field.
fn sanitize_settings(settings: &mut ProjectSettings, warnings: &mut Vec<String>) {
    let defaults = ProjectSettings::default();
    let mut reset = |name: &str, value: f64, field: &mut f64, default: f64| {
        warnings.push(format!("{} {} replaced by {}", name, value, default));
        *field = default;
    };
    if !(settings.pixels_per_meter.is_finite() && settings.pixels_per_meter > 0.0) {
        let value = settings.pixels_per_meter;
        reset("pixelsPerMeter", value, &mut settings.pixels_per_meter, defaults.pixels_per_meter);
    }
    if !(settings.grid_step_m.is_finite() && settings.grid_step_m > 0.0) {
        let value = settings.grid_step_m;
        reset("gridStepM", value, &mut settings.grid_step_m, defaults.grid_step_m);
    }
    if !(settings.snap_threshold_px.is_finite() && settings.snap_threshold_px >= 0.0) {
        let value = settings.snap_threshold_px;
        reset(
            "snapThresholdPx",
            value,
            &mut settings.snap_threshold_px,
            defaults.snap_threshold_px,
        );
    }
    if !settings.circulation_factor.is_finite() {
        let value = settings.circulation_factor;
        reset(
            "circulationFactor",
            value,
            &mut settings.circulation_factor,
            defaults.circulation_factor,
        );
    } else {
        settings.set_circulation_factor(settings.circulation_factor);
    }
}

fn check_version(version: &Option<Value>) -> std::result::Result<(), SnapshotError> {
    let text = match version {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let major = text.split('.').next().unwrap_or("").trim();
    match major {
        "1" | "2" => Ok(()),
        _ => Err(SnapshotError::UnsupportedVersion { version: text }),
    }
}

fn zone_color(value: &Value) -> Option<Color> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Object(map) => ["fill", "bg", "color"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .and_then(|s| s.parse().ok()),
        _ => None,
    }
}

/// Parses a snapshot into a document.
pub fn document_from_json(text: &str) -> std::result::Result<(Document, LoadReport), SnapshotError> {
    let raw: RawSnapshot = serde_json::from_str(text)?;
    check_version(&raw.version)?;

    let mut report = LoadReport::default();
    let mut settings = raw
        .app_settings
        .and_then(|v| serde_json::from_value::<ProjectSettings>(v).ok())
        .unwrap_or_default();
    sanitize_settings(&mut settings, &mut report.settings_warnings);
    for warning in &report.settings_warnings {
        warn!("Snapshot settings: {}", warning);
    }
    let mut doc = Document::new(
        raw.project_name.unwrap_or_else(|| "Untitled Project".to_string()),
        settings,
    );
    let ppm = doc.pixels_per_meter();

    if let Some(style) = raw
        .diagram_style
        .and_then(|v| serde_json::from_value::<DiagramStyle>(v).ok())
    {
        doc.style = style;
    }

    let mut floors: Vec<Floor> = Vec::new();
    for value in raw.floors {
        match serde_json::from_value::<Floor>(value) {
            Ok(floor) if !floors.iter().any(|f| f.index == floor.index) => floors.push(floor),
            _ => report.skipped_entries += 1,
        }
    }

    for (index, value) in raw.rooms.into_iter().enumerate() {
        let result = serde_json::from_value::<RoomRecord>(value)
            .map_err(|e| e.to_string())
            .and_then(|record| record.into_space(ppm))
            .and_then(|space| {
                let floor = space.floor;
                doc.insert_space(space).map(|_| floor).map_err(|e| e.to_string())
            });
        match result {
            Ok(floor) => {
                if !floors.iter().any(|f| f.index == floor) {
                    floors.push(Floor::new(floor, Floor::default_label(floor)));
                }
            }
            Err(reason) => {
                warn!("Skipping room entry {}: {}", index, reason);
                report.rejected_rooms.push(RejectedRoom { index, reason });
            }
        }
    }

    if !floors.is_empty() {
        floors.sort_by_key(|f| f.index);
        doc.floors = floors;
    }
    let current = raw.current_floor.unwrap_or(0);
    doc.current_floor = if doc.floor(current).is_some() {
        current
    } else {
        doc.floors.first().map(|f| f.index).unwrap_or(0)
    };

    for value in raw.connections {
        let Ok(record) = serde_json::from_value::<ConnectionRecord>(value) else {
            report.dropped_connections += 1;
            continue;
        };
        let from = SpaceId(record.from_id);
        let to = SpaceId(record.to_id);
        if doc.space(&from).is_none()
            || doc.space(&to).is_none()
            || from == to
            || doc.connections.iter().any(|c| c.joins(&from, &to))
        {
            report.dropped_connections += 1;
            continue;
        }
        let mut connection = Connection::new(from, to);
        match record.id {
            Some(Value::String(id)) if !id.is_empty() => connection.id = id,
            Some(Value::Number(n)) => connection.id = n.to_string(),
            _ => {}
        }
        doc.connections.push(connection);
    }

    for (zone, value) in raw.zone_colors {
        match zone_color(&value) {
            Some(color) => {
                doc.zone_colors.insert(zone, color);
            }
            None => report.skipped_entries += 1,
        }
    }

    for value in raw.annotations {
        match serde_json::from_value::<Annotation>(value) {
            Ok(annotation) => doc.annotations.push(annotation),
            Err(_) => report.skipped_entries += 1,
        }
    }
    for value in raw.reference_images {
        match serde_json::from_value::<ReferenceImage>(value) {
            Ok(image) => doc.reference_images.push(image),
            Err(_) => report.skipped_entries += 1,
        }
    }

    info!(
        "Loaded snapshot '{}': {} space(s), {} connection(s), {} rejected",
        doc.project_name,
        doc.spaces().len(),
        doc.connections().len(),
        report.rejected_rooms.len()
    );
    Ok((doc, report))
}

/// Serializes the document as a pretty-printed snapshot.
pub fn document_to_json(doc: &Document) -> std::result::Result<String, SnapshotError> {
    Snapshot::from_document(doc).to_json()
}

/// Saves a snapshot to disk.
pub fn save_to_file(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let json = document_to_json(doc).context("Failed to serialize document")?;
    std::fs::write(path.as_ref(), json).context("Failed to write snapshot file")?;
    Ok(())
}

/// Loads a snapshot from disk.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<(Document, LoadReport)> {
    let content = std::fs::read_to_string(path.as_ref()).context("Failed to read snapshot file")?;
    let loaded = document_from_json(&content).context("Failed to parse snapshot file")?;
    Ok(loaded)
}
