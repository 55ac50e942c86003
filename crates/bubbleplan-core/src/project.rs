//! Project-level settings shared by geometry, snapping and export.
//!
//! `ProjectSettings` is the explicit context value that replaces a global
//! pixels-per-meter constant: every call that converts between world pixels
//! and meters receives it (or its `pixels_per_meter`) as a parameter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_PIXELS_PER_METER, DEFAULT_SNAP_THRESHOLD_PX, MAX_CIRCULATION_FACTOR,
};

/// Tuning of the magnetic layout nudge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MagneticSettings {
    /// Interval between ticks in milliseconds.
    pub tick_ms: u64,
    /// Constant pull toward every same-zone space, in pixels per tick.
    pub attraction: f64,
    /// Push per pixel of overlap, applied along the axis of least penetration.
    pub repulsion: f64,
    /// Displacements at or below this are treated as no movement.
    pub epsilon: f64,
}

impl Default for MagneticSettings {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            attraction: 0.5,
            repulsion: 0.1,
            epsilon: 0.01,
        }
    }
}

/// Settings carried by every document (`appSettings` in snapshots).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    pub pixels_per_meter: f64,
    /// Grid spacing in meters.
    pub grid_step_m: f64,
    pub grid_snap: bool,
    pub object_snap: bool,
    /// Snap threshold in screen pixels; divided by zoom before use.
    pub snap_threshold_px: f64,
    /// Circulation overhead as a fraction of net area (0.0 ..= 0.5).
    pub circulation_factor: f64,
    pub magnetic: MagneticSettings,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            grid_step_m: 1.0,
            grid_snap: false,
            object_snap: true,
            snap_threshold_px: DEFAULT_SNAP_THRESHOLD_PX,
            circulation_factor: 0.25,
            magnetic: MagneticSettings::default(),
        }
    }
}

impl ProjectSettings {
    /// Grid step converted to world pixels.
    pub fn grid_step_px(&self) -> f64 {
        self.grid_step_m * self.pixels_per_meter
    }

    /// Sets the circulation factor, clamped to the slider range.
    pub fn set_circulation_factor(&mut self, factor: f64) {
        self.circulation_factor = factor.clamp(0.0, MAX_CIRCULATION_FACTOR);
    }
}

/// How zone colors are post-processed at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Normal,
    Monochrome,
    Pastel,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Monochrome => write!(f, "monochrome"),
            Self::Pastel => write!(f, "pastel"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "color" => Ok(Self::Normal),
            "monochrome" | "mono" | "grayscale" => Ok(Self::Monochrome),
            "pastel" => Ok(Self::Pastel),
            _ => Err(format!("Unknown color mode: {}", s)),
        }
    }
}

/// Named visual preset applied uniformly at render and export time.
///
/// Selecting a style never mutates any space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramStyle {
    pub name: String,
    pub color_mode: ColorMode,
    pub border_width: f64,
    pub corner_radius: f64,
    pub opacity: f64,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self::preset("classic").unwrap_or_else(|| Self {
            name: "classic".to_string(),
            color_mode: ColorMode::Normal,
            border_width: 2.0,
            corner_radius: 8.0,
            opacity: 0.9,
            font_family: "Inter, Helvetica, Arial, sans-serif".to_string(),
            font_size: 12.0,
        })
    }
}

impl DiagramStyle {
    /// Names accepted by [`DiagramStyle::preset`].
    pub const PRESETS: [&'static str; 4] = ["classic", "blueprint", "soft", "sketch"];

    /// Looks up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        let font = "Inter, Helvetica, Arial, sans-serif".to_string();
        let style = match name {
            "classic" => Self {
                name: name.to_string(),
                color_mode: ColorMode::Normal,
                border_width: 2.0,
                corner_radius: 8.0,
                opacity: 0.9,
                font_family: font,
                font_size: 12.0,
            },
            "blueprint" => Self {
                name: name.to_string(),
                color_mode: ColorMode::Monochrome,
                border_width: 1.5,
                corner_radius: 0.0,
                opacity: 1.0,
                font_family: "Courier New, monospace".to_string(),
                font_size: 11.0,
            },
            "soft" => Self {
                name: name.to_string(),
                color_mode: ColorMode::Pastel,
                border_width: 1.0,
                corner_radius: 24.0,
                opacity: 0.8,
                font_family: font,
                font_size: 12.0,
            },
            "sketch" => Self {
                name: name.to_string(),
                color_mode: ColorMode::Normal,
                border_width: 3.0,
                corner_radius: 4.0,
                opacity: 0.7,
                font_family: "Comic Neue, cursive".to_string(),
                font_size: 13.0,
            },
            _ => return None,
        };
        Some(style)
    }
}
