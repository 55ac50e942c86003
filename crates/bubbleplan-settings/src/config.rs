//! Configuration and settings management for Bubbleplan
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Project defaults applied to new documents (scale, snapping, circulation)
//! - Export parameters (margins, scale bar, raster and PDF page settings)
//! - Diagram style preset
//! - Zone palette

use bubbleplan_core::constants::{MAX_CIRCULATION_FACTOR, SCALE_BAR_METERS};
use bubbleplan_core::{default_palette, Color, DiagramStyle, PaletteEntry, ProjectSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// File name used inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Export parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Padding around the drawing in world pixels
    pub margin_px: f64,
    /// Scale bar length in meters
    pub scale_bar_m: f64,
    /// Raster pixels per world pixel
    pub supersample: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Paint an opaque background
    pub include_background: bool,
    pub background: Color,
    pub pdf_page_width_mm: f64,
    pub pdf_page_height_mm: f64,
    pub pdf_margin_mm: f64,
    /// Drawing scale 1:N for PDF; fit to page when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_scale_denominator: Option<f64>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            margin_px: 40.0,
            scale_bar_m: SCALE_BAR_METERS,
            supersample: 2,
            jpeg_quality: 90,
            include_background: true,
            background: Color::WHITE,
            pdf_page_width_mm: 297.0,
            pdf_page_height_mm: 210.0,
            pdf_margin_mm: 10.0,
            pdf_scale_denominator: None,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recent snapshot files, most recent first
    pub recent_files: Vec<PathBuf>,
    /// Number of recent files to track
    pub recent_files_count: usize,
    /// Defaults for new documents
    pub project: ProjectSettings,
    /// Export parameters
    pub export: ExportSettings,
    /// Diagram style for new documents
    pub style: DiagramStyle,
    /// Zone palette
    pub palette: Vec<PaletteEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_files: Vec::new(),
            recent_files_count: 10,
            project: ProjectSettings::default(),
            export: ExportSettings::default(),
            style: DiagramStyle::default(),
            palette: default_palette(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let project = &self.project;
        if !(project.pixels_per_meter.is_finite() && project.pixels_per_meter > 0.0) {
            return Err(SettingsError::invalid("project.pixelsPerMeter", "must be > 0"));
        }
        if project.grid_step_m <= 0.0 {
            return Err(SettingsError::invalid("project.gridStepM", "must be > 0"));
        }
        if project.snap_threshold_px < 0.0 {
            return Err(SettingsError::invalid("project.snapThresholdPx", "must be >= 0"));
        }
        if !(0.0..=MAX_CIRCULATION_FACTOR).contains(&project.circulation_factor) {
            return Err(SettingsError::invalid(
                "project.circulationFactor",
                format!("must be within 0..={}", MAX_CIRCULATION_FACTOR),
            ));
        }
        if project.magnetic.tick_ms == 0 {
            return Err(SettingsError::invalid("project.magnetic.tickMs", "must be > 0"));
        }

        let export = &self.export;
        if !(1..=8).contains(&export.supersample) {
            return Err(SettingsError::invalid("export.supersample", "must be within 1..=8"));
        }
        if !(1..=100).contains(&export.jpeg_quality) {
            return Err(SettingsError::invalid("export.jpeg_quality", "must be within 1..=100"));
        }
        if export.margin_px < 0.0 || export.pdf_margin_mm < 0.0 {
            return Err(SettingsError::invalid("export.margin", "must be >= 0"));
        }
        if export.scale_bar_m <= 0.0 {
            return Err(SettingsError::invalid("export.scale_bar_m", "must be > 0"));
        }
        if export.pdf_page_width_mm <= 2.0 * export.pdf_margin_mm
            || export.pdf_page_height_mm <= 2.0 * export.pdf_margin_mm
        {
            return Err(SettingsError::invalid("export.pdf_page", "page is smaller than its margins"));
        }
        if export.pdf_scale_denominator.is_some_and(|n| n <= 0.0) {
            return Err(SettingsError::invalid("export.pdf_scale_denominator", "must be > 0"));
        }

        if self.style.font_size <= 0.0 {
            return Err(SettingsError::invalid("style.fontSize", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.style.opacity) {
            return Err(SettingsError::invalid("style.opacity", "must be within 0..=1"));
        }
        if let Some(entry) = self.palette.iter().find(|e| e.zone.trim().is_empty()) {
            return Err(SettingsError::invalid(
                "palette",
                format!("entry with keywords {:?} has no zone name", entry.keywords),
            ));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.recent_files_count);
    }
}

/// `<config dir>/bubbleplan/config.toml`, falling back to the home directory.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| SettingsError::ConfigDirectory("no config or home directory".to_string()))?;
    Ok(base.join("bubbleplan").join(CONFIG_FILE_NAME))
}
