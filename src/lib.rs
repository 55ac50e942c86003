//! # Bubbleplan
//!
//! Bubble-diagram space planner: program spaces by name, area and zone, lay
//! them out on floors, and export calibrated drawings.
//!
//! ## Architecture
//!
//! Bubbleplan is organized as a workspace with multiple crates:
//!
//! 1. **bubbleplan-core** - Units, colors, project settings, error types
//! 2. **bubbleplan-designer** - Document model, geometry kernel, interaction, export
//! 3. **bubbleplan-settings** - Configuration file handling and validation
//! 4. **bubbleplan** - Command-line front end that integrates all crates

pub use bubbleplan_core::{Error, ExportError, ProjectSettings, Result};
pub use bubbleplan_designer as designer;
pub use bubbleplan_designer::{
    export_document, load_from_file, save_to_file, Document, ExportFormat, ExportOptions, ZonePalette,
};
pub use bubbleplan_settings::{default_config_path, Config, ExportSettings};

use bubbleplan_designer::export::{PdfPageOptions, PdfScale};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so exported artifacts can be piped from stdout.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Builds exporter options from the persisted export section.
pub fn export_options(settings: &ExportSettings, floor: Option<usize>) -> ExportOptions {
    ExportOptions {
        floor,
        margin_px: settings.margin_px,
        scale_bar_m: settings.scale_bar_m,
        supersample: settings.supersample,
        jpeg_quality: settings.jpeg_quality,
        include_background: settings.include_background,
        background: settings.background,
        pdf: PdfPageOptions {
            page_width_mm: settings.pdf_page_width_mm,
            page_height_mm: settings.pdf_page_height_mm,
            margin_mm: settings.pdf_margin_mm,
            scale: settings
                .pdf_scale_denominator
                .map_or(PdfScale::Fit, PdfScale::Ratio),
        },
    }
}

/// Zone palette configured by the user.
pub fn zone_palette(config: &Config) -> ZonePalette {
    ZonePalette::new(config.palette.clone())
}
