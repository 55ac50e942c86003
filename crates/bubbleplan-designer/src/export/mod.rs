//! Export pipeline.
//!
//! Every artifact is rendered from the document and the geometry kernel
//! alone, never from screen state. Raster formats rasterize the same SVG
//! markup the vector export writes.

mod dxf;
mod pdf;
mod raster;
mod svg;

pub use dxf::render_dxf;
pub use pdf::{pdf_layout, PdfLayout, PdfPageOptions, PdfRect, PdfScale, PdfScaleBar};
pub use raster::{rasterize, RasterFormat};
pub use svg::{render_svg, SvgOptions};

use std::fmt;
use std::str::FromStr;

use bubbleplan_core::constants::SCALE_BAR_METERS;
use bubbleplan_core::{format_area, Color, DiagramStyle, Error, ExportError};
use serde::Serialize;
use tracing::{debug, info};

use crate::colors::{ColorResolver, ZonePalette};
use crate::document::Document;
use crate::geometry::{wrap_text, HeuristicMeasure, TextMeasure};
use crate::model::{Bounds, Point, Space};
use crate::serialization::document_to_json;

/// Extra room below the drawing for the scale bar, in world pixels.
pub const SCALE_BAR_ROOM_PX: f64 = 48.0;

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Dxf,
    Png,
    Jpeg,
    Json,
    /// SVG body plus page geometry for an external PDF writer.
    PdfLayout,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Dxf => "dxf",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Json | Self::PdfLayout => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Dxf => "application/dxf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Json | Self::PdfLayout => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Svg => "svg",
            Self::Dxf => "dxf",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Json => "json",
            Self::PdfLayout => "pdf-layout",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "dxf" => Ok(Self::Dxf),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "json" => Ok(Self::Json),
            "pdf" | "pdf-layout" => Ok(Self::PdfLayout),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Export parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Floor to export; the document's current floor when `None`.
    pub floor: Option<usize>,
    pub margin_px: f64,
    pub scale_bar_m: f64,
    pub supersample: u32,
    pub jpeg_quality: u8,
    pub include_background: bool,
    pub background: Color,
    pub pdf: PdfPageOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            floor: None,
            margin_px: 40.0,
            scale_bar_m: SCALE_BAR_METERS,
            supersample: 2,
            jpeg_quality: 90,
            include_background: true,
            background: Color::WHITE,
            pdf: PdfPageOptions::default(),
        }
    }
}

/// A produced file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.format.extension())
    }
}

/// A space label broken into lines and anchored at the outline centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub lines: Vec<String>,
    pub anchor: Point,
    pub font_size: f64,
    pub line_height: f64,
}

impl LabelLayout {
    /// Each line with its center point, stacked symmetrically about the anchor.
    pub fn positioned_lines(&self) -> Vec<(&str, Point)> {
        let n = self.lines.len() as f64;
        let top = self.anchor.y - (n - 1.0) * self.line_height / 2.0;
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                (
                    line.as_str(),
                    Point::new(self.anchor.x, top + i as f64 * self.line_height),
                )
            })
            .collect()
    }
}

/// Wrapped name lines followed by the area line.
pub fn layout_label(space: &Space, style: &DiagramStyle, measure: &dyn TextMeasure) -> LabelLayout {
    let max_width = (space.width * 0.85).max(style.font_size);
    let mut lines = wrap_text(&space.name, max_width, style.font_size, measure);
    lines.push(format_area(space.area));
    LabelLayout {
        lines,
        anchor: space.world_centroid(),
        font_size: style.font_size,
        line_height: style.font_size * 1.25,
    }
}

/// Everything an exporter needs for one floor.
pub struct ExportScene<'a> {
    pub doc: &'a Document,
    pub floor: usize,
    pub spaces: Vec<&'a Space>,
    /// Tight bounds of the drawn content.
    pub content: Bounds,
    /// Content plus margins and scale-bar room: the output canvas.
    pub frame: Bounds,
    pub colors: ColorResolver,
    pub labels: Vec<LabelLayout>,
}

impl<'a> ExportScene<'a> {
    /// Collects the visible content of a floor.
    ///
    /// Fails when the floor has no placed space.
    pub fn build(
        doc: &'a Document,
        options: &ExportOptions,
        palette: &ZonePalette,
    ) -> Result<Self, ExportError> {
        let floor = options.floor.unwrap_or_else(|| doc.current_floor());
        let spaces: Vec<&Space> = doc.spaces_on_floor(floor).collect();
        if spaces.is_empty() {
            return Err(ExportError::NothingToExport { floor });
        }

        let mut points: Vec<Point> = spaces.iter().flat_map(|s| s.world_vertices()).collect();
        points.extend(doc.annotations_on_floor(floor).flat_map(|a| a.extent_points()));
        for image in doc.reference_images_on_floor(floor) {
            let b = image.bounds();
            points.push(Point::new(b.min_x, b.min_y));
            points.push(Point::new(b.max_x, b.max_y));
        }
        let content = Bounds::from_points(&points).ok_or(ExportError::NothingToExport { floor })?;
        let margin = options.margin_px.max(0.0);
        let mut frame = Bounds::new(
            content.min_x - margin,
            content.min_y - margin,
            content.max_x + margin,
            content.max_y + margin + SCALE_BAR_ROOM_PX,
        );
        // The scale bar starts at the content's left edge and may be longer
        // than the drawing is wide.
        let bar_len = options.scale_bar_m * doc.pixels_per_meter();
        if bar_len.is_finite() && bar_len > 0.0 {
            frame.max_x = frame.max_x.max(content.min_x + bar_len + margin);
        }

        let measure = HeuristicMeasure;
        let labels = spaces
            .iter()
            .map(|s| layout_label(s, &doc.style, &measure))
            .collect();

        debug!(
            "Export scene floor {}: {} space(s), frame {:.1}x{:.1}",
            floor,
            spaces.len(),
            frame.width(),
            frame.height()
        );
        Ok(Self {
            doc,
            floor,
            spaces,
            content,
            frame,
            colors: doc.color_resolver(palette.clone()),
            labels,
        })
    }
}

/// Page geometry plus the SVG body to embed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExport {
    pub layout: PdfLayout,
    pub svg: String,
}

/// Produces one artifact for the requested floor.
pub fn export_document(
    doc: &Document,
    format: ExportFormat,
    options: &ExportOptions,
    palette: &ZonePalette,
) -> Result<ExportArtifact, Error> {
    let scene = ExportScene::build(doc, options, palette)?;
    let bytes = match format {
        ExportFormat::Json => document_to_json(doc)?.into_bytes(),
        ExportFormat::Svg => render_svg(&scene, &SvgOptions::from_export(options, true)).into_bytes(),
        ExportFormat::Dxf => render_dxf(&scene).into_bytes(),
        ExportFormat::Png | ExportFormat::Jpeg => {
            let markup = render_svg(&scene, &SvgOptions::from_export(options, true));
            let raster = if format == ExportFormat::Png {
                RasterFormat::Png
            } else {
                RasterFormat::Jpeg {
                    quality: options.jpeg_quality,
                }
            };
            rasterize(&markup, options.supersample, raster, options.background)?
        }
        ExportFormat::PdfLayout => {
            let layout = pdf_layout(
                scene.frame.width(),
                scene.frame.height(),
                doc.pixels_per_meter(),
                &options.pdf,
                options.scale_bar_m,
            );
            let svg = render_svg(&scene, &SvgOptions::from_export(options, false));
            serde_json::to_vec_pretty(&PdfExport { layout, svg }).map_err(|e| ExportError::Encode {
                format: format.to_string(),
                reason: e.to_string(),
            })?
        }
    };
    info!(
        "Exported floor {} as {} ({} bytes)",
        scene.floor,
        format,
        bytes.len()
    );
    Ok(ExportArtifact { format, bytes })
}
