//! Raster export: the SVG markup rasterized with resvg at a supersampling
//! factor, then encoded as PNG or JPEG.

use std::sync::Arc;

use bubbleplan_core::{Color, ExportError};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tiny_skia::Pixmap;
use tracing::debug;

/// Encoded raster flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    /// Lossy; `quality` is 1..=100.
    Jpeg { quality: u8 },
}

impl RasterFormat {
    fn name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg { .. } => "JPEG",
        }
    }
}

fn usvg_options() -> usvg::Options<'static> {
    let mut opt = usvg::Options::default();
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    opt.fontdb = Arc::new(db);
    opt
}

/// Rasterizes `svg` at `supersample` pixels per world pixel.
///
/// JPEG has no alpha channel, so the surface is pre-filled with
/// `background` before rendering.
pub fn rasterize(
    svg: &str,
    supersample: u32,
    format: RasterFormat,
    background: Color,
) -> Result<Vec<u8>, ExportError> {
    let opt = usvg_options();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| ExportError::SvgParse {
        reason: e.to_string(),
    })?;

    let scale = supersample.clamp(1, 8) as f32;
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;

    if matches!(format, RasterFormat::Jpeg { .. }) {
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            255,
        ));
    }
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    debug!("Rasterized {}x{} at {}x", width, height, scale);

    let encode_err = |reason: String| ExportError::Encode {
        format: format.name().to_string(),
        reason,
    };
    match format {
        RasterFormat::Png => pixmap.encode_png().map_err(|e| encode_err(e.to_string())),
        RasterFormat::Jpeg { quality } => {
            let rgb: Vec<u8> = pixmap
                .pixels()
                .iter()
                .flat_map(|p| {
                    let c = p.demultiply();
                    [c.red(), c.green(), c.blue()]
                })
                .collect();
            let mut out = Vec::new();
            JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                .encode(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| encode_err(e.to_string()))?;
            Ok(out)
        }
    }
}
