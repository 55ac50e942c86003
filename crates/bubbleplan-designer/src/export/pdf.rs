//! Page geometry for PDF output.
//!
//! The drawing is embedded as vector markup by a PDF writer; this module
//! decides where it goes on the page and draws the scale bar in page units
//! so its length stays exact whatever the embedding scale. All lengths are
//! millimeters measured from the page's top-left corner.

use bubbleplan_core::units::format_meters;
use serde::Serialize;

/// How the drawing is sized on paper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "denominator")]
pub enum PdfScale {
    /// Largest uniform scale that fits the printable area.
    Fit,
    /// Drawing scale 1:N; the page grows to hold the drawing.
    Ratio(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfPageOptions {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    pub scale: PdfScale,
}

impl Default for PdfPageOptions {
    fn default() -> Self {
        // A4 landscape.
        Self {
            page_width_mm: 297.0,
            page_height_mm: 210.0,
            margin_mm: 10.0,
            scale: PdfScale::Fit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfScaleBar {
    pub x: f64,
    pub y: f64,
    pub length_mm: f64,
    pub tick_mm: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// Where the drawing's frame lands on the page.
    pub embed: PdfRect,
    /// Page millimeters per world pixel.
    pub mm_per_px: f64,
    /// Effective drawing scale denominator (1:N).
    pub scale_denominator: f64,
    pub scale_bar: PdfScaleBar,
}

/// Lays out a `width_px` x `height_px` drawing on a page.
pub fn pdf_layout(
    width_px: f64,
    height_px: f64,
    pixels_per_meter: f64,
    options: &PdfPageOptions,
    scale_bar_m: f64,
) -> PdfLayout {
    let margin = options.margin_mm.max(0.0);
    let width_px = width_px.max(1.0);
    let height_px = height_px.max(1.0);

    let (page_width_mm, page_height_mm, mm_per_px) = match options.scale {
        PdfScale::Ratio(denominator) if denominator > 0.0 => {
            let mm_per_px = 1000.0 / (pixels_per_meter * denominator);
            (
                width_px * mm_per_px + 2.0 * margin,
                height_px * mm_per_px + 2.0 * margin,
                mm_per_px,
            )
        }
        _ => {
            let avail_w = (options.page_width_mm - 2.0 * margin).max(1.0);
            let avail_h = (options.page_height_mm - 2.0 * margin).max(1.0);
            (
                options.page_width_mm,
                options.page_height_mm,
                (avail_w / width_px).min(avail_h / height_px),
            )
        }
    };

    let embed_w = width_px * mm_per_px;
    let embed_h = height_px * mm_per_px;
    let embed = PdfRect {
        x: (page_width_mm - embed_w) / 2.0,
        y: (page_height_mm - embed_h) / 2.0,
        width: embed_w,
        height: embed_h,
    };

    let scale_bar = PdfScaleBar {
        x: embed.x + margin,
        y: embed.y + embed_h - margin / 2.0,
        length_mm: scale_bar_m * pixels_per_meter * mm_per_px,
        tick_mm: 2.0,
        label: format_meters(scale_bar_m),
    };

    PdfLayout {
        page_width_mm,
        page_height_mm,
        embed,
        mm_per_px,
        scale_denominator: 1000.0 / (pixels_per_meter * mm_per_px),
        scale_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_preserves_aspect_and_centers() {
        let layout = pdf_layout(1000.0, 500.0, 20.0, &PdfPageOptions::default(), 10.0);
        assert!((layout.mm_per_px - 0.277).abs() < 1e-9);
        assert!((layout.embed.width - 277.0).abs() < 1e-9);
        assert!((layout.embed.x - 10.0).abs() < 1e-9);
        assert!((layout.embed.y - (210.0 - 138.5) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_sizes_page() {
        let options = PdfPageOptions {
            scale: PdfScale::Ratio(100.0),
            ..PdfPageOptions::default()
        };
        // 20 m x 10 m at 20 px/m drawn at 1:100 is 200 mm x 100 mm.
        let layout = pdf_layout(400.0, 200.0, 20.0, &options, 10.0);
        assert!((layout.page_width_mm - 220.0).abs() < 1e-9);
        assert!((layout.page_height_mm - 120.0).abs() < 1e-9);
        assert!((layout.scale_denominator - 100.0).abs() < 1e-9);
        // 10 m at 1:100 is 100 mm on paper.
        assert!((layout.scale_bar.length_mm - 100.0).abs() < 1e-9);
        assert_eq!(layout.scale_bar.label, "10 m");
    }
}
