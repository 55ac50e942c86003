//! Zone color resolution shared by the live view and every exporter.
//!
//! Lookup order for a zone label: per-document override, exact palette
//! match, substring/keyword palette match, then a stable FNV-1a hash of the
//! label mapped to a hue. The diagram's color mode is applied last.

use std::collections::BTreeMap;

use bubbleplan_core::{default_palette, Color, ColorMode, PaletteEntry};

use crate::model::Space;

/// Fill and border for one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneColors {
    pub fill: Color,
    pub border: Color,
}

/// 32-bit FNV-1a over the UTF-8 bytes of `s`.
pub fn fnv1a(s: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    s.bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ byte as u32).wrapping_mul(PRIME))
}

fn normalize(zone: &str) -> String {
    zone.trim().to_lowercase()
}

/// Deterministic colors for a label the palette does not know.
pub fn hashed_zone_colors(zone: &str) -> ZoneColors {
    let hue = (fnv1a(&normalize(zone)) % 360) as f64;
    ZoneColors {
        fill: Color::from_hsl(hue, 0.65, 0.85),
        border: Color::from_hsl(hue, 0.65, 0.40),
    }
}

/// Data-driven zone palette.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonePalette {
    entries: Vec<PaletteEntry>,
}

impl Default for ZonePalette {
    fn default() -> Self {
        Self::new(default_palette())
    }
}

impl ZonePalette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Exact zone-name match first, then the first entry whose name or
    /// keyword occurs inside the label.
    pub fn lookup(&self, zone: &str) -> Option<&PaletteEntry> {
        let label = normalize(zone);
        if label.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| normalize(&e.zone) == label)
            .or_else(|| {
                self.entries.iter().find(|e| {
                    label.contains(&normalize(&e.zone))
                        || e.keywords
                            .iter()
                            .map(|k| normalize(k))
                            .any(|k| !k.is_empty() && label.contains(&k))
                })
            })
    }
}

/// Applies a diagram color mode to one resolved color.
pub fn apply_color_mode(color: Color, mode: ColorMode, is_border: bool) -> Color {
    match mode {
        ColorMode::Normal => color,
        ColorMode::Monochrome => color.grayscale(),
        ColorMode::Pastel => color.mix(Color::WHITE, if is_border { 0.3 } else { 0.5 }),
    }
}

/// Resolves zone and space colors for rendering.
#[derive(Debug, Clone, Default)]
pub struct ColorResolver {
    palette: ZonePalette,
    overrides: BTreeMap<String, Color>,
    mode: ColorMode,
}

impl ColorResolver {
    pub fn new(palette: ZonePalette, overrides: BTreeMap<String, Color>, mode: ColorMode) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(zone, color)| (normalize(&zone), color))
            .collect();
        Self {
            palette,
            overrides,
            mode,
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    fn base_zone_colors(&self, zone: &str) -> ZoneColors {
        if let Some(fill) = self.overrides.get(&normalize(zone)) {
            return ZoneColors {
                fill: *fill,
                border: fill.darken(0.45),
            };
        }
        match self.palette.lookup(zone) {
            Some(entry) => ZoneColors {
                fill: entry.fill,
                border: entry.border,
            },
            None => hashed_zone_colors(zone),
        }
    }

    fn finish(&self, colors: ZoneColors) -> ZoneColors {
        ZoneColors {
            fill: apply_color_mode(colors.fill, self.mode, false),
            border: apply_color_mode(colors.border, self.mode, true),
        }
    }

    /// Colors for a zone label.
    pub fn zone_colors(&self, zone: &str) -> ZoneColors {
        self.finish(self.base_zone_colors(zone))
    }

    /// Colors for one space: its own style override wins over its zone's.
    pub fn space_colors(&self, space: &Space) -> ZoneColors {
        let mut colors = self.base_zone_colors(&space.zone);
        if let Some(style) = &space.style {
            if let Some(fill) = style.fill {
                colors.fill = fill;
            }
            if let Some(border) = style.border {
                colors.border = border;
            }
        }
        self.finish(colors)
    }
}
