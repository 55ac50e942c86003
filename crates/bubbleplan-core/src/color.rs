//! RGB colors and palette entries.
//!
//! Colors serialize as `#rrggbb` strings so snapshots and config files stay
//! readable and match the markup emitted by the exporters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from hue (degrees), saturation and lightness (0..=1).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r1), to_u8(g1), to_u8(b1))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear blend toward `other`; `t = 0` keeps `self`, `t = 1` yields `other`.
    pub fn mix(&self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgb(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Rec. 601 luma as a gray color.
    pub fn grayscale(&self) -> Color {
        let luma = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        let v = luma.round().clamp(0.0, 255.0) as u8;
        Color::rgb(v, v, v)
    }

    /// Darker variant used for borders derived from a fill.
    pub fn darken(&self, amount: f64) -> Color {
        self.mix(Color::BLACK, amount)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color: {}", s));
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(format!("Invalid color: {}", s)),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| format!("Invalid color: {}", s))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the zone palette: a canonical zone name, extra keywords that
/// map onto it, and its fill/border colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub zone: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub fill: Color,
    pub border: Color,
}

impl PaletteEntry {
    pub fn new(zone: &str, keywords: &[&str], fill: Color, border: Color) -> Self {
        Self {
            zone: zone.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            fill,
            border,
        }
    }
}

/// Built-in zone palette.
pub fn default_palette() -> Vec<PaletteEntry> {
    vec![
        PaletteEntry::new(
            "public",
            &["living", "lobby", "reception", "social", "common"],
            Color::rgb(0xfd, 0xe6, 0x8a),
            Color::rgb(0xd9, 0x77, 0x06),
        ),
        PaletteEntry::new(
            "private",
            &["bedroom", "sleeping", "suite", "office"],
            Color::rgb(0xbf, 0xdb, 0xfe),
            Color::rgb(0x25, 0x63, 0xeb),
        ),
        PaletteEntry::new(
            "service",
            &["utility", "storage", "mechanical", "laundry", "kitchen", "bath", "wc"],
            Color::rgb(0xe5, 0xe7, 0xeb),
            Color::rgb(0x4b, 0x55, 0x63),
        ),
        PaletteEntry::new(
            "circulation",
            &["corridor", "hall", "stair", "lift", "elevator", "entry"],
            Color::rgb(0xfe, 0xca, 0xca),
            Color::rgb(0xdc, 0x26, 0x26),
        ),
        PaletteEntry::new(
            "outdoor",
            &["garden", "terrace", "patio", "balcony", "yard"],
            Color::rgb(0xbb, 0xf7, 0xd0),
            Color::rgb(0x16, 0xa3, 0x4a),
        ),
        PaletteEntry::new(
            "work",
            &["studio", "workshop", "lab", "meeting", "classroom"],
            Color::rgb(0xdd, 0xd6, 0xfe),
            Color::rgb(0x7c, 0x3a, 0xed),
        ),
    ]
}
