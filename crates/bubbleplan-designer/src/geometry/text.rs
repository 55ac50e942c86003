//! Label wrapping against measured glyph widths.

/// Measures rendered text width in world pixels.
pub trait TextMeasure {
    fn width(&self, text: &str, font_size: f64) -> f64;
}

/// Character-class width table for a proportional sans-serif face.
///
/// Used where no font backend is available (export without a loaded font
/// database, tests). Widths are fractions of the em size.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasure;

impl HeuristicMeasure {
    fn char_em(c: char) -> f64 {
        match c {
            ' ' => 0.28,
            'i' | 'l' | 'j' | 't' | 'f' | 'I' | '.' | ',' | '\'' | '|' | '!' | ':' | ';' => 0.30,
            'm' | 'w' | 'M' | 'W' | '@' => 0.85,
            '0'..='9' => 0.56,
            c if c.is_uppercase() => 0.68,
            _ => 0.52,
        }
    }
}

impl TextMeasure for HeuristicMeasure {
    fn width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(Self::char_em).sum::<f64>() * font_size
    }
}

/// Greedy word wrap.
///
/// Words wider than `max_width` are hard-broken with a trailing hyphen at the
/// widest prefix that fits. Only a single character wider than `max_width`
/// can overflow.
pub fn wrap_text(text: &str, max_width: f64, font_size: f64, measure: &dyn TextMeasure) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if max_width.is_nan() || max_width <= 0.0 {
        return vec![words.join(" ")];
    }

    let fits = |s: &str| measure.width(s, font_size) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in words {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        let mut rest: Vec<char> = word.chars().collect();
        while rest.len() > 1 && !fits(&rest.iter().collect::<String>()) {
            let prefix_len = (1..rest.len())
                .rev()
                .find(|&n| fits(&format!("{}-", rest[..n].iter().collect::<String>())))
                .unwrap_or(0);
            if prefix_len == 0 {
                lines.push(rest[0].to_string());
                rest.remove(0);
            } else {
                lines.push(format!("{}-", rest[..prefix_len].iter().collect::<String>()));
                rest.drain(..prefix_len);
            }
        }
        current = rest.into_iter().collect();
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
