//! Font metrics for layout

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Approximate metrics for a monospace screenplay font.
///
/// Every grapheme is assumed to be `char_width_em` wide; there is no
/// per-glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontMetrics {
    /// Font size in points
    pub font_size_pt: f32,
    /// Line height in points (single spacing)
    pub line_height_pt: f32,
    /// Advance width of one character as a fraction of the font size
    pub char_width_em: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // Courier 12pt: 0.6em advance gives 10 characters per inch
        Self {
            font_size_pt: 12.0,
            line_height_pt: 12.0,
            char_width_em: 0.6,
        }
    }
}

impl FontMetrics {
    pub fn new(font_size_pt: f32, line_height_pt: f32, char_width_em: f32) -> Self {
        Self {
            font_size_pt,
            line_height_pt,
            char_width_em,
        }
    }

    /// Width of one character in points
    pub fn char_width_pt(&self) -> f32 {
        let width = self.font_size_pt * self.char_width_em;
        if width.is_finite() && width > 0.0 {
            width
        } else {
            0.0
        }
    }

    /// Convert a character-count offset to points
    pub fn characters_to_pt(&self, chars: f32) -> f32 {
        if chars.is_finite() {
            chars * self.char_width_pt()
        } else {
            0.0
        }
    }

    /// Estimated width of `text` in points
    pub fn text_width(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.char_width_pt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_defaults() {
        let metrics = FontMetrics::default();
        assert!((metrics.char_width_pt() - 7.2).abs() < 1e-4);
        // 10 characters per inch
        assert!((metrics.characters_to_pt(10.0) - 72.0).abs() < 1e-3);
    }

    #[test]
    fn test_text_width_counts_graphemes() {
        let metrics = FontMetrics::new(10.0, 10.0, 1.0);
        assert_eq!(metrics.text_width("abc"), 30.0);
        // e + combining acute is one cluster
        assert_eq!(metrics.text_width("e\u{301}"), 10.0);
        assert_eq!(metrics.text_width(""), 0.0);
    }

    #[test]
    fn test_degenerate_metrics() {
        let metrics = FontMetrics::new(f32::NAN, 12.0, 0.6);
        assert_eq!(metrics.char_width_pt(), 0.0);
        assert_eq!(metrics.characters_to_pt(f32::INFINITY), 0.0);
    }
}
