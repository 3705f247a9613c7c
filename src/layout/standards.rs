//! Industry-standard formatting rules per block kind

use crate::document::BlockKind;
use crate::layout::engine::PageGeometry;
use crate::layout::font::FontMetrics;
use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Narrowest text column an element may be given, in characters
pub const MIN_ELEMENT_WIDTH_CHARS: f32 = 1.0;

/// Shortest content area a page may have, in lines
pub const MIN_CONTENT_HEIGHT_LINES: f32 = 1.0;

/// Horizontal alignment hint for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Static formatting for one block kind.
///
/// Offsets are in characters (10 per inch for Courier 12pt), measured inward
/// from the content box edges. Spacing is in points and sits outside the
/// block's own lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormattingRule {
    pub left_offset_chars: f32,
    pub right_offset_chars: f32,
    pub spacing_before_pt: f32,
    pub spacing_after_pt: f32,
    pub uppercase: bool,
    pub bold: bool,
    pub alignment: Alignment,
    /// Whether a page may begin with this kind when it starts a group
    pub can_break_before: bool,
    /// Whether this block is always glued to the one after it
    pub must_keep_with_next: bool,
}

impl FormattingRule {
    /// Standard rule for `kind`
    pub const fn for_kind(kind: BlockKind) -> Self {
        match kind {
            BlockKind::SceneHeading => Self {
                left_offset_chars: 0.0,
                right_offset_chars: 0.0,
                spacing_before_pt: 24.0,
                spacing_after_pt: 12.0,
                uppercase: true,
                bold: false,
                alignment: Alignment::Left,
                can_break_before: true,
                must_keep_with_next: false,
            },
            BlockKind::Action => Self {
                left_offset_chars: 0.0,
                right_offset_chars: 0.0,
                spacing_before_pt: 12.0,
                spacing_after_pt: 12.0,
                uppercase: false,
                bold: false,
                alignment: Alignment::Left,
                can_break_before: true,
                must_keep_with_next: false,
            },
            BlockKind::Character => Self {
                left_offset_chars: 22.0,
                right_offset_chars: 0.0,
                spacing_before_pt: 12.0,
                spacing_after_pt: 0.0,
                uppercase: true,
                bold: false,
                alignment: Alignment::Left,
                can_break_before: true,
                must_keep_with_next: true,
            },
            BlockKind::Dialogue => Self {
                left_offset_chars: 10.0,
                right_offset_chars: 15.0,
                spacing_before_pt: 0.0,
                spacing_after_pt: 12.0,
                uppercase: false,
                bold: false,
                alignment: Alignment::Left,
                can_break_before: false,
                must_keep_with_next: false,
            },
            BlockKind::Parenthetical => Self {
                left_offset_chars: 16.0,
                right_offset_chars: 20.0,
                spacing_before_pt: 0.0,
                spacing_after_pt: 0.0,
                uppercase: false,
                bold: false,
                alignment: Alignment::Left,
                can_break_before: false,
                must_keep_with_next: true,
            },
            BlockKind::Transition => Self {
                left_offset_chars: 45.0,
                right_offset_chars: 0.0,
                spacing_before_pt: 12.0,
                spacing_after_pt: 24.0,
                uppercase: true,
                bold: false,
                alignment: Alignment::Right,
                can_break_before: true,
                must_keep_with_next: false,
            },
        }
    }
}

/// Resolved horizontal placement of an element, in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementMargins {
    /// Inset from the content box's left edge
    pub left_pt: f32,
    /// Inset from the content box's right edge
    pub right_pt: f32,
    /// Width available to the text
    pub width_pt: f32,
}

/// Formatting table bound to a page geometry and font.
///
/// Margins are resolved once at construction. A kind whose offsets leave less
/// than one character of width, or a page with less than one line of content
/// height, is clamped and reported through
/// [`config_errors`](Self::config_errors); pagination proceeds regardless.
#[derive(Debug, Clone)]
pub struct FormattingStandards {
    font: FontMetrics,
    content_width_pt: f32,
    content_height_pt: f32,
    margins: [ElementMargins; 6],
    config_errors: Vec<ConfigError>,
}

fn kind_index(kind: BlockKind) -> usize {
    match kind {
        BlockKind::SceneHeading => 0,
        BlockKind::Action => 1,
        BlockKind::Character => 2,
        BlockKind::Dialogue => 3,
        BlockKind::Parenthetical => 4,
        BlockKind::Transition => 5,
    }
}

impl FormattingStandards {
    pub fn new(geometry: &PageGeometry, font: FontMetrics) -> Self {
        let content_width_pt = geometry.content_width_pt();
        let min_width = font.characters_to_pt(MIN_ELEMENT_WIDTH_CHARS);
        let mut config_errors = Vec::new();

        let margins = BlockKind::ALL.map(|kind| {
            let rule = FormattingRule::for_kind(kind);
            let left_pt = font.characters_to_pt(rule.left_offset_chars);
            let right_pt = font.characters_to_pt(rule.right_offset_chars);
            let width_pt = content_width_pt - left_pt - right_pt;

            if width_pt.is_nan() || width_pt < min_width {
                let error = ConfigError::NarrowElement {
                    kind,
                    width_pt,
                    min_width_pt: min_width,
                };
                log::warn!("{error}; clamping");
                config_errors.push(error);
                return ElementMargins {
                    left_pt,
                    right_pt,
                    width_pt: min_width,
                };
            }

            ElementMargins {
                left_pt,
                right_pt,
                width_pt,
            }
        });

        let mut content_height_pt = geometry.content_height_pt();
        let min_height = font.line_height_pt * MIN_CONTENT_HEIGHT_LINES;
        if content_height_pt.is_nan() || content_height_pt < min_height {
            let error = ConfigError::ContentTooShort {
                height_pt: content_height_pt,
                min_height_pt: min_height,
            };
            log::warn!("{error}; clamping");
            config_errors.push(error);
            content_height_pt = min_height;
        }

        Self {
            font,
            content_width_pt,
            content_height_pt,
            margins,
            config_errors,
        }
    }

    /// Formatting rule for `kind`
    pub fn rules_for(&self, kind: BlockKind) -> FormattingRule {
        FormattingRule::for_kind(kind)
    }

    /// Resolved margins for `kind`
    pub fn margins_for(&self, kind: BlockKind) -> ElementMargins {
        self.margins[kind_index(kind)]
    }

    pub fn font(&self) -> &FontMetrics {
        &self.font
    }

    pub fn line_height_pt(&self) -> f32 {
        self.font.line_height_pt
    }

    pub fn content_width_pt(&self) -> f32 {
        self.content_width_pt
    }

    pub fn content_height_pt(&self) -> f32 {
        self.content_height_pt
    }

    /// Geometry problems found while resolving margins
    pub fn config_errors(&self) -> &[ConfigError] {
        &self.config_errors
    }
}
