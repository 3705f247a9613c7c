//! Per-block vertical extent

use crate::document::{BlockKind, ScreenplayBlock};
use crate::layout::line_break::estimate_line_count;
use crate::layout::standards::FormattingStandards;
use serde::Serialize;

/// Stand-in measured for empty blocks so they still reserve a line
const EMPTY_PLACEHOLDER: &str = " ";

/// Measured size of one block plus its grouping flags
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDimensions {
    pub kind: BlockKind,
    /// Wrapped line count, at least 1
    pub line_count: usize,
    pub spacing_before_pt: f32,
    pub spacing_after_pt: f32,
    /// Lines plus spacing before and after
    pub height_pt: f32,
    pub can_break_before: bool,
    pub must_keep_with_next: bool,
}

impl BlockDimensions {
    /// Height of the lines alone
    pub fn content_height_pt(&self) -> f32 {
        self.height_pt - self.spacing_before_pt - self.spacing_after_pt
    }
}

/// Measure `block` against the standards' geometry and font
pub fn dimensions_of(block: &ScreenplayBlock, standards: &FormattingStandards) -> BlockDimensions {
    let rule = standards.rules_for(block.kind);
    let margins = standards.margins_for(block.kind);

    let text = if block.content.is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        block.content.as_str()
    };
    let line_count = estimate_line_count(text, margins.width_pt, standards.font()).max(1);

    let height_pt = line_count as f32 * standards.line_height_pt()
        + rule.spacing_before_pt
        + rule.spacing_after_pt;

    BlockDimensions {
        kind: block.kind,
        line_count,
        spacing_before_pt: rule.spacing_before_pt,
        spacing_after_pt: rule.spacing_after_pt,
        height_pt,
        can_break_before: rule.can_break_before,
        must_keep_with_next: rule.must_keep_with_next,
    }
}

/// Measure every block, preserving order
pub fn measure_all(blocks: &[ScreenplayBlock], standards: &FormattingStandards) -> Vec<BlockDimensions> {
    blocks.iter().map(|b| dimensions_of(b, standards)).collect()
}
