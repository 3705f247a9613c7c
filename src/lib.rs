//! Script-Pager: industry-standard screenplay pagination
//!
//! This crate turns an ordered list of typed screenplay blocks into pages:
//! - Monospace measurement with mm/pt/twips conversions
//! - Per-element formatting table (offsets, spacing, keep-with-next)
//! - Greedy packing that never separates a character cue from its dialogue
//! - A validator that reports overflow, empty pages and orphaned cues
//! - A display list and page diff for renderers that repaginate on every edit

use thiserror::Error;

pub mod document;
pub mod layout;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use document::{BlockId, BlockKind, Screenplay, ScreenplayBlock, TitleField, TitlePage};
pub use layout::{
    BlockDimensions, FontMetrics, FormattingRule, FormattingStandards, Page, PageGeometry,
    Pagination, PaginationIssue, Paginator, PaginatorConfig, ValidationIssue, ValidationReport,
};
pub use render::{BlockMove, DisplayItem, DisplayList, DisplayPage, PageChange, PageDiff};

/// Configuration problems. None of these stop pagination.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{kind} column is {width_pt:.2}pt wide, below the {min_width_pt:.2}pt minimum")]
    NarrowElement {
        kind: BlockKind,
        width_pt: f32,
        min_width_pt: f32,
    },
    #[error("Page content area is {height_pt:.2}pt tall, below the {min_height_pt:.2}pt minimum")]
    ContentTooShort { height_pt: f32, min_height_pt: f32 },
    #[error("Invalid configuration JSON: {0}")]
    Json(String),
    #[error("Invalid block list JSON: {0}")]
    Blocks(String),
    #[error("Invalid title page JSON: {0}")]
    TitlePage(String),
    #[error("Failed to serialize output: {0}")]
    Serialize(String),
}

/// Position on a page, in points from its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Paginate `blocks` with the standard screenplay configuration
pub fn paginate(blocks: &[ScreenplayBlock]) -> Pagination {
    Paginator::default().paginate(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speech(words: usize) -> String {
        "word ".repeat(words)
    }

    #[test]
    fn test_single_scene_heading() {
        let pagination = paginate(&[ScreenplayBlock::scene_heading("s1", "INT. HOUSE - DAY")]);
        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.pages[0].blocks.len(), 1);
    }

    #[test]
    fn test_cue_and_dialogue_move_together() {
        let paginator = Paginator::default();
        let capacity = paginator.content_height_pt();

        // Fill page one with 36pt action blocks until another would not fit
        let mut blocks = Vec::new();
        let mut used = 0.0;
        while used + 36.0 <= capacity {
            blocks.push(ScreenplayBlock::action(format!("a{}", blocks.len()), "Beat."));
            used += 36.0;
        }
        assert!(capacity - used < 48.0);
        let before = blocks.len();

        // 24pt cue + 24pt line: together they no longer fit
        blocks.push(ScreenplayBlock::character("c", "NOOR"));
        blocks.push(ScreenplayBlock::dialogue("d", "Wait."));

        let pagination = paginator.paginate(&blocks);
        assert_eq!(pagination.page_count(), 2);
        assert_eq!(pagination.pages[0].blocks.len(), before);
        assert!((pagination.pages[0].used_height_pt - used).abs() < 1e-3);
        assert_eq!(pagination.page_of("c"), Some(2));
        assert_eq!(pagination.page_of("d"), Some(2));
    }

    #[test]
    fn test_oversized_action_is_still_placed() {
        let paginator = Paginator::default();
        let capacity = paginator.content_height_pt();
        // 60 characters per action line, 12 words of "word" each
        let block = ScreenplayBlock::action("long", speech(12 * 170));
        let dims = paginator.dimensions_of(&block);
        assert!(dims.height_pt >= capacity * 3.0);

        let pagination = paginator.paginate(&[block]);
        assert_eq!(pagination.page_count(), 1);
        assert_eq!(pagination.issues.len(), 1);
        assert!(pagination.is_fallback_page(1));
        assert!(pagination
            .report
            .issues
            .iter()
            .any(|issue| matches!(issue, ValidationIssue::NegativeRemaining { page_number: 1, .. })));
    }

    #[test]
    fn test_empty_block_is_one_line() {
        let paginator = Paginator::default();
        for kind in BlockKind::ALL {
            let dims = paginator.dimensions_of(&ScreenplayBlock::new("e", kind, ""));
            assert_eq!(dims.line_count, 1);
        }
    }
}
