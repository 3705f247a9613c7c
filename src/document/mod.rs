//! Screenplay document model

mod block;
pub mod parser;
pub mod title;

pub use block::{BlockId, BlockKind, ScreenplayBlock};
pub use parser::{detect_block_kind, next_block_kind, NextKey};
pub use title::{TitleField, TitlePage};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// An ordered sequence of screenplay blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Screenplay {
    blocks: Vec<ScreenplayBlock>,
}

impl Screenplay {
    /// Create an empty screenplay
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing block list
    pub fn from_blocks(blocks: Vec<ScreenplayBlock>) -> Self {
        Self { blocks }
    }

    /// Build a screenplay from plain text, one block per non-blank line.
    ///
    /// Each line starts from the kind that would follow the previous block on
    /// Enter, then [`detect_block_kind`] refines it from the text.
    pub fn from_plain_text(text: &str) -> Self {
        let mut blocks = Vec::new();
        let mut previous: Option<BlockKind> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let current = previous
                .map(|kind| next_block_kind(kind, NextKey::Enter))
                .unwrap_or_default();
            let kind = detect_block_kind(line, current);

            blocks.push(ScreenplayBlock::new(
                format!("b{}", blocks.len() + 1),
                kind,
                line,
            ));
            previous = Some(kind);
        }

        Self { blocks }
    }

    /// Append a block
    pub fn push(&mut self, block: ScreenplayBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[ScreenplayBlock] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<ScreenplayBlock> {
        self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whitespace-separated words across all blocks
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.content.split_whitespace().count())
            .sum()
    }

    /// Grapheme clusters across all blocks
    pub fn character_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.content.graphemes(true).count())
            .sum()
    }
}

impl From<Vec<ScreenplayBlock>> for Screenplay {
    fn from(blocks: Vec<ScreenplayBlock>) -> Self {
        Self::from_blocks(blocks)
    }
}
