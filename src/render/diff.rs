//! Page-level diff between two pagination runs.
//!
//! The engine always repaginates from scratch; this tells a renderer which
//! pages actually need repainting afterwards.

use crate::document::BlockId;
use crate::layout::Page;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Change to a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageChange {
    /// Page exists only in the new run
    #[serde(rename_all = "camelCase")]
    Added { page_number: usize },
    /// Page exists only in the old run
    #[serde(rename_all = "camelCase")]
    Removed { page_number: usize },
    /// Page exists in both but holds different blocks or heights
    #[serde(rename_all = "camelCase")]
    Changed { page_number: usize },
}

impl PageChange {
    pub fn page_number(&self) -> usize {
        match self {
            PageChange::Added { page_number }
            | PageChange::Removed { page_number }
            | PageChange::Changed { page_number } => *page_number,
        }
    }
}

/// A block whose page assignment differs between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMove {
    pub block_id: BlockId,
    /// `None` when the block is new
    pub from_page: Option<usize>,
    /// `None` when the block was removed
    pub to_page: Option<usize>,
}

/// Differences between two page lists
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDiff {
    pub changes: Vec<PageChange>,
    pub moved_blocks: Vec<BlockMove>,
}

fn page_index(pages: &[Page]) -> FxHashMap<&BlockId, usize> {
    let mut index = FxHashMap::default();
    for page in pages {
        for block in &page.blocks {
            index.insert(&block.id, page.page_number);
        }
    }
    index
}

impl PageDiff {
    /// Compare `previous` against `current`
    pub fn between(previous: &[Page], current: &[Page]) -> Self {
        let mut changes = Vec::new();

        for (prev, curr) in previous.iter().zip(current) {
            if prev != curr {
                changes.push(PageChange::Changed {
                    page_number: curr.page_number,
                });
            }
        }
        for page in current.iter().skip(previous.len()) {
            changes.push(PageChange::Added {
                page_number: page.page_number,
            });
        }
        for page in previous.iter().skip(current.len()) {
            changes.push(PageChange::Removed {
                page_number: page.page_number,
            });
        }

        let before = page_index(previous);
        let after = page_index(current);

        // Walk in page order so the result is deterministic
        let mut moved_blocks = Vec::new();
        for block in current.iter().flat_map(|p| &p.blocks) {
            let to_page = after.get(&block.id).copied();
            let from_page = before.get(&block.id).copied();
            if from_page != to_page {
                moved_blocks.push(BlockMove {
                    block_id: block.id.clone(),
                    from_page,
                    to_page,
                });
            }
        }
        for block in previous.iter().flat_map(|p| &p.blocks) {
            if !after.contains_key(&block.id) {
                moved_blocks.push(BlockMove {
                    block_id: block.id.clone(),
                    from_page: before.get(&block.id).copied(),
                    to_page: None,
                });
            }
        }

        Self {
            changes,
            moved_blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.moved_blocks.is_empty()
    }

    /// Earliest page a renderer has to repaint from
    pub fn first_changed_page(&self) -> Option<usize> {
        self.changes.iter().map(PageChange::page_number).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ScreenplayBlock;
    use crate::layout::Paginator;

    fn actions(count: usize) -> Vec<ScreenplayBlock> {
        (0..count)
            .map(|i| ScreenplayBlock::action(format!("a{i}"), "Waves."))
            .collect()
    }

    #[test]
    fn test_identical_runs() {
        let paginator = Paginator::default();
        let pages = paginator.paginate(&actions(30)).pages;
        let diff = PageDiff::between(&pages, &pages);
        assert!(diff.is_empty());
        assert_eq!(diff.first_changed_page(), None);
    }

    #[test]
    fn test_insert_shifts_later_pages() {
        let paginator = Paginator::default();
        let mut blocks = actions(30);
        let before = paginator.paginate(&blocks).pages;

        // 17 action blocks fill a page; a new first block pushes a17 down
        blocks.insert(0, ScreenplayBlock::action("new", "Thunder."));
        let after = paginator.paginate(&blocks).pages;

        let diff = PageDiff::between(&before, &after);
        assert_eq!(diff.first_changed_page(), Some(1));
        assert!(diff.changes.contains(&PageChange::Changed { page_number: 2 }));
        assert!(diff.moved_blocks.contains(&BlockMove {
            block_id: BlockId::from("new"),
            from_page: None,
            to_page: Some(1),
        }));
        assert!(diff.moved_blocks.contains(&BlockMove {
            block_id: BlockId::from("a16"),
            from_page: Some(1),
            to_page: Some(2),
        }));
        assert!(!diff
            .moved_blocks
            .iter()
            .any(|m| m.block_id.as_str() == "a0"));
    }

    #[test]
    fn test_page_removed() {
        let paginator = Paginator::default();
        let before = paginator.paginate(&actions(20)).pages;
        let after = paginator.paginate(&actions(3)).pages;

        let diff = PageDiff::between(&before, &after);
        assert_eq!(
            diff.changes,
            vec![
                PageChange::Changed { page_number: 1 },
                PageChange::Removed { page_number: 2 },
            ]
        );
        assert_eq!(
            diff.moved_blocks
                .iter()
                .filter(|m| m.to_page.is_none())
                .count(),
            17
        );
    }
}
