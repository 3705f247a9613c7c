//! Greedy page packing with keep-together groups

use crate::document::ScreenplayBlock;
use crate::layout::dimensions::BlockDimensions;
use crate::layout::grouping::groups;
use crate::layout::units::pt_to_twips;
use serde::Serialize;
use thiserror::Error;

/// One output page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based, contiguous in emission order
    pub page_number: usize,
    pub blocks: Vec<ScreenplayBlock>,
    #[serde(rename = "usedHeight")]
    pub used_height_pt: f32,
    /// Negative only when an oversized group was forced onto the page
    #[serde(rename = "remainingHeight")]
    pub remaining_height_pt: f32,
}

impl Page {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Used height for twips-based exporters
    pub fn used_height_twips(&self) -> f32 {
        pt_to_twips(self.used_height_pt)
    }

    /// Remaining height for twips-based exporters
    pub fn remaining_height_twips(&self) -> f32 {
        pt_to_twips(self.remaining_height_pt)
    }

    pub fn first_block(&self) -> Option<&ScreenplayBlock> {
        self.blocks.first()
    }

    pub fn last_block(&self) -> Option<&ScreenplayBlock> {
        self.blocks.last()
    }
}

/// Degraded placement reported by the packer
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PaginationIssue {
    /// A keep-together group taller than a full page was split block by block
    #[error(
        "Pages {page_number}-{last_page_number}: keep-together group of {group_len} blocks \
         starting at block {group_start} is {height_pt:.1}pt, {excess_pt:.1}pt over the \
         {capacity_pt:.1}pt page"
    )]
    #[serde(rename_all = "camelCase")]
    OversizedGroup {
        /// Page the group started on
        page_number: usize,
        /// Page holding the group's last block
        last_page_number: usize,
        group_start: usize,
        group_len: usize,
        height_pt: f32,
        capacity_pt: f32,
        excess_pt: f32,
    },
}

impl PaginationIssue {
    /// Whether `page_number` was filled by the oversized-group fallback
    pub fn covers_page(&self, page_number: usize) -> bool {
        match self {
            PaginationIssue::OversizedGroup {
                page_number: first,
                last_page_number: last,
                ..
            } => (*first..=*last).contains(&page_number),
        }
    }
}

/// Packer output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackOutcome {
    pub pages: Vec<Page>,
    pub issues: Vec<PaginationIssue>,
}

impl PackOutcome {
    /// Shift every page number by `by`, e.g. past a title page
    pub fn offset_page_numbers(&mut self, by: usize) {
        for page in &mut self.pages {
            page.page_number += by;
        }
        for issue in &mut self.issues {
            match issue {
                PaginationIssue::OversizedGroup {
                    page_number,
                    last_page_number,
                    ..
                } => {
                    *page_number += by;
                    *last_page_number += by;
                }
            }
        }
    }
}

/// Page in progress
struct PageBuilder {
    capacity_pt: f32,
    blocks: Vec<ScreenplayBlock>,
    used_pt: f32,
    pages: Vec<Page>,
}

impl PageBuilder {
    fn new(capacity_pt: f32) -> Self {
        Self {
            capacity_pt,
            blocks: Vec::new(),
            used_pt: 0.0,
            pages: Vec::new(),
        }
    }

    fn fits(&self, height_pt: f32) -> bool {
        self.used_pt + height_pt <= self.capacity_pt
    }

    fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Number the page in progress would get
    fn page_number(&self) -> usize {
        self.pages.len() + 1
    }

    fn place(&mut self, block: &ScreenplayBlock, height_pt: f32) {
        self.blocks.push(block.clone());
        self.used_pt += height_pt;
    }

    /// Emit the page in progress; empty pages are never emitted
    fn close(&mut self) {
        if self.blocks.is_empty() {
            return;
        }
        let page = Page {
            page_number: self.page_number(),
            blocks: std::mem::take(&mut self.blocks),
            used_height_pt: self.used_pt,
            remaining_height_pt: self.capacity_pt - self.used_pt,
        };
        self.pages.push(page);
        self.used_pt = 0.0;
    }

    fn finish(mut self) -> Vec<Page> {
        self.close();
        self.pages
    }
}

/// Partition `blocks` into pages of `capacity_pt` content height.
///
/// `dims[i]` must describe `blocks[i]`. Single forward pass, no backtracking:
/// each keep-together group goes on the current page if it fits (`<=`),
/// otherwise on a fresh page; a group taller than a whole page is placed one
/// block at a time and reported as [`PaginationIssue::OversizedGroup`].
pub fn pack(blocks: &[ScreenplayBlock], dims: &[BlockDimensions], capacity_pt: f32) -> PackOutcome {
    debug_assert_eq!(blocks.len(), dims.len(), "one dimension per block");
    let count = blocks.len().min(dims.len());
    let dims = &dims[..count];

    let mut builder = PageBuilder::new(capacity_pt);
    let mut issues = Vec::new();

    for group in groups(dims) {
        if !builder.fits(group.height_pt) {
            builder.close();
        }

        if builder.fits(group.height_pt) {
            for i in group.range() {
                builder.place(&blocks[i], dims[i].height_pt);
            }
        } else {
            // Taller than an empty page: fall back to block-by-block placement
            let first_page = builder.page_number();
            for i in group.range() {
                let height_pt = dims[i].height_pt;
                if builder.has_blocks() && !builder.fits(height_pt) {
                    builder.close();
                }
                builder.place(&blocks[i], height_pt);
            }

            let issue = PaginationIssue::OversizedGroup {
                page_number: first_page,
                last_page_number: builder.page_number(),
                group_start: group.start,
                group_len: group.len(),
                height_pt: group.height_pt,
                capacity_pt,
                excess_pt: group.height_pt - capacity_pt,
            };
            log::warn!("{issue}");
            issues.push(issue);
        }
    }

    let pages = builder.finish();
    log::debug!(
        "packed {} blocks into {} pages ({} oversized groups)",
        count,
        pages.len(),
        issues.len()
    );

    PackOutcome { pages, issues }
}
