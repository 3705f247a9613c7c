//! Post-pagination checks.
//!
//! The validator only reports; it never alters pages and has no failure mode.
//! Callers decide whether an invalid report blocks anything.

use crate::document::{TitleField, TitlePage};
use crate::layout::pagination::{Page, PaginationIssue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for the orphan heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// A scene heading among the last this-many blocks of a page is flagged.
    /// Counts blocks, not height; 0 disables the check.
    pub heading_orphan_window: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            heading_orphan_window: 2,
        }
    }
}

/// A rule a page breaks
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    #[error("Page {page_number}: Content height {used_pt:.1}pt exceeds page content height {capacity_pt:.1}pt")]
    #[serde(rename_all = "camelCase")]
    Overflow {
        page_number: usize,
        used_pt: f32,
        capacity_pt: f32,
    },

    #[error("Page {page_number}: Negative remaining height {remaining_pt:.1}pt")]
    #[serde(rename_all = "camelCase")]
    NegativeRemaining { page_number: usize, remaining_pt: f32 },

    #[error("Page {page_number}: Empty page")]
    #[serde(rename_all = "camelCase")]
    EmptyPage { page_number: usize },

    #[error("Page {page_number}: Character name orphaned at bottom of page")]
    #[serde(rename_all = "camelCase")]
    OrphanedCharacter { page_number: usize },

    #[error("Page {page_number}: Keep-together group exceeds page content height by {excess_pt:.1}pt")]
    #[serde(rename_all = "camelCase")]
    OversizedGroup { page_number: usize, excess_pt: f32 },

    #[error("Page {page_number}: Scene heading near bottom of page (block {position} of {block_count})")]
    #[serde(rename_all = "camelCase")]
    HeadingNearBottom {
        page_number: usize,
        /// 1-based position on the page
        position: usize,
        block_count: usize,
    },

    #[error("Page {page_number}: Incorrect page number, expected {expected}")]
    #[serde(rename_all = "camelCase")]
    PageNumbering { page_number: usize, expected: usize },

    #[error("Page 1: Title page {field} is too long ({length} characters, max {max})")]
    #[serde(rename_all = "camelCase")]
    TitleTooLong {
        field: TitleField,
        length: usize,
        max: usize,
    },
}

impl ValidationIssue {
    pub fn page_number(&self) -> usize {
        match self {
            ValidationIssue::Overflow { page_number, .. }
            | ValidationIssue::NegativeRemaining { page_number, .. }
            | ValidationIssue::EmptyPage { page_number }
            | ValidationIssue::OrphanedCharacter { page_number }
            | ValidationIssue::OversizedGroup { page_number, .. }
            | ValidationIssue::HeadingNearBottom { page_number, .. }
            | ValidationIssue::PageNumbering { page_number, .. } => *page_number,
            ValidationIssue::TitleTooLong { .. } => 1,
        }
    }
}

/// Result of [`validate`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// Fold the packer's degraded placements into the report
    pub fn with_pack_issues(mut self, pack_issues: &[PaginationIssue]) -> Self {
        for issue in pack_issues {
            match issue {
                PaginationIssue::OversizedGroup {
                    page_number,
                    excess_pt,
                    ..
                } => self.issues.push(ValidationIssue::OversizedGroup {
                    page_number: *page_number,
                    excess_pt: *excess_pt,
                }),
            }
        }
        self.is_valid = self.issues.is_empty();
        self
    }

    /// Check the title page's fields, if there is one
    pub fn with_title_page(mut self, title: Option<&TitlePage>) -> Self {
        if let Some(title) = title {
            for (field, length) in title.overlong_fields() {
                let max = field.max_chars().unwrap_or(length);
                self.issues.push(ValidationIssue::TitleTooLong { field, length, max });
            }
        }
        self.is_valid = self.issues.is_empty();
        self
    }

    /// Human-readable issue lines
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    pub fn issues_for_page(&self, page_number: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.page_number() == page_number)
    }
}

/// Check `pages` against a content height of `capacity_pt`
pub fn validate(pages: &[Page], capacity_pt: f32, config: &ValidationConfig) -> ValidationReport {
    validate_from(pages, 1, capacity_pt, config)
}

/// Like [`validate`], for content pages numbered from `first_page_number`
/// (2 behind a title page)
pub fn validate_from(
    pages: &[Page],
    first_page_number: usize,
    capacity_pt: f32,
    config: &ValidationConfig,
) -> ValidationReport {
    let mut issues = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        let page_number = page.page_number;

        let expected = first_page_number + index;
        if page_number != expected {
            issues.push(ValidationIssue::PageNumbering {
                page_number,
                expected,
            });
        }

        if page.used_height_pt > capacity_pt {
            issues.push(ValidationIssue::Overflow {
                page_number,
                used_pt: page.used_height_pt,
                capacity_pt,
            });
        }

        if page.remaining_height_pt < 0.0 {
            issues.push(ValidationIssue::NegativeRemaining {
                page_number,
                remaining_pt: page.remaining_height_pt,
            });
        }

        if page.blocks.is_empty() {
            issues.push(ValidationIssue::EmptyPage { page_number });
            continue;
        }

        if page.last_block().is_some_and(|b| b.kind.is_character()) {
            issues.push(ValidationIssue::OrphanedCharacter { page_number });
        }

        let block_count = page.blocks.len();
        let window_start = block_count.saturating_sub(config.heading_orphan_window);
        for (index, block) in page.blocks.iter().enumerate().skip(window_start) {
            if block.kind.is_scene_heading() {
                issues.push(ValidationIssue::HeadingNearBottom {
                    page_number,
                    position: index + 1,
                    block_count,
                });
            }
        }
    }

    if !issues.is_empty() {
        log::debug!("validation found {} issues over {} pages", issues.len(), pages.len());
    }

    ValidationReport::from_issues(issues)
}
