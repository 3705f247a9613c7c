//! Pagination pipeline: geometry, configuration and the paginator service

use crate::document::{ScreenplayBlock, TitlePage};
use crate::layout::dimensions::{dimensions_of, measure_all, BlockDimensions};
use crate::layout::font::FontMetrics;
use crate::layout::pagination::{pack, Page, PaginationIssue};
use crate::layout::standards::FormattingStandards;
use crate::layout::units::mm_to_pt;
use crate::layout::validate::{validate_from, ValidationConfig, ValidationReport};
use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Physical page size and margins, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::screenplay_letter()
    }
}

impl PageGeometry {
    /// US Letter with the 1.5" binding margin screenplays use
    pub fn screenplay_letter() -> Self {
        Self {
            page_width_mm: 216.0,  // 8.5"
            page_height_mm: 279.0, // 11"
            margin_top_mm: 25.4,
            margin_bottom_mm: 25.4,
            margin_left_mm: 38.1,
            margin_right_mm: 25.4,
        }
    }

    /// A4 with symmetric side margins
    pub fn a4() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 25.0,
            margin_bottom_mm: 25.0,
            margin_left_mm: 20.0,
            margin_right_mm: 20.0,
        }
    }

    /// Get usable content width
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Get usable content height per page
    pub fn content_height_mm(&self) -> f32 {
        self.page_height_mm - self.margin_top_mm - self.margin_bottom_mm
    }

    pub fn content_width_pt(&self) -> f32 {
        mm_to_pt(self.content_width_mm())
    }

    pub fn content_height_pt(&self) -> f32 {
        mm_to_pt(self.content_height_mm())
    }

    pub fn page_width_pt(&self) -> f32 {
        mm_to_pt(self.page_width_mm)
    }

    pub fn page_height_pt(&self) -> f32 {
        mm_to_pt(self.page_height_mm)
    }

    pub fn margin_top_pt(&self) -> f32 {
        mm_to_pt(self.margin_top_mm)
    }

    pub fn margin_left_pt(&self) -> f32 {
        mm_to_pt(self.margin_left_mm)
    }

    pub fn margin_right_pt(&self) -> f32 {
        mm_to_pt(self.margin_right_mm)
    }
}

/// Everything the paginator needs; defaults follow screenplay convention
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatorConfig {
    pub geometry: PageGeometry,
    pub font: FontMetrics,
    pub validation: ValidationConfig,
}

impl PaginatorConfig {
    /// Parse a config from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }
}

/// Output of one pagination run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Content pages; numbered from 2 when there is a title page
    pub pages: Vec<Page>,
    /// Degraded placements made by the packer
    pub issues: Vec<PaginationIssue>,
    pub report: ValidationReport,
    /// Page 1, when the script has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_page: Option<TitlePage>,
}

impl Pagination {
    /// Total pages, title page included
    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(self.has_title_page())
    }

    pub fn has_title_page(&self) -> bool {
        self.title_page.is_some()
    }

    /// Number of the first page that holds blocks
    pub fn first_content_page_number(&self) -> usize {
        if self.has_title_page() {
            2
        } else {
            1
        }
    }

    /// Page holding the block with `id`
    pub fn page_of(&self, id: &str) -> Option<usize> {
        self.pages
            .iter()
            .find(|page| page.blocks.iter().any(|b| b.id.as_str() == id))
            .map(|page| page.page_number)
    }

    /// Whether `page_number` came out of the oversized-group fallback
    pub fn is_fallback_page(&self, page_number: usize) -> bool {
        self.issues.iter().any(|issue| issue.covers_page(page_number))
    }
}

/// Stateless pagination service.
///
/// Holds only configuration resolved at construction; every call recomputes
/// from the full block list. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Paginator {
    config: PaginatorConfig,
    standards: FormattingStandards,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PaginatorConfig::default())
    }
}

impl Paginator {
    pub fn new(config: PaginatorConfig) -> Self {
        let standards = FormattingStandards::new(&config.geometry, config.font);
        Self { config, standards }
    }

    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.config.geometry
    }

    pub fn standards(&self) -> &FormattingStandards {
        &self.standards
    }

    /// Content height available on each page
    pub fn content_height_pt(&self) -> f32 {
        self.standards.content_height_pt()
    }

    /// Geometry problems found at construction
    pub fn config_errors(&self) -> &[ConfigError] {
        self.standards.config_errors()
    }

    /// Measure a single block
    pub fn dimensions_of(&self, block: &ScreenplayBlock) -> BlockDimensions {
        dimensions_of(block, &self.standards)
    }

    /// Measure every block
    pub fn dimensions(&self, blocks: &[ScreenplayBlock]) -> Vec<BlockDimensions> {
        measure_all(blocks, &self.standards)
    }

    /// Measure, pack and validate `blocks`
    pub fn paginate(&self, blocks: &[ScreenplayBlock]) -> Pagination {
        self.run(blocks, None)
    }

    /// Paginate behind a title page.
    ///
    /// A title page with a blank title is left out and the script starts on
    /// page 1 as with [`paginate`](Self::paginate).
    pub fn paginate_with_title(&self, blocks: &[ScreenplayBlock], title: &TitlePage) -> Pagination {
        self.run(blocks, title.is_present().then_some(title))
    }

    fn run(&self, blocks: &[ScreenplayBlock], title: Option<&TitlePage>) -> Pagination {
        let dims = self.dimensions(blocks);
        let capacity = self.content_height_pt();

        let mut outcome = pack(blocks, &dims, capacity);
        let first_page_number = if title.is_some() {
            outcome.offset_page_numbers(1);
            2
        } else {
            1
        };

        let report = validate_from(
            &outcome.pages,
            first_page_number,
            capacity,
            &self.config.validation,
        )
        .with_pack_issues(&outcome.issues)
        .with_title_page(title);

        Pagination {
            pages: outcome.pages,
            issues: outcome.issues,
            report,
            title_page: title.cloned(),
        }
    }

    /// Page count without keeping the pages
    pub fn page_count(&self, blocks: &[ScreenplayBlock]) -> usize {
        self.paginate(blocks).page_count()
    }

    /// Page count including the title page, when it has a title
    pub fn page_count_with_title(&self, blocks: &[ScreenplayBlock], title: &TitlePage) -> usize {
        self.paginate_with_title(blocks, title).page_count()
    }
}
