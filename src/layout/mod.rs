//! Screenplay pagination: measurement, formatting rules, packing and validation

pub mod dimensions;
mod engine;
pub mod font;
pub mod grouping;
pub mod line_break;
pub mod pagination;
pub mod standards;
pub mod units;
pub mod validate;

pub use dimensions::{dimensions_of, BlockDimensions};
pub use engine::{PageGeometry, Pagination, Paginator, PaginatorConfig};
pub use font::FontMetrics;
pub use grouping::{group_from, group_height, groups, KeepTogetherGroup};
pub use line_break::{estimate_line_count, wrap_lines};
pub use pagination::{pack, PackOutcome, Page, PaginationIssue};
pub use standards::{Alignment, ElementMargins, FormattingRule, FormattingStandards};
pub use validate::{validate, validate_from, ValidationConfig, ValidationIssue, ValidationReport};
