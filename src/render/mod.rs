//! Render output: display list and page diff

mod diff;
mod display;

pub use diff::{BlockMove, PageChange, PageDiff};
pub use display::{DisplayItem, DisplayItemId, DisplayList, DisplayPage};
