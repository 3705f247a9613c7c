//! Line wrapping estimate for monospace text

use crate::layout::font::FontMetrics;
use smallvec::SmallVec;

/// Wrapped lines of one block, borrowed from its content
pub type WrappedLines<'a> = SmallVec<[&'a str; 4]>;

/// Whitespace-separated words with their byte offsets
fn words(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text.char_indices().peekable();
    std::iter::from_fn(move || {
        while let Some(&(_, c)) = rest.peek() {
            if !c.is_whitespace() {
                break;
            }
            rest.next();
        }

        let (start, _) = *rest.peek()?;
        let mut end = text.len();
        while let Some(&(idx, c)) = rest.peek() {
            if c.is_whitespace() {
                end = idx;
                break;
            }
            rest.next();
        }
        Some((start, &text[start..end]))
    })
}

/// Greedy word wrap into lines no wider than `max_width_pt`.
///
/// A word joins the current line when the line, one space and the word fit.
/// Words wider than the whole line are never split and take a line of their
/// own. Interior whitespace runs (including newlines) count as one space.
/// A non-finite width wraps as if it were zero.
pub fn wrap_lines<'a>(text: &'a str, max_width_pt: f32, metrics: &FontMetrics) -> WrappedLines<'a> {
    let max_width = if max_width_pt.is_finite() { max_width_pt } else { 0.0 };
    let space = metrics.char_width_pt();

    let mut lines = WrappedLines::new();
    let mut current: Option<(usize, usize)> = None;
    let mut width: f32 = 0.0;

    for (start, word) in words(text) {
        let word_width = metrics.text_width(word);
        let end = start + word.len();

        current = match current {
            Some((line_start, _)) if width + space + word_width <= max_width => {
                width += space + word_width;
                Some((line_start, end))
            }
            Some((line_start, line_end)) => {
                lines.push(&text[line_start..line_end]);
                width = word_width;
                Some((start, end))
            }
            None => {
                width = word_width;
                Some((start, end))
            }
        };
    }

    if let Some((line_start, line_end)) = current {
        lines.push(&text[line_start..line_end]);
    }

    lines
}

/// Number of lines `text` occupies at `max_width_pt`; never less than one
pub fn estimate_line_count(text: &str, max_width_pt: f32, metrics: &FontMetrics) -> usize {
    wrap_lines(text, max_width_pt, metrics).len().max(1)
}
