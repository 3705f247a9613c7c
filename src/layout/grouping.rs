//! Keep-together grouping

use crate::layout::dimensions::BlockDimensions;
use std::ops::Range;

/// A run of consecutive blocks that paginates as one unit.
///
/// Every member except the last has `must_keep_with_next` set. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct KeepTogetherGroup {
    /// Index of the first member
    pub start: usize,
    /// One past the last member
    pub end: usize,
    /// Sum of member heights
    pub height_pt: f32,
}

impl KeepTogetherGroup {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Build the group that begins at `start`, or `None` past the end of `dims`.
///
/// Walks forward only while the current member must stay with its successor
/// and a successor exists. Callers invoke this at group boundaries.
pub fn group_from(dims: &[BlockDimensions], start: usize) -> Option<KeepTogetherGroup> {
    if start >= dims.len() {
        return None;
    }

    let mut end = start + 1;
    while end < dims.len() && dims[end - 1].must_keep_with_next {
        end += 1;
    }

    Some(KeepTogetherGroup {
        start,
        end,
        height_pt: group_height(&dims[start..end]),
    })
}

/// Total height of a run of blocks
pub fn group_height(dims: &[BlockDimensions]) -> f32 {
    dims.iter().map(|d| d.height_pt).sum()
}

/// Partition `dims` into consecutive groups
pub fn groups(dims: &[BlockDimensions]) -> impl Iterator<Item = KeepTogetherGroup> + '_ {
    let mut next = 0;
    std::iter::from_fn(move || {
        let group = group_from(dims, next)?;
        next = group.end;
        Some(group)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockKind;

    fn dim(kind: BlockKind, keep: bool, height: f32) -> BlockDimensions {
        BlockDimensions {
            kind,
            line_count: 1,
            spacing_before_pt: 0.0,
            spacing_after_pt: 0.0,
            height_pt: height,
            can_break_before: true,
            must_keep_with_next: keep,
        }
    }

    #[test]
    fn test_singleton_group() {
        let dims = vec![dim(BlockKind::Action, false, 10.0), dim(BlockKind::Action, false, 5.0)];
        let group = group_from(&dims, 0).unwrap();
        assert_eq!(group.range(), 0..1);
        assert_eq!(group.height_pt, 10.0);
    }

    #[test]
    fn test_chain() {
        let dims = vec![
            dim(BlockKind::Action, false, 1.0),
            dim(BlockKind::Character, true, 2.0),
            dim(BlockKind::Parenthetical, true, 3.0),
            dim(BlockKind::Dialogue, false, 4.0),
            dim(BlockKind::Action, false, 5.0),
        ];

        let group = group_from(&dims, 1).unwrap();
        assert_eq!(group.range(), 1..4);
        assert_eq!(group.len(), 3);
        assert_eq!(group.height_pt, 9.0);
    }

    #[test]
    fn test_trailing_keep_with_next() {
        // Last block wants a successor that does not exist
        let dims = vec![dim(BlockKind::Action, false, 1.0), dim(BlockKind::Character, true, 2.0)];
        let group = group_from(&dims, 1).unwrap();
        assert_eq!(group.range(), 1..2);
    }

    #[test]
    fn test_start_out_of_range() {
        assert_eq!(group_from(&[], 0), None);
        let dims = vec![dim(BlockKind::Action, false, 1.0)];
        assert_eq!(group_from(&dims, 1), None);
        assert_eq!(group_from(&dims, 7), None);
    }

    #[test]
    fn test_groups_partition() {
        let dims = vec![
            dim(BlockKind::Character, true, 1.0),
            dim(BlockKind::Dialogue, false, 1.0),
            dim(BlockKind::Action, false, 1.0),
            dim(BlockKind::Character, true, 1.0),
        ];
        let ranges: Vec<_> = groups(&dims).map(|g| g.range()).collect();
        assert_eq!(ranges, vec![0..2, 2..3, 3..4]);
        assert_eq!(groups(&[]).count(), 0);
    }
}
