//! Block kind detection for typed or imported screenplay lines

use crate::document::BlockKind;

/// Key that finishes a block in the authoring flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextKey {
    Enter,
    Tab,
}

const SCENE_PREFIXES: [&str; 4] = ["INT.", "EXT.", "INTERIOR", "EXTERIOR"];

const TRANSITION_CUES: [&str; 5] = ["CUT TO", "FADE IN", "FADE OUT", "DISSOLVE TO", "SMASH CUT"];

/// Longest text (in chars) still treated as a character cue
const MAX_CUE_LEN: usize = 40;

/// Most words a character cue may contain
const MAX_CUE_WORDS: usize = 3;

/// Infer the kind of a line from its text.
///
/// Falls back to `current` when nothing matches, so an author's explicit
/// choice survives for plain prose.
pub fn detect_block_kind(content: &str, current: BlockKind) -> BlockKind {
    let trimmed = content.trim();
    let upper = trimmed.to_uppercase();

    if SCENE_PREFIXES.iter().any(|p| upper.starts_with(p))
        || (upper.contains(" - ") && (upper.contains("INT.") || upper.contains("EXT.")))
    {
        return BlockKind::SceneHeading;
    }

    if upper.ends_with(':') && TRANSITION_CUES.iter().any(|cue| upper.contains(cue)) {
        return BlockKind::Transition;
    }

    if trimmed.starts_with('(') && trimmed.ends_with(')') {
        return BlockKind::Parenthetical;
    }

    // Cue lines arrive already trimmed and upper-cased
    if content == upper
        && !upper.is_empty()
        && upper.chars().count() < MAX_CUE_LEN
        && upper.split(' ').count() <= MAX_CUE_WORDS
        && current != BlockKind::Dialogue
        && !upper.contains('.')
    {
        return BlockKind::Character;
    }

    current
}

/// Kind of the block created after `current` when the author presses `key`
pub fn next_block_kind(current: BlockKind, key: NextKey) -> BlockKind {
    match key {
        NextKey::Enter => match current {
            BlockKind::SceneHeading => BlockKind::Action,
            BlockKind::Action => BlockKind::Action,
            BlockKind::Character => BlockKind::Dialogue,
            BlockKind::Dialogue => BlockKind::Action,
            BlockKind::Parenthetical => BlockKind::Dialogue,
            BlockKind::Transition => BlockKind::SceneHeading,
        },
        NextKey::Tab => match current {
            BlockKind::SceneHeading => BlockKind::Action,
            BlockKind::Action => BlockKind::Character,
            BlockKind::Character => BlockKind::Dialogue,
            BlockKind::Dialogue => BlockKind::Parenthetical,
            BlockKind::Parenthetical => BlockKind::Transition,
            BlockKind::Transition => BlockKind::SceneHeading,
        },
    }
}
