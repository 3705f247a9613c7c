//! Screenplay block types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a block, stable across edits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The kind of screenplay element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    SceneHeading,
    #[default]
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
}

impl BlockKind {
    /// Every kind, in declaration order
    pub const ALL: [BlockKind; 6] = [
        BlockKind::SceneHeading,
        BlockKind::Action,
        BlockKind::Character,
        BlockKind::Dialogue,
        BlockKind::Parenthetical,
        BlockKind::Transition,
    ];

    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::SceneHeading => "scene_heading",
            BlockKind::Action => "action",
            BlockKind::Character => "character",
            BlockKind::Dialogue => "dialogue",
            BlockKind::Parenthetical => "parenthetical",
            BlockKind::Transition => "transition",
        }
    }

    /// Check if this is a character cue
    pub fn is_character(&self) -> bool {
        matches!(self, BlockKind::Character)
    }

    /// Check if this is a scene heading
    pub fn is_scene_heading(&self) -> bool {
        matches!(self, BlockKind::SceneHeading)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed unit of screenplay text.
///
/// Blocks are owned by the authoring side; the pagination engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenplayBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
}

impl ScreenplayBlock {
    pub fn new(id: impl Into<String>, kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(id),
            kind,
            content: content.into(),
        }
    }

    pub fn scene_heading(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, BlockKind::SceneHeading, content)
    }

    pub fn action(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Action, content)
    }

    pub fn character(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Character, content)
    }

    pub fn dialogue(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Dialogue, content)
    }

    pub fn parenthetical(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Parenthetical, content)
    }

    pub fn transition(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Transition, content)
    }

    /// Whether the block has no visible text
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
