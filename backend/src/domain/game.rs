//! Game aggregate.

use super::names::{Label, ResourceName};

/// Database identifier of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub i32);

/// Validated game fields, used for both creation and replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDraft {
    pub name: ResourceName,
    pub publisher: Option<Label>,
    pub genre: Option<Label>,
}

/// Registered game. `name` is unique and forms the game's URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub name: ResourceName,
    pub publisher: Option<Label>,
    pub genre: Option<Label>,
}

impl Game {
    pub fn from_draft(id: GameId, draft: GameDraft) -> Self {
        let GameDraft {
            name,
            publisher,
            genre,
        } = draft;
        Self {
            id,
            name,
            publisher,
            genre,
        }
    }
}
