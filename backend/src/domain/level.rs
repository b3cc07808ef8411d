//! Levels of a game and the rules for ranking their scores.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::game::GameId;
use super::names::{FieldError, ResourceName};
use super::score::ScoreView;

/// Database identifier of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(pub i32);

/// What a score value measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// Points or any other plain number.
    #[default]
    Number,
    /// Elapsed time, in whatever unit the game reports.
    Time,
}

/// Which direction of score value is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreOrder {
    /// Highest value ranks first.
    #[default]
    Descending,
    /// Lowest value ranks first.
    Ascending,
}

impl ScoreKind {
    pub const CHOICES: &'static [&'static str] = &["number", "time"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Time => "time",
        }
    }
}

impl ScoreOrder {
    pub const CHOICES: &'static [&'static str] = &["descending", "ascending"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descending => "descending",
            Self::Ascending => "ascending",
        }
    }

    /// Sort `scores` best first. Equal values rank the earlier submission
    /// first; identical timestamps fall back to insertion order.
    ///
    /// # Examples
    /// ```
    /// use gamescoreservice::domain::ScoreOrder;
    ///
    /// let mut values = vec![10, 30, 20];
    /// values.sort_by(|a, b| ScoreOrder::Ascending.compare_values(*a, *b));
    /// assert_eq!(values, [10, 20, 30]);
    /// ```
    pub fn rank(self, scores: &mut [ScoreView]) {
        scores.sort_by(|a, b| {
            self.compare_values(a.value, b.value)
                .then_with(|| a.date.cmp(&b.date))
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    /// Ordering of two raw values, best first.
    pub fn compare_values(self, a: i64, b: i64) -> Ordering {
        match self {
            Self::Descending => b.cmp(&a),
            Self::Ascending => a.cmp(&b),
        }
    }
}

impl FromStr for ScoreKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(Self::Number),
            "time" => Ok(Self::Time),
            _ => Err(FieldError::UnknownChoice {
                expected: Self::CHOICES,
            }),
        }
    }
}

impl FromStr for ScoreOrder {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "descending" => Ok(Self::Descending),
            "ascending" => Ok(Self::Ascending),
            _ => Err(FieldError::UnknownChoice {
                expected: Self::CHOICES,
            }),
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ScoreOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated level fields, used for both creation and replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDraft {
    pub name: ResourceName,
    pub kind: ScoreKind,
    pub order: ScoreOrder,
}

/// Level belonging to a game. `name` is unique within the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub id: LevelId,
    pub game_id: GameId,
    pub name: ResourceName,
    pub kind: ScoreKind,
    pub order: ScoreOrder,
}

impl Level {
    pub fn from_draft(id: LevelId, game_id: GameId, draft: LevelDraft) -> Self {
        Self {
            id,
            game_id,
            name: draft.name,
            kind: draft.kind,
            order: draft.order,
        }
    }
}
