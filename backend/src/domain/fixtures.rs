//! Sample dataset inserted by `populate-db`.
//!
//! Three players, three games with three levels each, and one score per
//! player on every level. Player `k` scores `k * 100`.

use super::game::GameDraft;
use super::level::{LevelDraft, ScoreKind, ScoreOrder};
use super::names::{FieldError, Label, ResourceName, UniqueName};
use super::password::PasswordDigest;
use super::player::PlayerDraft;

const FIXTURE_COUNT: u8 = 3;
const GENRES: [&str; 3] = ["Racing", "Puzzle", "Action"];

/// Score a fixture player holds on a fixture level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureScore {
    pub player: UniqueName,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureLevel {
    pub level: LevelDraft,
    pub scores: Vec<FixtureScore>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureGame {
    pub game: GameDraft,
    pub levels: Vec<FixtureLevel>,
}

/// Complete fixture dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureDataset {
    pub players: Vec<PlayerDraft>,
    pub games: Vec<FixtureGame>,
}

/// Row counts written by a successful seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixtureSummary {
    pub players: usize,
    pub games: usize,
    pub levels: usize,
    pub scores: usize,
}

impl FixtureDataset {
    /// Build the standard sample dataset.
    pub fn sample() -> Result<Self, FieldError> {
        let players = (1..=FIXTURE_COUNT)
            .map(|k| {
                Ok(PlayerDraft::new(
                    ResourceName::new(format!("Player {k}"))?,
                    Some(UniqueName::new(format!("player_{k}"))?),
                    PasswordDigest::of_plaintext(&format!("pw {k}")),
                ))
            })
            .collect::<Result<Vec<_>, FieldError>>()?;

        let games = (1..=FIXTURE_COUNT)
            .zip(GENRES)
            .map(|(g, genre)| {
                Ok(FixtureGame {
                    game: GameDraft {
                        name: ResourceName::new(format!("Game {g}"))?,
                        publisher: Some(Label::new(format!("Publisher {g}"))?),
                        genre: Some(Label::new(genre)?),
                    },
                    levels: Self::levels(&players)?,
                })
            })
            .collect::<Result<Vec<_>, FieldError>>()?;

        Ok(Self { players, games })
    }

    fn levels(players: &[PlayerDraft]) -> Result<Vec<FixtureLevel>, FieldError> {
        (1..=FIXTURE_COUNT)
            .map(|l| {
                Ok(FixtureLevel {
                    level: LevelDraft {
                        name: ResourceName::new(format!("Level {l}"))?,
                        kind: ScoreKind::default(),
                        order: ScoreOrder::default(),
                    },
                    scores: players
                        .iter()
                        .zip(1_i64..)
                        .map(|(player, k)| FixtureScore {
                            player: player.unique_name.clone(),
                            value: k * 100,
                        })
                        .collect(),
                })
            })
            .collect()
    }

    /// Number of rows of each kind the dataset contains.
    pub fn summary(&self) -> FixtureSummary {
        let levels = self.games.iter().flat_map(|g| &g.levels);
        FixtureSummary {
            players: self.players.len(),
            games: self.games.len(),
            levels: levels.clone().count(),
            scores: levels.map(|l| l.scores.len()).sum(),
        }
    }
}
