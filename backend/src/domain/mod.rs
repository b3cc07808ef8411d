//! Domain primitives, aggregates, ports and use-case services.
//!
//! Types here are transport and storage agnostic. Inbound adapters translate
//! requests into validated values (`ResourceName`, `UniqueName`,
//! `PasswordDigest`, ...), call the driving ports in [`ports`], and render
//! the results; outbound adapters implement the repository ports.

pub mod error;
pub mod fixtures;
pub mod game;
pub mod game_service;
pub mod level;
pub mod level_service;
pub mod names;
pub mod password;
pub mod player;
pub mod player_service;
pub mod ports;
pub mod score;
pub mod score_service;
pub mod seeding;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fixtures::{FixtureDataset, FixtureGame, FixtureLevel, FixtureScore, FixtureSummary};
pub use self::game::{Game, GameDraft, GameId};
pub use self::game_service::GameService;
pub use self::level::{Level, LevelDraft, LevelId, ScoreKind, ScoreOrder};
pub use self::level_service::LevelService;
pub use self::names::{FieldError, Label, NAME_MAX, ResourceName, UniqueName};
pub use self::password::PasswordDigest;
pub use self::player::{Player, PlayerDraft, PlayerId};
pub use self::player_service::PlayerService;
pub use self::score::{
    SCORE_DATE_FORMAT, Score, ScoreDraft, ScoreId, ScoreSubmission, ScoreView, format_score_date,
    parse_score_date,
};
pub use self::score_service::ScoreService;
pub use self::seeding::{FixtureSeeder, SeedingError};
pub use self::trace_id::TraceId;
