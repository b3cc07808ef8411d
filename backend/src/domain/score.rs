//! Scores recorded by players on levels.

use chrono::NaiveDateTime;

use super::level::{LevelId, ScoreKind};
use super::names::{FieldError, ResourceName, UniqueName};
use super::password::PasswordDigest;
use super::player::PlayerId;

/// Wire format of score timestamps.
pub const SCORE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Database identifier of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScoreId(pub i32);

/// Parse an optional wire timestamp; `None` and `""` both mean "now".
///
/// # Examples
/// ```
/// use gamescoreservice::domain::parse_score_date;
///
/// assert_eq!(parse_score_date(Some("")), Ok(None));
/// assert!(parse_score_date(Some("2024-05-01 10:00:00")).unwrap().is_some());
/// assert!(parse_score_date(Some("2024-05-01T10:00:00")).is_err());
/// ```
pub fn parse_score_date(value: Option<&str>) -> Result<Option<NaiveDateTime>, FieldError> {
    match value {
        None | Some("") => Ok(None),
        Some(text) => NaiveDateTime::parse_from_str(text, SCORE_DATE_FORMAT)
            .map(Some)
            .map_err(|_| FieldError::InvalidDate),
    }
}

/// Render a timestamp in the wire format.
pub fn format_score_date(date: &NaiveDateTime) -> String {
    date.format(SCORE_DATE_FORMAT).to_string()
}

/// Fields stored for a new score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDraft {
    pub level_id: LevelId,
    pub player_id: PlayerId,
    pub value: i64,
    pub date: NaiveDateTime,
}

/// Stored score row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub id: ScoreId,
    pub level_id: LevelId,
    pub player_id: PlayerId,
    pub value: i64,
    pub date: NaiveDateTime,
}

/// Score joined with the natural keys needed to render and link it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreView {
    pub id: ScoreId,
    pub game: ResourceName,
    pub level: ResourceName,
    pub kind: ScoreKind,
    pub player_name: ResourceName,
    pub player: UniqueName,
    pub value: i64,
    pub date: NaiveDateTime,
}

/// Authenticated score payload submitted by a game client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub player: UniqueName,
    pub password: PasswordDigest,
    pub value: i64,
    /// `None` records the score at the current time.
    pub date: Option<NaiveDateTime>,
}
