//! URIs, profiles, payload schemas and the `gss:*` controls shared by every
//! resource handler.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::{Value, json};

use crate::domain::{Error, ResourceName, ScoreKind, ScoreOrder, UniqueName};

use super::mason::Control;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Published API documentation that profiles and link relations redirect to.
pub const API_DOCS_URL: &str = "https://gamescoreservice.docs.apiary.io/#reference/";

fn segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

pub fn entry_href() -> String {
    "/api/".to_owned()
}

pub fn players_href() -> String {
    "/api/players/".to_owned()
}

pub fn player_href(player: &UniqueName) -> String {
    format!("/api/players/{}/", segment(player.as_str()))
}

pub fn scores_by_href(player: &UniqueName) -> String {
    format!("/api/players/{}/scores/", segment(player.as_str()))
}

pub fn games_href() -> String {
    "/api/games/".to_owned()
}

pub fn game_href(game: &ResourceName) -> String {
    format!("/api/games/{}/", segment(game.as_str()))
}

pub fn level_href(game: &ResourceName, level: &ResourceName) -> String {
    format!(
        "/api/games/{}/{}/",
        segment(game.as_str()),
        segment(level.as_str())
    )
}

pub fn score_href(game: &ResourceName, level: &ResourceName, player: &UniqueName) -> String {
    format!(
        "/api/games/{}/{}/{}/",
        segment(game.as_str()),
        segment(level.as_str()),
        segment(player.as_str())
    )
}

/// Player named by a URI segment. Segments that cannot be valid unique
/// names cannot match a player either.
pub fn player_segment(raw: &str) -> Result<UniqueName, Error> {
    UniqueName::new(raw)
        .map_err(|_| Error::not_found(format!("Player '{raw}' wasn't found.")))
}

pub fn game_segment(raw: &str) -> Result<ResourceName, Error> {
    ResourceName::new(raw)
        .map_err(|_| Error::not_found(format!("Game '{raw}' wasn't found.")))
}

pub fn level_segment(raw: &str) -> Result<ResourceName, Error> {
    ResourceName::new(raw)
        .map_err(|_| Error::not_found(format!("Level '{raw}' wasn't found.")))
}

/// Semantic profile of a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Player,
    Game,
    Level,
    Score,
    Error,
}

impl Profile {
    pub const fn href(self) -> &'static str {
        match self {
            Self::Player => "/profiles/player/",
            Self::Game => "/profiles/game/",
            Self::Level => "/profiles/level/",
            Self::Score => "/profiles/score/",
            Self::Error => "/profiles/error/",
        }
    }

    pub fn control(self) -> Control {
        Control::new(self.href())
    }
}

const DISPLAY_PATTERN: &str = "^[a-zA-Z0-9_ ]{1,64}$";
const LABEL_PATTERN: &str = "^[a-zA-Z0-9_ ]{0,64}$";
const PASSWORD_PATTERN: &str = "^[a-fA-F0-9]{32}$";
const DATE_PATTERN: &str =
    "^$|^[0-9]{4}-[01][0-9]-[0-3][0-9] [0-2][0-9]:[0-5][0-9]:[0-5][0-9]$";

/// JSON Schema of player create/edit payloads.
pub fn player_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name", "password"],
        "properties": {
            "name": {
                "description": "Player's visible name",
                "type": "string",
                "pattern": DISPLAY_PATTERN,
            },
            "unique_name": {
                "description": "Player's unique name",
                "type": "string",
                "pattern": "^[a-z0-9_]{0,64}$",
            },
            "password": {
                "description": "MD5 digest of the player's password",
                "type": "string",
                "pattern": PASSWORD_PATTERN,
            },
        },
    })
}

/// JSON Schema of game create/edit payloads.
pub fn game_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": {
                "description": "Game's name",
                "type": "string",
                "pattern": DISPLAY_PATTERN,
            },
            "publisher": {
                "description": "Game's publisher",
                "type": "string",
                "pattern": LABEL_PATTERN,
            },
            "genre": {
                "description": "Game's genre",
                "type": "string",
                "pattern": LABEL_PATTERN,
            },
        },
    })
}

/// JSON Schema of level create/edit payloads.
pub fn level_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": {
                "description": "Level's name",
                "type": "string",
                "pattern": DISPLAY_PATTERN,
            },
            "type": {
                "description": "Type of scores",
                "type": "string",
                "enum": ScoreKind::CHOICES,
                "default": ScoreKind::default().as_str(),
            },
            "order": {
                "description": "Which direction ranks a score higher",
                "type": "string",
                "enum": ScoreOrder::CHOICES,
                "default": ScoreOrder::default().as_str(),
            },
        },
    })
}

/// JSON Schema of score submit/edit payloads.
pub fn score_schema() -> Value {
    json!({
        "type": "object",
        "required": ["value", "player", "password"],
        "properties": {
            "value": {
                "description": "Score value",
                "type": "integer",
            },
            "date": {
                "description": "Score timestamp (YYYY-MM-DD HH:MM:SS); empty means now",
                "type": "string",
                "pattern": DATE_PATTERN,
            },
            "player": {
                "description": "Player's unique name",
                "type": "string",
                "pattern": "^[a-z0-9_]{1,64}$",
            },
            "password": {
                "description": "MD5 digest of the player's password",
                "type": "string",
                "pattern": PASSWORD_PATTERN,
            },
        },
    })
}

pub fn players_all() -> Control {
    Control::new(players_href())
        .method("GET")
        .title("List all players")
}

pub fn games_all() -> Control {
    Control::new(games_href())
        .method("GET")
        .title("List all games")
}

pub fn scores_by(player: &UniqueName) -> Control {
    Control::new(scores_by_href(player))
        .method("GET")
        .title("List all scores by the player")
}

pub fn add_player() -> Control {
    Control::new(players_href())
        .method("POST")
        .title("Add a new player")
        .json_body(player_schema())
}

pub fn add_game() -> Control {
    Control::new(games_href())
        .method("POST")
        .title("Add a new game")
        .json_body(game_schema())
}

pub fn add_level(game: &ResourceName) -> Control {
    Control::new(game_href(game))
        .method("POST")
        .title("Add a new level")
        .json_body(level_schema())
}

pub fn add_score(game: &ResourceName, level: &ResourceName) -> Control {
    Control::new(level_href(game, level))
        .method("POST")
        .title("Add a new score")
        .json_body(score_schema())
}

/// `edit` control replacing the resource at `href`.
pub fn edit(href: String, title: &'static str, schema: Value) -> Control {
    Control::new(href).method("PUT").title(title).json_body(schema)
}

/// `gss:delete` control for the resource at `href`.
pub fn delete(href: String) -> Control {
    Control::new(href)
        .method("DELETE")
        .title("Delete this resource")
}
