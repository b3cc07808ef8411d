//! Validated names used as natural keys and labels.
//!
//! Display names, game names and level names share one alphabet (letters,
//! digits, underscores and spaces). Player unique names are the URL-safe
//! lowercase variant. Labels (publisher, genre) use the display alphabet but
//! may be empty, in which case they are treated as absent.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in any name or label.
pub const NAME_MAX: usize = 64;

/// Reasons a submitted field can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Empty,
    TooLong { max: usize },
    InvalidCharacters { allowed: &'static str },
    InvalidPassword,
    UnknownChoice { expected: &'static [&'static str] },
    InvalidDate,
}

impl FieldError {
    /// Stable machine-readable code reported in error details.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
            Self::InvalidCharacters { .. } => "invalid_characters",
            Self::InvalidPassword => "invalid_password",
            Self::UnknownChoice { .. } => "unknown_choice",
            Self::InvalidDate => "invalid_date",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "must not be empty"),
            Self::TooLong { max } => write!(f, "must be at most {max} characters"),
            Self::InvalidCharacters { allowed } => write!(f, "may only contain {allowed}"),
            Self::InvalidPassword => {
                write!(f, "must be an MD5 digest of 32 hexadecimal characters")
            }
            Self::UnknownChoice { expected } => {
                write!(f, "must be one of: {}", expected.join(", "))
            }
            Self::InvalidDate => write!(f, "must be empty or formatted as YYYY-MM-DD HH:MM:SS"),
        }
    }
}

impl std::error::Error for FieldError {}

const DISPLAY_ALPHABET: &str = "letters, numbers, spaces, or underscores";
const UNIQUE_ALPHABET: &str = "lowercase letters, numbers, or underscores";

fn display_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_ ]+$")
            .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
    })
}

fn unique_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^[a-z0-9_]+$")
            .unwrap_or_else(|error| panic!("unique name regex failed to compile: {error}"))
    })
}

fn check(value: &str, re: &Regex, allowed: &'static str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Empty);
    }
    if value.chars().count() > NAME_MAX {
        return Err(FieldError::TooLong { max: NAME_MAX });
    }
    if !re.is_match(value) {
        return Err(FieldError::InvalidCharacters { allowed });
    }
    Ok(())
}

/// Human readable name of a player, game or level.
///
/// # Examples
/// ```
/// use gamescoreservice::domain::ResourceName;
///
/// assert!(ResourceName::new("Space Race 2").is_ok());
/// assert!(ResourceName::new("Space/Race").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    /// Validate and wrap a name.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        check(&value, display_regex(), DISPLAY_ALPHABET)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// URL-safe identifier of a player.
///
/// # Examples
/// ```
/// use gamescoreservice::domain::{ResourceName, UniqueName};
///
/// let name = ResourceName::new("Player One").unwrap();
/// assert_eq!(UniqueName::derive_from(&name).as_str(), "player_one");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueName(String);

impl UniqueName {
    /// Validate and wrap a unique name.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        check(&value, unique_regex(), UNIQUE_ALPHABET)?;
        Ok(Self(value))
    }

    /// Lowercase `name` and replace spaces with underscores.
    ///
    /// The display alphabet maps onto the unique alphabet and lengths are
    /// preserved, so the result is always valid.
    pub fn derive_from(name: &ResourceName) -> Self {
        Self(name.as_str().to_lowercase().replace(' ', "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional descriptive text such as a publisher or a genre.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Parse an optional label; `None` and the empty string both mean absent.
    ///
    /// # Examples
    /// ```
    /// use gamescoreservice::domain::Label;
    ///
    /// assert_eq!(Label::parse_optional(Some(String::new())), Ok(None));
    /// assert!(Label::parse_optional(Some("Puzzle".into())).unwrap().is_some());
    /// ```
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, FieldError> {
        match value {
            None => Ok(None),
            Some(text) if text.is_empty() => Ok(None),
            Some(text) => Self::new(text).map(Some),
        }
    }

    /// Validate and wrap a non-empty label.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        check(&value, display_regex(), DISPLAY_ALPHABET)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_newtype_impls {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = FieldError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )+
    };
}

string_newtype_impls!(ResourceName, UniqueName, Label);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Game 1")]
    #[case("a")]
    #[case("under_score")]
    fn accepts_display_names(#[case] value: &str) {
        assert_eq!(ResourceName::new(value).expect("valid").as_str(), value);
    }

    #[rstest]
    #[case("", FieldError::Empty)]
    #[case("semi;colon", FieldError::InvalidCharacters { allowed: DISPLAY_ALPHABET })]
    #[case("Ünïcode", FieldError::InvalidCharacters { allowed: DISPLAY_ALPHABET })]
    fn rejects_bad_display_names(#[case] value: &str, #[case] expected: FieldError) {
        assert_eq!(ResourceName::new(value), Err(expected));
    }

    #[rstest]
    fn enforces_the_length_limit() {
        assert!(ResourceName::new("x".repeat(NAME_MAX)).is_ok());
        assert_eq!(
            ResourceName::new("x".repeat(NAME_MAX + 1)),
            Err(FieldError::TooLong { max: NAME_MAX })
        );
    }

    #[rstest]
    #[case("Player 1", "player_1")]
    #[case("ALL CAPS NAME", "all_caps_name")]
    #[case("already_fine", "already_fine")]
    fn derives_unique_names(#[case] name: &str, #[case] expected: &str) {
        let name = ResourceName::new(name).expect("valid");
        let derived = UniqueName::derive_from(&name);
        assert_eq!(derived.as_str(), expected);
        assert_eq!(UniqueName::new(expected), Ok(derived));
    }

    #[rstest]
    #[case("Upper")]
    #[case("with space")]
    #[case("")]
    fn rejects_bad_unique_names(#[case] value: &str) {
        assert!(UniqueName::new(value).is_err());
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("Racing"), Some("Racing"))]
    fn parses_optional_labels(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        let parsed = Label::parse_optional(input.map(str::to_owned)).expect("valid label");
        assert_eq!(parsed.as_ref().map(Label::as_str), expected);
    }

    #[rstest]
    fn deserialising_validates_input() {
        let err = serde_json::from_str::<UniqueName>("\"Nope\"");
        assert!(err.is_err());
    }
}
