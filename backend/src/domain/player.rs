//! Player aggregate.

use super::names::{ResourceName, UniqueName};
use super::password::PasswordDigest;

/// Database identifier of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i32);

/// Validated player fields, used for both creation and replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDraft {
    pub name: ResourceName,
    pub unique_name: UniqueName,
    pub password: PasswordDigest,
}

impl PlayerDraft {
    /// Build a draft, deriving the unique name from `name` when absent.
    ///
    /// # Examples
    /// ```
    /// use gamescoreservice::domain::{PasswordDigest, PlayerDraft, ResourceName};
    ///
    /// let draft = PlayerDraft::new(
    ///     ResourceName::new("Ada L").unwrap(),
    ///     None,
    ///     PasswordDigest::of_plaintext("pw"),
    /// );
    /// assert_eq!(draft.unique_name.as_str(), "ada_l");
    /// ```
    pub fn new(
        name: ResourceName,
        unique_name: Option<UniqueName>,
        password: PasswordDigest,
    ) -> Self {
        let unique_name = unique_name.unwrap_or_else(|| UniqueName::derive_from(&name));
        Self {
            name,
            unique_name,
            password,
        }
    }
}

/// Registered player.
///
/// ## Invariants
/// - `unique_name` is unique across all players and forms the player's URI.
/// - `password` is never rendered by inbound adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: ResourceName,
    pub unique_name: UniqueName,
    pub password: PasswordDigest,
}

impl Player {
    /// Assemble a stored player from its identifier and fields.
    pub fn from_draft(id: PlayerId, draft: PlayerDraft) -> Self {
        let PlayerDraft {
            name,
            unique_name,
            password,
        } = draft;
        Self {
            id,
            name,
            unique_name,
            password,
        }
    }
}
