use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod hero;

pub use hero::{Difficulty, Hero, HeroRecord, UiVariant};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        PlayerId(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        PlayerId(String::from(value))
    }
}

impl From<PlayerId> for String {
    fn from(value: PlayerId) -> Self {
        value.0
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct HeroId(u32);

impl HeroId {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Id directly following this one. Paired heroes and skill chains are laid out on
    /// consecutive ids. `None` past the last representable id.
    pub fn next(self) -> Option<HeroId> {
        self.0.checked_add(1).map(HeroId)
    }
}

impl From<u32> for HeroId {
    fn from(value: u32) -> Self {
        HeroId(value)
    }
}

impl Display for HeroId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Secret role handed out together with a hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Lord,
    Loyalist,
    Rebel,
    Traitor,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Lord, Role::Loyalist, Role::Rebel, Role::Traitor];
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Role::Lord => "Lord",
            Role::Loyalist => "Loyalist",
            Role::Rebel => "Rebel",
            Role::Traitor => "Traitor",
        })
    }
}

impl TryFrom<&str> for Role {
    type Error = FromStrError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "lord" => Ok(Role::Lord),
            "loyalist" => Ok(Role::Loyalist),
            "rebel" => Ok(Role::Rebel),
            "traitor" => Ok(Role::Traitor),
            _ => Err(FromStrError(value.to_string())),
        }
    }
}

/// Where a player is within the current round. Only moves forward; a round reset removes
/// the player altogether.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerStatus {
    #[default]
    Lobby,
    Choosing,
    InGame,
}

impl Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PlayerStatus::Lobby => "in lobby",
            PlayerStatus::Choosing => "choosing a hero",
            PlayerStatus::InGame => "in game",
        })
    }
}

#[derive(Error, Debug)]
#[error("Invalid value: {0}")]
pub struct FromStrError(String);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn role_from_str() {
        assert_eq!(Role::try_from("Rebel").unwrap(), Role::Rebel);
        assert_eq!(Role::try_from("traitor").unwrap(), Role::Traitor);
        assert_eq!(
            &Role::try_from("jester").unwrap_err().to_string(),
            "Invalid value: jester"
        );
    }

    #[test]
    fn player_status_is_ordered_by_lifecycle() {
        assert!(PlayerStatus::Lobby < PlayerStatus::Choosing);
        assert!(PlayerStatus::Choosing < PlayerStatus::InGame);
        assert_eq!(PlayerStatus::default(), PlayerStatus::Lobby);
    }

    #[test]
    fn hero_id_next() {
        assert_eq!(HeroId::from(41).next(), Some(HeroId::from(42)));
        assert_eq!(HeroId::from(u32::MAX).next(), None);
    }
}
