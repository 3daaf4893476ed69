use herodraft_model::{HeroId, PlayerId, PlayerStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DraftError {
    #[error("Player {player} cannot {action} while {}", describe_status(.status))]
    InvalidState {
        player: PlayerId,
        action: &'static str,
        status: Option<PlayerStatus>,
    },

    #[error("Hero {hero} was not offered to player {player}")]
    IllegalSelection { player: PlayerId, hero: HeroId },

    #[error("Hero {0} has already been taken")]
    HeroAlreadyAssigned(HeroId),

    #[error("No heroes left to draw for the requested difficulties")]
    NoCandidatesAvailable,

    #[error("All roles for {player_count} players are already handed out")]
    RoleExhausted { player_count: usize },
}

fn describe_status(status: &Option<PlayerStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "not part of the round".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_message() {
        let e = DraftError::InvalidState {
            player: PlayerId::from("p1"),
            action: "confirm a hero",
            status: Some(PlayerStatus::Lobby),
        };
        assert_eq!(e.to_string(), "Player p1 cannot confirm a hero while in lobby");
        let e = DraftError::InvalidState {
            player: PlayerId::from("p1"),
            action: "draw heroes",
            status: None,
        };
        assert_eq!(
            e.to_string(),
            "Player p1 cannot draw heroes while not part of the round"
        );
    }
}
