use std::collections::{BTreeMap, BTreeSet, HashSet};

use herodraft_model::{HeroId, PlayerId, PlayerStatus, Role};
use log::info;
use serde::Serialize;

/// Default table size before anybody joins.
pub const DEFAULT_PLAYER_COUNT: usize = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    #[default]
    Active,
    /// Every seat has a confirmed hero. The next join starts a fresh round.
    Finished,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerEntry {
    pub status: PlayerStatus,
    pub candidate_pool: Vec<HeroId>,
    pub assigned_hero: Option<HeroId>,
    pub assigned_role: Option<Role>,
}

/// Everything one round knows. Only `RoundCoordinator` touches it, always under its lock.
#[derive(Debug)]
pub struct RoundState {
    pub(super) phase: RoundPhase,
    pub(super) player_count: usize,
    /// Players of the current round.
    pub(super) players: BTreeMap<PlayerId, PlayerEntry>,
    /// Heroes offered to anybody this round.
    pub(super) shown: HashSet<HeroId>,
    /// Heroes confirmed by somebody this round, always a subset of `shown`.
    pub(super) assigned: HashSet<HeroId>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    pub fn new() -> Self {
        RoundState {
            phase: RoundPhase::Active,
            player_count: DEFAULT_PLAYER_COUNT,
            players: BTreeMap::new(),
            shown: HashSet::new(),
            assigned: HashSet::new(),
        }
    }

    /// Phase transition run at the top of every join. A finished round is replaced by an empty
    /// one; returns whether that happened.
    pub(super) fn begin_join(&mut self) -> bool {
        match self.phase {
            RoundPhase::Active => false,
            RoundPhase::Finished => {
                info!(
                    "Round finished with {} players, starting a new one",
                    self.players.len()
                );
                *self = RoundState::new();
                true
            }
        }
    }

    /// Marks the round finished once every seat has a hero.
    pub(super) fn update_phase(&mut self) {
        if self.phase == RoundPhase::Active && self.assigned.len() == self.player_count {
            info!("All {} heroes confirmed, round finished", self.player_count);
            self.phase = RoundPhase::Finished;
        }
    }

    pub(super) fn assigned_roles(&self) -> Vec<Role> {
        self.players
            .values()
            .filter_map(|p| p.assigned_role)
            .collect()
    }

    pub(super) fn status_of(&self, player: &PlayerId) -> Option<PlayerStatus> {
        self.players.get(player).map(|p| p.status)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            player_count: self.player_count,
            players: self
                .players
                .iter()
                .map(|(id, p)| PlayerSnapshot {
                    id: id.clone(),
                    status: p.status,
                    assigned_hero: p.assigned_hero,
                    assigned_role: p.assigned_role,
                })
                .collect(),
            shown_heroes: self.shown.iter().copied().collect(),
            assigned_heroes: self.assigned.iter().copied().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    #[serde(skip)]
    pub id: PlayerId,
    pub status: PlayerStatus,
    pub assigned_hero: Option<HeroId>,
    #[serde(skip)]
    pub assigned_role: Option<Role>,
}

/// Copy of the round taken under the coordinator lock. Player ids and roles are kept out of
/// the serialized form: an id is the player's session token and roles are secret.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub player_count: usize,
    pub players: Vec<PlayerSnapshot>,
    pub shown_heroes: BTreeSet<HeroId>,
    pub assigned_heroes: BTreeSet<HeroId>,
}

impl RoundSnapshot {
    pub fn roles(&self) -> Vec<Role> {
        self.players.iter().filter_map(|p| p.assigned_role).collect()
    }

    pub fn count_with_status(&self, status: PlayerStatus) -> usize {
        self.players.iter().filter(|p| p.status == status).count()
    }
}
