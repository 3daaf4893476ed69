use std::sync::{Mutex, MutexGuard, PoisonError};

use herodraft_model::{Hero, HeroId, PlayerId, PlayerStatus, Role, UiVariant};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rolepool::{pick_remaining, role_pool};
use serde::Serialize;

use super::catalog::HeroCatalog;
use super::drawer::CandidateDrawer;
use super::error::DraftError;
use super::round::{PlayerEntry, RoundSnapshot, RoundState};
use super::settings::DraftSettings;


/// What a player gets to see once their hero is confirmed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub hero: Hero,
    pub role: Role,
    pub ui_variant: UiVariant,
    /// Paired partner or skill chain, depending on `ui_variant`.
    pub companions: Vec<Hero>,
}

struct Round {
    state: RoundState,
    rng: StdRng,
}

/// Single entry point to the shared round. Every operation runs under one lock so checks and
/// the writes depending on them are never interleaved with another request.
pub struct RoundCoordinator {
    catalog: HeroCatalog,
    round: Mutex<Round>,
}

impl RoundCoordinator {
    pub fn new(catalog: HeroCatalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: HeroCatalog, rng: StdRng) -> Self {
        RoundCoordinator {
            catalog,
            round: Mutex::new(Round {
                state: RoundState::new(),
                rng,
            }),
        }
    }

    pub fn catalog(&self) -> &HeroCatalog {
        &self.catalog
    }

    fn lock(&self) -> MutexGuard<'_, Round> {
        // State is written only after every check passed, a poisoned round is still whole.
        self.round.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn join(&self, player: &PlayerId) -> PlayerStatus {
        let mut round = self.lock();
        let Round { state, rng } = &mut *round;
        if state.begin_join() {
            info!("New round started by {player}");
        }
        let entry = state.players.entry(player.clone()).or_default();
        let status = entry.status;
        let has_role = entry.assigned_role.is_some();
        state.player_count = state.player_count.max(state.players.len());

        if !has_role {
            let pool = role_pool(state.player_count);
            match pick_remaining(&pool, &state.assigned_roles(), rng) {
                Some(role) => {
                    if let Some(entry) = state.players.get_mut(player) {
                        entry.assigned_role = Some(role);
                    }
                }
                None => warn!(
                    "No role left for {player} among {} seats, retrying on confirmation",
                    state.player_count
                ),
            }
        }
        debug!(
            "{player} joined ({status}), {} of {} seats taken",
            state.players.len(),
            state.player_count
        );
        status
    }

    /// Draws candidates for `player`. Asking again while still choosing returns the same pool.
    pub fn start_draft(
        &self,
        player: &PlayerId,
        settings: &DraftSettings,
    ) -> Result<Vec<Hero>, DraftError> {
        let mut round = self.lock();
        let Round { state, rng } = &mut *round;
        let entry = state
            .players
            .get(player)
            .ok_or_else(|| invalid_state(player, "draw heroes", None))?;
        match entry.status {
            PlayerStatus::Lobby => {}
            PlayerStatus::Choosing if !entry.candidate_pool.is_empty() => {
                debug!("{player} asked for candidates again, returning the stored pool");
                return Ok(self.heroes(&entry.candidate_pool));
            }
            status => return Err(invalid_state(player, "draw heroes", Some(status))),
        }

        let drawn = CandidateDrawer::new(&self.catalog).draw(
            &settings.difficulties,
            &state.shown,
            settings.total_count(),
            rng,
        )?;
        let pool: Vec<HeroId> = drawn.iter().map(|h| h.id).collect();
        state.shown.extend(pool.iter().copied());
        if let Some(entry) = state.players.get_mut(player) {
            entry.candidate_pool = pool;
            entry.status = PlayerStatus::Choosing;
        }
        debug!(
            "{player} is choosing from {} heroes, {} shown this round",
            drawn.len(),
            state.shown.len()
        );
        Ok(drawn.into_iter().cloned().collect())
    }

    pub fn confirm_hero(&self, player: &PlayerId, hero: HeroId) -> Result<(), DraftError> {
        let mut round = self.lock();
        let Round { state, rng } = &mut *round;
        let entry = state
            .players
            .get(player)
            .ok_or_else(|| invalid_state(player, "confirm a hero", None))?;
        if entry.status != PlayerStatus::Choosing {
            return Err(invalid_state(player, "confirm a hero", Some(entry.status)));
        }
        if !entry.candidate_pool.contains(&hero) {
            return Err(DraftError::IllegalSelection {
                player: player.clone(),
                hero,
            });
        }
        if state.assigned.contains(&hero) {
            return Err(DraftError::HeroAlreadyAssigned(hero));
        }
        let role = match entry.assigned_role {
            Some(role) => role,
            None => pick_remaining(
                &role_pool(state.player_count),
                &state.assigned_roles(),
                rng,
            )
            .ok_or(DraftError::RoleExhausted {
                player_count: state.player_count,
            })?,
        };

        // All checks passed, nothing below can fail.
        state.assigned.insert(hero);
        if let Some(entry) = state.players.get_mut(player) {
            *entry = PlayerEntry {
                status: PlayerStatus::InGame,
                candidate_pool: Vec::new(),
                assigned_hero: Some(hero),
                assigned_role: Some(role),
            };
        }
        info!(
            "{player} confirmed hero {hero}, {} of {} seats done",
            state.assigned.len(),
            state.player_count
        );
        state.update_phase();
        Ok(())
    }

    pub fn get_assignment(&self, player: &PlayerId) -> Result<Assignment, DraftError> {
        let round = self.lock();
        let entry = round
            .state
            .players
            .get(player)
            .ok_or_else(|| invalid_state(player, "see an assignment", None))?;
        let (PlayerStatus::InGame, Some(hero_id), Some(role)) =
            (entry.status, entry.assigned_hero, entry.assigned_role)
        else {
            return Err(invalid_state(
                player,
                "see an assignment",
                Some(entry.status),
            ));
        };
        // Catalog is validated and immutable, a confirmed hero is always in it.
        let hero = self
            .catalog
            .lookup(hero_id)
            .ok_or_else(|| invalid_state(player, "see an assignment", Some(entry.status)))?;
        Ok(Assignment {
            hero: hero.clone(),
            role,
            ui_variant: hero.ui_variant,
            companions: self.catalog.companions(hero).into_iter().cloned().collect(),
        })
    }

    pub fn player_status(&self, player: &PlayerId) -> Option<PlayerStatus> {
        self.lock().state.status_of(player)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.lock().state.snapshot()
    }

    fn heroes(&self, ids: &[HeroId]) -> Vec<Hero> {
        ids.iter()
            .filter_map(|id| self.catalog.lookup(*id))
            .cloned()
            .collect()
    }
}

fn invalid_state(
    player: &PlayerId,
    action: &'static str,
    status: Option<PlayerStatus>,
) -> DraftError {
    DraftError::InvalidState {
        player: player.clone(),
        action,
        status,
    }
}
