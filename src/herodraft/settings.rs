use std::collections::BTreeSet;

use herodraft_model::Difficulty;
use serde::{Deserialize, Serialize};

use super::config::Config;

/// How a single player wants their candidates drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSettings {
    pub hero_count: usize,
    pub change_count: usize,
    pub difficulties: BTreeSet<Difficulty>,
}

impl DraftSettings {
    /// Builds settings from optional request fields, filling gaps from `config`.
    pub fn from_request(
        config: &Config,
        hero_count: Option<usize>,
        change_count: Option<usize>,
        difficulty: Option<&str>,
    ) -> Self {
        let difficulties = difficulty
            .map(parse_difficulties)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| config.default_difficulties.iter().copied().collect());
        DraftSettings {
            hero_count: hero_count.unwrap_or(config.default_hero_count),
            change_count: change_count.unwrap_or(config.default_change_count),
            difficulties,
        }
    }

    /// Number of heroes to draw: the ones to pick from plus the spare ones for swapping.
    /// Never zero, a player always gets something to choose.
    pub fn total_count(&self) -> usize {
        self.hero_count.saturating_add(self.change_count).max(1)
    }
}

/// Parses "1,2,5" into a set, skipping anything that is not a number.
pub fn parse_difficulties(text: &str) -> BTreeSet<Difficulty> {
    text.split(',')
        .filter_map(|part| part.trim().parse::<Difficulty>().ok())
        .collect()
}
