use serde::{Deserialize, Serialize};

use crate::{FromStrError, HeroId};

pub type Difficulty = u8;

/// Presentation a confirmed hero needs on the player's screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UiVariant {
    #[default]
    Standard,
    /// Rendered together with the hero on the next id.
    PairedAB,
    /// Rendered together with every hero chained to it through `parent_id`.
    WithSkillChain,
}

impl TryFrom<u8> for UiVariant {
    type Error = FromStrError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UiVariant::Standard),
            1 => Ok(UiVariant::PairedAB),
            2 => Ok(UiVariant::WithSkillChain),
            other => Err(FromStrError(other.to_string())),
        }
    }
}

impl From<UiVariant> for u8 {
    fn from(value: UiVariant) -> Self {
        match value {
            UiVariant::Standard => 0,
            UiVariant::PairedAB => 1,
            UiVariant::WithSkillChain => 2,
        }
    }
}

/// Row of the hero data file, as written by whoever maintains the hero list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroRecord {
    pub id: u32,
    pub file_name: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub ui_variant: UiVariant,
    #[serde(default)]
    pub parent_id: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: HeroId,
    pub file_ref: String,
    pub difficulty: Difficulty,
    pub is_open: bool,
    pub ui_variant: UiVariant,
    pub parent_id: Option<HeroId>,
}

impl Hero {
    pub fn file_ref_for(id: u32, file_name: &str) -> String {
        format!("images/{id:03}_{file_name}.png")
    }
}

impl From<HeroRecord> for Hero {
    fn from(value: HeroRecord) -> Self {
        Hero {
            id: HeroId::from(value.id),
            file_ref: Hero::file_ref_for(value.id, &value.file_name),
            difficulty: value.difficulty,
            is_open: value.is_open,
            ui_variant: value.ui_variant,
            parent_id: value.parent_id.map(HeroId::from),
        }
    }
}
