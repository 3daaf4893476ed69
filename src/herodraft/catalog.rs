use std::collections::{BTreeSet, HashMap};

use herodraft_model::{Difficulty, Hero, HeroId, HeroRecord, UiVariant};
use log::info;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Hero id must be positive")]
    ZeroId,

    #[error("Hero {0} is listed more than once")]
    DuplicateId(HeroId),

    #[error("Hero {hero} refers to missing parent {parent}")]
    MissingParent { hero: HeroId, parent: HeroId },

    #[error("Hero {hero} refers to parent {parent} which is not a root hero")]
    ParentNotRoot { hero: HeroId, parent: HeroId },

    #[error("Hero {hero} is not in a consecutive chain after its parent {parent}")]
    BrokenChain { hero: HeroId, parent: HeroId },

    #[error("Paired hero {0} has no partner on the next id")]
    MissingPartner(HeroId),
}

/// Read-only hero table, validated once when built.
#[derive(Debug, Clone, Default)]
pub struct HeroCatalog {
    heroes: Vec<Hero>,
    index: HashMap<HeroId, usize>,
}

impl HeroCatalog {
    pub fn new(heroes: impl IntoIterator<Item = Hero>) -> Result<Self, CatalogError> {
        let heroes: Vec<Hero> = heroes.into_iter().collect();
        let mut index = HashMap::with_capacity(heroes.len());
        for (position, hero) in heroes.iter().enumerate() {
            if hero.id.get() == 0 {
                return Err(CatalogError::ZeroId);
            }
            if index.insert(hero.id, position).is_some() {
                return Err(CatalogError::DuplicateId(hero.id));
            }
        }
        let catalog = HeroCatalog { heroes, index };
        catalog.validate_links()?;
        info!(
            "Hero catalog loaded: {} heroes, {} open",
            catalog.heroes.len(),
            catalog.heroes.iter().filter(|h| h.is_open).count()
        );
        Ok(catalog)
    }

    pub fn from_records(records: Vec<HeroRecord>) -> Result<Self, CatalogError> {
        Self::new(records.into_iter().map(Hero::from))
    }

    fn validate_links(&self) -> Result<(), CatalogError> {
        for hero in &self.heroes {
            if let Some(parent) = hero.parent_id {
                let Some(root) = self.lookup(parent) else {
                    return Err(CatalogError::MissingParent {
                        hero: hero.id,
                        parent,
                    });
                };
                if root.parent_id.is_some() {
                    return Err(CatalogError::ParentNotRoot {
                        hero: hero.id,
                        parent,
                    });
                }
                let in_chain = parent < hero.id
                    && (parent.get() + 1..hero.id.get()).all(|between| {
                        self.lookup(HeroId::from(between))
                            .is_some_and(|h| h.parent_id == Some(parent))
                    });
                if !in_chain {
                    return Err(CatalogError::BrokenChain {
                        hero: hero.id,
                        parent,
                    });
                }
            }
            let partner = hero.id.next().and_then(|id| self.lookup(id));
            if hero.ui_variant == UiVariant::PairedAB && partner.is_none() {
                return Err(CatalogError::MissingPartner(hero.id));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter()
    }

    pub fn lookup(&self, id: HeroId) -> Option<&Hero> {
        self.index.get(&id).map(|position| &self.heroes[*position])
    }

    /// Open heroes with one of the requested difficulties, in catalog order. When no open hero
    /// matches, every open hero is returned instead.
    pub fn filter_open(&self, difficulties: &BTreeSet<Difficulty>) -> Vec<&Hero> {
        let open = self.heroes.iter().filter(|h| h.is_open);
        let matching: Vec<&Hero> = open
            .clone()
            .filter(|h| difficulties.contains(&h.difficulty))
            .collect();
        if matching.is_empty() {
            open.collect()
        } else {
            matching
        }
    }

    /// Heroes directly following `root` whose parent is `root`, up to the first one that is not.
    pub fn chain_from(&self, root: HeroId) -> Vec<&Hero> {
        let mut chain = Vec::new();
        let mut next = root.next();
        while let Some(hero) = next.and_then(|id| self.lookup(id)) {
            if hero.parent_id != Some(root) {
                break;
            }
            chain.push(hero);
            next = hero.id.next();
        }
        chain
    }

    /// Extra heroes shown next to `hero` once it is confirmed.
    pub fn companions(&self, hero: &Hero) -> Vec<&Hero> {
        match hero.ui_variant {
            UiVariant::Standard => vec![],
            UiVariant::PairedAB => hero
                .id
                .next()
                .and_then(|id| self.lookup(id))
                .into_iter()
                .collect(),
            UiVariant::WithSkillChain => self.chain_from(hero.id),
        }
    }
}
