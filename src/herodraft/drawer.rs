use std::collections::{BTreeSet, HashSet};

use herodraft_model::{Difficulty, Hero, HeroId};
use itertools::Itertools;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::HeroCatalog;
use super::error::DraftError;

/// Picks candidate heroes for one player. Does not record what it drew, the caller owns the
/// round's shown set.
pub struct CandidateDrawer<'a> {
    catalog: &'a HeroCatalog,
}

impl<'a> CandidateDrawer<'a> {
    pub fn new(catalog: &'a HeroCatalog) -> Self {
        Self { catalog }
    }

    pub fn draw(
        &self,
        difficulties: &BTreeSet<Difficulty>,
        exclude_shown: &HashSet<HeroId>,
        total_count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<&'a Hero>, DraftError> {
        let remaining = self
            .catalog
            .filter_open(difficulties)
            .into_iter()
            .filter(|hero| !exclude_shown.contains(&hero.id))
            .collect_vec();
        if remaining.is_empty() {
            return Err(DraftError::NoCandidatesAvailable);
        }
        let drawn = remaining
            .choose_multiple(rng, total_count.min(remaining.len()))
            .copied()
            .collect_vec();
        debug!(
            "Drew {} of {} remaining heroes: {}",
            drawn.len(),
            remaining.len(),
            drawn.iter().map(|h| h.id).join(", ")
        );
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use herodraft_model::HeroRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::herodraft::catalog::tests::record;

    fn catalog() -> HeroCatalog {
        let mut records: Vec<HeroRecord> = (1..=6).map(|id| record(id, 1, true)).collect();
        records.extend((7..=9).map(|id| record(id, 2, true)));
        records.push(record(10, 1, false));
        HeroCatalog::from_records(records).unwrap()
    }

    fn ids(heroes: &[&Hero]) -> HashSet<HeroId> {
        heroes.iter().map(|h| h.id).collect()
    }

    #[test]
    fn test_draws_without_repetition() {
        let catalog = catalog();
        let drawer = CandidateDrawer::new(&catalog);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let drawn = drawer
                .draw(&BTreeSet::from([1]), &HashSet::new(), 4, &mut rng)
                .unwrap();
            assert_eq!(drawn.len(), 4);
            assert_eq!(ids(&drawn).len(), 4);
            assert!(drawn.iter().all(|h| h.difficulty == 1 && h.is_open));
        }
    }

    #[test]
    fn test_excludes_shown_heroes() {
        let catalog = catalog();
        let drawer = CandidateDrawer::new(&catalog);
        let mut rng = StdRng::seed_from_u64(2);
        let shown: HashSet<HeroId> = (1u32..=4).map(HeroId::from).collect();
        let drawn = drawer
            .draw(&BTreeSet::from([1]), &shown, 5, &mut rng)
            .unwrap();
        assert_eq!(ids(&drawn), HashSet::from([HeroId::from(5), HeroId::from(6)]));
    }

    #[test]
    fn test_all_shown_is_an_error() {
        let catalog = catalog();
        let drawer = CandidateDrawer::new(&catalog);
        let mut rng = StdRng::seed_from_u64(3);
        let shown: HashSet<HeroId> = (7u32..=9).map(HeroId::from).collect();
        assert_eq!(
            drawer.draw(&BTreeSet::from([2]), &shown, 3, &mut rng),
            Err(DraftError::NoCandidatesAvailable)
        );
    }

    #[test]
    fn test_same_seed_same_draw() {
        let catalog = catalog();
        let drawer = CandidateDrawer::new(&catalog);
        let draw = |seed| {
            drawer
                .draw(
                    &BTreeSet::from([1, 2]),
                    &HashSet::new(),
                    3,
                    &mut StdRng::seed_from_u64(seed),
                )
                .unwrap()
                .iter()
                .map(|h| h.id)
                .collect_vec()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn test_every_hero_gets_drawn_eventually() {
        let catalog = catalog();
        let drawer = CandidateDrawer::new(&catalog);
        let mut rng = StdRng::seed_from_u64(4);
        let seen: HashSet<HeroId> = (0..200)
            .flat_map(|_| {
                drawer
                    .draw(&BTreeSet::from([1]), &HashSet::new(), 1, &mut rng)
                    .unwrap()
            })
            .map(|h| h.id)
            .collect();
        assert_eq!(seen, (1u32..=6).map(HeroId::from).collect());
    }
}
