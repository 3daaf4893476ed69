use std::collections::HashMap;

use herodraft_model::Role;
use itertools::Itertools;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Roles cycled through once the table is larger than the hand-balanced pools.
const DEFAULT_CYCLE: [Role; 4] = [Role::Lord, Role::Loyalist, Role::Rebel, Role::Traitor];

/// Role pool for a table of `player_count` players.
///
/// Pools up to five players are fixed, every smaller pool is contained in the next one so a
/// table growing one player at a time never invalidates a role already handed out. Larger
/// tables cycle through `DEFAULT_CYCLE`.
pub fn role_pool(player_count: usize) -> Vec<Role> {
    use Role::*;
    match player_count {
        0 => vec![],
        1 => vec![Lord],
        2 => vec![Lord, Rebel],
        3 => vec![Lord, Loyalist, Rebel],
        4 => vec![Lord, Loyalist, Rebel, Rebel],
        5 => vec![Lord, Loyalist, Rebel, Rebel, Traitor],
        n => DEFAULT_CYCLE.iter().copied().cycle().take(n).collect(),
    }
}

/// How many of each role is left in `pool` after taking out `assigned`.
pub fn remaining_counts(pool: &[Role], assigned: &[Role]) -> HashMap<Role, i64> {
    let in_pool = pool.iter().counts();
    let taken = assigned.iter().counts();
    Role::ALL
        .iter()
        .map(|role| {
            let left = *in_pool.get(role).unwrap_or(&0) as i64
                - *taken.get(role).unwrap_or(&0) as i64;
            (*role, left)
        })
        .collect()
}

/// Picks uniformly among the roles still available in `pool`. `None` means the pool is
/// exhausted.
pub fn pick_remaining(pool: &[Role], assigned: &[Role], rng: &mut impl Rng) -> Option<Role> {
    let remaining = remaining_counts(pool, assigned);
    let candidates = Role::ALL
        .iter()
        .copied()
        .filter(|role| remaining.get(role).is_some_and(|left| *left > 0))
        .collect_vec();
    let pick = candidates.choose(rng).copied();
    debug!("Role candidates {candidates:?}, picked {pick:?}");
    pick
}

/// Whether `assigned` fits into `pool`, counting duplicates.
pub fn is_sub_multiset(assigned: &[Role], pool: &[Role]) -> bool {
    remaining_counts(pool, assigned)
        .values()
        .all(|left| *left >= 0)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use Role::*;

    fn sorted(mut roles: Vec<Role>) -> Vec<Role> {
        roles.sort();
        roles
    }

    #[test]
    fn test_fixed_pools() {
        assert_eq!(role_pool(1), vec![Lord]);
        assert_eq!(role_pool(2), vec![Lord, Rebel]);
        assert_eq!(role_pool(3), vec![Lord, Loyalist, Rebel]);
        assert_eq!(role_pool(4), vec![Lord, Loyalist, Rebel, Rebel]);
        assert_eq!(role_pool(5), vec![Lord, Loyalist, Rebel, Rebel, Traitor]);
    }

    #[test]
    fn test_large_pool_cycles() {
        assert_eq!(
            role_pool(7),
            vec![Lord, Loyalist, Rebel, Traitor, Lord, Loyalist, Rebel]
        );
        assert_eq!(role_pool(10).len(), 10);
    }

    #[test]
    fn test_fixed_pools_grow_monotonically() {
        for n in 1..5 {
            assert!(is_sub_multiset(&role_pool(n), &role_pool(n + 1)), "{n}");
        }
    }

    #[test]
    fn test_pick_remaining_only_offers_left_roles() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = role_pool(4);
        for _ in 0..100 {
            let pick = pick_remaining(&pool, &[Lord, Loyalist], &mut rng);
            assert_eq!(pick, Some(Rebel));
        }
    }

    #[test]
    fn test_pick_remaining_exhausted() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_remaining(&role_pool(2), &[Rebel, Lord], &mut rng), None);
        assert_eq!(pick_remaining(&[], &[], &mut rng), None);
    }

    #[test]
    fn test_draining_pool_yields_exactly_the_pool() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pool = role_pool(5);
            let mut assigned = Vec::new();
            while let Some(role) = pick_remaining(&pool, &assigned, &mut rng) {
                assigned.push(role);
            }
            assert_eq!(sorted(assigned), sorted(pool));
        }
    }

    #[test]
    fn test_pick_is_uniform_over_role_kinds() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = role_pool(5);
        let picks = (0..1000)
            .filter_map(|_| pick_remaining(&pool, &[], &mut rng))
            .counts();
        // Four kinds available, each should show up roughly a quarter of the time.
        for role in Role::ALL {
            let n = *picks.get(&role).unwrap_or(&0);
            assert!(n > 150 && n < 350, "{role}: {n}");
        }
    }

    #[test]
    fn test_remaining_counts_can_go_negative() {
        let left = remaining_counts(&role_pool(6), &[Rebel, Rebel]);
        assert_eq!(left[&Rebel], -1);
        assert!(!is_sub_multiset(&[Rebel, Rebel], &role_pool(6)));
    }
}
