//! Invariants that must hold for any click sequence within a day, checked
//! against randomized sequences from a seeded RNG.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use adclick_config::LedgerConfig;
use adclick_core::{ClickOutcome, LedgerState};
use adclick_types::{CatalogQuota, ClickRejection, LedgerRules};

use crate::common::{Harness, lisbon};

/// A click sequence mixing catalog ids, repeats and unknown ids.
fn random_sequence(state: &LedgerState, rng: &mut StdRng, len: usize) -> Vec<String> {
    let ids: Vec<String> = state
        .items()
        .iter()
        .map(|item| item.id().to_string())
        .collect();
    (0..len)
        .map(|_| {
            if rng.gen_range(0..10) == 0 {
                format!("tech-{}", rng.gen_range(100..200))
            } else {
                ids[rng.gen_range(0..ids.len())].clone()
            }
        })
        .collect()
}

#[test]
fn catalog_size_matches_quota_and_ids_are_unique() {
    for (tech, home) in [(8, 7), (3, 2), (8, 0), (1, 7)] {
        let config = LedgerConfig {
            quota: CatalogQuota::new(tech, home).unwrap(),
            ..LedgerConfig::default()
        };
        let mut h = Harness::with_config(lisbon(2026, 3, 10, 9), &config);
        h.ledger.initialize().unwrap();

        let ids = h.ids();
        assert_eq!(ids.len(), tech + home);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
        assert_eq!(
            ids.iter().filter(|id| id.starts_with("tech-")).count(),
            tech
        );
    }
}

#[test]
fn daily_counter_never_decreases_or_passes_cap_within_a_day() {
    let rules = LedgerRules::new(10, 2, 15).unwrap();
    let config = LedgerConfig {
        rules,
        ..LedgerConfig::default()
    };

    for seed in 0..20 {
        let mut h = Harness::with_config(lisbon(2026, 3, 10, 9), &config);
        h.ledger.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = random_sequence(h.state(), &mut rng, 40);

        let mut previous = 0;
        for id in &sequence {
            h.click(id);
            let count = h.state().daily_click_count();
            assert!(count >= previous);
            assert!(count <= rules.daily_cap());
            previous = count;
        }
    }
}

#[test]
fn balance_moves_only_on_the_click_reaching_the_cap() {
    for seed in 0..20 {
        let mut h = Harness::new(lisbon(2026, 3, 10, 9));
        h.ledger.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = random_sequence(h.state(), &mut rng, 60);

        for id in &sequence {
            let before = h.state().clone();
            let outcome = h.click(id);
            let after = h.state();

            let crossed = before.daily_click_count() == 14 && after.daily_click_count() == 15;
            if crossed {
                assert_eq!(after.balance(), before.balance() + 2);
                assert_eq!(after.cycle_reward_count(), before.cycle_reward_count() + 1);
                assert!(matches!(
                    outcome,
                    ClickOutcome::Applied {
                        reward_granted: true,
                        ..
                    }
                ));
            } else {
                assert_eq!(after.balance(), before.balance());
                assert_eq!(after.cycle_reward_count(), before.cycle_reward_count());
            }
        }
    }
}

#[test]
fn rejected_clicks_are_exact_no_ops() {
    let mut h = Harness::new(lisbon(2026, 3, 10, 9));
    h.ledger.initialize().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let sequence = random_sequence(h.state(), &mut rng, 50);

    for id in &sequence {
        let before = h.state().clone();
        if let ClickOutcome::Rejected(_) = h.click(id) {
            assert_eq!(h.state(), &before);
        }
    }
}

#[test]
fn goal_is_reached_exactly_when_everything_is_clicked() {
    let mut h = Harness::new(lisbon(2026, 3, 10, 9));
    h.ledger.initialize().unwrap();

    let ids = h.ids();
    for (n, id) in ids.iter().enumerate() {
        h.click(id);
        assert_eq!(h.state().goal_reached(), n + 1 == ids.len());
    }

    h.next_day();
    h.click("tech-999");
    assert!(!h.state().goal_reached());
}

#[test]
fn cap_below_catalog_size_stops_clicks_short_of_the_goal() {
    let config = LedgerConfig {
        rules: LedgerRules::new(5, 3, 15).unwrap(),
        ..LedgerConfig::default()
    };
    let mut h = Harness::with_config(lisbon(2026, 3, 10, 9), &config);
    h.ledger.initialize().unwrap();
    let ids = h.ids();

    for id in &ids[..5] {
        assert!(h.click(id).is_applied());
    }
    assert_eq!(
        h.click(&ids[5]),
        ClickOutcome::Rejected(ClickRejection::CapExceeded { cap: 5 })
    );
    assert_eq!(h.state().balance(), 3);
    assert!(!h.state().goal_reached());
}
