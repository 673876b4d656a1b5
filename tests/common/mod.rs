//! Shared test utilities and fixtures
//!
//! Ledgers wired to an in-memory store, a manual clock and a seeded RNG so
//! every run is deterministic.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Europe::Lisbon;
use rand::SeedableRng;
use rand::rngs::StdRng;

use adclick_config::LedgerConfig;
use adclick_core::{ClickOutcome, LedgerState, ManualClock, MemoryStore, RewardLedger, Store};

pub type TestLedger<S = Arc<MemoryStore>> = RewardLedger<S, Arc<ManualClock>, StdRng>;

pub const SEED: u64 = 0x0ad_c11c;

/// `h:00` local time in Lisbon on the given date, as UTC.
pub fn lisbon(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Lisbon
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

pub struct Harness<S = Arc<MemoryStore>> {
    pub ledger: TestLedger<S>,
    pub store: S,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_config(start, &LedgerConfig::default())
    }

    pub fn with_config(start: DateTime<Utc>, config: &LedgerConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), start, config)
    }
}

impl<S: Store + Clone> Harness<S> {
    pub fn with_store(store: S, start: DateTime<Utc>, config: &LedgerConfig) -> Self {
        let clock = Arc::new(ManualClock::new(start));
        let ledger = RewardLedger::open(
            store.clone(),
            Arc::clone(&clock),
            StdRng::seed_from_u64(SEED),
            config,
        )
        .expect("open ledger");
        Self {
            ledger,
            store,
            clock,
        }
    }

    pub fn state(&self) -> &LedgerState {
        self.ledger.state()
    }

    pub fn ids(&self) -> Vec<String> {
        item_ids(self.ledger.state())
    }

    pub fn click(&mut self, id: &str) -> ClickOutcome {
        self.ledger.click(id).expect("store available")
    }

    /// Click every item once, in catalog order.
    pub fn click_all(&mut self) {
        for id in self.ids() {
            let outcome = self.click(&id);
            assert!(outcome.is_applied(), "{id}: {outcome:?}");
        }
    }

    pub fn set_time(&self, to: DateTime<Utc>) {
        self.clock.set(to);
    }

    pub fn next_day(&self) {
        self.clock.advance(TimeDelta::days(1));
    }
}

pub fn item_ids(state: &LedgerState) -> Vec<String> {
    state
        .items()
        .iter()
        .map(|item| item.id().to_string())
        .collect()
}
