//! The owning side of the ledger.
//!
//! [`RewardLedger`] wires the pure transitions in [`crate::ledger`] to a clock,
//! a store and a random source. Each operation computes the next state, saves
//! it, and only then replaces the in-memory copy, so a failed save leaves both
//! the store and memory at the previous state.

use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};

use adclick_config::LedgerConfig;
use adclick_types::LedgerRules;

use crate::calendar::CalendarGate;
use crate::catalog::{CatalogGenerator, RandomSource};
use crate::clock::Clock;
use crate::errors::LedgerError;
use crate::ledger::{
    ClickOutcome, LedgerState, Progress, apply_click, check_daily, check_monthly, regenerate,
};
use crate::store::{LEDGER_KEY, Store, load_record, save_record};

pub struct RewardLedger<S, C, R> {
    state: LedgerState,
    store: S,
    clock: C,
    rng: R,
    gate: CalendarGate,
    catalog: CatalogGenerator,
    rules: LedgerRules,
}

impl<S: Store, C: Clock, R: RandomSource> RewardLedger<S, C, R> {
    /// Load the persisted ledger, or start empty when none was saved.
    ///
    /// No calendar checks run here; call [`initialize`](Self::initialize) or
    /// [`click`](Self::click).
    pub fn open(store: S, clock: C, rng: R, config: &LedgerConfig) -> Result<Self, LedgerError> {
        let state: LedgerState = load_record(&store, LEDGER_KEY)?.unwrap_or_default();
        tracing::debug!(
            items = state.items().len(),
            balance = state.balance(),
            "Loaded ledger state"
        );
        Ok(Self {
            state,
            store,
            clock,
            rng,
            gate: CalendarGate::new(config.timezone),
            catalog: CatalogGenerator::new(config.quota),
            rules: config.rules,
        })
    }

    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// The ledger as it reads right now: a pending daily reset is applied to
    /// the copy but not persisted. The stored state only rolls over on the
    /// next click.
    #[must_use]
    pub fn today(&self) -> Cow<'_, LedgerState> {
        match check_daily(&self.state, self.clock.now(), &self.gate, &self.rules) {
            Some(reset) => Cow::Owned(reset),
            None => Cow::Borrowed(&self.state),
        }
    }

    /// Progress for today, see [`today`](Self::today).
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.today().progress(&self.rules)
    }

    /// Monthly check only. Returns true when a new catalog was generated.
    pub fn initialize(&mut self) -> Result<bool, LedgerError> {
        let now = self.clock.now();
        match check_monthly(&self.state, now, &self.gate, &self.catalog, &mut self.rng) {
            Some(next) => {
                self.commit(next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Monthly check, daily check, then the click transition, as one step.
    ///
    /// Rejections come back as [`ClickOutcome::Rejected`]; only store failures
    /// are errors. Nothing is written when neither a reset nor the click
    /// changed the state.
    pub fn click(&mut self, id: &str) -> Result<ClickOutcome, LedgerError> {
        let now = self.clock.now();
        let mut next = None;

        if let Some(reset) = check_monthly(&self.state, now, &self.gate, &self.catalog, &mut self.rng)
        {
            next = Some(reset);
        }
        let current = next.as_ref().unwrap_or(&self.state);
        if let Some(reset) = check_daily(current, now, &self.gate, &self.rules) {
            next = Some(reset);
        }

        let current = next.as_ref().unwrap_or(&self.state);
        let outcome = match apply_click(current, id, &self.rules) {
            Ok(applied) => {
                let outcome = ClickOutcome::Applied {
                    reward_granted: applied.reward_granted,
                    goal_reached: applied.state.goal_reached(),
                };
                next = Some(applied.state);
                outcome
            }
            Err(rejection) => {
                tracing::debug!(id, %rejection, "Click rejected");
                ClickOutcome::Rejected(rejection)
            }
        };

        if let Some(next) = next {
            self.commit(next)?;
        }
        Ok(outcome)
    }

    /// Operator reset: new catalog and zeroed counters regardless of calendar.
    pub fn force_regenerate(&mut self) -> Result<(), LedgerError> {
        let now = self.clock.now();
        tracing::info!("Forced catalog regeneration");
        let next = regenerate(now, &self.gate, &self.catalog, &mut self.rng);
        self.commit(next)
    }

    fn commit(&mut self, next: LedgerState) -> Result<(), LedgerError> {
        save_record(&self.store, LEDGER_KEY, &next)?;
        self.state = next;
        Ok(())
    }
}

/// A ledger that can be shared between threads.
///
/// The whole check-and-transition sequence runs under one lock, so a
/// regeneration can never interleave with a click reading stale items.
pub struct SharedLedger<S, C, R> {
    inner: Mutex<RewardLedger<S, C, R>>,
}

impl<S: Store, C: Clock, R: RandomSource> SharedLedger<S, C, R> {
    #[must_use]
    pub fn new(ledger: RewardLedger<S, C, R>) -> Self {
        Self {
            inner: Mutex::new(ledger),
        }
    }

    pub fn initialize(&self) -> Result<bool, LedgerError> {
        self.lock().initialize()
    }

    pub fn click(&self, id: &str) -> Result<ClickOutcome, LedgerError> {
        self.lock().click(id)
    }

    pub fn force_regenerate(&self) -> Result<(), LedgerError> {
        self.lock().force_regenerate()
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerState {
        self.lock().state().clone()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.lock().progress()
    }

    // State is only replaced after a successful save, so a poisoned lock
    // still guards a consistent ledger.
    fn lock(&self) -> std::sync::MutexGuard<'_, RewardLedger<S, C, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
