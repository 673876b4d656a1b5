//! Reward ledger state and its transitions.
//!
//! Every transition is a pure function from the current [`LedgerState`] to the
//! next one. Nothing here touches the store or the clock; the owning
//! [`RewardLedger`](crate::RewardLedger) supplies `now`, applies the steps in
//! order (monthly, daily, click) and persists the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use adclick_types::{ClickRejection, DayKey, Item, ItemId, LedgerRules};

use crate::calendar::CalendarGate;
use crate::catalog::{CatalogGenerator, RandomSource};

/// The persisted aggregate: catalog, counters and balance.
///
/// Serialized with the camelCase field names of the `adclick-data-storage`
/// record. Missing fields default and the older `ads`/`lastGenerated` names
/// are accepted, so records written before the daily counters existed still
/// load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerState {
    #[serde(alias = "ads")]
    items: Vec<Item>,
    balance: u64,
    /// Milliseconds since the Unix epoch; 0 means never generated.
    #[serde(alias = "lastGenerated")]
    last_generated_at: i64,
    last_daily_reset_key: DayKey,
    daily_click_count: u32,
    cycle_reward_count: u32,
    goal_reached: bool,
}

impl LedgerState {
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id().as_str() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    #[must_use]
    pub fn last_generated_at(&self) -> Option<DateTime<Utc>> {
        if self.last_generated_at == 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.last_generated_at)
    }

    #[must_use]
    pub fn last_daily_reset_key(&self) -> &DayKey {
        &self.last_daily_reset_key
    }

    #[must_use]
    pub fn daily_click_count(&self) -> u32 {
        self.daily_click_count
    }

    #[must_use]
    pub fn cycle_reward_count(&self) -> u32 {
        self.cycle_reward_count
    }

    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    #[must_use]
    pub fn clicked_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_clicked()).count()
    }

    #[must_use]
    pub fn progress(&self, rules: &LedgerRules) -> Progress {
        Progress {
            clicked: self.clicked_count(),
            total: self.items.len(),
            clicks_today: self.daily_click_count,
            daily_cap: rules.daily_cap(),
            balance: self.balance,
            cycle_rewards: self.cycle_reward_count,
            cycle_length: rules.cycle_length(),
            goal_reached: self.goal_reached,
        }
    }
}

/// Read-only summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub clicked: usize,
    pub total: usize,
    pub clicks_today: u32,
    pub daily_cap: u32,
    pub balance: u64,
    pub cycle_rewards: u32,
    pub cycle_length: u32,
    pub goal_reached: bool,
}

impl Progress {
    /// Share of the catalog clicked, 0..=100.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.clicked * 100 / self.total) as u8
    }

    #[must_use]
    pub fn remaining_today(&self) -> u32 {
        self.daily_cap.saturating_sub(self.clicks_today)
    }
}

/// Result of a click request after the calendar checks ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Applied {
        /// This click completed the daily cap and credited a reward.
        reward_granted: bool,
        goal_reached: bool,
    },
    Rejected(ClickRejection),
}

impl ClickOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, ClickOutcome::Applied { .. })
    }
}

/// State after an accepted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedClick {
    pub state: LedgerState,
    pub reward_granted: bool,
}

/// Brand-new catalog with every counter zeroed and today's day key.
pub fn regenerate<R: RandomSource + ?Sized>(
    now: DateTime<Utc>,
    gate: &CalendarGate,
    catalog: &CatalogGenerator,
    rng: &mut R,
) -> LedgerState {
    LedgerState {
        items: catalog.generate(rng),
        balance: 0,
        last_generated_at: now.timestamp_millis(),
        last_daily_reset_key: gate.day_key(now),
        daily_click_count: 0,
        cycle_reward_count: 0,
        goal_reached: false,
    }
}

/// Monthly rollover: regenerate when never generated, empty, the month changed,
/// or the stored catalog no longer has the configured size.
///
/// Returns `None` when no rollover is due.
pub fn check_monthly<R: RandomSource + ?Sized>(
    state: &LedgerState,
    now: DateTime<Utc>,
    gate: &CalendarGate,
    catalog: &CatalogGenerator,
    rng: &mut R,
) -> Option<LedgerState> {
    let resized = !state.items.is_empty() && state.items.len() != catalog.size();
    if !state.items.is_empty()
        && !resized
        && !gate.month_changed(state.last_generated_at(), now)
    {
        return None;
    }
    info!(
        previous = ?state.last_generated_at(),
        stored = state.items.len(),
        size = catalog.size(),
        "Generating monthly catalog"
    );
    Some(regenerate(now, gate, catalog, rng))
}

/// Daily rollover: re-arm every item and the daily counter when the day changed.
///
/// A completed cycle (`cycle_length` rewards) also zeroes balance and cycle
/// counter here, together. Catalog membership and order are untouched.
pub fn check_daily(
    state: &LedgerState,
    now: DateTime<Utc>,
    gate: &CalendarGate,
    rules: &LedgerRules,
) -> Option<LedgerState> {
    if !gate.day_changed(&state.last_daily_reset_key, now) {
        return None;
    }

    let mut next = state.clone();
    next.items.iter_mut().for_each(Item::rearm);
    next.daily_click_count = 0;
    next.goal_reached = false;
    next.last_daily_reset_key = gate.day_key(now);

    if next.cycle_reward_count >= rules.cycle_length() {
        info!(
            balance = next.balance,
            rewards = next.cycle_reward_count,
            "Reward cycle complete, rolling balance over"
        );
        next.balance = 0;
        next.cycle_reward_count = 0;
    }

    info!(day = %next.last_daily_reset_key, "Daily reset");
    Some(next)
}

/// Register a click on `id`.
///
/// Rejected clicks leave the state untouched. The click that brings the daily
/// counter to the cap credits exactly one reward; no other click changes the
/// balance.
pub fn apply_click(
    state: &LedgerState,
    id: &str,
    rules: &LedgerRules,
) -> Result<AppliedClick, ClickRejection> {
    let cap = rules.daily_cap();
    if state.daily_click_count >= cap {
        return Err(ClickRejection::CapExceeded { cap });
    }

    let Some(index) = state.items.iter().position(|item| item.id().as_str() == id) else {
        return Err(ClickRejection::InvalidClickTarget(ItemId::from_raw(id)));
    };
    if state.items[index].is_clicked() {
        return Err(ClickRejection::AlreadyClicked(state.items[index].id().clone()));
    }

    let mut next = state.clone();
    next.items[index].mark_clicked();
    next.daily_click_count += 1;

    let reward_granted = next.daily_click_count == cap;
    if reward_granted {
        next.balance = next.balance.saturating_add(rules.reward_amount());
        next.cycle_reward_count += 1;
        info!(
            balance = next.balance,
            cycle = next.cycle_reward_count,
            "Daily cap reached, reward credited"
        );
    }

    next.goal_reached = next.items.iter().all(Item::is_clicked);
    debug!(id, count = next.daily_click_count, "Click registered");

    Ok(AppliedClick {
        state: next,
        reward_granted,
    })
}
