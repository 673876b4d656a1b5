//! Calendar gate: timezone-anchored day and month boundaries.
//!
//! All functions are pure. The ledger only stores the results (a day key and a
//! generation timestamp) and asks the gate whether a boundary was crossed.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

use adclick_types::DayKey;

/// A calendar month in some timezone. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

/// Calendar date of `ts` as seen in `zone`, regardless of the host timezone.
pub fn day_key<Z: TimeZone>(ts: DateTime<Utc>, zone: &Z) -> DayKey {
    let local = ts.with_timezone(zone);
    DayKey::from_ymd(local.year(), local.month(), local.day())
}

pub fn month_key<Z: TimeZone>(ts: DateTime<Utc>, zone: &Z) -> MonthKey {
    let local = ts.with_timezone(zone);
    MonthKey {
        year: local.year(),
        month: local.month(),
    }
}

/// Calendar-month equality, not a rolling 30-day window.
pub fn is_same_month<Z: TimeZone>(a: DateTime<Utc>, b: DateTime<Utc>, zone: &Z) -> bool {
    month_key(a, zone) == month_key(b, zone)
}

/// Boundary decisions for one fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGate {
    zone: Tz,
}

impl CalendarGate {
    #[must_use]
    pub const fn new(zone: Tz) -> Self {
        Self { zone }
    }

    #[must_use]
    pub fn day_key(&self, ts: DateTime<Utc>) -> DayKey {
        day_key(ts, &self.zone)
    }

    #[must_use]
    pub fn month_key(&self, ts: DateTime<Utc>) -> MonthKey {
        month_key(ts, &self.zone)
    }

    /// True when the catalog was never generated or was generated in an earlier month.
    #[must_use]
    pub fn month_changed(&self, last_generated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_generated {
            Some(last) => !is_same_month(last, now, &self.zone),
            None => true,
        }
    }

    /// True when no daily reset happened yet or the last one was on another day.
    #[must_use]
    pub fn day_changed(&self, last_reset: &DayKey, now: DateTime<Utc>) -> bool {
        last_reset.is_unset() || *last_reset != self.day_key(now)
    }
}

impl Default for CalendarGate {
    fn default() -> Self {
        Self::new(adclick_config::DEFAULT_TIMEZONE)
    }
}
