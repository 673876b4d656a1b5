//! Reward ledger for AdClick.
//!
//! A monthly catalog of products, a capped number of clicks per day, a reward
//! credited when the cap is reached, and a balance that rolls over after a
//! fixed number of rewards. Transitions live in [`ledger`] as pure functions;
//! [`RewardLedger`] owns the clock, store and randomness around them.

pub mod calendar;
pub mod catalog;
pub mod clock;
pub mod errors;
pub mod ledger;
mod service;
mod session;
pub mod store;

pub use calendar::{CalendarGate, MonthKey};
pub use catalog::{CatalogGenerator, RandomSource, shuffle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{LedgerError, SessionError, StoreError};
pub use ledger::{AppliedClick, ClickOutcome, LedgerState, Progress};
pub use service::{RewardLedger, SharedLedger};
pub use session::SessionManager;
pub use store::{FileStore, LEDGER_KEY, MemoryStore, SESSION_KEY, Store};
