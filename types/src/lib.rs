//! Core domain types for AdClick.
//!
//! Pure data with no IO, no clock and no randomness. The reward state machine
//! in `adclick-core` builds on these; configuration resolves into them.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod catalog;
mod day_key;
mod rules;
mod session;

pub use catalog::{Category, HOME_PRODUCTS, Item, ItemId, Product, TECH_PRODUCTS};
pub use day_key::DayKey;
pub use rules::{CatalogQuota, ClickRejection, LedgerRules, QuotaError, RulesError};
pub use session::{SessionRecord, User};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// NonEmpty String Types
// ============================================================================

/// A string guaranteed to be non-empty (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("value must not be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

// ============================================================================
// Tests
// ============================================================================
