//! Resolved reward rules and catalog quotas.
//!
//! Raw TOML structs with `Option` fields stay in `adclick-config`; the loader
//! resolves them into these types at the parse boundary. Holding a value is
//! proof it passed validation.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::{Category, ItemId};

pub const DEFAULT_DAILY_CAP: u32 = 15;
pub const DEFAULT_REWARD_AMOUNT: u64 = 2;
pub const DEFAULT_CYCLE_LENGTH: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("daily_cap must be at least 1")]
    ZeroDailyCap,
    #[error("cycle_length must be at least 1")]
    ZeroCycleLength,
}

/// Reward accrual rules.
///
/// Every `daily_cap` accepted clicks in a day earn `reward_amount`; after
/// `cycle_length` such rewards the balance rolls over at the next daily reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerRules {
    daily_cap: NonZeroU32,
    reward_amount: u64,
    cycle_length: NonZeroU32,
}

impl LedgerRules {
    pub fn new(daily_cap: u32, reward_amount: u64, cycle_length: u32) -> Result<Self, RulesError> {
        let daily_cap = NonZeroU32::new(daily_cap).ok_or(RulesError::ZeroDailyCap)?;
        let cycle_length = NonZeroU32::new(cycle_length).ok_or(RulesError::ZeroCycleLength)?;
        Ok(Self {
            daily_cap,
            reward_amount,
            cycle_length,
        })
    }

    #[must_use]
    pub const fn daily_cap(&self) -> u32 {
        self.daily_cap.get()
    }

    #[must_use]
    pub const fn reward_amount(&self) -> u64 {
        self.reward_amount
    }

    #[must_use]
    pub const fn cycle_length(&self) -> u32 {
        self.cycle_length.get()
    }
}

impl Default for LedgerRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_DAILY_CAP,
            DEFAULT_REWARD_AMOUNT,
            DEFAULT_CYCLE_LENGTH,
        )
        .expect("default ledger rules are non-zero")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaError {
    #[error("catalog must contain at least one item")]
    Empty,
    #[error("{category} quota {requested} exceeds the {available} products available")]
    ExceedsProducts {
        category: Category,
        requested: usize,
        available: usize,
    },
}

/// How many items of each category one catalog generation contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogQuota {
    tech: usize,
    home: usize,
}

impl CatalogQuota {
    pub fn new(tech: usize, home: usize) -> Result<Self, QuotaError> {
        if tech + home == 0 {
            return Err(QuotaError::Empty);
        }
        for (category, requested) in [(Category::Tech, tech), (Category::Home, home)] {
            let available = category.products().len();
            if requested > available {
                return Err(QuotaError::ExceedsProducts {
                    category,
                    requested,
                    available,
                });
            }
        }
        Ok(Self { tech, home })
    }

    #[must_use]
    pub const fn for_category(&self, category: Category) -> usize {
        match category {
            Category::Tech => self.tech,
            Category::Home => self.home,
        }
    }

    /// Fixed catalog size: the sum of all quotas.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.tech + self.home
    }
}

impl Default for CatalogQuota {
    fn default() -> Self {
        Self { tech: 8, home: 7 }
    }
}

/// Why a click did not register.
///
/// These are benign outcomes of user action, surfaced as a tagged result
/// rather than propagated as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClickRejection {
    #[error("daily cap of {cap} clicks already reached")]
    CapExceeded { cap: u32 },
    #[error("no item with id {0} in the current catalog")]
    InvalidClickTarget(ItemId),
    #[error("item {0} is already clicked")]
    AlreadyClicked(ItemId),
}
