//! Configuration loading, parsing and resolution for AdClick.
//!
//! The TOML file at `~/.adclick/config.toml` is optional. Every section and
//! field falls back to the reference configuration:
//!
//! ```toml
//! [catalog]
//! tech_quota = 8
//! home_quota = 7
//!
//! [rewards]
//! daily_cap = 15
//! reward_amount = 2
//! cycle_length = 15
//!
//! [calendar]
//! timezone = "Europe/Lisbon"
//!
//! [storage]
//! data_dir = "~/.adclick/data"
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use adclick_types::{CatalogQuota, Category, LedgerRules, QuotaError, RulesError};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

/// Day boundaries are anchored to mainland Portugal unless configured otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Lisbon;

#[derive(Debug, Default, Deserialize)]
pub struct AdclickConfig {
    pub catalog: Option<CatalogConfig>,
    pub rewards: Option<RewardsConfig>,
    pub calendar: Option<CalendarConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    pub tech_quota: Option<usize>,
    pub home_quota: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RewardsConfig {
    /// Accepted clicks per day; reaching it earns one reward.
    pub daily_cap: Option<u32>,
    pub reward_amount: Option<u64>,
    /// Rewards per cycle before the balance rolls over.
    pub cycle_length: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarConfig {
    /// IANA zone name, e.g. `"Europe/Lisbon"`.
    pub timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted records. Supports `~` and `${VAR}`.
    pub data_dir: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid [rewards]: {0}")]
    Rules(#[from] RulesError),
    #[error("invalid [catalog]: {0}")]
    Quota(#[from] QuotaError),
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
}

/// Fully-resolved ledger settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    pub rules: LedgerRules,
    pub quota: CatalogQuota,
    pub timezone: Tz,
    pub data_dir: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rules: LedgerRules::default(),
            quota: CatalogQuota::default(),
            timezone: DEFAULT_TIMEZONE,
            data_dir: default_data_dir(),
        }
    }
}

impl AdclickConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Apply defaults and validate.
    pub fn resolve(&self) -> Result<LedgerConfig, ConfigError> {
        let defaults = LedgerConfig::default();

        let rules = match &self.rewards {
            Some(rewards) => LedgerRules::new(
                rewards.daily_cap.unwrap_or(defaults.rules.daily_cap()),
                rewards
                    .reward_amount
                    .unwrap_or(defaults.rules.reward_amount()),
                rewards.cycle_length.unwrap_or(defaults.rules.cycle_length()),
            )?,
            None => defaults.rules,
        };

        let quota = match &self.catalog {
            Some(catalog) => {
                let base = defaults.quota;
                CatalogQuota::new(
                    catalog
                        .tech_quota
                        .unwrap_or(base.for_category(Category::Tech)),
                    catalog
                        .home_quota
                        .unwrap_or(base.for_category(Category::Home)),
                )?
            }
            None => defaults.quota,
        };

        let timezone = match self.calendar.as_ref().and_then(|c| c.timezone.as_deref()) {
            Some(raw) => raw
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::UnknownTimezone(raw.to_string()))?,
            None => defaults.timezone,
        };

        let data_dir = self
            .storage
            .as_ref()
            .and_then(|s| s.data_dir.as_deref())
            .map_or(defaults.data_dir, |raw| expand_home(&expand_env_vars(raw)));

        Ok(LedgerConfig {
            rules,
            quota,
            timezone,
            data_dir,
        })
    }
}

/// Load the config file if present and resolve it, or fall back to defaults.
pub fn load_ledger_config() -> Result<LedgerConfig, ConfigError> {
    match AdclickConfig::load()? {
        Some(config) => config.resolve(),
        None => Ok(LedgerConfig::default()),
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".adclick").join("config.toml"))
}

/// `~/.adclick/data`, or `./.adclick/data` when there is no home directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map_or_else(|| PathBuf::from(".adclick"), |home| home.join(".adclick"))
        .join("data")
}

/// Replace `${VAR}` references with environment values (missing vars become empty).
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end_rel];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end_rel + 1..];
    }

    out.push_str(rest);
    out
}

fn expand_home(value: &str) -> PathBuf {
    let tail = if value == "~" {
        Some("")
    } else {
        value.strip_prefix("~/")
    };
    match (tail, dirs::home_dir()) {
        (Some(tail), Some(home)) => home.join(tail),
        _ => PathBuf::from(value),
    }
}
