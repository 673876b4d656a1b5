//! Errors that propagate out of the core.
//!
//! Rejected clicks are not errors; see [`ClickOutcome`](crate::ClickOutcome).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use adclick_types::EmptyStringError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open data directory {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read record {key} at {}: {source}", path.display())]
    Read {
        key: String,
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to write record {key} at {}: {source}", path.display())]
    Write {
        key: String,
        path: PathBuf,
        source: io::Error,
    },
    #[error("record {key} is not valid: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    #[error("record {key} could not be encoded: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Persisting or loading ledger state failed. The in-memory state is
    /// left as it was before the failed operation.
    #[error("ledger store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("username must not be empty")]
    EmptyUsername(#[from] EmptyStringError),
    #[error("session store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
