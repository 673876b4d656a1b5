//! Key-value persistence for ledger and session records.
//!
//! Records are JSON values keyed by name. [`FileStore`] writes one file per
//! key with crash-safe replacement; [`MemoryStore`] keeps them in-process.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use adclick_utils::{atomic_write, ensure_secure_dir, recover_bak_file};

use crate::errors::StoreError;

/// Record holding the [`LedgerState`](crate::LedgerState).
pub const LEDGER_KEY: &str = "adclick-data-storage";
/// Record holding the [`SessionRecord`](adclick_types::SessionRecord).
pub const SESSION_KEY: &str = "adclick-auth-storage";

pub trait Store {
    /// `Ok(None)` when the key was never saved.
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Must be durable when it returns `Ok`.
    fn save(&self, key: &str, record: &Value) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, record: &Value) -> Result<(), StoreError> {
        (**self).save(key, record)
    }
}

pub fn load_record<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    let Some(value) = store.load(key)? else {
        return Ok(None);
    };
    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
}

pub fn save_record<T, S>(store: &S, key: &str, record: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: Store + ?Sized,
{
    let value = serde_json::to_value(record).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &value)
}

/// One pretty-printed `<key>.json` per record under a private directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create the directory if needed (owner-only on Unix).
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        ensure_secure_dir(&dir).map_err(|source| StoreError::Open {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.record_path(key);
        recover_bak_file(&path);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            key: key.to_string(),
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
    }

    fn save(&self, key: &str, record: &Value) -> Result<(), StoreError> {
        let path = self.record_path(key);
        let bytes = serde_json::to_vec_pretty(record).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        atomic_write(&path, &bytes).map_err(|source| {
            tracing::warn!(path = %path.display(), "Failed to save record: {source}");
            StoreError::Write {
                key: key.to_string(),
                path: path.clone(),
                source,
            }
        })
    }
}

/// In-process store. Can be switched offline to simulate an unavailable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Value>>,
    offline: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Raw record as last saved, bypassing the offline switch.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.check_online()?;
        Ok(self.get(key))
    }

    fn save(&self, key: &str, record: &Value) -> Result<(), StoreError> {
        self.check_online()?;
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), record.clone());
        Ok(())
    }
}
