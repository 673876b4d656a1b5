//! Persisted sign-in state.
//!
//! Sign-in only records a display name. There are no credentials and nothing
//! in the ledger depends on being signed in.

use adclick_types::{NonEmptyString, SessionRecord};

use crate::errors::SessionError;
use crate::store::{SESSION_KEY, Store, load_record, save_record};

pub struct SessionManager<S> {
    store: S,
    record: SessionRecord,
}

impl<S: Store> SessionManager<S> {
    pub fn open(store: S) -> Result<Self, SessionError> {
        let record = load_record(&store, SESSION_KEY)?.unwrap_or_default();
        Ok(Self { store, record })
    }

    #[must_use]
    pub fn current(&self) -> &SessionRecord {
        &self.record
    }

    /// Surrounding whitespace is dropped; an empty name is rejected before
    /// anything is written.
    pub fn login(&mut self, username: &str) -> Result<(), SessionError> {
        let username = NonEmptyString::new(username.trim())?;
        let next = SessionRecord::signed_in(username);
        save_record(&self.store, SESSION_KEY, &next)?;
        tracing::info!(username = next.username(), "Signed in");
        self.record = next;
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        let next = SessionRecord::default();
        save_record(&self.store, SESSION_KEY, &next)?;
        tracing::info!("Signed out");
        self.record = next;
        Ok(())
    }
}
