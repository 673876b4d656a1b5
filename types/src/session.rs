use serde::{Deserialize, Serialize};

use crate::NonEmptyString;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: NonEmptyString,
}

/// Persisted sign-in state. No credentials are stored or checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl SessionRecord {
    #[must_use]
    pub fn signed_in(username: NonEmptyString) -> Self {
        Self {
            user: Some(User { username }),
            is_authenticated: true,
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }
}
