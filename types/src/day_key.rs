use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar date (`YYYY-MM-DD`) in the ledger's timezone.
///
/// The default value is the empty key, meaning no daily reset has happened yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self(format!("{year:04}-{month:02}-{day:02}"))
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            f.write_str("(never)")
        } else {
            f.write_str(&self.0)
        }
    }
}
