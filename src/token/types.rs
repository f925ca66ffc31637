//! Device token value type.

use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// An opaque device identity credential plus read bookkeeping.
///
/// `value` is never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceToken {
    value: String,
    last_read_at: DateTime<Utc>,
    source_mod_time: SystemTime,
}

impl DeviceToken {
    /// Build a token from raw file content.
    ///
    /// Surrounding whitespace is trimmed. Returns `None` if nothing is left.
    pub fn from_contents(contents: &str, source_mod_time: SystemTime) -> Option<Self> {
        let value = contents.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            value: value.to_string(),
            last_read_at: Utc::now(),
            source_mod_time,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn last_read_at(&self) -> DateTime<Utc> {
        self.last_read_at
    }

    /// Modification time of the backing file when this value was read.
    pub fn source_mod_time(&self) -> SystemTime {
        self.source_mod_time
    }
}

// Tokens end up in logs through `{:?}`; only a prefix is shown.
impl fmt::Debug for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.value.chars().take(4).collect();
        f.debug_struct("DeviceToken")
            .field("value", &format_args!("{}…", prefix))
            .field("last_read_at", &self.last_read_at)
            .field("source_mod_time", &self.source_mod_time)
            .finish()
    }
}
