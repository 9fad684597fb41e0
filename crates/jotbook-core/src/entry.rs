//! Journal entry model.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk timestamp layout, e.g. `2026-03-14 09:26:53`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp text as stored in the journal.
///
/// Kept as the raw string read from disk so that rewriting a journal never
/// alters a timestamp, even one that does not match [`TIMESTAMP_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Current local time, second precision.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timestamped journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub timestamp: Timestamp,
    pub message: String,
}

impl Entry {
    pub fn new(timestamp: impl Into<Timestamp>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }

    /// Entry stamped with the current local time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parsed(ts: &Timestamp) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(ts.as_str(), TIMESTAMP_FORMAT).ok()
    }

    #[test]
    fn timestamp_uses_fixed_layout() {
        let dt = NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.as_str(), "2026-03-04 07:05:09");
        assert_eq!(parsed(&ts), Some(dt));
    }

    #[test]
    fn now_parses_back() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_str().len(), 19);
        assert!(parsed(&ts).is_some());
    }

    #[test]
    fn nonstandard_timestamp_is_preserved() {
        let ts = Timestamp::from("yesterday-ish");
        assert_eq!(ts.to_string(), "yesterday-ish");
        assert!(parsed(&ts).is_none());
    }

    #[test]
    fn entry_serializes_timestamp_as_plain_string() {
        let entry = Entry::new("2026-01-01 00:00:00", "hello");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["timestamp"], "2026-01-01 00:00:00");
        assert_eq!(json["message"], "hello");
    }
}
