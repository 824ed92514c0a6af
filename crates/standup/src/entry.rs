//! Core entry types for standup.
//!
//! This module defines the data structures for standup entries as they
//! travel between the store, the HTTP API, and the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted standup entry.
///
/// The wire representation is camelCase JSON; `blockers` serializes as
/// `null` when absent, never as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandupEntry {
    /// Unique identifier, assigned by the store on creation.
    pub id: String,

    /// The submitter's display name.
    pub name: String,

    /// The calendar date this update applies to (`YYYY-MM-DD`).
    ///
    /// Independent of `created_at`; a user may backfill, or the two may
    /// differ by timezone.
    pub date: String,

    /// What was accomplished the prior day.
    pub yesterday: String,

    /// What is planned for the current day.
    pub today: String,

    /// Anything blocking progress, if reported.
    pub blockers: Option<String>,

    /// When this entry was created.
    pub created_at: DateTime<Utc>,

    /// When this entry was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The client-submitted fields of an entry.
///
/// This is the request body for create and update operations. Validation
/// of required fields happens at the API boundary, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryPayload {
    /// The submitter's display name.
    pub name: String,

    /// The calendar date this update applies to (`YYYY-MM-DD`).
    pub date: String,

    /// What was accomplished the prior day.
    pub yesterday: String,

    /// What is planned for the current day.
    pub today: String,

    /// Anything blocking progress; absent or empty becomes `None`.
    pub blockers: Option<String>,
}

impl EntryPayload {
    /// Create a payload from the five user fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        yesterday: impl Into<String>,
        today: impl Into<String>,
        blockers: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            yesterday: yesterday.into(),
            today: today.into(),
            blockers,
        }
    }
}

impl StandupEntry {
    /// Check if this entry reports an active blocker.
    #[must_use]
    pub fn has_blockers(&self) -> bool {
        self.blockers
            .as_deref()
            .is_some_and(|b| !b.trim().is_empty())
    }

    /// The payload view of this entry's user fields.
    #[must_use]
    pub fn payload(&self) -> EntryPayload {
        EntryPayload {
            name: self.name.clone(),
            date: self.date.clone(),
            yesterday: self.yesterday.clone(),
            today: self.today.clone(),
            blockers: self.blockers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> StandupEntry {
        StandupEntry {
            id: "a1b2c3".to_string(),
            name: "Ann".to_string(),
            date: "2024-03-01".to_string(),
            yesterday: "Fixed bug".to_string(),
            today: "Write tests".to_string(),
            blockers: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = sample_entry();
        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_entry_blockers_serialize_as_null() {
        let entry = sample_entry();
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["blockers"], serde_json::Value::Null);
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let back: StandupEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(entry, back);
    }

    #[test]
    fn test_payload_blockers_default_to_none() {
        let json = r#"{
            "name": "Ann",
            "date": "2024-03-01",
            "yesterday": "Fixed bug",
            "today": "Write tests"
        }"#;
        let payload: EntryPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.name, "Ann");
        assert!(payload.blockers.is_none());
    }

    #[test]
    fn test_has_blockers() {
        let mut entry = sample_entry();
        assert!(!entry.has_blockers());

        entry.blockers = Some("  ".to_string());
        assert!(!entry.has_blockers());

        entry.blockers = Some("waiting on review".to_string());
        assert!(entry.has_blockers());
    }

    #[test]
    fn test_payload_view() {
        let entry = sample_entry();
        let payload = entry.payload();

        assert_eq!(payload.name, entry.name);
        assert_eq!(payload.date, entry.date);
        assert_eq!(payload.yesterday, entry.yesterday);
        assert_eq!(payload.today, entry.today);
        assert_eq!(payload.blockers, entry.blockers);
    }

    #[test]
    fn test_payload_new() {
        let payload = EntryPayload::new("Ann", "2024-03-01", "Fixed bug", "Write tests", None);
        assert_eq!(payload.name, "Ann");
        assert_eq!(payload.date, "2024-03-01");
        assert!(payload.blockers.is_none());
    }
}
