//! Submission form logic for standup entries.
//!
//! [`EntryForm`] holds uncommitted field values and turns them into a
//! validated [`EntryPayload`]. The validation here is intentionally
//! redundant with the API's; the server remains the authority.

use chrono::NaiveDate;

use crate::entry::EntryPayload;
use crate::error::{Error, Result};

/// Uncommitted standup entry fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    /// The submitter's display name.
    pub name: String,
    /// What was accomplished the prior day.
    pub yesterday: String,
    /// What is planned for the current day.
    pub today: String,
    /// Anything blocking progress (optional).
    pub blockers: String,
    /// The date the update applies to; defaults to the current calendar
    /// date when unset.
    pub date: Option<NaiveDate>,
}

impl EntryForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and produce a payload.
    ///
    /// Required fields are trimmed and must be non-empty; `blockers` is
    /// trimmed and mapped to `None` when empty; `date` defaults to
    /// `today` when unset. The form itself is left untouched so a failed
    /// submit does not lose input.
    ///
    /// # Errors
    ///
    /// Returns a [`Error::MissingField`] for the first empty required
    /// field.
    pub fn finish(&self, today: NaiveDate) -> Result<EntryPayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::missing_field("name"));
        }
        let yesterday = self.yesterday.trim();
        if yesterday.is_empty() {
            return Err(Error::missing_field("yesterday"));
        }
        let today_text = self.today.trim();
        if today_text.is_empty() {
            return Err(Error::missing_field("today"));
        }

        let blockers = match self.blockers.trim() {
            "" => None,
            b => Some(b.to_string()),
        };

        let date = self.date.unwrap_or(today).format("%Y-%m-%d").to_string();

        Ok(EntryPayload::new(name, date, yesterday, today_text, blockers))
    }

    /// Reset all fields to empty, for reuse after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
