//! Grouped day-by-day view of standup entries.
//!
//! Pure functions for grouping entries by date, labeling groups
//! relative to the current calendar date, and rendering the list as
//! plain text for the terminal.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{Days, Local, NaiveDate, NaiveTime};

use crate::entry::StandupEntry;

/// All entries sharing one `date` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    /// The exact date string shared by the group's entries.
    pub date: String,
    /// The group's entries, in data-layer order (newest first).
    pub entries: Vec<StandupEntry>,
}

/// Group entries by their exact `date` string.
///
/// Groups are ordered by date descending (ISO date strings compare
/// correctly as text); within a group the input order is preserved.
/// Grouping is timezone-naive: entries only share a group when their
/// date strings are identical.
#[must_use]
pub fn group_by_date(entries: &[StandupEntry]) -> Vec<DayGroup> {
    let mut groups: BTreeMap<String, Vec<StandupEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.date.clone())
            .or_default()
            .push(entry.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, entries)| DayGroup { date, entries })
        .collect()
}

/// Relative label for a group's date.
///
/// Returns "Today" or "Yesterday" when the date matches the reference
/// calendar date or the day before it, otherwise a weekday/month/day
/// label like "Friday, Mar 1". Unparseable dates fall back to the raw
/// string.
#[must_use]
pub fn day_label(date: &str, today: NaiveDate) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return date.to_string();
    };

    if parsed == today {
        "Today".to_string()
    } else if Some(parsed) == today.checked_sub_days(Days::new(1)) {
        "Yesterday".to_string()
    } else {
        parsed.format("%A, %b %-d").to_string()
    }
}

/// Time-of-day label for when an entry was submitted, e.g. "09:41 AM".
#[must_use]
pub fn clock_label(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Counts for the reference date's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySummary {
    /// Distinct submitters for the date.
    pub members: usize,
    /// Total updates submitted for the date.
    pub updates: usize,
    /// Updates reporting an active blocker.
    pub blockers: usize,
}

/// Summarize the entries whose `date` equals the reference date.
#[must_use]
pub fn today_summary(entries: &[StandupEntry], today: NaiveDate) -> DaySummary {
    let key = today.format("%Y-%m-%d").to_string();
    let todays: Vec<&StandupEntry> = entries.iter().filter(|e| e.date == key).collect();

    let mut names: Vec<&str> = todays.iter().map(|e| e.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    DaySummary {
        members: names.len(),
        updates: todays.len(),
        blockers: todays.iter().filter(|e| e.has_blockers()).count(),
    }
}

/// Placeholder shown when there are no entries at all.
pub const EMPTY_PLACEHOLDER: &str = "No standups yet. Be the first to submit your daily update!";

/// Render the grouped list as plain text.
///
/// Entries within a group keep the data layer's newest-first order. The
/// submitted-at time is shown in local time. A blockers line appears
/// only when the entry reports one; an empty list renders the
/// placeholder instead of an empty frame.
#[must_use]
pub fn render(entries: &[StandupEntry], today: NaiveDate) -> String {
    if entries.is_empty() {
        return format!("{EMPTY_PLACEHOLDER}\n");
    }

    let mut out = String::new();
    for group in group_by_date(entries) {
        let count = group.entries.len();
        let plural = if count == 1 { "update" } else { "updates" };
        let _ = writeln!(out, "{} ({count} {plural})", day_label(&group.date, today));

        for entry in &group.entries {
            let submitted = clock_label(entry.created_at.with_timezone(&Local).time());
            let _ = writeln!(out, "  {} — submitted at {submitted}", entry.name);
            let _ = writeln!(out, "    Yesterday: {}", entry.yesterday);
            let _ = writeln!(out, "    Today:     {}", entry.today);
            if let Some(blockers) = entry.blockers.as_deref() {
                if !blockers.trim().is_empty() {
                    let _ = writeln!(out, "    Blockers:  {blockers}");
                }
            }
        }
        out.push('\n');
    }

    out
}
