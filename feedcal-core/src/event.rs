//! The canonical event record.
//!
//! Every feed entry that survives normalization becomes an [`Event`]. Events
//! are built once, never mutated, and live only as long as the request that
//! produced them.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A displayable calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    /// Absent when the feed gave no DTEND. Filtering falls back to `start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub url: String,
    /// DTSTART was a date-only value, resolved to local midnight.
    #[serde(default, skip_serializing_if = "is_false")]
    pub all_day: bool,
    /// Set by the categorizer; absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Event {
    pub fn new(title: impl Into<String>, start: DateTime<FixedOffset>) -> Self {
        Event {
            title: title.into(),
            start,
            end: None,
            location: String::new(),
            url: String::new(),
            all_day: false,
            category: None,
        }
    }

    /// The instant used for the upcoming cutoff.
    ///
    /// An inverted range (`end < start`) is not repaired; `end` still wins
    /// whenever it is present.
    pub fn effective_end(&self) -> DateTime<FixedOffset> {
        self.end.unwrap_or(self.start)
    }

    /// Lowercased `title` and `location` joined by a space.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.location).to_lowercase()
    }

    pub fn with_category(self, category: Category) -> Self {
        Event {
            category: Some(category),
            ..self
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
