//! Grouping of chronologically sorted events into month buckets.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::event::Event;

/// Calendar month of an event's start, in the event's own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(event: &Event) -> Self {
        MonthKey {
            year: event.start.year(),
            month: event.start.month(),
        }
    }

    /// Display label, e.g. "January 2025".
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }
}

/// Events sharing one calendar month, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub events: Vec<Event>,
}

impl MonthBucket {
    pub fn label(&self) -> String {
        self.key.label()
    }
}

impl Serialize for MonthBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MonthBucket", 4)?;
        state.serialize_field("label", &self.label())?;
        state.serialize_field("year", &self.key.year)?;
        state.serialize_field("month", &self.key.month)?;
        state.serialize_field("events", &self.events)?;
        state.end()
    }
}

/// Split sorted events into consecutive month buckets.
///
/// Only the most recent bucket is ever extended, so a month that recurs
/// later (the same month in another year, or unsorted input) starts a new
/// bucket instead of merging into an earlier one. Input order is trusted,
/// not re-checked.
pub fn group_by_month(events: Vec<Event>) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = Vec::new();

    for event in events {
        let key = MonthKey::of(&event);
        match buckets.last_mut() {
            Some(bucket) if bucket.key == key => bucket.events.push(event),
            _ => buckets.push(MonthBucket {
                key,
                events: vec![event],
            }),
        }
    }

    buckets
}
