//! Raw calendar components as they come out of the parser.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const VEVENT: &str = "VEVENT";

/// A single component from the feed (`VEVENT`, `VTIMEZONE`, `VTODO`, ...).
///
/// Property names and the component tag are uppercased. Values are as the
/// parser leaves them: TEXT escapes are already resolved, dates are only
/// interpreted on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCalendarComponent {
    pub kind: String,
    pub properties: Vec<RawProperty>,
}

impl RawCalendarComponent {
    pub fn is_event(&self) -> bool {
        self.kind == VEVENT
    }

    /// First property with the given (uppercase) name.
    pub fn find(&self, name: &str) -> Option<&RawProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Every property with the given (uppercase) name, in feed order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawProperty> {
        self.properties.iter().filter(move |p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty {
    pub name: String,
    pub params: Vec<(String, String)>,
    pub value: String,
}

/// A date or date-time value, before it is pinned to an instant.
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    /// `VALUE=DATE` / all-day.
    Date(NaiveDate),
    /// Trailing `Z`.
    Utc(DateTime<Utc>),
    /// No zone information at all.
    Floating(NaiveDateTime),
    /// Wall-clock time qualified by a `TZID` parameter.
    Zoned { datetime: NaiveDateTime, tzid: String },
}

impl DateValue {
    pub fn is_date(&self) -> bool {
        matches!(self, DateValue::Date(_))
    }
}

impl RawProperty {
    /// Parameter value by key, case-insensitive, with surrounding quotes removed.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim_matches('"'))
    }

    /// Interpret the value as a DATE or DATE-TIME.
    ///
    /// Handles:
    /// - `VALUE=DATE` or a bare 8-digit value: `DTSTART;VALUE=DATE:20250115`
    /// - UTC: `DTSTART:20250115T090000Z`
    /// - TZID parameter: `DTSTART;TZID=Europe/London:20250115T090000`
    /// - Floating: `DTSTART:20250115T090000`
    ///
    /// Seconds may be omitted. Lists (`a,b`) resolve to their first entry.
    pub fn date_value(&self) -> Option<DateValue> {
        let value = self.value.split(',').next()?.trim();
        if value.is_empty() {
            return None;
        }

        let is_date = self
            .param("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
            || (value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()));

        if is_date {
            return NaiveDate::parse_from_str(value, "%Y%m%d")
                .ok()
                .map(DateValue::Date);
        }

        if let Some(utc) = value.strip_suffix(['Z', 'z']) {
            return parse_naive(utc).map(|dt| DateValue::Utc(dt.and_utc()));
        }

        let datetime = parse_naive(value)?;
        Some(match self.param("TZID") {
            Some(tzid) => DateValue::Zoned {
                datetime,
                tzid: tzid.to_string(),
            },
            None => DateValue::Floating(datetime),
        })
    }
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M"))
        .ok()
}
