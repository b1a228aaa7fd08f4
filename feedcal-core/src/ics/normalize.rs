//! Mapping raw components onto canonical [`Event`]s.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, NaiveTime, TimeZone};

use super::component::{DateValue, RawCalendarComponent, RawProperty};
use crate::event::Event;

/// Normalize a component using the host's local time zone.
pub fn normalize(component: &RawCalendarComponent) -> Option<Event> {
    normalize_in(component, &Local)
}

/// Normalize a component, resolving wall-clock values in `tz`.
///
/// Returns `None` for anything that is not a VEVENT, and for events without
/// a non-blank SUMMARY or a resolvable DTSTART.
pub fn normalize_in<Tz: TimeZone>(component: &RawCalendarComponent, tz: &Tz) -> Option<Event> {
    if !component.is_event() {
        return None;
    }

    let Some(title) = component
        .find("SUMMARY")
        .map(|p| p.value.trim().to_string())
        .filter(|t| !t.is_empty())
    else {
        tracing::debug!("dropping VEVENT without a title");
        return None;
    };

    let Some(start_value) = component.find("DTSTART").and_then(RawProperty::date_value) else {
        tracing::debug!(%title, "dropping VEVENT without a usable DTSTART");
        return None;
    };
    let start = resolve(&start_value, tz)?;

    let end = component
        .find("DTEND")
        .and_then(RawProperty::date_value)
        .and_then(|value| resolve(&value, tz));

    let location = component
        .find("LOCATION")
        .map(|p| p.value.trim().to_string())
        .unwrap_or_default();

    let url = component
        .find("URL")
        .map(|p| p.value.trim().to_string())
        .unwrap_or_default();

    Some(Event {
        title,
        start,
        end,
        location,
        url,
        all_day: start_value.is_date(),
        category: None,
    })
}

/// Normalize every component in the host's local time zone.
pub fn normalize_all(components: &[RawCalendarComponent]) -> Vec<Event> {
    normalize_all_in(components, &Local)
}

pub fn normalize_all_in<Tz: TimeZone>(components: &[RawCalendarComponent], tz: &Tz) -> Vec<Event> {
    components
        .iter()
        .filter_map(|component| normalize_in(component, tz))
        .collect()
}

/// Pin a date value to an instant in `tz`.
///
/// Dates become local midnight. Floating and TZID-qualified values are read
/// as wall-clock time in `tz`; there is no timezone database behind TZID.
fn resolve<Tz: TimeZone>(value: &DateValue, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    match value {
        DateValue::Utc(dt) => Some(dt.with_timezone(tz).fixed_offset()),
        DateValue::Date(date) => wall_clock(date.and_time(NaiveTime::MIN), tz),
        DateValue::Floating(datetime) | DateValue::Zoned { datetime, .. } => {
            wall_clock(*datetime, tz)
        }
    }
}

/// Local wall-clock time to an instant. Times skipped by a DST jump move
/// forward one hour.
fn wall_clock<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.fixed_offset())
}
