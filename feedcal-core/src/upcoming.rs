//! Temporal filtering and ordering of events.

use chrono::{DateTime, Duration, Utc};

use crate::event::Event;

/// How long after it ends an event is still shown as upcoming.
pub const GRACE_HOURS: i64 = 24;

/// Default number of events returned when no usable limit is given.
pub const DEFAULT_LIMIT: usize = 6;

/// Keep events that have not fully elapsed, earliest first, at most `limit`.
///
/// An event stays while its end (or start, when it has no end) is no older
/// than `now` minus the grace window. Ties on `start` keep feed order.
pub fn select_upcoming(events: Vec<Event>, now: DateTime<Utc>, limit: usize) -> Vec<Event> {
    let cutoff = now - Duration::hours(GRACE_HOURS);

    let mut upcoming: Vec<Event> = events
        .into_iter()
        .filter(|event| event.effective_end().with_timezone(&Utc) >= cutoff)
        .collect();

    // sort_by_key is stable
    upcoming.sort_by_key(|event| event.start);
    upcoming.truncate(limit);
    upcoming
}

/// Parse a caller-supplied limit, falling back to `default` when it is
/// absent, non-numeric or not positive.
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(default)
}
