//! End-to-end pipeline: fetch, parse, normalize, filter, categorize, group.
//!
//! Each call works on its own copy of the feed. Nothing is shared between
//! calls and nothing is cached.

use chrono::{DateTime, Utc};

use crate::category::categorize_all;
use crate::event::Event;
use crate::feed::FeedSource;
use crate::ics::{normalize_all, parse};
use crate::month::{MonthBucket, group_by_month};
use crate::upcoming::select_upcoming;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The host's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A fixed instant, for tests and reproducible output.
impl Clock for DateTime<Utc> {
    fn now(&self) -> DateTime<Utc> {
        *self
    }
}

/// Fetch, parse and normalize every event in the feed, in feed order.
///
/// Does not look at the clock. An unavailable feed or a malformed document
/// both give an empty list.
pub async fn load_events<S: FeedSource>(source: &S) -> Vec<Event> {
    let Some(document) = source.fetch().await.document() else {
        return Vec::new();
    };

    let components = parse(&document);
    let events = normalize_all(&components);
    tracing::debug!(
        components = components.len(),
        events = events.len(),
        "normalized calendar feed"
    );
    events
}

/// Upcoming events for the strip view: at most `limit`, earliest first.
pub async fn upcoming_events<S: FeedSource>(
    source: &S,
    clock: &dyn Clock,
    limit: usize,
) -> Vec<Event> {
    let events = load_events(source).await;
    select_upcoming(events, clock.now(), limit)
}

/// Every upcoming event, categorized and grouped by month, for the
/// full-calendar view.
pub async fn calendar_months<S: FeedSource>(source: &S, clock: &dyn Clock) -> Vec<MonthBucket> {
    let events = load_events(source).await;
    build_months(events, clock.now())
}

/// The synchronous tail of [`calendar_months`].
pub fn build_months(events: Vec<Event>, now: DateTime<Utc>) -> Vec<MonthBucket> {
    let upcoming = select_upcoming(events, now, usize::MAX);
    group_by_month(categorize_all(upcoming))
}
