//! Core of the feedcal calendar feed pipeline.
//!
//! This crate turns a third-party iCalendar feed into display-ready events:
//! - `feed` retrieves the raw document (HTTP or file), best-effort
//! - `ics` parses it into components and normalizes VEVENTs into `Event`s
//! - `upcoming` drops elapsed events, sorts and limits the rest
//! - `category` assigns each event a display category
//! - `month` groups sorted events into month buckets
//! - `pipeline` wires the steps together behind an injectable clock

pub mod category;
pub mod config;
pub mod error;
pub mod event;
pub mod feed;
pub mod ics;
pub mod month;
pub mod pipeline;
pub mod upcoming;

pub use category::{Category, categorize, categorize_all};
pub use config::FeedConfig;
pub use error::{FeedError, FeedResult};
pub use event::Event;
pub use feed::{FeedSource, Fetched, FileFeed, HttpFeed};
pub use month::{MonthBucket, MonthKey, group_by_month};
pub use pipeline::{Clock, SystemClock, calendar_months, load_events, upcoming_events};
pub use upcoming::{DEFAULT_LIMIT, parse_limit, select_upcoming};
