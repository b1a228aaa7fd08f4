use std::sync::Arc;

use anyhow::Result;
use feedcal_core::pipeline::Clock;
use feedcal_core::{FeedConfig, HttpFeed, SystemClock};

/// Shared application state.
///
/// Holds only configuration: every request fetches its own copy of the
/// feed, so there is nothing to lock.
#[derive(Clone)]
pub struct AppState {
    pub feed: HttpFeed,
    pub clock: Arc<dyn Clock>,
    pub default_limit: usize,
}

impl AppState {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        Ok(AppState {
            feed: config.http_feed()?,
            clock: Arc::new(SystemClock),
            default_limit: config.default_limit,
        })
    }
}
