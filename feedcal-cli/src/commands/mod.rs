pub mod calendar;
pub mod config;
pub mod upcoming;

use anyhow::Result;
use feedcal_core::{FeedConfig, FeedSource, Fetched, FileFeed, HttpFeed};

use crate::SourceArgs;

/// The feed a command reads from, chosen on the command line.
pub enum Source {
    Http(HttpFeed),
    File(FileFeed),
}

impl FeedSource for Source {
    async fn fetch(&self) -> Fetched {
        match self {
            Source::Http(feed) => feed.fetch().await,
            Source::File(feed) => feed.fetch().await,
        }
    }
}

/// `--file` wins, then `--url`, then the configured `feed_url`.
pub fn resolve_source(args: &SourceArgs, config: &FeedConfig) -> Result<Source> {
    if let Some(path) = &args.file {
        return Ok(Source::File(FileFeed::new(path.clone())));
    }

    let feed = match &args.url {
        Some(url) => HttpFeed::new(url, config.request_timeout)?,
        None => config.http_feed()?,
    };
    Ok(Source::Http(feed))
}
