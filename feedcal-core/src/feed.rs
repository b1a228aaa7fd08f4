//! Feed retrieval.
//!
//! Fetching is best-effort: every failure ends up as [`Fetched::Unavailable`]
//! and the caller renders an empty list. There is no caching and no retry.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::redirect::Policy;
use url::Url;

use crate::error::{FeedError, FeedResult};

const MAX_REDIRECTS: usize = 10;

/// Outcome of a single fetch attempt.
#[derive(Debug)]
pub enum Fetched {
    Document(String),
    Unavailable(FeedError),
}

impl Fetched {
    pub fn is_available(&self) -> bool {
        matches!(self, Fetched::Document(_))
    }

    /// The document text, if there is one.
    pub fn document(self) -> Option<String> {
        match self {
            Fetched::Document(text) => Some(text),
            Fetched::Unavailable(_) => None,
        }
    }
}

impl From<FeedResult<String>> for Fetched {
    fn from(result: FeedResult<String>) -> Self {
        match result {
            Ok(text) => Fetched::Document(text),
            Err(e) => Fetched::Unavailable(e),
        }
    }
}

/// Somewhere a calendar document can be read from.
pub trait FeedSource {
    fn fetch(&self) -> impl Future<Output = Fetched> + Send;
}

/// A calendar feed served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: &str, timeout: Duration) -> FeedResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Self::with_client(client, url)
    }

    pub fn with_client(client: reqwest::Client, url: &str) -> FeedResult<Self> {
        Ok(HttpFeed {
            client,
            url: feed_url(url)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn try_fetch(&self) -> FeedResult<String> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/calendar, text/plain;q=0.9, */*;q=0.1")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Fetched {
        match self.try_fetch().await {
            Ok(text) => {
                tracing::debug!(url = %self.url, bytes = text.len(), "fetched calendar feed");
                Fetched::Document(text)
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "calendar feed unavailable");
                Fetched::Unavailable(e)
            }
        }
    }
}

/// A calendar document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFeed { path: path.into() }
    }
}

impl FeedSource for FileFeed {
    async fn fetch(&self) -> Fetched {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Fetched::Document(text),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "calendar file unavailable");
                Fetched::Unavailable(e.into())
            }
        }
    }
}

/// Validate a feed URL, rewriting `webcal://` subscription links to `https://`.
pub fn feed_url(raw: &str) -> FeedResult<String> {
    let raw = raw.trim();
    let rewritten = match raw.get(..9) {
        Some(scheme) if scheme.eq_ignore_ascii_case("webcal://") => format!("https://{}", &raw[9..]),
        _ => raw.to_string(),
    };

    let url = Url::parse(&rewritten).map_err(|_| FeedError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        _ => Err(FeedError::InvalidUrl(raw.to_string())),
    }
}
