//! Process-wide configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};

use crate::error::{FeedError, FeedResult};
use crate::feed::HttpFeed;
use crate::upcoming::DEFAULT_LIMIT;

static DEFAULT_TIMEOUT: &str = "10s";
static DEFAULT_BIND: &str = "127.0.0.1:4096";

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4096))
}

/// `FEEDCAL_*` variables, e.g. `FEEDCAL_FEED_URL`.
fn environment() -> Environment {
    Environment::with_prefix("FEEDCAL").try_parsing(true)
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

/// Configuration at ~/.config/feedcal/config.toml, overridable with
/// `FEEDCAL_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// The calendar feed. `webcal://` links are accepted.
    pub feed_url: Option<String>,

    /// Events returned when a request does not carry a usable limit.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,

    /// Listen address for feedcal-server.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            feed_url: None,
            default_limit: default_limit(),
            request_timeout: default_timeout(),
            bind: default_bind(),
        }
    }
}

impl FeedConfig {
    pub fn config_path() -> FeedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FeedError::Config("Could not determine config directory".into()))?
            .join("feedcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config file (if any) and the environment.
    pub fn load() -> FeedResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (if it exists) and the environment.
    pub fn load_from(path: &Path) -> FeedResult<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: &Path, env: Environment) -> FeedResult<Self> {
        let config: FeedConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| FeedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FeedError::Config(e.to_string()))?;

        config.validate()
    }

    fn validate(self) -> FeedResult<Self> {
        if self.default_limit == 0 {
            return Err(FeedError::Config(
                "default_limit must be a positive integer".into(),
            ));
        }
        Ok(self)
    }

    /// The configured feed URL, or a config error naming how to set it.
    pub fn feed_url(&self) -> FeedResult<&str> {
        self.feed_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                FeedError::Config("No feed_url configured (set it in config.toml or FEEDCAL_FEED_URL)".into())
            })
    }

    pub fn http_feed(&self) -> FeedResult<HttpFeed> {
        HttpFeed::new(self.feed_url()?, self.request_timeout)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> FeedResult<()> {
        let contents = format!(
            "\
# feedcal configuration

# Calendar feed to read (https:// or webcal://):
# feed_url = \"https://calendar.example.org/school.ics\"

# Number of upcoming events returned by default:
# default_limit = {DEFAULT_LIMIT}

# Give up on the feed after this long:
# request_timeout = \"{DEFAULT_TIMEOUT}\"

# Address feedcal-server listens on:
# bind = \"{DEFAULT_BIND}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FeedError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| FeedError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use std::io::Write;

    /// Load with an empty environment, so exported `FEEDCAL_*` variables
    /// cannot leak in.
    fn load_isolated(path: &Path) -> FeedResult<FeedConfig> {
        FeedConfig::load_with(path, environment().source(Some(Map::new())))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_isolated(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.default_limit, 6);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.bind, default_bind());
    }

    #[test]
    fn test_file_values() {
        let file = toml_file(
            "feed_url = \"webcal://calendar.example.org/school.ics\"\n\
             default_limit = 3\n\
             request_timeout = \"250ms\"\n\
             bind = \"0.0.0.0:8080\"\n",
        );
        let config = load_isolated(file.path()).unwrap();

        assert_eq!(config.feed_url().unwrap(), "webcal://calendar.example.org/school.ics");
        assert_eq!(config.default_limit, 3);
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.bind.port(), 8080);

        let feed = config.http_feed().unwrap();
        assert_eq!(feed.url(), "https://calendar.example.org/school.ics");
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let file = toml_file("default_limit = 0\n");
        assert!(matches!(
            load_isolated(file.path()),
            Err(FeedError::Config(_))
        ));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let file = toml_file("request_timeout = \"soon\"\n");
        assert!(load_isolated(file.path()).is_err());
    }

    #[test]
    fn test_feed_url_is_required_for_http() {
        let config = FeedConfig::default();
        assert!(matches!(config.feed_url(), Err(FeedError::Config(_))));
        assert!(config.http_feed().is_err());
    }

    #[test]
    fn test_default_config_template_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        FeedConfig::create_default_config(&path).unwrap();
        let config = load_isolated(&path).unwrap();

        assert!(config.feed_url.is_none());
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("default_limit = 3\nrequest_timeout = \"5s\"\n");
        let vars = Map::from_iter([
            ("FEEDCAL_DEFAULT_LIMIT".to_string(), "8".to_string()),
            (
                "FEEDCAL_FEED_URL".to_string(),
                "https://calendar.example.org/env.ics".to_string(),
            ),
        ]);

        let config = FeedConfig::load_with(file.path(), environment().source(Some(vars))).unwrap();

        assert_eq!(config.default_limit, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.feed_url().unwrap(), "https://calendar.example.org/env.ics");
    }
}
