//! Command-line interface and run configuration.
//!
//! Every option can be provided as a flag or, where noted, through an
//! environment variable. [`Cli::into_config`] validates the raw arguments
//! once at start-up and produces the immutable [`Config`] handed to each
//! stage of the run.

use clap::Parser;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default endpoint of the structured top-news API.
pub const DEFAULT_API_URL: &str = "https://apis.tianapi.com/topnews/index";

/// RSS mirrors tried when the structured API is unavailable. One is picked per run.
pub const DEFAULT_FEED_URLS: [&str; 3] = [
    "http://www.xinhuanet.com/rss/news.xml",
    "https://rss.cnbeta.com/rss",
    "http://rss.sina.com.cn/news/market/focus15.xml",
];

/// Command-line arguments for the daily news bot.
///
/// # Examples
///
/// ```sh
/// # Minimal: webhook only, headlines come from RSS or the backup list
/// WEBHOOK_URL=https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=... daily_news_bot
///
/// # With the structured headline API
/// daily_news_bot --webhook-url https://... --api-key YOUR_KEY
///
/// # Print the message instead of posting it
/// daily_news_bot --webhook-url https://... --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Group-chat webhook that receives the message
    #[arg(long, env = "WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Key for the structured headline API; without it RSS is used
    #[arg(long, env = "PROVIDER_API_KEY")]
    pub api_key: Option<String>,

    /// Endpoint of the structured headline API
    #[arg(long, env = "PROVIDER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// RSS mirror to fall back on (repeatable; replaces the built-in list)
    #[arg(long = "feed-url")]
    pub feed_urls: Vec<String>,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Render the message and print it without posting
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated settings for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: Url,
    pub api_key: Option<String>,
    pub api_url: Url,
    pub feed_urls: Vec<Url>,
    pub timeout: Duration,
    pub dry_run: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WEBHOOK_URL is not set")]
    MissingWebhook,
    #[error("invalid {name} `{value}`: {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Cli {
    /// Validate the arguments into a [`Config`].
    ///
    /// Empty values are treated as absent, so an exported-but-empty
    /// `PROVIDER_API_KEY` selects the RSS path instead of failing the API call.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let webhook = self
            .webhook_url
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingWebhook)?;
        let webhook_url = parse_url("webhook URL", &webhook)?;
        let api_url = parse_url("API URL", &self.api_url)?;

        let feed_urls = if self.feed_urls.is_empty() {
            DEFAULT_FEED_URLS
                .iter()
                .map(|u| parse_url("feed URL", u))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            self.feed_urls
                .iter()
                .map(|u| parse_url("feed URL", u))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Config {
            webhook_url,
            api_key: self.api_key.filter(|k| !k.trim().is_empty()),
            api_url,
            feed_urls,
            timeout: Duration::from_secs(self.timeout_secs),
            dry_run: self.dry_run,
        })
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}
