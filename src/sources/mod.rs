//! Headline providers and the fallback chain that picks between them.
//!
//! Providers are tried in a fixed priority order and the first one that
//! yields at least one headline wins:
//!
//! | Priority | Provider | Module | Can fail |
//! |----------|----------|--------|----------|
//! | 1 | Structured top-news API | [`api`] | yes, and skipped without a key |
//! | 2 | RSS / Atom mirror | [`rss`] | yes |
//! | 3 | Built-in headlines | [`backup`] | no |
//!
//! Fallible providers report a [`SourceOutcome`] instead of an error, so the
//! chain in [`Resolver::resolve`] is a plain `match` and nothing a provider
//! does can abort the run.

pub mod api;
pub mod backup;
pub mod rss;

use crate::models::Article;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Why a provider produced no headlines.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("provider returned code {code}: {msg}")]
    Provider { code: i64, msg: String },
    #[error("malformed feed: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),
    #[error("no headlines")]
    Empty,
}

/// Result of asking one provider for headlines.
#[derive(Debug)]
pub enum SourceOutcome {
    /// At least one headline.
    Found(Vec<Article>),
    /// The provider could not be used this run.
    Unavailable(SourceError),
}

impl From<Result<Vec<Article>, SourceError>> for SourceOutcome {
    fn from(res: Result<Vec<Article>, SourceError>) -> Self {
        match res {
            Ok(articles) if articles.is_empty() => Self::Unavailable(SourceError::Empty),
            Ok(articles) => Self::Found(articles),
            Err(e) => Self::Unavailable(e),
        }
    }
}

/// A provider that may or may not deliver headlines.
pub trait HeadlineSource {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Fetch up to [`DISPLAY_LIMIT`](crate::models::DISPLAY_LIMIT) headlines.
    async fn fetch(&self) -> SourceOutcome;
}

/// The last resort in the chain. Always has headlines.
pub trait BackupSource {
    fn headlines(&self) -> Vec<Article>;
}

/// Walks the fallback chain: structured API, then RSS, then the backup list.
///
/// The primary provider is optional because it needs an API key.
#[derive(Debug)]
pub struct Resolver<P, F, B> {
    primary: Option<P>,
    fallback: F,
    backup: B,
}

impl<P, F, B> Resolver<P, F, B>
where
    P: HeadlineSource,
    F: HeadlineSource,
    B: BackupSource,
{
    pub fn new(primary: Option<P>, fallback: F, backup: B) -> Self {
        Self {
            primary,
            fallback,
            backup,
        }
    }

    /// Return the headlines of the first provider that has any.
    ///
    /// Never fails: when both network providers come up empty the backup
    /// list is returned.
    #[instrument(level = "info", skip_all)]
    pub async fn resolve(&self) -> Vec<Article> {
        match &self.primary {
            Some(primary) => {
                if let Some(articles) = attempt(primary).await {
                    return articles;
                }
            }
            None => info!("No API key configured; skipping structured API"),
        }

        if let Some(articles) = attempt(&self.fallback).await {
            return articles;
        }

        let articles = self.backup.headlines();
        info!(count = articles.len(), "Using built-in headlines");
        articles
    }
}

async fn attempt<S: HeadlineSource>(source: &S) -> Option<Vec<Article>> {
    info!(source = source.name(), "Fetching headlines");
    match source.fetch().await {
        SourceOutcome::Found(articles) => {
            info!(source = source.name(), count = articles.len(), "Fetched headlines");
            Some(articles)
        }
        SourceOutcome::Unavailable(e) => {
            warn!(source = source.name(), error = %e, "Source unavailable; falling back");
            None
        }
    }
}
