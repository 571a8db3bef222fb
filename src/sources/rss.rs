//! RSS / Atom fallback provider.
//!
//! One feed is picked from a list of interchangeable mirrors on every run,
//! downloaded as raw bytes, and parsed with `feed-rs`, which honors the
//! encoding the document declares (several Chinese mirrors serve GB2312).
//!
//! # Supported formats
//!
//! | Format | Container | Entry | Link | Summary |
//! |--------|-----------|-------|------|---------|
//! | RSS 2.0 | `<channel>` | `<item>` | element text | `<description>` |
//! | Atom | `<feed>` | `<entry>` | `rel="alternate"` or first link | `<summary>` / `<content>` |
//!
//! Summaries are stripped of HTML and cut to 100 characters here, before
//! they ever reach the formatter.

use super::{HeadlineSource, SourceError, SourceOutcome};
use crate::models::{Article, DISPLAY_LIMIT, SUMMARY_CHARS};
use crate::utils::{strip_markup, truncate_chars};
use feed_rs::model::{Content, Entry, Link, Text};
use rand::{Rng, rng};
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

const DEFAULT_SOURCE: &str = "RSS源";

/// Chooses which mirror to use, given how many there are. Must return an
/// index below `count`.
pub type MirrorPicker = fn(count: usize) -> usize;

/// Uniformly random mirror choice.
pub fn random_mirror(count: usize) -> usize {
    rng().random_range(0..count)
}

/// Headline provider reading one of several RSS mirrors.
#[derive(Debug, Clone)]
pub struct RssSource {
    client: Client,
    mirrors: Vec<Url>,
    pick: MirrorPicker,
}

impl RssSource {
    pub fn new(client: Client, mirrors: Vec<Url>) -> Self {
        Self::with_picker(client, mirrors, random_mirror)
    }

    pub fn with_picker(client: Client, mirrors: Vec<Url>, pick: MirrorPicker) -> Self {
        Self {
            client,
            mirrors,
            pick,
        }
    }

    #[instrument(level = "info", skip_all)]
    async fn request(&self) -> Result<Vec<Article>, SourceError> {
        if self.mirrors.is_empty() {
            return Err(SourceError::Empty);
        }
        let idx = (self.pick)(self.mirrors.len()).min(self.mirrors.len() - 1);
        let mirror = &self.mirrors[idx];
        info!(%mirror, "Reading RSS mirror");

        let response = self.client.get(mirror.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }
        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Downloaded feed");

        parse_feed(&body, DISPLAY_LIMIT)
    }
}

impl HeadlineSource for RssSource {
    fn name(&self) -> &'static str {
        "RSS"
    }

    async fn fetch(&self) -> SourceOutcome {
        self.request().await.into()
    }
}

/// Parse an RSS, Atom or JSON feed into at most `limit` articles, in
/// document order. The feed's own title becomes each article's source.
///
/// Takes raw bytes so the document's declared encoding (e.g. GB2312) is
/// honored rather than whatever the HTTP headers claim.
pub fn parse_feed(body: &[u8], limit: usize) -> Result<Vec<Article>, SourceError> {
    let feed = feed_rs::parser::parse(body)?;
    debug!(num = feed.entries.len(), "Parsed feed entries");

    let source = feed
        .title
        .map(|t| strip_markup(&t.content))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    Ok(feed
        .entries
        .into_iter()
        .take(limit)
        .map(|entry| article_from_entry(entry, &source))
        .collect())
}

fn article_from_entry(entry: Entry, source: &str) -> Article {
    let title = entry.title.map(|t| strip_markup(&t.content));
    let link = story_link(&entry.links);
    let summary = message_body(entry.summary, entry.content).map(|body| {
        let text = strip_markup(&body);
        match truncate_chars(&text, SUMMARY_CHARS) {
            Some(cut) => cut.to_string(),
            None => text,
        }
    });

    Article::new(title, link, Some(source.to_string()), summary)
}

/// Links without `rel`, or with `rel="alternate"`, point at the story;
/// otherwise fall back to the first link.
fn story_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
}

fn message_body(summary: Option<Text>, content: Option<Content>) -> Option<String> {
    summary
        .map(|text| text.content)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| content.and_then(|content| content.body))
}
