//! Data models for headlines and the wire formats around them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: A normalized headline, whatever provider it came from
//! - [`TopNewsResponse`]: The structured headline API's response envelope
//! - [`WebhookMessage`] / [`WebhookReply`]: The group-chat webhook request and reply

use serde::{Deserialize, Serialize};

/// How many headlines are requested from a provider.
pub const FETCH_LIMIT: usize = 10;

/// How many headlines make it into one message.
pub const DISPLAY_LIMIT: usize = 5;

/// Character budget for a summary line.
pub const SUMMARY_CHARS: usize = 100;

pub const DEFAULT_TITLE: &str = "无标题";
pub const DEFAULT_URL: &str = "#";
pub const DEFAULT_SOURCE: &str = "未知来源";

/// A news headline as consumed by the formatter.
///
/// Every field always holds a string. Missing or blank upstream values are
/// replaced by the `DEFAULT_*` placeholders when the article is built, so
/// downstream code never has to deal with absent data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Headline text.
    pub title: String,
    /// Link to the full story.
    pub url: String,
    /// Publisher name.
    pub source_name: String,
    /// Short summary, possibly empty.
    pub description: String,
}

impl Article {
    /// Build an article, filling in placeholders for absent or blank fields.
    ///
    /// An absent description becomes the empty string; the formatter omits
    /// the summary line in that case.
    pub fn new(
        title: Option<String>,
        url: Option<String>,
        source_name: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            title: non_blank(title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            url: non_blank(url).unwrap_or_else(|| DEFAULT_URL.to_string()),
            source_name: non_blank(source_name).unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            description: non_blank(description).unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Response envelope of the top-news headline API.
///
/// A `code` of 200 means success; anything else comes with a `msg`.
#[derive(Debug, Deserialize)]
pub struct TopNewsResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<TopNewsResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopNewsResult {
    #[serde(default)]
    pub list: Vec<TopNewsItem>,
}

/// One headline as returned by the API. Every field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct TopNewsItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub digest: Option<String>,
}

/// Markdown message accepted by the group-chat webhook.
#[derive(Debug, Serialize)]
pub struct WebhookMessage<'a> {
    pub msgtype: &'static str,
    pub markdown: MarkdownContent<'a>,
}

#[derive(Debug, Serialize)]
pub struct MarkdownContent<'a> {
    pub content: &'a str,
}

impl<'a> WebhookMessage<'a> {
    pub fn markdown(content: &'a str) -> Self {
        Self {
            msgtype: "markdown",
            markdown: MarkdownContent { content },
        }
    }
}

/// The webhook's reply body. `errcode == 0` means the message was accepted.
#[derive(Debug, Deserialize)]
pub struct WebhookReply {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: Option<String>,
}
