//! Utility functions for string handling and HTTP client setup.
//!
//! This module provides helper functions used throughout the application:
//! - Character-safe truncation for summaries and log previews
//! - Markup stripping for feed summaries
//! - Construction of the shared HTTP client

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters with an ellipsis and a byte
/// count indicator appended. Cuts always land on a character boundary.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Keep at most `max` characters of `s`.
///
/// Returns `None` when `s` already fits, so callers can tell whether
/// anything was dropped.
pub fn truncate_chars(s: &str, max: usize) -> Option<&str> {
    s.char_indices().nth(max).map(|(cut, _)| &s[..cut])
}

/// Remove markup tags and collapse runs of whitespace.
///
/// Feed summaries frequently carry inline HTML (`<p>`, `<img>`, ...); only
/// the readable text is wanted in a chat message.
pub fn strip_markup(s: &str) -> String {
    let text = TAG_RE.replace_all(s, " ");
    WS_RE.replace_all(&text, " ").trim().to_string()
}

/// Build the HTTP client shared by every network call in a run.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
