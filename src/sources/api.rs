//! Structured top-news API client.
//!
//! Sends `GET <endpoint>?key=<key>&num=10` and expects a JSON envelope:
//!
//! ```json
//! {"code": 200, "msg": "success", "result": {"list": [
//!     {"title": "...", "url": "...", "source": "...", "digest": "..."}
//! ]}}
//! ```
//!
//! Any `code` other than 200 is reported as [`SourceError::Provider`]
//! together with the provider's `msg`.

use super::{HeadlineSource, SourceError, SourceOutcome};
use crate::models::{Article, DISPLAY_LIMIT, FETCH_LIMIT, TopNewsResponse};
use crate::utils::truncate_for_log;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

const SUCCESS_CODE: i64 = 200;
const DEFAULT_SOURCE: &str = "天行数据";

/// Headline provider backed by the top-news HTTP API.
#[derive(Debug, Clone)]
pub struct TopNewsApi {
    client: Client,
    endpoint: Url,
    key: String,
}

impl TopNewsApi {
    pub fn new(client: Client, endpoint: Url, key: String) -> Self {
        Self {
            client,
            endpoint,
            key,
        }
    }

    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint))]
    async fn request(&self) -> Result<Vec<Article>, SourceError> {
        let num = FETCH_LIMIT.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("key", self.key.as_str()), ("num", num.as_str())])
            .send()
            .await?;

        // The API reports its own errors in the body, usually with a 200.
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, body = %truncate_for_log(&body, 300), "Top-news API response");
        if status != StatusCode::OK {
            return Err(SourceError::Status(status));
        }

        parse_top_news(&body)
    }
}

impl HeadlineSource for TopNewsApi {
    fn name(&self) -> &'static str {
        "top-news API"
    }

    async fn fetch(&self) -> SourceOutcome {
        self.request().await.into()
    }
}

/// Map an API response body to at most [`DISPLAY_LIMIT`] articles.
pub fn parse_top_news(body: &str) -> Result<Vec<Article>, SourceError> {
    let response: TopNewsResponse = serde_json::from_str(body)?;
    if response.code != SUCCESS_CODE {
        return Err(SourceError::Provider {
            code: response.code,
            msg: response.msg.unwrap_or_else(|| "未知错误".to_string()),
        });
    }

    let articles = response
        .result
        .unwrap_or_default()
        .list
        .into_iter()
        .take(DISPLAY_LIMIT)
        .map(|item| {
            Article::new(
                item.title,
                item.url,
                item.source.or_else(|| Some(DEFAULT_SOURCE.to_string())),
                item.digest,
            )
        })
        .collect();
    Ok(articles)
}
