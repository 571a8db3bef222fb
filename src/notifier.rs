//! Delivery of the briefing to the group-chat webhook.
//!
//! One POST per run, no retries. The webhook answers 200 even for rejected
//! messages, so success needs both a 200 status and `errcode == 0` in the
//! reply body.

use crate::models::{WebhookMessage, WebhookReply};
use crate::utils::truncate_for_log;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error {0}")]
    Status(StatusCode),
    #[error("unreadable reply: {0}")]
    Json(#[from] serde_json::Error),
    #[error("webhook rejected message (errcode {errcode}): {errmsg}")]
    Rejected { errcode: i64, errmsg: String },
}

/// Something that can deliver a rendered message.
pub trait Notify {
    /// Deliver `text`, returning whether it was accepted. Never panics or
    /// returns an error; failures are logged.
    async fn send(&self, text: &str) -> bool;
}

/// Posts markdown messages to a WeCom-style group robot webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Url,
}

impl WebhookNotifier {
    /// The client's timeout bounds the whole request.
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// POST `text` as a markdown message and check the reply.
    #[instrument(level = "info", skip_all, fields(host = self.url.host_str().unwrap_or_default()))]
    pub async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let payload = serde_json::to_vec(&WebhookMessage::markdown(text))?;
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DeliveryError::Status(status));
        }

        let body = response.text().await?;
        debug!(body = %truncate_for_log(&body, 300), "Webhook reply");
        let reply: WebhookReply = serde_json::from_str(&body)?;
        if reply.errcode != 0 {
            return Err(DeliveryError::Rejected {
                errcode: reply.errcode,
                errmsg: reply.errmsg.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

impl Notify for WebhookNotifier {
    async fn send(&self, text: &str) -> bool {
        info!(bytes = text.len(), "Sending message to webhook");
        match self.deliver(text).await {
            Ok(()) => {
                info!("Message delivered");
                true
            }
            Err(DeliveryError::Transport(e)) if e.is_timeout() => {
                error!(error = %e, "Webhook request timed out");
                false
            }
            Err(e) => {
                error!(error = %e, "Message delivery failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_once, serve_stalled};
    use crate::utils::http_client;
    use std::time::{Duration, Instant};

    fn notifier(base: &str, timeout: Duration) -> WebhookNotifier {
        WebhookNotifier::new(http_client(timeout).unwrap(), Url::parse(base).unwrap())
    }

    #[tokio::test]
    async fn test_ok_status_and_zero_errcode_succeeds() {
        let (base, server) = serve_once(200, r#"{"errcode":0,"errmsg":"ok"}"#).await;

        let sent = notifier(&base, Duration::from_secs(5)).send("# hello").await;

        assert!(sent);
        let captured = server.await.unwrap();
        assert!(captured.request_line.starts_with("POST / "));
        assert!(captured.headers.to_ascii_lowercase().contains("content-type: application/json"));
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"msgtype": "markdown", "markdown": {"content": "# hello"}})
        );
    }

    #[tokio::test]
    async fn test_nonzero_errcode_fails() {
        let (base, _server) =
            serve_once(200, r#"{"errcode":1,"errmsg":"invalid webhook url"}"#).await;
        let notifier = notifier(&base, Duration::from_secs(5));

        let err = notifier.deliver("x").await.unwrap_err();

        assert!(matches!(err, DeliveryError::Rejected { errcode: 1, .. }));
        assert!(err.to_string().contains("invalid webhook url"));
    }

    #[tokio::test]
    async fn test_nonzero_errcode_send_returns_false() {
        let (base, _server) = serve_once(200, r#"{"errcode":93000,"errmsg":"bad"}"#).await;
        assert!(!notifier(&base, Duration::from_secs(5)).send("x").await);
    }

    #[tokio::test]
    async fn test_server_error_fails() {
        let (base, _server) = serve_once(500, r#"{"errcode":0}"#).await;
        let notifier = notifier(&base, Duration::from_secs(5));

        assert!(matches!(
            notifier.deliver("x").await,
            Err(DeliveryError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_reply_fails() {
        let (base, _server) = serve_once(200, "<html>gateway</html>").await;
        assert!(!notifier(&base, Duration::from_secs(5)).send("x").await);
    }

    #[tokio::test]
    async fn test_timeout_fails_without_error() {
        let base = serve_stalled().await;
        let notifier = notifier(&base, Duration::from_millis(200));

        let started = Instant::now();
        let sent = notifier.send("x").await;

        assert!(!sent);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_connection_refused_fails() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = notifier(&format!("http://{addr}/"), Duration::from_secs(2));
        assert!(matches!(
            notifier.deliver("x").await,
            Err(DeliveryError::Transport(_))
        ));
    }
}
