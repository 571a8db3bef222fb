//! # Daily News Bot
//!
//! Posts a short digest of the day's headlines to a group-chat webhook.
//! Meant to be run once a day by cron or a CI schedule; it keeps no state
//! between runs.
//!
//! ## Usage
//!
//! ```sh
//! WEBHOOK_URL=https://... PROVIDER_API_KEY=... daily_news_bot
//! ```
//!
//! ## Architecture
//!
//! A run is a straight line:
//! 1. **Resolve**: take headlines from the top-news API, else an RSS mirror,
//!    else the built-in list
//! 2. **Render**: build the markdown briefing for today's date
//! 3. **Deliver**: POST it to the webhook once
//!
//! Exit codes: 0 when the message was delivered (or printed with `--dry-run`),
//! 1 on bad configuration or failed delivery.

use chrono::Local;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod notifier;
mod outputs;
mod pipeline;
mod sources;
#[cfg(test)]
mod test_support;
mod utils;

use cli::{Cli, Config, ConfigError};
use notifier::WebhookNotifier;
use pipeline::{PrintOnly, RunReport, run};
use sources::Resolver;
use sources::api::TopNewsApi;
use sources::backup::StaticBackup;
use sources::rss::RssSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_news_bot starting up");

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            return ExitCode::FAILURE;
        }
    };
    debug!(
        api_key_set = config.api_key.is_some(),
        mirrors = config.feed_urls.len(),
        timeout = ?config.timeout,
        dry_run = config.dry_run,
        "Loaded configuration"
    );

    let report = match execute(&config).await {
        Ok(report) => report,
        Err(e) => {
            report_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = report.article_count,
        message_chars = report.message.chars().count(),
        delivered = report.delivered,
        "Execution complete"
    );

    if report.delivered {
        info!("🎉 Done, check the group chat");
        ExitCode::SUCCESS
    } else {
        error!("😥 Delivery failed, check the webhook configuration");
        ExitCode::FAILURE
    }
}

async fn execute(config: &Config) -> Result<RunReport, ConfigError> {
    let client = utils::http_client(config.timeout)?;

    let primary = config
        .api_key
        .clone()
        .map(|key| TopNewsApi::new(client.clone(), config.api_url.clone(), key));
    let fallback = RssSource::new(client.clone(), config.feed_urls.clone());
    let resolver = Resolver::new(primary, fallback, StaticBackup);

    let today = Local::now().date_naive();
    let report = if config.dry_run {
        run(&resolver, &PrintOnly, today).await
    } else {
        let notifier = WebhookNotifier::new(client, config.webhook_url.clone());
        run(&resolver, &notifier, today).await
    };
    Ok(report)
}

fn report_config_error(e: &ConfigError) {
    error!(error = %e, "Invalid configuration");
    if matches!(e, ConfigError::MissingWebhook | ConfigError::InvalidUrl { name: "webhook URL", .. }) {
        info!("Add a robot to the group chat, copy its webhook address and export it as WEBHOOK_URL");
    }
}
