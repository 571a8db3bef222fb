//! One run of the bot: resolve headlines, render, deliver.

use crate::notifier::Notify;
use crate::outputs::markdown::format_briefing;
use crate::sources::{BackupSource, HeadlineSource, Resolver};
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

/// What a run did.
#[derive(Debug)]
pub struct RunReport {
    /// Headlines that went into the message.
    pub article_count: usize,
    /// The rendered message.
    pub message: String,
    /// Whether the webhook accepted it.
    pub delivered: bool,
}

/// Resolve headlines, render them for `today` and hand the text to `notifier`.
///
/// Each stage runs exactly once; a delivery failure is reported in the
/// returned [`RunReport`], not retried.
#[instrument(level = "info", skip_all, fields(%today))]
pub async fn run<P, F, B, N>(resolver: &Resolver<P, F, B>, notifier: &N, today: NaiveDate) -> RunReport
where
    P: HeadlineSource,
    F: HeadlineSource,
    B: BackupSource,
    N: Notify,
{
    info!("Starting daily news run");

    let articles = resolver.resolve().await;
    info!(count = articles.len(), "Resolved headlines");

    let message = format_briefing(&articles, today);
    let delivered = notifier.send(&message).await;

    if delivered {
        info!("Run complete; message delivered");
    } else {
        warn!("Run complete; message was not delivered");
    }

    RunReport {
        article_count: articles.len(),
        message,
        delivered,
    }
}

/// Stands in for the webhook when only the rendered message is wanted.
#[derive(Debug, Default)]
pub struct PrintOnly;

impl Notify for PrintOnly {
    async fn send(&self, text: &str) -> bool {
        println!("{text}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::backup::StaticBackup;
    use crate::sources::tests::{FakeSource, counting_backup};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: RefCell<Vec<String>>,
        accept: bool,
    }

    impl Notify for RecordingNotifier {
        async fn send(&self, text: &str) -> bool {
            self.sent.borrow_mut().push(text.to_string());
            self.accept
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[tokio::test]
    async fn test_no_key_and_broken_rss_sends_backup_once() {
        let resolver: Resolver<FakeSource, _, _> =
            Resolver::new(None, FakeSource::failing(), counting_backup());
        let notifier = RecordingNotifier {
            accept: true,
            ..Default::default()
        };

        let report = run(&resolver, &notifier, today()).await;

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], report.message);
        assert!(report.delivered);
        assert_eq!(report.article_count, 5);

        let sections: Vec<_> = report.message.lines().filter(|l| l.starts_with("## ")).collect();
        assert_eq!(sections.len(), 5);
        for (i, article) in StaticBackup.headlines().iter().enumerate() {
            assert_eq!(sections[i], format!("## {}. {}", i + 1, article.title));
        }
    }

    #[tokio::test]
    async fn test_rejected_delivery_is_reported() {
        let resolver = Resolver::new(
            Some(FakeSource::found(&["Only"])),
            FakeSource::failing(),
            counting_backup(),
        );
        let notifier = RecordingNotifier::default();

        let report = run(&resolver, &notifier, today()).await;

        assert!(!report.delivered);
        assert_eq!(report.article_count, 1);
        assert!(report.message.contains("## 1. Only"));
        assert_eq!(notifier.sent.borrow().len(), 1);
    }
}
