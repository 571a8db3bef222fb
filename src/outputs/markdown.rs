//! Markdown rendering of the daily briefing.
//!
//! The message has a fixed shape:
//!
//! ```text
//! # 📰 每日新闻简报
//! 📅 **2026年10月18日 星期日**
//!
//! ---
//!
//! ## 1. <title>
//! **来源**：<source>
//! **摘要**：<summary>          (only when there is one)
//! **[🔗 阅读原文](<url>)**
//!
//! ---
//!
//! 🤖 *此消息由自动新闻机器人推送*
//! ⏰ *每日早上9点自动更新*
//! ```

use crate::models::{Article, DISPLAY_LIMIT, SUMMARY_CHARS};
use crate::utils::truncate_chars;
use chrono::{Datelike, NaiveDate};

const WEEKDAYS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];
const SEPARATOR: &str = "---\n\n";
const FOOTER: &str = "🤖 *此消息由自动新闻机器人推送*\n⏰ *每日早上9点自动更新*";

/// Render up to [`DISPLAY_LIMIT`] articles as the briefing for `today`.
///
/// Pure: the same articles and date always give the same text.
pub fn format_briefing(articles: &[Article], today: NaiveDate) -> String {
    let mut md = String::new();

    md.push_str("# 📰 每日新闻简报\n");
    md.push_str(&format!("📅 **{} 星期{}**\n\n", format_date(today), weekday_name(today)));
    md.push_str(SEPARATOR);

    for (i, article) in articles.iter().take(DISPLAY_LIMIT).enumerate() {
        md.push_str(&format!("## {}. {}\n", i + 1, article.title.replace('"', "")));
        md.push_str(&format!("**来源**：{}\n", article.source_name));
        if !article.description.is_empty() {
            md.push_str(&format!("**摘要**：{}\n", summary(&article.description)));
        }
        md.push_str(&format!("**[🔗 阅读原文]({})**\n\n", article.url));
        md.push_str(SEPARATOR);
    }

    md.push_str(FOOTER);
    md
}

/// `2026年10月08日`
fn format_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

fn summary(description: &str) -> String {
    match truncate_chars(description, SUMMARY_CHARS) {
        Some(cut) => format!("{cut}..."),
        None => description.to_string(),
    }
}
