//! Built-in headlines used when no network provider delivers.

use super::BackupSource;
use crate::models::Article;

/// (title, url, source, summary)
const HEADLINES: [(&str, &str, &str, &str); 5] = [
    (
        "科技创新推动高质量发展",
        "https://example.com/tech1",
        "科技日报",
        "近期科技创新成果显著，为经济社会发展注入新动力",
    ),
    (
        "数字经济成为增长新引擎",
        "https://example.com/tech2",
        "经济观察报",
        "数字经济发展迅速，正在改变传统产业格局",
    ),
    (
        "绿色能源发展迎来新机遇",
        "https://example.com/tech3",
        "能源网",
        "可再生能源技术不断突破，市场前景广阔",
    ),
    (
        "人工智能应用加速落地",
        "https://example.com/tech4",
        "AI科技评论",
        "AI技术在各行业应用不断深化，创造新价值",
    ),
    (
        "智慧城市建设成效显著",
        "https://example.com/tech5",
        "城市发展研究",
        "各地智慧城市建设推进，提升城市治理水平",
    ),
];

/// The fixed list of five hand-written headlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBackup;

impl BackupSource for StaticBackup {
    fn headlines(&self) -> Vec<Article> {
        HEADLINES
            .iter()
            .map(|(title, url, source, summary)| {
                Article::new(
                    Some(title.to_string()),
                    Some(url.to_string()),
                    Some(source.to_string()),
                    Some(summary.to_string()),
                )
            })
            .collect()
    }
}
