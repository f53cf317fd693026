//! Crawl orchestration and JSON output
//!
//! Drives the fetch-extract pipeline over a board index range or a single
//! article and writes flat JSON files. A failed fetch never aborts a run:
//! listing pages are skipped, article slots record an error marker.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scraper::Html;
use serde_json::{Value, json};
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

use super::page_discovery::PageDiscoveryService;
use crate::domain::article::ArticleRecord;
use crate::infrastructure::config::{CrawlerConfig, utils};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::{
    ArticleContext, ArticleParser, ContextualParser, ListContext, ListParser,
};

/// Error record stored in place of an article whose fetch failed. Keeps a
/// failed fetch distinguishable from a malformed-but-present page, which
/// still yields a full record with degraded fields.
pub fn error_record() -> Value {
    json!({ "error": "invalid url" })
}

/// Serialize a record for output. Routing through `Value` sorts all map
/// keys; non-ASCII characters are emitted literally.
pub fn record_value(record: &ArticleRecord) -> Result<Value> {
    serde_json::to_value(record).context("serialize article record")
}

/// Write a JSON value to disk, compact, UTF-8.
pub async fn write_json(path: &Path, value: &Value) -> Result<()> {
    let body = serde_json::to_string(value).context("serialize output")?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("write {}", path.display()))
}

/// Read back a JSON output file.
pub async fn read_json(path: &Path) -> Result<Value> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("parse {}", path.display()))
}

/// Crawler for the web version of PTT.
pub struct Crawler {
    http_client: HttpClient,
    article_parser: ArticleParser,
    list_parser: ListParser,
    config: CrawlerConfig,
}

impl Crawler {
    /// Create a new crawler
    pub fn new(http_client: HttpClient, config: CrawlerConfig) -> Result<Self> {
        Ok(Self {
            article_parser: ArticleParser::new()?,
            list_parser: ListParser::new()?,
            http_client,
            config,
        })
    }

    /// Crawl listing indices `start..=end` of a board into
    /// `<board>-<start>-<end>.json`.
    ///
    /// An `end` of `-1` resolves to the board's last available index.
    /// Records appear in index order; a slot whose article fetch failed
    /// holds `{"error": "invalid url"}`. A listing page that fails to
    /// fetch is skipped and the run continues with the next index.
    pub async fn crawl_range(&self, board: &str, start: u32, end: i64) -> Result<PathBuf> {
        let end: u32 = if end == -1 {
            PageDiscoveryService::new(self.http_client.clone())
                .find_last_page(board)
                .await?
        } else {
            u32::try_from(end).context("end index must be -1 or non-negative")?
        };

        let filename = format!("{}-{}-{}.json", board, start, end);
        let path = self.config.out_dir.join(filename);

        let mut articles: Vec<Value> = Vec::new();
        for index in start..=end {
            info!("Processing index {} of board {}", index, board);
            let page_url = utils::board_index_url(board, index);

            let markup = match self.http_client.fetch_html_string(&page_url).await {
                Ok(markup) => markup,
                Err(e) => {
                    warn!("invalid url: {} ({})", page_url, e);
                    continue;
                }
            };

            let entries = {
                let html = Html::parse_document(&markup);
                self.list_parser
                    .parse_with_context(&html, &ListContext::new(&page_url))
            };

            for entry in entries {
                let value = self
                    .fetch_article_value(board, &entry.article_id, &entry.url)
                    .await?;
                articles.push(value);
            }

            sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }

        info!(
            "💾 Writing {} article slots to {}",
            articles.len(),
            path.display()
        );
        write_json(&path, &json!({ "articles": articles })).await?;
        Ok(path)
    }

    /// Crawl one article into `<board>-<article_id>.json`.
    pub async fn crawl_article(&self, board: &str, article_id: &str) -> Result<PathBuf> {
        let url = utils::article_url(board, article_id);
        let filename = format!("{}-{}.json", board, article_id);
        let path = self.config.out_dir.join(filename);

        let value = self.fetch_article_value(board, article_id, &url).await?;
        write_json(&path, &value).await?;
        Ok(path)
    }

    /// Fetch and extract one article. A fetch failure yields the error
    /// record for that slot instead of aborting the run.
    async fn fetch_article_value(&self, board: &str, article_id: &str, url: &str) -> Result<Value> {
        info!("Processing article {}", article_id);

        match self.http_client.fetch_html_string(url).await {
            Ok(markup) => {
                let context = ArticleContext::new(url, board, article_id);
                let record = self.article_parser.extract(&markup, &context);
                record_value(&record)
            }
            Err(e) => {
                warn!("invalid url: {} ({})", url, e);
                Ok(error_record())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{ReactionEntry, ReactionKind, ReactionTally};

    fn sample_record() -> ArticleRecord {
        ArticleRecord {
            url: "https://www.ptt.cc/bbs/Test/M.1.A.2.html".to_string(),
            board: "Test".to_string(),
            article_id: "M.1.A.2".to_string(),
            title: "Hello".to_string(),
            author: "alice".to_string(),
            date: "Mon Jan 1".to_string(),
            content: "Hello world 測試。".to_string(),
            source_ip: "123.45.67.89".to_string(),
            reactions: vec![ReactionEntry {
                kind: ReactionKind::Agree,
                user_id: "bob".to_string(),
                text: "nice post".to_string(),
                timestamp: "07/12 10:00".to_string(),
            }],
            reaction_tally: {
                let mut tally = ReactionTally::default();
                tally.record(ReactionKind::Agree);
                tally
            },
        }
    }

    #[test]
    fn record_serializes_with_sorted_keys() {
        let value = record_value(&sample_record()).unwrap();
        let body = serde_json::to_string(&value).unwrap();

        let keys: Vec<&str> = [
            "article_id",
            "author",
            "board",
            "content",
            "date",
            "reaction_tally",
            "reactions",
            "source_ip",
            "title",
            "url",
        ]
        .to_vec();
        let mut last = 0;
        for key in keys {
            let pos = body
                .find(&format!("\"{}\":", key))
                .unwrap_or_else(|| panic!("missing key {}", key));
            assert!(pos > last, "key {} out of order", key);
            last = pos;
        }
    }

    #[test]
    fn record_serializes_non_ascii_literally() {
        let value = record_value(&sample_record()).unwrap();
        let body = serde_json::to_string(&value).unwrap();
        assert!(body.contains("測試。"));
        assert!(!body.contains("\\u"));
    }

    #[test]
    fn error_record_shape() {
        assert_eq!(error_record(), json!({ "error": "invalid url" }));
    }

    #[tokio::test]
    async fn json_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test-1-2.json");
        let value = json!({ "articles": [record_value(&sample_record()).unwrap(), error_record()] });

        write_json(&path, &value).await.unwrap();
        let loaded = read_json(&path).await.unwrap();

        assert_eq!(loaded, value);
        assert_eq!(loaded["articles"][1]["error"], "invalid url");
    }
}
