//! Command-line entry point for the PTT web crawler.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use ptt_crawler::application::Crawler;
use ptt_crawler::infrastructure::config::CrawlerConfig;
use ptt_crawler::infrastructure::http_client::{HttpClient, HttpClientConfig};
use ptt_crawler::infrastructure::logging::init_logging;

/// A crawler for the web version of PTT, the largest online community in
/// Taiwan. Input: board name and page indices (or article ID). Output:
/// BOARD_NAME-START_INDEX-END_INDEX.json (or BOARD_NAME-ID.json).
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("target").required(true).args(["index", "article"])))]
struct Cli {
    /// Board name
    #[arg(short, long)]
    board: String,

    /// Start and end index; an end of -1 resolves to the last page
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["START_INDEX", "END_INDEX"],
        allow_negative_numbers = true
    )]
    index: Option<Vec<i64>>,

    /// Article ID
    #[arg(short, long)]
    article: Option<String>,

    /// Output directory for JSON files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 3)]
    timeout: u64,

    /// Delay between listing-page fetches in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let http_config = HttpClientConfig {
        timeout_seconds: cli.timeout,
        danger_accept_invalid_certs: cli.insecure,
        ..HttpClientConfig::default()
    };
    let crawler_config = CrawlerConfig {
        out_dir: cli.out_dir.clone(),
        request_delay_ms: cli.delay_ms,
    };
    let crawler = Crawler::new(HttpClient::with_config(http_config)?, crawler_config)?;

    let path = if let Some(range) = &cli.index {
        let start =
            u32::try_from(range[0]).context("start index must be non-negative")?;
        crawler.crawl_range(&cli.board, start, range[1]).await?
    } else if let Some(article_id) = &cli.article {
        crawler.crawl_article(&cli.board, article_id).await?
    } else {
        unreachable!("clap enforces exactly one of --index / --article")
    };

    println!("{}", path.display());
    Ok(())
}
