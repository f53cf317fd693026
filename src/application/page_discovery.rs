//! Board page discovery
//!
//! Resolves the last available listing index of a board, so a range
//! endpoint of `-1` can mean "up to the newest page".

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::infrastructure::config::utils;
use crate::infrastructure::http_client::HttpClient;

/// Service for discovering the newest listing index of a board.
pub struct PageDiscoveryService {
    http_client: HttpClient,
}

impl PageDiscoveryService {
    /// Create a new page discovery service
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Find the last listing index of a board.
    ///
    /// The newest page is served at `index.html` and its previous-page
    /// button links to `index<N>.html`, so the newest index is `N + 1`.
    /// A board short enough to have no previous-page button is index 1.
    pub async fn find_last_page(&self, board: &str) -> Result<u32> {
        let url = utils::board_landing_url(board);
        info!("🔍 Resolving last page of board {} via {}", board, url);

        let markup = self
            .http_client
            .fetch_html_string(&url)
            .await
            .with_context(|| format!("failed to fetch landing page of board {}", board))?;

        let last = Self::last_page_from_markup(&markup, board)?;
        info!("🎯 Board {} ends at index {}", board, last);
        Ok(last)
    }

    /// Locate the previous-page button in raw markup.
    fn last_page_from_markup(markup: &str, board: &str) -> Result<u32> {
        let pattern = format!(
            "href=\"/bbs/{}/index(\\d+)\\.html\">&lsaquo;",
            regex::escape(board)
        );
        let re = Regex::new(&pattern).context("previous-page pattern")?;

        let Some(captures) = re.captures(markup) else {
            warn!(
                "No previous-page link found for board {}; assuming a single page",
                board
            );
            return Ok(1);
        };

        let index: u32 = captures[1].parse().context("previous-page index")?;
        Ok(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_previous_button_plus_one() {
        let markup = "<a class=\"btn wide\" \
                      href=\"/bbs/PublicServan/index39181.html\">&lsaquo; 上頁</a>";
        let last = PageDiscoveryService::last_page_from_markup(markup, "PublicServan").unwrap();
        assert_eq!(last, 39182);
    }

    #[test]
    fn missing_previous_button_means_single_page() {
        let markup = "<a class=\"btn wide disabled\">&lsaquo; 上頁</a>";
        let last = PageDiscoveryService::last_page_from_markup(markup, "TinyBoard").unwrap();
        assert_eq!(last, 1);
    }

    #[test]
    fn other_boards_do_not_match() {
        let markup = "<a href=\"/bbs/Other/index5.html\">&lsaquo; 上頁</a>";
        let last = PageDiscoveryService::last_page_from_markup(markup, "TinyBoard").unwrap();
        assert_eq!(last, 1);
    }
}
