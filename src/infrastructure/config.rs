//! Configuration constants and helpers
//!
//! Site constants for the PTT web frontend and the crawler behavior knobs
//! surfaced on the command line.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// PTT web frontend constants
pub mod ptt {
    /// Base URL for the PTT web frontend
    pub const BASE_URL: &str = "https://www.ptt.cc";

    /// Cookie asserting the over-18 confirmation, required for boards
    /// behind the age gate
    pub const OVER18_COOKIE: &str = "over18=1";
}

/// URL builders for board and article pages
pub mod utils {
    use super::ptt::BASE_URL;

    /// URL of one page of a board's article listing
    pub fn board_index_url(board: &str, index: u32) -> String {
        format!("{}/bbs/{}/index{}.html", BASE_URL, board, index)
    }

    /// URL of a board's newest listing page
    pub fn board_landing_url(board: &str) -> String {
        format!("{}/bbs/{}/index.html", BASE_URL, board)
    }

    /// URL of a single article page
    pub fn article_url(board: &str, article_id: &str) -> String {
        format!("{}/bbs/{}/{}.html", BASE_URL, board, article_id)
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Directory output JSON files are written to
    pub out_dir: PathBuf,

    /// Delay between listing-page fetches in milliseconds
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            request_delay_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_builders() {
        assert_eq!(
            utils::board_index_url("PublicServan", 3),
            "https://www.ptt.cc/bbs/PublicServan/index3.html"
        );
        assert_eq!(
            utils::board_landing_url("Gossiping"),
            "https://www.ptt.cc/bbs/Gossiping/index.html"
        );
        assert_eq!(
            utils::article_url("PublicServan", "M.1127742013.A.240"),
            "https://www.ptt.cc/bbs/PublicServan/M.1127742013.A.240.html"
        );
    }
}
