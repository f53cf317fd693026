//! Parsing context objects
//!
//! Carry the identifiers the extractor embeds into records; the parsers
//! themselves hold no per-page state.

/// Context for parsing one article page
#[derive(Debug, Clone)]
pub struct ArticleContext {
    /// Full URL of the article page
    pub url: String,

    /// Board the article belongs to
    pub board: String,

    /// Article identifier, e.g. "M.1127742013.A.240"
    pub article_id: String,
}

impl ArticleContext {
    /// Create a new article context
    pub fn new(url: &str, board: &str, article_id: &str) -> Self {
        Self {
            url: url.to_string(),
            board: board.to_string(),
            article_id: article_id.to_string(),
        }
    }
}

/// Context for parsing one board listing page
#[derive(Debug, Clone)]
pub struct ListContext {
    /// URL of the listing page, used to resolve relative article links
    pub page_url: String,
}

impl ListContext {
    /// Create a new listing context
    pub fn new(page_url: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
        }
    }
}
