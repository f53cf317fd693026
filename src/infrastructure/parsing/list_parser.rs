//! Board listing-page parser
//!
//! Extracts the article references of one `index<N>.html` page. Entries
//! without a link (deleted articles) are skipped and logged; one malformed
//! snippet never aborts the page.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::ContextualParser;
use super::compile_selector;
use super::context::ListContext;
use super::error::ParseResult;

/// One article reference on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Article identifier, the link's last path segment without `.html`
    pub article_id: String,

    /// Absolute URL of the article page
    pub url: String,
}

/// Parser for board listing pages.
pub struct ListParser {
    entry: Selector,
    link: Selector,
}

impl ListParser {
    /// Create a new listing parser
    pub fn new() -> ParseResult<Self> {
        Ok(Self {
            entry: compile_selector("div.r-ent")?,
            link: compile_selector("a")?,
        })
    }

    fn extract_entry(&self, element: ElementRef, context: &ListContext) -> Option<ListEntry> {
        let href = element.select(&self.link).next()?.value().attr("href")?;
        let url = self.resolve_url(href, &context.page_url)?;

        let file = href.rsplit('/').next()?;
        let article_id = file.trim_end_matches(".html").to_string();
        if article_id.is_empty() {
            return None;
        }

        Some(ListEntry { article_id, url })
    }

    /// Resolve a listing href against the page URL. PTT emits absolute
    /// paths, but relative links resolve too.
    fn resolve_url(&self, href: &str, page_url: &str) -> Option<String> {
        if href.starts_with("http") {
            return Some(href.to_string());
        }
        let base = Url::parse(page_url).ok()?;
        base.join(href).ok().map(|joined| joined.to_string())
    }
}

impl ContextualParser for ListParser {
    type Output = Vec<ListEntry>;
    type Context = ListContext;

    /// Extract all article references of a listing page in page order.
    fn parse_with_context(&self, html: &Html, context: &ListContext) -> Vec<ListEntry> {
        let mut entries = Vec::new();

        for element in html.select(&self.entry) {
            match self.extract_entry(element, context) {
                Some(entry) => entries.push(entry),
                None => debug!(
                    "Skipping listing entry without an article link on {}",
                    context.page_url
                ),
            }
        }

        entries
    }
}
