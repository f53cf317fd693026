//! HTML parsing infrastructure for PTT pages
//!
//! Trait-based parsing with compiled CSS selectors held in parser structs.
//! Markup that is present but malformed never produces an error here; it
//! degrades to empty or sentinel field values, because forum markup is
//! heterogeneous across years and partial data beats an aborted batch run.

pub mod article_parser;
pub mod context;
pub mod error;
pub mod list_parser;
pub mod reaction_parser;
pub mod text_sanitizer;

// Re-export public types
pub use article_parser::ArticleParser;
pub use context::{ArticleContext, ListContext};
pub use error::{ParseError, ParseResult};
pub use list_parser::{ListEntry, ListParser};
pub use reaction_parser::ReactionParser;
pub use text_sanitizer::TextSanitizer;

use scraper::{Html, Selector};

/// Parser with contextual information about the page being parsed.
///
/// Implementations are total over their input: a malformed document yields
/// a best-effort output, never an error.
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> Self::Output;
}

/// Compile a CSS selector string into a `Selector`
pub(crate) fn compile_selector(selector: &str) -> ParseResult<Selector> {
    Selector::parse(selector).map_err(|e| ParseError::invalid_selector(selector, e))
}
