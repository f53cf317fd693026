//! PTT web crawler - board pages to structured JSON records
//!
//! This crate fetches discussion-board pages from the web version of PTT
//! and converts each raw HTML article into a normalized structured record:
//! title, author, date, sanitized body text, originating IP and itemized
//! reader reactions with aggregate counts.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::crawler::Crawler;
pub use domain::article::{ArticleRecord, ReactionEntry, ReactionKind, ReactionTally};
pub use infrastructure::http_client::{FetchError, HttpClient, HttpClientConfig};
pub use infrastructure::parsing::{ArticleParser, ContextualParser};
