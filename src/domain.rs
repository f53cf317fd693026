//! Domain module - core data model for extracted articles
//!
//! Plain data types produced by the extraction pipeline. Records are
//! constructed once per extraction call and never mutated afterwards.

pub mod article;

// Re-export commonly used items
pub use article::{ArticleRecord, ReactionEntry, ReactionKind, ReactionTally};
