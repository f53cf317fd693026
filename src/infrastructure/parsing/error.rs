//! Parsing error types
//!
//! Errors here are limited to construction-time selector problems.
//! Malformed article markup never raises: missing metadata becomes an
//! empty string, a missing IP line becomes the `"None"` sentinel, and
//! broken reaction entries are skipped.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl ParseError {
    /// Create an invalid selector error
    pub fn invalid_selector(selector: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
