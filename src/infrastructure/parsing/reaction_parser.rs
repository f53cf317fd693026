//! Push (reaction) entry classification
//!
//! Turns raw `div.push` elements into typed, counted reaction entries.
//! The tally is incremented alongside the sequence, never recomputed by
//! re-scanning, so it is consistent with the entries by construction.

use scraper::{ElementRef, Selector};
use tracing::debug;

use super::compile_selector;
use super::error::ParseResult;
use crate::domain::article::{ReactionEntry, ReactionKind, ReactionTally};

/// Characters trimmed from the edges of push sub-fields.
const FIELD_TRIM: &[char] = &[' ', '\t', '\n', '\r'];

/// Parser for the push sub-elements of an article page.
pub struct ReactionParser {
    tag: Selector,
    user_id: Selector,
    content: Selector,
    ipdatetime: Selector,
}

impl ReactionParser {
    /// Create a new reaction parser
    pub fn new() -> ParseResult<Self> {
        Ok(Self {
            tag: compile_selector("span.push-tag")?,
            user_id: compile_selector("span.push-userid")?,
            content: compile_selector("span.push-content")?,
            ipdatetime: compile_selector("span.push-ipdatetime")?,
        })
    }

    /// Classify a sequence of raw push elements in page order.
    ///
    /// Elements without a tag sub-element or without a user id are skipped
    /// entirely; they appear in neither the sequence nor the tally.
    /// Missing message text or timestamp degrades to an empty string.
    pub fn classify(&self, elements: &[ElementRef]) -> (Vec<ReactionEntry>, ReactionTally) {
        let mut reactions = Vec::new();
        let mut tally = ReactionTally::default();

        for element in elements {
            let Some(tag) = self.field_text(element, &self.tag) else {
                debug!("Skipping push entry without a tag");
                continue;
            };
            let user_id = match self.field_text(element, &self.user_id) {
                Some(user_id) if !user_id.is_empty() => user_id,
                _ => {
                    debug!("Skipping push entry without a user id");
                    continue;
                }
            };

            let kind = ReactionKind::from_tag(&tag);
            let text = self.message_text(element);
            let timestamp = self
                .field_text(element, &self.ipdatetime)
                .unwrap_or_default();

            tally.record(kind);
            reactions.push(ReactionEntry {
                kind,
                user_id,
                text,
                timestamp,
            });
        }

        (reactions, tally)
    }

    /// First matching sub-element's text, trimmed; `None` when the
    /// sub-element is absent.
    fn field_text(&self, element: &ElementRef, selector: &Selector) -> Option<String> {
        element.select(selector).next().map(|e| {
            e.text()
                .collect::<String>()
                .trim_matches(FIELD_TRIM)
                .to_string()
        })
    }

    /// Message body: all text of the content span joined, with the single
    /// leading `:` separator (a markup artifact, not content) dropped
    /// before trimming.
    fn message_text(&self, element: &ElementRef) -> String {
        let Some(content) = element.select(&self.content).next() else {
            return String::new();
        };
        let joined = content.text().collect::<Vec<_>>().join(" ");
        let stripped = joined.strip_prefix(':').unwrap_or(&joined);
        stripped.trim_matches(FIELD_TRIM).to_string()
    }
}
