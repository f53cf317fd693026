//! Article record types
//!
//! The normalized output of one extraction call: metadata, sanitized body
//! text, the ordered reaction sequence and its aggregate tally.

use serde::{Deserialize, Serialize};

/// Classification of a single push (reaction) entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionKind {
    Agree,
    Disagree,
    Neutral,
}

impl ReactionKind {
    /// Classify a trimmed push-tag glyph. `推` agrees, `噓` disagrees and
    /// every other tag value, including corrupted ones, is neutral.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "推" => Self::Agree,
            "噓" => Self::Disagree,
            _ => Self::Neutral,
        }
    }
}

/// One counted reader reaction, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEntry {
    pub kind: ReactionKind,
    /// Author of the reaction. Entries without a user id are never counted.
    pub user_id: String,
    /// Message body with the single leading `:` separator stripped.
    pub text: String,
    /// Raw date/time string as displayed. The source format is terse and
    /// locale-specific, so the literal text is preserved unparsed.
    pub timestamp: String,
}

/// Aggregate reaction counts, maintained alongside the entry sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTally {
    /// Count of all counted entries.
    pub total: u32,
    /// Agree count minus disagree count.
    pub net: i64,
    pub agree: u32,
    pub disagree: u32,
    pub neutral: u32,
}

impl ReactionTally {
    /// Count one entry. `total` and `net` move together with the per-kind
    /// counters, so `total == agree + disagree + neutral` and
    /// `net == agree - disagree` hold at every point.
    pub fn record(&mut self, kind: ReactionKind) {
        self.total += 1;
        match kind {
            ReactionKind::Agree => {
                self.agree += 1;
                self.net += 1;
            }
            ReactionKind::Disagree => {
                self.disagree += 1;
                self.net -= 1;
            }
            ReactionKind::Neutral => self.neutral += 1,
        }
    }
}

/// Normalized record extracted from one article page.
///
/// Metadata fields hold the empty string when the corresponding markup is
/// absent; `source_ip` falls back to the literal `"None"`. Schema stability
/// is preferred over sparse absence, so no field is ever omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub board: String,
    pub article_id: String,
    pub title: String,
    pub author: String,
    pub date: String,
    /// Sanitized body text: single line, whitespace-collapsed, restricted
    /// to the character allow-list.
    pub content: String,
    /// Dotted-quad string, or the sentinel `"None"` when no IP line exists.
    pub source_ip: String,
    pub reactions: Vec<ReactionEntry>,
    pub reaction_tally: ReactionTally,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_classification() {
        assert_eq!(ReactionKind::from_tag("推"), ReactionKind::Agree);
        assert_eq!(ReactionKind::from_tag("噓"), ReactionKind::Disagree);
        assert_eq!(ReactionKind::from_tag("→"), ReactionKind::Neutral);
        assert_eq!(ReactionKind::from_tag(""), ReactionKind::Neutral);
        assert_eq!(ReactionKind::from_tag("garbage"), ReactionKind::Neutral);
    }

    #[test]
    fn tally_stays_consistent() {
        let mut tally = ReactionTally::default();
        for kind in [
            ReactionKind::Agree,
            ReactionKind::Agree,
            ReactionKind::Disagree,
            ReactionKind::Neutral,
        ] {
            tally.record(kind);
            assert_eq!(tally.total, tally.agree + tally.disagree + tally.neutral);
            assert_eq!(tally.net, i64::from(tally.agree) - i64::from(tally.disagree));
        }
        assert_eq!(tally.total, 4);
        assert_eq!(tally.net, 1);
    }
}
