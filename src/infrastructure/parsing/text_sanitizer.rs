//! Body-text sanitizer
//!
//! Reduces an article's remaining text fragments to a single-line,
//! whitespace-normalized string restricted to a strict character
//! allow-list. Unrecognized symbols, emoji and most non-CJK punctuation
//! are silently removed, never escaped or replaced with a placeholder.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fragments starting with this glyph are "origin station" footer lines.
const ORIGIN_STATION_MARKER: char = '※';

/// Fragments starting with this glyph are "via" footer lines.
const VIA_MARKER: char = '◆';

/// Everything NOT matched by a class member below is deleted from body
/// text. The allow-list is enumerated explicitly: CJK ideographs, a fixed
/// set of full-width punctuation, whitespace, word characters and a few
/// URL-ish symbols.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[^",
        "\\u{4E00}-\\u{9FA5}", // CJK ideographs
        "\\u{3002}",           // 。
        "\\u{FF1B}",           // ；
        "\\u{FF0C}",           // ，
        "\\u{FF1A}",           // ：
        "\\u{201C}\\u{201D}",  // “ ”
        "\\u{FF08}\\u{FF09}",  // （ ）
        "\\u{3001}",           // 、
        "\\u{FF1F}",           // ？
        "\\u{300A}\\u{300B}",  // 《 》
        "\\s\\w",
        ":/\\-_.?~%()",
        "]",
    ))
    .expect("disallowed-character class is a valid pattern")
});

/// Runs of whitespace, including newlines, collapse to one space.
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace-run class is a valid pattern"));

/// Sanitizer for article body text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSanitizer;

impl TextSanitizer {
    /// Create a new sanitizer
    pub fn new() -> Self {
        Self
    }

    /// Sanitize the collected text fragments of one article body.
    ///
    /// Fragments arrive trimmed at their boundaries, in document order.
    /// Boilerplate footer lines are dropped, the remaining text is
    /// restricted to the allow-list, fragments that end up empty or that
    /// echo the article's own identifier are discarded, and the survivors
    /// are joined into one whitespace-collapsed line. Empty input yields
    /// an empty string.
    pub fn sanitize(&self, fragments: &[String], article_id: &str) -> String {
        let mut kept: Vec<String> = Vec::new();

        for fragment in fragments {
            if fragment.starts_with(ORIGIN_STATION_MARKER) || fragment.starts_with(VIA_MARKER) {
                continue;
            }
            if fragment.starts_with("--") {
                continue;
            }

            let filtered = DISALLOWED.replace_all(fragment, "");
            if filtered.is_empty() {
                continue;
            }
            if filtered.contains(article_id) {
                continue;
            }
            kept.push(filtered.into_owned());
        }

        let joined = kept.join(" ");
        WHITESPACE_RUN.replace_all(&joined, " ").trim().to_string()
    }
}
