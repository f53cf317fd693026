//! Article page extractor
//!
//! Isolates an article's metadata, collects the remaining body text for
//! sanitization and hands push elements to the reaction parser. Markup
//! that is present but malformed never aborts extraction: missing pieces
//! degrade to empty or sentinel values and the record is still produced.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use super::ContextualParser;
use super::compile_selector;
use super::context::ArticleContext;
use super::error::ParseResult;
use super::reaction_parser::ReactionParser;
use super::text_sanitizer::TextSanitizer;
use crate::domain::article::{ArticleRecord, ReactionTally};

/// Sentinel recorded when no originating IP can be found.
pub const NO_SOURCE_IP: &str = "None";

/// Line prefix carrying the author's originating IP.
const IP_LINE_MARKER: &str = "※ 發信站:";

/// Subtrees with these classes hold metadata or reactions; they are
/// excluded from body-text extraction so that neither leaks into prose.
const NON_BODY_CLASSES: [&str; 3] = ["article-metaline", "article-metaline-right", "push"];

/// First dotted-quad numeric pattern on the IP line.
static IP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+").expect("dotted-quad pattern is valid")
});

/// Parser for extracting one structured record from an article page.
pub struct ArticleParser {
    main_content: Selector,
    metaline: Selector,
    meta_value: Selector,
    push: Selector,
    sanitizer: TextSanitizer,
    reactions: ReactionParser,
}

impl ArticleParser {
    /// Create a new article parser
    pub fn new() -> ParseResult<Self> {
        Ok(Self {
            main_content: compile_selector("#main-content")?,
            metaline: compile_selector("div.article-metaline")?,
            meta_value: compile_selector("span.article-meta-value")?,
            push: compile_selector("div.push")?,
            sanitizer: TextSanitizer::new(),
            reactions: ReactionParser::new()?,
        })
    }

    /// Extract a record from raw markup.
    pub fn extract(&self, markup: &str, context: &ArticleContext) -> ArticleRecord {
        let html = Html::parse_document(markup);
        self.parse_with_context(&html, context)
    }

    /// Author, title and date from the metadata block.
    ///
    /// The mapping is strictly positional: the first `div.article-metaline`
    /// carries the author, the second the title, the third the date. A
    /// reordered page layout would mislabel these silently; the mapping
    /// follows the forum's long-standing markup and is kept as-is. Missing
    /// slots stay empty.
    fn extract_metadata(&self, main: ElementRef) -> (String, String, String) {
        let metas: Vec<ElementRef> = main.select(&self.metaline).collect();
        let slot = |index: usize| -> String {
            metas
                .get(index)
                .and_then(|meta| meta.select(&self.meta_value).next())
                .map(|value| value.text().collect::<String>())
                .unwrap_or_default()
        };
        (slot(0), slot(1), slot(2))
    }

    /// Leaf text fragments of the content region, trimmed, in document
    /// order. Subtrees carrying metadata or push entries are excluded,
    /// which removes them from body text before sanitization.
    fn collect_body_fragments(&self, region: ElementRef) -> Vec<String> {
        let region_id = region.id();
        let mut fragments = Vec::new();

        for node in region.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            let excluded = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != region_id)
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|element| {
                    NON_BODY_CLASSES
                        .iter()
                        .any(|class| element.classes().any(|c| c == *class))
                });
            if !excluded {
                fragments.push(trimmed.to_string());
            }
        }

        fragments
    }

    /// The originating IP rides on a footer line like
    /// `※ 發信站: 批踢踢實業坊(ptt.cc), 來自: 1.2.3.4`. Absence of the
    /// marker or of a dotted quad is a normal outcome, recorded as the
    /// sentinel.
    fn extract_source_ip(&self, fragments: &[String]) -> String {
        fragments
            .iter()
            .find(|fragment| fragment.starts_with(IP_LINE_MARKER))
            .and_then(|line| IP_PATTERN.find(line))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NO_SOURCE_IP.to_string())
    }
}

impl ContextualParser for ArticleParser {
    type Output = ArticleRecord;
    type Context = ArticleContext;

    /// Extract one record from an article page.
    ///
    /// A page without a main content region still yields a best-effort
    /// record: the whole document becomes the content region, metadata
    /// stays empty and no reactions are reported.
    fn parse_with_context(&self, html: &Html, context: &ArticleContext) -> ArticleRecord {
        let region = html.select(&self.main_content).next();

        let (author, title, date) = match region {
            Some(main) => self.extract_metadata(main),
            None => {
                debug!(
                    "No main content region in {}; treating whole document as content",
                    context.article_id
                );
                Default::default()
            }
        };

        let (reactions, reaction_tally) = match region {
            Some(main) => {
                let pushes: Vec<ElementRef> = main.select(&self.push).collect();
                self.reactions.classify(&pushes)
            }
            None => (Vec::new(), ReactionTally::default()),
        };

        let content_region = region.unwrap_or_else(|| html.root_element());
        let fragments = self.collect_body_fragments(content_region);
        let source_ip = self.extract_source_ip(&fragments);
        let content = self.sanitizer.sanitize(&fragments, &context.article_id);

        ArticleRecord {
            url: context.url.clone(),
            board: context.board.clone(),
            article_id: context.article_id.clone(),
            title,
            author,
            date,
            content,
            source_ip,
            reactions,
            reaction_tally,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::ReactionKind;

    const ARTICLE_ID: &str = "M.1127742013.A.240";

    fn context() -> ArticleContext {
        ArticleContext::new(
            "https://www.ptt.cc/bbs/Test/M.1127742013.A.240.html",
            "Test",
            ARTICLE_ID,
        )
    }

    fn extract(markup: &str) -> ArticleRecord {
        ArticleParser::new().unwrap().extract(markup, &context())
    }

    fn metaline(tag: &str, value: &str) -> String {
        format!(
            "<div class=\"article-metaline\">\
             <span class=\"article-meta-tag\">{}</span>\
             <span class=\"article-meta-value\">{}</span>\
             </div>",
            tag, value
        )
    }

    fn full_article() -> String {
        format!(
            "<html><body><div id=\"main-content\">\
             {}{}{}\
             <div class=\"article-metaline-right\">\
             <span class=\"article-meta-value\">Test</span>\
             </div>\
             Hello world! 測試。\n\
             <span class=\"f2\">※ 發信站: 批踢踢實業坊(ptt.cc), 來自: 123.45.67.89</span>\n\
             <span class=\"f2\">※ 文章網址: \
             <a href=\"https://www.ptt.cc/bbs/Test/M.1127742013.A.240.html\">\
             https://www.ptt.cc/bbs/Test/M.1127742013.A.240.html</a></span>\n\
             <div class=\"push\">\
             <span class=\"push-tag\">推 </span>\
             <span class=\"push-userid\">bob</span>\
             <span class=\"push-content\">:nice post</span>\
             <span class=\"push-ipdatetime\">07/12 10:00</span>\
             </div>\
             </div></body></html>",
            metaline("作者", "alice"),
            metaline("標題", "Hello"),
            metaline("時間", "Mon Jan 1"),
        )
    }

    #[test]
    fn extracts_full_article() {
        let record = extract(&full_article());

        assert_eq!(record.author, "alice");
        assert_eq!(record.title, "Hello");
        assert_eq!(record.date, "Mon Jan 1");
        assert!(record.content.contains("Hello world 測試。"));
        assert_eq!(record.source_ip, "123.45.67.89");

        assert_eq!(record.reactions.len(), 1);
        assert_eq!(record.reactions[0].kind, ReactionKind::Agree);
        assert_eq!(record.reactions[0].user_id, "bob");
        assert_eq!(record.reactions[0].text, "nice post");

        assert_eq!(record.reaction_tally.total, 1);
        assert_eq!(record.reaction_tally.agree, 1);
        assert_eq!(record.reaction_tally.disagree, 0);
        assert_eq!(record.reaction_tally.neutral, 0);
        assert_eq!(record.reaction_tally.net, 1);
    }

    #[test]
    fn metadata_never_leaks_into_content() {
        let record = extract(&full_article());
        assert!(!record.content.contains("alice"));
        assert!(!record.content.contains("Mon Jan 1"));
        assert!(!record.content.contains("nice post"));
        assert!(!record.content.contains(ARTICLE_ID));
    }

    #[test]
    fn missing_metadata_slots_stay_empty() {
        let markup = format!(
            "<div id=\"main-content\">{}body</div>",
            metaline("作者", "alice")
        );
        let record = extract(&markup);
        assert_eq!(record.author, "alice");
        assert_eq!(record.title, "");
        assert_eq!(record.date, "");
        assert_eq!(record.content, "body");
    }

    #[test]
    fn missing_main_content_yields_empty_record() {
        let record = extract("<html><body></body></html>");
        assert_eq!(record.author, "");
        assert_eq!(record.title, "");
        assert_eq!(record.date, "");
        assert_eq!(record.content, "");
        assert_eq!(record.source_ip, NO_SOURCE_IP);
        assert!(record.reactions.is_empty());
        assert_eq!(record.reaction_tally, ReactionTally::default());
    }

    #[test]
    fn missing_main_content_still_extracts_body() {
        let record = extract("<html><body><p>loose prose</p></body></html>");
        assert_eq!(record.content, "loose prose");
        assert_eq!(record.title, "");
    }

    #[test]
    fn missing_ip_line_records_sentinel() {
        let record = extract("<div id=\"main-content\">no footer here</div>");
        assert_eq!(record.source_ip, NO_SOURCE_IP);
    }

    #[test]
    fn ip_line_without_quad_records_sentinel() {
        let record =
            extract("<div id=\"main-content\">※ 發信站: 批踢踢實業坊(ptt.cc)</div>");
        assert_eq!(record.source_ip, NO_SOURCE_IP);
    }

    #[test]
    fn identifiers_come_from_context() {
        let record = extract("<div id=\"main-content\"></div>");
        assert_eq!(record.board, "Test");
        assert_eq!(record.article_id, ARTICLE_ID);
        assert_eq!(
            record.url,
            "https://www.ptt.cc/bbs/Test/M.1127742013.A.240.html"
        );
    }
}
