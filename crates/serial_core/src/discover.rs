//! Chapter link discovery on a serial's table-of-contents page.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::Html;

use crate::chapter::Chapter;
use crate::dom::{extract_text, get_attribute};

pub const DEFAULT_TOC_MARKER: &str = "table-of-contents";
const EXCLUDED_TITLE_PHRASE: &str = "table of contents";

#[allow(clippy::expect_used)]
static CHAPTER_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(chapter|prologue|epilogue|interlude|\d+\.\d+)").expect("CHAPTER_TITLE regex")
});

/// Decides which anchors on a listing page point at chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLinkRules {
    domain_marker: String,
    toc_marker: String,
}

impl ChapterLinkRules {
    pub fn new(domain_marker: impl Into<String>) -> Self {
        Self {
            domain_marker: domain_marker.into(),
            toc_marker: DEFAULT_TOC_MARKER.to_string(),
        }
    }

    pub fn with_toc_marker(mut self, toc_marker: impl Into<String>) -> Self {
        self.toc_marker = toc_marker.into();
        self
    }

    pub fn domain_marker(&self) -> &str {
        &self.domain_marker
    }

    /// The link must stay on the serial's site and must not point back at the listing.
    pub fn accepts_href(&self, href: &str) -> bool {
        !href.is_empty()
            && href.contains(self.domain_marker.as_str())
            && (self.toc_marker.is_empty() || !href.contains(self.toc_marker.as_str()))
    }

    /// Chapter-like anchor text that is not itself a table-of-contents label.
    pub fn is_chapter_title(&self, text: &str) -> bool {
        CHAPTER_TITLE.is_match(text) && !text.to_lowercase().contains(EXCLUDED_TITLE_PHRASE)
    }
}

/// Collect chapter links in pre-order document order.
///
/// Every qualifying anchor yields a chapter; repeated links are kept.
pub fn discover_chapter_links(root: NodeRef<'_, Node>, rules: &ChapterLinkRules) -> Vec<Chapter> {
    let mut chapters = Vec::new();

    for node in root.descendants() {
        let is_anchor = node
            .value()
            .as_element()
            .is_some_and(|element| element.name() == "a");
        if !is_anchor {
            continue;
        }

        let href = get_attribute(node, "href");
        if !rules.accepts_href(href) {
            continue;
        }

        let text = extract_text(node);
        if text.is_empty() || !rules.is_chapter_title(&text) {
            continue;
        }

        chapters.push(Chapter::new(text.trim(), href, chapters.len()));
    }

    chapters.sort_by_key(|chapter| chapter.index);
    chapters
}

/// Discover the chapter index of a parsed listing page.
pub fn discover_chapters(document: &Html, rules: &ChapterLinkRules) -> Vec<Chapter> {
    discover_chapter_links(document.tree.root(), rules)
}
