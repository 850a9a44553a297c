//! Serial core: pure chapter discovery and content extraction over parsed HTML.
mod chapter;
mod classify;
mod discover;
mod dom;
mod extract;
mod rules;
mod sanitize;
mod selection;

pub use chapter::Chapter;
pub use classify::{is_navigation_element, is_navigation_text};
pub use discover::{discover_chapter_links, discover_chapters, ChapterLinkRules, DEFAULT_TOC_MARKER};
pub use dom::{extract_text, get_attribute};
pub use extract::{extract_chapter_html, render_body, ChapterExtractor};
pub use rules::{
    NavigationRules, RuleSpec, RulesError, DEFAULT_SHORT_TEXT_THRESHOLD, DEFAULT_SYMBOL_PATTERN,
};
pub use sanitize::{build_attributes, escape_html, map_color_class, sanitize_style};
pub use selection::{latest_chapters, parse_chapter_number, ChapterRange, SelectionError};

/// Re-exported so callers can parse pages without naming `scraper` themselves.
pub use scraper::Html;
