//! Chapter body extraction.
//!
//! Finds the content container of a chapter page and rebuilds its body as a
//! small allow-listed HTML subset: `p`, `br`, `strong`, `em`, `span` (class and
//! color style only) and `h1`-`h6`. Navigation chrome is dropped on two layers:
//! elements whose class or id marks them as navigation are pruned with their
//! whole subtree, and rendered fragments whose text reads like a navigation
//! label are discarded after the fact.

use ego_tree::NodeRef;
use scraper::node::{Element, Node};
use scraper::Html;

use crate::classify::{is_navigation_element, is_navigation_text};
use crate::dom::get_attribute;
use crate::rules::NavigationRules;
use crate::sanitize::{build_attributes, escape_html};

const CONTAINER_TAGS: &[&str] = &["div", "article"];
const CONTAINER_CLASSES: &[&str] = &["entry-content", "post-content"];

/// How an element is rendered into the output subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Paragraph,
    LineBreak,
    Strong,
    Emphasis,
    Span,
    Division,
    Heading(u8),
    Anchor,
    /// Scripts, styles and page furniture, never rendered.
    Dropped,
    /// Anything else: children are rendered without a wrapper.
    Transparent,
}

impl TagKind {
    fn from_name(name: &str) -> Self {
        match name {
            "p" => TagKind::Paragraph,
            "br" => TagKind::LineBreak,
            "strong" | "b" => TagKind::Strong,
            "em" | "i" => TagKind::Emphasis,
            "span" => TagKind::Span,
            "div" => TagKind::Division,
            "h1" => TagKind::Heading(1),
            "h2" => TagKind::Heading(2),
            "h3" => TagKind::Heading(3),
            "h4" => TagKind::Heading(4),
            "h5" => TagKind::Heading(5),
            "h6" => TagKind::Heading(6),
            "a" => TagKind::Anchor,
            "script" | "style" | "nav" | "footer" | "header" => TagKind::Dropped,
            _ => TagKind::Transparent,
        }
    }
}

/// Extracts chapter bodies with a fixed rule set.
#[derive(Debug, Clone, Default)]
pub struct ChapterExtractor {
    rules: NavigationRules,
}

impl ChapterExtractor {
    pub fn new(rules: NavigationRules) -> Self {
        Self { rules }
    }

    /// Render the chapter held in `document`, or an empty string when the page
    /// has no content container.
    pub fn extract(&self, document: &Html, title: &str) -> String {
        extract_chapter_html(document.tree.root(), title, &self.rules)
    }
}

/// Locate the first content container in document order and render it under
/// an `<h1>` title line. Returns an empty string when no container exists.
///
/// The title is HTML-escaped so the section stays well-formed XHTML.
pub fn extract_chapter_html(root: NodeRef<'_, Node>, title: &str, rules: &NavigationRules) -> String {
    match find_content_container(root) {
        Some(container) => format!(
            "<h1>{}</h1>\n{}",
            escape_html(title),
            render_body(container, rules)
        ),
        None => String::new(),
    }
}

fn find_content_container(root: NodeRef<'_, Node>) -> Option<NodeRef<'_, Node>> {
    root.descendants().find(|node| {
        node.value().as_element().is_some_and(|element| {
            CONTAINER_TAGS.contains(&element.name()) && {
                let class = element.attr("class").unwrap_or("");
                CONTAINER_CLASSES.iter().any(|marker| class.contains(marker))
            }
        })
    })
}

/// Render one node of a chapter body into the allow-listed subset.
pub fn render_body(node: NodeRef<'_, Node>, rules: &NavigationRules) -> String {
    match node.value() {
        Node::Text(text) => {
            if is_navigation_text(rules, text) {
                String::new()
            } else {
                escape_html(text)
            }
        }
        Node::Element(element) => render_element(node, element, rules),
        _ => render_children(node, rules),
    }
}

fn render_element(node: NodeRef<'_, Node>, element: &Element, rules: &NavigationRules) -> String {
    if is_navigation_element(rules, node) {
        return String::new();
    }

    match TagKind::from_name(element.name()) {
        TagKind::Paragraph => {
            let content = render_children(node, rules);
            let content = content.trim();
            if content.is_empty() || is_navigation_text(rules, content) {
                return String::new();
            }
            format!("<p{}>{}</p>\n", element_attributes(node, rules), content)
        }
        TagKind::LineBreak => "<br/>\n".to_string(),
        TagKind::Strong => render_inline(node, rules, "strong"),
        TagKind::Emphasis => render_inline(node, rules, "em"),
        TagKind::Span => {
            let content = render_children(node, rules);
            if is_navigation_text(rules, &content) {
                return String::new();
            }
            let attrs = element_attributes(node, rules);
            if attrs.is_empty() {
                content
            } else {
                format!("<span{attrs}>{content}</span>")
            }
        }
        TagKind::Division | TagKind::Transparent => render_children(node, rules),
        TagKind::Heading(level) => {
            let content = render_children(node, rules);
            if is_navigation_text(rules, &content) {
                return String::new();
            }
            format!("<h{level}>{content}</h{level}>\n")
        }
        TagKind::Anchor => {
            let content = render_children(node, rules);
            if is_navigation_text(rules, &content) {
                return String::new();
            }
            content
        }
        TagKind::Dropped => String::new(),
    }
}

/// Inline wrappers (and spans, anchors, headings) are dropped when their rendered
/// content reads as navigation. The check sees the rendered children, markup and
/// entities included, so a phrase split by a tag that emits markup (such as
/// `<i>`) is not recognized.
fn render_inline(node: NodeRef<'_, Node>, rules: &NavigationRules, tag: &str) -> String {
    let content = render_children(node, rules);
    if is_navigation_text(rules, &content) {
        return String::new();
    }
    format!("<{tag}{}>{content}</{tag}>", element_attributes(node, rules))
}

fn render_children(node: NodeRef<'_, Node>, rules: &NavigationRules) -> String {
    node.children()
        .map(|child| render_body(child, rules))
        .collect()
}

fn element_attributes(node: NodeRef<'_, Node>, rules: &NavigationRules) -> String {
    build_attributes(
        rules,
        get_attribute(node, "style"),
        get_attribute(node, "class"),
    )
}
