//! Navigation classifier: decides whether text or an element is site chrome
//! (prev/next links, table-of-contents links, arrow glyphs) rather than story.

use ego_tree::NodeRef;
use scraper::node::Node;

use crate::dom::get_attribute;
use crate::rules::NavigationRules;

/// True when `text` reads like a navigation label.
///
/// The text is trimmed and lower-cased, then any of these fires:
/// a configured phrase occurs as a substring (word phrases such as "toc" must
/// stand alone), the whole text is a run of arrow or pipe symbols, or the text
/// is short and is a bare "previous"/"next" label or has an arrow next to a space.
/// Empty and whitespace-only text is never navigation.
pub fn is_navigation_text(rules: &NavigationRules, text: &str) -> bool {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return false;
    }

    if rules.phrases.iter().any(|phrase| text.contains(phrase.as_str())) {
        return true;
    }
    if let Some(word_pattern) = &rules.word_pattern {
        if word_pattern.is_match(&text) {
            return true;
        }
    }

    if rules.symbol_pattern.is_match(&text) {
        return true;
    }

    if text.len() < rules.short_text_threshold {
        if rules.short_labels.iter().any(|label| *label == text) {
            return true;
        }
        if rules
            .short_arrow_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
        {
            return true;
        }
    }

    false
}

/// True for element nodes whose class or id contains a navigation marker.
pub fn is_navigation_element(rules: &NavigationRules, node: NodeRef<'_, Node>) -> bool {
    if !node.value().is_element() {
        return false;
    }

    let class = get_attribute(node, "class").to_lowercase();
    let id = get_attribute(node, "id").to_lowercase();

    rules
        .class_markers
        .iter()
        .any(|marker| class.contains(marker.as_str()) || id.contains(marker.as_str()))
}
