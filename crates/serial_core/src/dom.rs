use ego_tree::NodeRef;
use scraper::node::Node;

/// First value for `key` on an element node, empty when absent or not an element.
pub fn get_attribute<'a>(node: NodeRef<'a, Node>, key: &str) -> &'a str {
    node.value()
        .as_element()
        .and_then(|element| element.attr(key))
        .unwrap_or("")
}

/// Concatenation of every descendant text payload in document order, unescaped.
pub fn extract_text(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|descendant| descendant.value().as_text())
        .map(|text| &**text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_element<'a>(doc: &'a Html, name: &str) -> NodeRef<'a, Node> {
        doc.tree
            .root()
            .descendants()
            .find(|n| n.value().as_element().map(|e| e.name()) == Some(name))
            .unwrap()
    }

    #[test]
    fn attribute_lookup_returns_value_or_empty() {
        let doc = Html::parse_document(r#"<div class="test-class" id="test-id"></div>"#);
        let div = first_element(&doc, "div");
        assert_eq!(get_attribute(div, "class"), "test-class");
        assert_eq!(get_attribute(div, "id"), "test-id");
        assert_eq!(get_attribute(div, "style"), "");
    }

    #[test]
    fn duplicate_attribute_keeps_first() {
        let doc = Html::parse_document(r#"<div class="first" class="second"></div>"#);
        assert_eq!(get_attribute(first_element(&doc, "div"), "class"), "first");
    }

    #[test]
    fn text_lookup_on_text_node_is_empty_attribute() {
        let doc = Html::parse_document("<p>hello</p>");
        let p = first_element(&doc, "p");
        let text = p.first_child().unwrap();
        assert_eq!(get_attribute(text, "class"), "");
    }

    #[test]
    fn nested_text_is_concatenated_without_escaping() {
        let doc = Html::parse_document("<div><p>Hello</p><p>World &amp; <b>more</b></p></div>");
        assert_eq!(extract_text(first_element(&doc, "div")), "HelloWorld & more");
    }
}
