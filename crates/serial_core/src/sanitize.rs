use crate::rules::NavigationRules;

/// Keep an inline style only when it sets a font color.
pub fn sanitize_style(style: &str) -> &str {
    let trimmed = style.trim();
    if !trimmed.is_empty() && trimmed.contains("color:") {
        style
    } else {
        ""
    }
}

/// Map a raw class string onto a canonical color name.
///
/// Markers are tried in declared order and the first substring hit wins.
/// Without a hit the lower-cased, trimmed class is returned as is.
pub fn map_color_class(rules: &NavigationRules, class: &str) -> String {
    let class = class.trim().to_lowercase();
    rules
        .color_classes
        .iter()
        .find(|(marker, _)| class.contains(marker.as_str()))
        .map(|(_, color)| color.clone())
        .unwrap_or(class)
}

/// Build the ` class="…" style="…"` fragment for an allow-listed element.
pub fn build_attributes(rules: &NavigationRules, style: &str, class: &str) -> String {
    let mut attrs = String::new();

    if !class.is_empty() {
        let class = map_color_class(rules, class);
        attrs.push_str(&format!(r#" class="{}""#, escape_html(&class)));
    }

    if !style.is_empty() {
        let style = sanitize_style(style);
        if !style.is_empty() {
            attrs.push_str(&format!(r#" style="{}""#, escape_html(style)));
        }
    }

    attrs
}

/// Escape the five HTML-significant characters using numeric references for quotes.
///
/// Characters that XML 1.0 does not allow (C0 controls other than tab, newline
/// and carriage return, and the U+FFFE/U+FFFF noncharacters) are dropped.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            c if !is_xml_char(c) => {}
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_drops_xml_illegal_characters() {
        assert_eq!(escape_html("a\u{1}b\u{b}c\u{fffe}"), "abc");
        assert_eq!(escape_html("line\n\ttab\r"), "line\n\ttab\r");
        assert_eq!(escape_html("\u{7f}é😀"), "\u{7f}é😀");
    }

    #[test]
    fn escape_matches_numeric_quote_references() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&#34;x&#34;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn style_keeps_original_spacing() {
        assert_eq!(sanitize_style(" color: red; "), " color: red; ");
    }

    #[test]
    fn whitespace_class_yields_empty_class_attribute() {
        assert_eq!(build_attributes(NavigationRules::standard(), "", "  "), r#" class="""#);
    }
}
