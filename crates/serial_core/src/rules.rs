//! Navigation rule set shared by the classifier, the sanitizer and the extractor.
//!
//! `RuleSpec` is the plain, serializable form that configuration files carry.
//! `NavigationRules` is the compiled, immutable form handed to the pure functions.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Run of directional arrows, guillemets or pipes and nothing else.
pub const DEFAULT_SYMBOL_PATTERN: &str = r"^(?:←|→|«|»|\|)+$";

/// Texts shorter than this (in bytes) are candidates for the short-label rule.
pub const DEFAULT_SHORT_TEXT_THRESHOLD: usize = 30;

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("invalid symbol pattern {pattern:?}: {source}")]
    SymbolPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid word phrase set: {0}")]
    WordPhrases(#[source] regex::Error),
}

/// Serializable navigation rule configuration. Missing fields fall back to the
/// built-in WordPress serial defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    /// Phrases matched as substrings of the normalized text.
    pub phrases: Vec<String>,
    /// Short dictionary-like phrases that only match as standalone words.
    pub word_phrases: Vec<String>,
    /// Substrings of a class or id marking an element as navigation chrome.
    pub class_markers: Vec<String>,
    pub symbol_pattern: String,
    /// Exact labels rejected when the text is short.
    pub short_labels: Vec<String>,
    /// Arrow-adjacent-to-space fragments rejected when the text is short.
    pub short_arrow_markers: Vec<String>,
    pub short_text_threshold: usize,
    /// `(marker, canonical color)` pairs, tried in declared order.
    pub color_classes: Vec<(String, String)>,
}

impl Default for RuleSpec {
    fn default() -> Self {
        Self {
            phrases: strings(&[
                "previous chapter",
                "next chapter",
                "← previous",
                "next →",
                "table of contents",
                "chapter index",
                "first chapter",
                "last chapter",
            ]),
            word_phrases: strings(&["toc"]),
            class_markers: strings(&[
                "navigation",
                "nav",
                "chapter-nav",
                "post-nav",
                "entry-nav",
                "pagination",
                "prev-next",
                "chapter-links",
            ]),
            symbol_pattern: DEFAULT_SYMBOL_PATTERN.to_string(),
            short_labels: strings(&["previous", "next"]),
            short_arrow_markers: strings(&["← ", " →"]),
            short_text_threshold: DEFAULT_SHORT_TEXT_THRESHOLD,
            color_classes: [
                ("has-red-color", "red"),
                ("has-blue-color", "blue"),
                ("has-green-color", "green"),
                ("has-purple-color", "purple"),
                ("has-orange-color", "orange"),
                ("has-yellow-color", "yellow"),
                ("has-brown-color", "brown"),
                ("has-pink-color", "pink"),
                ("has-cyan-color", "cyan"),
                ("has-gray-color", "gray"),
                ("has-grey-color", "gray"),
                ("has-gold-color", "gold"),
                ("has-silver-color", "silver"),
                ("has-crimson-color", "crimson"),
                ("has-maroon-color", "maroon"),
                ("has-navy-color", "navy"),
                ("has-teal-color", "teal"),
            ]
            .iter()
            .map(|(marker, color)| (marker.to_string(), color.to_string()))
            .collect(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Compiled navigation rules. Cheap to clone; the regexes are reference counted.
#[derive(Debug, Clone)]
pub struct NavigationRules {
    pub(crate) phrases: Vec<String>,
    pub(crate) word_pattern: Option<Regex>,
    pub(crate) class_markers: Vec<String>,
    pub(crate) symbol_pattern: Regex,
    pub(crate) short_labels: Vec<String>,
    pub(crate) short_arrow_markers: Vec<String>,
    pub(crate) short_text_threshold: usize,
    pub(crate) color_classes: Vec<(String, String)>,
}

#[allow(clippy::expect_used)]
static STANDARD_RULES: LazyLock<NavigationRules> = LazyLock::new(|| {
    NavigationRules::compile(&RuleSpec::default()).expect("built-in navigation rules compile")
});

impl NavigationRules {
    /// Compile a rule spec. Phrases and markers are lower-cased here so the
    /// classifier only has to normalize its input.
    pub fn compile(spec: &RuleSpec) -> Result<Self, RulesError> {
        let symbol_pattern =
            Regex::new(&spec.symbol_pattern).map_err(|source| RulesError::SymbolPattern {
                pattern: spec.symbol_pattern.clone(),
                source,
            })?;

        let word_phrases = lowered(&spec.word_phrases);
        let word_pattern = if word_phrases.is_empty() {
            None
        } else {
            let alternation = word_phrases
                .iter()
                .map(|phrase| regex::escape(phrase))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
                .case_insensitive(true)
                .build()
                .map_err(RulesError::WordPhrases)?;
            Some(pattern)
        };

        Ok(Self {
            phrases: lowered(&spec.phrases),
            word_pattern,
            class_markers: lowered(&spec.class_markers),
            symbol_pattern,
            short_labels: lowered(&spec.short_labels),
            short_arrow_markers: lowered(&spec.short_arrow_markers),
            short_text_threshold: spec.short_text_threshold,
            color_classes: spec
                .color_classes
                .iter()
                .map(|(marker, color)| (marker.to_lowercase(), color.clone()))
                .collect(),
        })
    }

    /// The built-in rule set, compiled once per process.
    pub fn standard() -> &'static NavigationRules {
        &STANDARD_RULES
    }
}

impl Default for NavigationRules {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}
