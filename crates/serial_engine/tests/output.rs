use pretty_assertions::assert_eq;
use serial_core::Chapter;
use serial_engine::{
    output_filename, sanitize_filename, BookConfig, ConfigError, SiteConfig, DEFAULT_FILENAME,
};

#[test]
fn filename_is_lowercase_and_safe() {
    assert_eq!(sanitize_filename("Chapter 1.00"), "chapter_1.00");
    assert_eq!(sanitize_filename("  Interlude – Ryoka?!  "), "interlude_ryoka");
    assert_eq!(sanitize_filename("Mrsha's   Day/Night"), "mrshas_daynight");
    assert_eq!(sanitize_filename("...!!!"), "chapter");
    assert_eq!(sanitize_filename(""), "chapter");
}

#[test]
fn filename_is_truncated() {
    let long = "Word ".repeat(20);
    let name = sanitize_filename(&long);
    assert!(name.len() <= 50);
    assert!(name.starts_with("word_word_"));
    assert!(!name.ends_with('_'));
}

#[test]
fn output_filename_uses_first_selected_chapter() {
    let chapters = vec![
        Chapter::new("Chapter 2.01", "https://wanderinginn.com/2.01", 40),
        Chapter::new("Chapter 2.02", "https://wanderinginn.com/2.02", 41),
    ];
    assert_eq!(
        output_filename(&chapters, "wandering_inn", DEFAULT_FILENAME),
        "wandering_inn_chapter_2.01.epub"
    );
    assert_eq!(
        output_filename(&[], "wandering_inn", DEFAULT_FILENAME),
        "wandering_inn.epub"
    );
}

#[test]
fn config_reads_partial_ron() {
    let config = SiteConfig::from_ron_str(
        r#"(
            toc_url: "https://example.org/serial/contents",
            toc_marker: "contents",
            book: (title: "Example Serial", author: "someone"),
            latest_chapters_count: 5,
        )"#,
    )
    .unwrap();

    assert_eq!(config.domain_marker().unwrap(), "example.org");
    assert_eq!(config.latest_chapters_count, 5);
    assert_eq!(
        config.book,
        BookConfig {
            title: "Example Serial".to_string(),
            author: "someone".to_string(),
            ..BookConfig::default()
        }
    );
    assert_eq!(config.filename_prefix, "wandering_inn");

    let rules = config.link_rules().unwrap();
    assert!(rules.accepts_href("https://example.org/serial/chapter-1"));
    assert!(!rules.accepts_href("https://example.org/serial/contents"));
}

#[test]
fn config_round_trips_through_ron() {
    let config = SiteConfig::default();
    let text = config.to_ron_string().unwrap();
    assert_eq!(SiteConfig::from_ron_str(&text).unwrap(), config);
}

#[test]
fn config_rejects_bad_rules() {
    let err = SiteConfig::from_ron_str(r#"(rules: (symbol_pattern: "("))"#).unwrap_err();
    assert!(matches!(err, ConfigError::Rules(_)));

    let err = SiteConfig::from_ron_str("(toc_url: \"not a url\")").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));

    let err = SiteConfig::from_ron_str("(toc_url: 5)").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
