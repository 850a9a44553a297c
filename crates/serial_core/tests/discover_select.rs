use pretty_assertions::assert_eq;
use serial_core::{
    discover_chapters, latest_chapters, parse_chapter_number, Chapter, ChapterLinkRules,
    ChapterRange, Html, SelectionError,
};

fn rules() -> ChapterLinkRules {
    ChapterLinkRules::new("wanderinginn.com")
}

#[test]
fn listing_page_yields_chapters_in_document_order() {
    let html = r#"<!DOCTYPE html>
<html><body>
  <div class="toc">
    <a href="https://wanderinginn.com/2017/03/03/chapter-1-00/">Chapter 1.00</a>
    <a href="https://wanderinginn.com/2016/07/27/prologue/">Prologue</a>
    <a href="https://wanderinginn.com/table-of-contents/">Table of Contents</a>
    <a href="https://wanderinginn.com/about/">About the Author</a>
  </div>
</body></html>"#;
    let doc = Html::parse_document(html);
    let chapters = discover_chapters(&doc, &rules());

    assert_eq!(
        chapters,
        vec![
            Chapter::new(
                "Chapter 1.00",
                "https://wanderinginn.com/2017/03/03/chapter-1-00/",
                0
            ),
            Chapter::new("Prologue", "https://wanderinginn.com/2016/07/27/prologue/", 1),
        ]
    );
}

#[test]
fn chapter_titles_match_known_markers() {
    let rules = rules();
    assert!(rules.is_chapter_title("Chapter 1"));
    assert!(rules.is_chapter_title("Prologue"));
    assert!(rules.is_chapter_title("Epilogue"));
    assert!(rules.is_chapter_title("Interlude – Ryoka"));
    assert!(rules.is_chapter_title("1.01 R"));
    assert!(!rules.is_chapter_title("About the Author"));
    assert!(!rules.is_chapter_title("Table of Contents chapter"));
}

#[test]
fn hrefs_must_be_on_site_and_not_the_listing() {
    let rules = rules();
    assert!(rules.accepts_href("https://wanderinginn.com/2017/03/03/1-01/"));
    assert!(!rules.accepts_href("https://wanderinginn.com/table-of-contents/"));
    assert!(!rules.accepts_href("https://example.com/chapter-1/"));
    assert!(!rules.accepts_href(""));

    let custom = ChapterLinkRules::new("example.org").with_toc_marker("/contents");
    assert!(custom.accepts_href("https://example.org/table-of-contents/ch-1"));
    assert!(!custom.accepts_href("https://example.org/contents"));
}

#[test]
fn nested_anchor_text_is_trimmed_and_duplicates_are_kept() {
    let html = r#"
        <ul>
          <li><a href="https://wanderinginn.com/1-00/">  <strong>1.00</strong>
          </a></li>
          <li><a href="https://wanderinginn.com/1-00/">1.00</a></li>
          <li><a href="https://wanderinginn.com/1-01/"></a></li>
          <li><a>Chapter without href</a></li>
        </ul>"#;
    let doc = Html::parse_document(html);
    let chapters = discover_chapters(&doc, &rules());

    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].title, "1.00");
    assert_eq!(chapters[1].title, "1.00");
    assert_eq!(chapters[0].index, 0);
    assert_eq!(chapters[1].index, 1);
    assert_eq!(chapters[1].number(), 2);
}

#[test]
fn chapter_numbers_are_parsed_within_bounds() {
    assert_eq!(parse_chapter_number("5\n", 1, 10), Ok(5));
    assert_eq!(parse_chapter_number(" 1 ", 1, 10), Ok(1));
    assert_eq!(parse_chapter_number("10", 1, 10), Ok(10));
    assert_eq!(parse_chapter_number("", 1, 10), Err(SelectionError::Empty));
    assert_eq!(
        parse_chapter_number("invalid", 1, 10),
        Err(SelectionError::NotANumber("invalid".to_string()))
    );
    assert_eq!(
        parse_chapter_number("0", 1, 10),
        Err(SelectionError::OutOfRange { value: 0, min: 1, max: 10 })
    );
    assert_eq!(
        parse_chapter_number("15", 1, 10),
        Err(SelectionError::OutOfRange { value: 15, min: 1, max: 10 })
    );
    assert!(matches!(
        parse_chapter_number("-3", 1, 10),
        Err(SelectionError::NotANumber(_))
    ));
}

fn numbered(count: usize) -> Vec<Chapter> {
    (0..count)
        .map(|i| Chapter::new(format!("Chapter {}", i + 1), format!("url{}", i + 1), i))
        .collect()
}

#[test]
fn ranges_select_inclusive_one_based_slices() {
    let chapters = numbered(10);
    let range = ChapterRange::new(3, 5, chapters.len()).unwrap();
    let selected = range.select(&chapters);

    assert_eq!(range.count(), 3);
    assert_eq!(selected.first().unwrap().title, "Chapter 3");
    assert_eq!(selected.last().unwrap().title, "Chapter 5");

    let all = ChapterRange::all(chapters.len()).unwrap();
    assert_eq!(all.select(&chapters).len(), 10);
}

#[test]
fn invalid_ranges_are_rejected() {
    assert_eq!(ChapterRange::new(1, 1, 0), Err(SelectionError::NoChapters));
    assert!(ChapterRange::new(0, 3, 10).is_err());
    assert!(ChapterRange::new(5, 4, 10).is_err());
    assert!(ChapterRange::new(2, 11, 10).is_err());
}

#[test]
fn latest_chapters_are_the_tail() {
    let chapters = numbered(30);
    let latest = latest_chapters(&chapters, 20);
    assert_eq!(latest.len(), 20);
    assert_eq!(latest[0].number(), 11);

    let few = numbered(2);
    assert_eq!(latest_chapters(&few, 20).len(), 2);
    assert!(latest_chapters(&[], 20).is_empty());
}
