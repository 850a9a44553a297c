use serial_core::Chapter;

const MAX_FILENAME_LEN: usize = 50;

/// `{prefix}_{sanitized first title}.epub`, or `default` when nothing was selected.
pub fn output_filename(chapters: &[Chapter], prefix: &str, default: &str) -> String {
    match chapters.first() {
        Some(first) => format!("{prefix}_{}.epub", sanitize_filename(&first.title)),
        None => default.to_string(),
    }
}

/// Lower-case, underscore-separated, filesystem-safe form of a chapter title.
pub fn sanitize_filename(title: &str) -> String {
    let kept: String = title
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || matches!(c, '_' | '-' | '.'))
        .collect();

    // Collapse whitespace runs
    let mut name = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c.to_ascii_lowercase());
            in_space = false;
        }
    }

    if name.len() > MAX_FILENAME_LEN {
        let mut cut = MAX_FILENAME_LEN;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }

    let mut name = name.trim_matches(&['_', '-', '.'][..]).to_string();
    if name.is_empty() {
        name = "chapter".to_string();
    }
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_ascii_whitespace_is_stripped() {
        assert_eq!(sanitize_filename("Chapter\u{a0}5"), "chapter5");
        assert_eq!(sanitize_filename("Chapter\u{2003} 5"), "chapter_5");
    }

    #[test]
    fn reserved_names_are_patched() {
        assert_eq!(sanitize_filename("CON"), "con_");
        assert_eq!(sanitize_filename("lpt1"), "lpt1_");
        assert_eq!(sanitize_filename("console"), "console");
    }

    #[test]
    fn truncation_happens_before_trimming() {
        let title = format!("{}-tail", "a".repeat(49));
        assert_eq!(sanitize_filename(&title), "a".repeat(49));
    }
}
