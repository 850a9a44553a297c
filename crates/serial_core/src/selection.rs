//! Chapter range selection helpers for the interactive prompt.

use crate::chapter::Chapter;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no chapters to select from")]
    NoChapters,
    #[error("please enter a chapter number")]
    Empty,
    #[error("{0:?} is not a valid number")]
    NotANumber(String),
    #[error("please enter a number between {min} and {max}")]
    OutOfRange { value: usize, min: usize, max: usize },
}

/// Parse a one-based chapter number and check it lies in `min..=max`.
pub fn parse_chapter_number(input: &str, min: usize, max: usize) -> Result<usize, SelectionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SelectionError::Empty);
    }
    let value: usize = input
        .parse()
        .map_err(|_| SelectionError::NotANumber(input.to_string()))?;
    if value < min || value > max {
        return Err(SelectionError::OutOfRange { value, min, max });
    }
    Ok(value)
}

/// Inclusive, one-based range of chapters to put in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterRange {
    start: usize,
    end: usize,
}

impl ChapterRange {
    pub fn new(start: usize, end: usize, total: usize) -> Result<Self, SelectionError> {
        if total == 0 {
            return Err(SelectionError::NoChapters);
        }
        if start < 1 || start > total {
            return Err(SelectionError::OutOfRange {
                value: start,
                min: 1,
                max: total,
            });
        }
        if end < start || end > total {
            return Err(SelectionError::OutOfRange {
                value: end,
                min: start,
                max: total,
            });
        }
        Ok(Self { start, end })
    }

    /// Every chapter from 1 to `total`.
    pub fn all(total: usize) -> Result<Self, SelectionError> {
        Self::new(1, total, total)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of chapters in the range, never zero.
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn select<'a>(&self, chapters: &'a [Chapter]) -> &'a [Chapter] {
        let end = self.end.min(chapters.len());
        let start = (self.start - 1).min(end);
        &chapters[start..end]
    }
}

/// The last `count` chapters, for the listing shown before prompting.
pub fn latest_chapters(chapters: &[Chapter], count: usize) -> &[Chapter] {
    let start = chapters.len().saturating_sub(count);
    &chapters[start..]
}
