//! Interactive chapter range selection on the terminal.

use std::io::{self, BufRead, Write};

use serial_core::{latest_chapters, parse_chapter_number, Chapter, ChapterRange, SelectionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("input closed before a chapter range was chosen")]
    Closed,
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Print the newest `count` chapters with their one-based numbers.
pub fn print_latest<W: Write>(out: &mut W, chapters: &[Chapter], count: usize) -> io::Result<()> {
    let latest = latest_chapters(chapters, count);
    writeln!(out, "Found {} chapters. Latest {}:", chapters.len(), latest.len())?;
    for chapter in latest {
        writeln!(out, "{:>5}. {}", chapter.number(), chapter.title)?;
    }
    writeln!(out)
}

/// Ask for a start and end chapter until both are valid. An empty end means the last chapter.
pub fn prompt_range<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    total: usize,
) -> Result<ChapterRange, PromptError> {
    if total == 0 {
        return Err(SelectionError::NoChapters.into());
    }

    let start = ask(input, out, &format!("Start chapter (1-{total}): "), |line| {
        parse_chapter_number(line, 1, total)
    })?;
    let end = ask(
        input,
        out,
        &format!("End chapter ({start}-{total}, Enter for {total}): "),
        |line| {
            if line.is_empty() {
                Ok(total)
            } else {
                parse_chapter_number(line, start, total)
            }
        },
    )?;

    Ok(ChapterRange::new(start, end, total)?)
}

fn ask<R, W, T, P>(input: &mut R, out: &mut W, prompt: &str, parse: P) -> Result<T, PromptError>
where
    R: BufRead,
    W: Write,
    P: Fn(&str) -> Result<T, SelectionError>,
{
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}
