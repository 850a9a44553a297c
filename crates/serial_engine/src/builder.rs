use std::io::Cursor;
use std::path::{Path, PathBuf};

use serial_core::{discover_chapters, Chapter, ChapterExtractor, ChapterLinkRules, Html};
use serial_logging::{serial_debug, serial_info, serial_warn};
use thiserror::Error;

use crate::config::{ConfigError, SiteConfig};
use crate::epub::{write_epub, EpubBook, EpubError};
use crate::fetch::Fetcher;
use crate::filename::output_filename;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{BuildEvent, FetchError, SkipReason, SkippedChapter};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to fetch chapter list: {0}")]
    Listing(#[source] FetchError),
    #[error("failed to assemble epub: {0}")]
    Epub(#[from] EpubError),
    #[error("failed to write output: {0}")]
    Persist(#[from] PersistError),
    #[error("no chapters to build")]
    NoChapters,
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: BuildEvent);
}

#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub book: EpubBook,
    /// Chapters that made it into the book, in reading order.
    pub included: Vec<Chapter>,
    pub skipped: Vec<SkippedChapter>,
}

/// Drives discovery, per-chapter download and extraction, and EPUB output for one serial.
pub struct SerialBuilder<F: Fetcher> {
    config: SiteConfig,
    fetcher: F,
    link_rules: ChapterLinkRules,
    extractor: ChapterExtractor,
    date: Option<String>,
}

impl<F: Fetcher> SerialBuilder<F> {
    pub fn new(config: SiteConfig, fetcher: F) -> Result<Self, BuildError> {
        let link_rules = config.link_rules()?;
        let extractor = ChapterExtractor::new(config.navigation_rules()?);
        Ok(Self {
            config,
            fetcher,
            link_rules,
            extractor,
            date: None,
        })
    }

    /// Publication date recorded in the book metadata.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub async fn discover(&self) -> Result<Vec<Chapter>, BuildError> {
        serial_info!("Fetching chapter list from {}", self.config.toc_url);
        let page = self
            .fetcher
            .fetch(&self.config.toc_url)
            .await
            .map_err(BuildError::Listing)?;

        let chapters = {
            let document = Html::parse_document(&page.html);
            discover_chapters(&document, &self.link_rules)
        };
        serial_info!(
            "Found {} chapters linking to {}",
            chapters.len(),
            self.link_rules.domain_marker()
        );
        Ok(chapters)
    }

    /// Download and extract `chapters` one at a time. A chapter that fails is
    /// reported through `sink` and left out; the rest of the run continues.
    pub async fn build(
        &self,
        chapters: &[Chapter],
        sink: &dyn ProgressSink,
    ) -> Result<BuildOutcome, BuildError> {
        if chapters.is_empty() {
            return Err(BuildError::NoChapters);
        }

        let mut ordered: Vec<&Chapter> = chapters.iter().collect();
        ordered.sort_by_key(|chapter| chapter.index);
        let total = ordered.len();

        let mut book = EpubBook::new(self.config.book_metadata(self.date.clone()));
        if let Some(stylesheet) = &self.config.stylesheet {
            book = book.with_stylesheet(stylesheet.as_str());
        }
        let mut included = Vec::with_capacity(total);
        let mut skipped = Vec::new();

        for (position, chapter) in ordered.into_iter().enumerate() {
            sink.emit(BuildEvent::Progress {
                current: position + 1,
                total,
                title: chapter.title.clone(),
            });
            serial_debug!("Fetching chapter {} from {}", chapter.number(), chapter.url);

            let reason = match self.fetcher.fetch(&chapter.url).await {
                Ok(page) => {
                    let body = self.extract(&page.html, &chapter.title);
                    if body.is_empty() {
                        SkipReason::NoContent
                    } else {
                        book.add_section(chapter.title.as_str(), body);
                        included.push(chapter.clone());
                        continue;
                    }
                }
                Err(err) => SkipReason::Fetch(err),
            };

            serial_warn!("Skipping chapter {:?}: {}", chapter.title, reason);
            let skip = SkippedChapter {
                chapter: chapter.clone(),
                reason,
            };
            sink.emit(BuildEvent::ChapterSkipped(skip.clone()));
            skipped.push(skip);
        }

        if book.sections.is_empty() {
            return Err(BuildError::NoChapters);
        }
        serial_info!(
            "Assembled {} of {} chapters ({} skipped)",
            included.len(),
            total,
            skipped.len()
        );
        Ok(BuildOutcome {
            book,
            included,
            skipped,
        })
    }

    /// Filename for a book made of `chapters`, from the configured prefix.
    pub fn output_filename(&self, chapters: &[Chapter]) -> String {
        output_filename(
            chapters,
            &self.config.filename_prefix,
            &self.config.default_filename,
        )
    }

    pub fn write(
        &self,
        book: &EpubBook,
        output_dir: &Path,
        filename: &str,
    ) -> Result<PathBuf, BuildError> {
        let mut buffer = Cursor::new(Vec::new());
        write_epub(book, &mut buffer)?;
        let path = AtomicFileWriter::new(output_dir).write_bytes(filename, buffer.get_ref())?;
        serial_info!("Wrote {} chapters to {}", book.sections.len(), path.display());
        Ok(path)
    }

    fn extract(&self, html: &str, title: &str) -> String {
        let document = Html::parse_document(html);
        self.extractor.extract(&document, title)
    }
}
