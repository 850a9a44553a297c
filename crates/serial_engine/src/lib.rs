//! Serial engine: fetching, EPUB assembly, persistence and the build pipeline.
mod builder;
mod config;
mod decode;
mod epub;
mod fetch;
mod filename;
mod persist;
mod style;
mod types;

pub use builder::{BuildError, BuildOutcome, ProgressSink, SerialBuilder};
pub use config::{
    BookConfig, ConfigError, SiteConfig, DEFAULT_FILENAME, DEFAULT_LATEST_CHAPTERS_COUNT,
    DEFAULT_TOC_URL,
};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use epub::{write_epub, BookMetadata, EpubBook, EpubError, Section};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{output_filename, sanitize_filename};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use style::{default_stylesheet, COLOR_PALETTE};
pub use types::{
    BuildEvent, FailureKind, FetchError, FetchMetadata, FetchedPage, SkipReason, SkippedChapter,
};
