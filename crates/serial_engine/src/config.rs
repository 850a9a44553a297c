//! Site configuration: where the serial lives, how the book is labelled, and
//! the navigation rules used while extracting chapters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serial_core::{ChapterLinkRules, NavigationRules, RuleSpec, RulesError, DEFAULT_TOC_MARKER};
use thiserror::Error;
use url::Url;

use crate::epub::BookMetadata;

pub const DEFAULT_TOC_URL: &str = "https://wanderinginn.com/table-of-contents/";
pub const DEFAULT_FILENAME: &str = "wandering_inn.epub";
pub const DEFAULT_LATEST_CHAPTERS_COUNT: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid table of contents url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error(transparent)]
    Rules(#[from] RulesError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub language: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: "The Wandering Inn".to_string(),
            author: "pirateaba".to_string(),
            description: Some("The Wandering Inn web serial".to_string()),
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub toc_url: String,
    /// Substring a chapter link must contain. Falls back to the host of `toc_url`.
    pub domain_marker: Option<String>,
    pub toc_marker: String,
    pub book: BookConfig,
    pub filename_prefix: String,
    pub default_filename: String,
    pub latest_chapters_count: usize,
    /// Replaces the bundled reading stylesheet.
    pub stylesheet: Option<String>,
    pub rules: RuleSpec,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            toc_url: DEFAULT_TOC_URL.to_string(),
            domain_marker: None,
            toc_marker: DEFAULT_TOC_MARKER.to_string(),
            book: BookConfig::default(),
            filename_prefix: "wandering_inn".to_string(),
            default_filename: DEFAULT_FILENAME.to_string(),
            latest_chapters_count: DEFAULT_LATEST_CHAPTERS_COUNT,
            stylesheet: None,
            rules: RuleSpec::default(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new();
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_toc_url()?;
        NavigationRules::compile(&self.rules)?;
        Ok(())
    }

    /// The configured marker, or the host of the listing page.
    pub fn domain_marker(&self) -> Result<String, ConfigError> {
        match self.domain_marker.as_deref() {
            Some(marker) if !marker.trim().is_empty() => Ok(marker.trim().to_string()),
            _ => {
                let url = self.parsed_toc_url()?;
                url.host_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid_url("missing host"))
            }
        }
    }

    pub fn link_rules(&self) -> Result<ChapterLinkRules, ConfigError> {
        Ok(ChapterLinkRules::new(self.domain_marker()?).with_toc_marker(self.toc_marker.as_str()))
    }

    pub fn navigation_rules(&self) -> Result<NavigationRules, ConfigError> {
        Ok(NavigationRules::compile(&self.rules)?)
    }

    pub fn book_metadata(&self, date: Option<String>) -> BookMetadata {
        BookMetadata {
            title: self.book.title.clone(),
            author: self.book.author.clone(),
            description: self.book.description.clone(),
            language: self.book.language.clone(),
            date,
        }
    }

    fn parsed_toc_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.toc_url).map_err(|err| self.invalid_url(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(self.invalid_url(format!("unsupported scheme {}", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(self.invalid_url("missing host"));
        }
        Ok(url)
    }

    fn invalid_url(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidUrl {
            url: self.toc_url.clone(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domain_marker_is_listing_host() {
        let config = SiteConfig::default();
        assert_eq!(config.domain_marker().unwrap(), "wanderinginn.com");
        let rules = config.link_rules().unwrap();
        assert_eq!(rules.domain_marker(), "wanderinginn.com");
        assert!(rules.accepts_href("https://wanderinginn.com/2017/03/03/rw1-00/"));
    }

    #[test]
    fn blank_domain_marker_falls_back_to_host() {
        let config = SiteConfig {
            toc_url: "http://localhost:8080/toc".to_string(),
            domain_marker: Some("  ".to_string()),
            ..SiteConfig::default()
        };
        assert_eq!(config.domain_marker().unwrap(), "localhost");
    }

    #[test]
    fn non_http_listing_is_rejected() {
        let config = SiteConfig {
            toc_url: "ftp://example.com/toc".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
