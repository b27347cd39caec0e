//! Readable content extraction using Lectito.
//!
//! The `Extractor` trait keeps tool code independent of the extraction engine.
//! [`PageExtractor`] combines fetching, extraction, previews and artifact files.

pub mod links;
pub mod normalize;
pub mod page;

pub use links::{Link, extract_links};
pub use normalize::markdown_document;
pub use page::{ContentBlock, PageExtraction, PageExtractor, SavedFiles};

use lectito_core::{Document, ExtractConfig as LectitoConfig};
use toolbench_core::Error;
use url::Url;

/// Configuration for content extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum character count for content (default: 200)
    pub char_threshold: Option<usize>,

    /// Maximum number of top candidates to consider (default: 5)
    pub max_top_candidates: Option<usize>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { char_threshold: Some(200), max_top_candidates: Some(5) }
    }
}

impl ExtractConfig {
    fn to_lectito_config(&self) -> LectitoConfig {
        let mut cfg = LectitoConfig::default();
        if let Some(threshold) = self.char_threshold {
            cfg.char_threshold = threshold;
        }
        if let Some(max) = self.max_top_candidates {
            cfg.max_top_candidates = max;
        }
        cfg
    }
}

/// Result of content extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub title: Option<String>,
    pub markdown: String,
    pub links: Vec<Link>,
    pub extractor_version: String,
}

/// Extracts readable content from an HTML document.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str, base_url: &Url, config: &ExtractConfig) -> Result<ExtractionResult, Error>;
}

/// Lectito-based extractor implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LectitoExtractor;

impl LectitoExtractor {
    pub const VERSION: &'static str = "lectito-core@0.2.0";
}

impl Extractor for LectitoExtractor {
    fn extract(&self, html: &str, base_url: &Url, config: &ExtractConfig) -> Result<ExtractionResult, Error> {
        if html.trim().is_empty() {
            return Err(Error::ExtractFailed("document is empty".into()));
        }

        let doc = Document::parse(html).map_err(|e| Error::ExtractFailed(format!("failed to parse HTML: {}", e)))?;

        let extracted = lectito_core::extract_content(&doc, &config.to_lectito_config())
            .map_err(|e| Error::ExtractFailed(format!("extraction failed: {}", e)))?;

        let metadata = doc.extract_metadata();
        let title = metadata.title.clone();

        let markdown = lectito_core::convert_to_markdown(&extracted.content, &metadata, &Default::default())
            .map_err(|e| Error::ExtractFailed(format!("markdown conversion failed: {}", e)))?;

        Ok(ExtractionResult {
            title,
            markdown,
            links: extract_links(html, base_url),
            extractor_version: Self::VERSION.to_string(),
        })
    }
}
