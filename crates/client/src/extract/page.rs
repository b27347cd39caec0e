//! Fetch-then-extract pipeline for a single web page.

use super::{ExtractConfig, Extractor, LectitoExtractor, Link, markdown_document};
use crate::fetch::{FetchClient, FetchResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use toolbench_core::Error;

/// Characters kept per preview block.
const PREVIEW_CHARS: usize = 100;

/// Blocks kept in a content preview.
const PREVIEW_BLOCKS: usize = 5;

/// One block of the extracted Markdown, classified by its leading syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    /// `heading`, `list`, `quote`, `code` or `paragraph`.
    pub kind: String,
    pub text: String,
}

/// Everything extracted from one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageExtraction {
    pub url: String,
    pub final_url: String,
    pub title: Option<String>,
    pub content_type: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub fetch_ms: u64,
    pub extractor: String,
    pub markdown: String,
    pub main_content: Vec<ContentBlock>,
    pub links: Vec<Link>,
    #[serde(skip)]
    pub html: String,
}

/// Paths written by [`PageExtraction::save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedFiles {
    pub html_path: PathBuf,
    pub markdown_path: PathBuf,
    pub json_path: PathBuf,
}

impl SavedFiles {
    /// Same files with directories stripped, for portable output.
    pub fn file_names(&self) -> SavedFiles {
        let name = |p: &Path| p.file_name().map(PathBuf::from).unwrap_or_else(|| p.to_path_buf());
        SavedFiles {
            html_path: name(&self.html_path),
            markdown_path: name(&self.markdown_path),
            json_path: name(&self.json_path),
        }
    }
}

/// Fetches pages and runs them through an [`Extractor`].
#[derive(Clone)]
pub struct PageExtractor {
    fetch: FetchClient,
    extractor: Arc<dyn Extractor>,
    config: ExtractConfig,
}

impl PageExtractor {
    pub fn new(fetch: FetchClient) -> Self {
        Self { fetch, extractor: Arc::new(LectitoExtractor), config: ExtractConfig::default() }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Fetch `url` and extract its readable content.
    pub async fn extract(&self, url: &str) -> Result<PageExtraction, Error> {
        let response = self.fetch.fetch(url).await?;
        self.extract_response(response)
    }

    fn extract_response(&self, response: FetchResponse) -> Result<PageExtraction, Error> {
        let html = response.text();
        let result = self.extractor.extract(&html, &response.final_url, &self.config)?;

        tracing::debug!(url = %response.final_url, links = result.links.len(), "extracted page content");

        Ok(PageExtraction {
            url: response.url.to_string(),
            final_url: response.final_url.to_string(),
            title: result.title,
            content_type: response.content_type,
            fetched_at: Utc::now(),
            fetch_ms: response.fetch_ms,
            extractor: result.extractor_version,
            main_content: content_preview(&result.markdown),
            markdown: result.markdown,
            links: result.links,
            html,
        })
    }
}

impl PageExtraction {
    /// File stem shared by all artifacts of this page: 16 hex chars of SHA-256(final URL).
    pub fn artifact_key(&self) -> String {
        let digest = Sha256::digest(self.final_url.as_bytes());
        hex::encode(digest)[..16].to_string()
    }

    /// Write `<key>.html`, `<key>.md` and `<key>.json` into `dir`, creating it if needed.
    pub async fn save(&self, dir: &Path) -> Result<SavedFiles, Error> {
        tokio::fs::create_dir_all(dir).await?;

        let key = self.artifact_key();
        let files = SavedFiles {
            html_path: dir.join(format!("{key}.html")),
            markdown_path: dir.join(format!("{key}.md")),
            json_path: dir.join(format!("{key}.json")),
        };

        let source = url::Url::parse(&self.final_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let document = markdown_document(self.title.as_deref(), &self.markdown, &source, &self.fetched_at, &self.extractor);
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::ExtractFailed(e.to_string()))?;

        tokio::fs::write(&files.html_path, &self.html).await?;
        tokio::fs::write(&files.markdown_path, document).await?;
        tokio::fs::write(&files.json_path, json).await?;

        tracing::debug!(dir = %dir.display(), key = %key, "saved extraction artifacts");

        Ok(files)
    }
}

/// First few non-empty Markdown blocks, each cut to [`PREVIEW_CHARS`].
pub fn content_preview(markdown: &str) -> Vec<ContentBlock> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .take(PREVIEW_BLOCKS)
        .map(|block| {
            let (kind, body) = classify(block);
            let text = body.split_whitespace().collect::<Vec<_>>().join(" ");
            ContentBlock { kind: kind.to_string(), text: text.chars().take(PREVIEW_CHARS).collect() }
        })
        .collect()
}

fn classify(block: &str) -> (&'static str, &str) {
    if block.starts_with('#') {
        ("heading", block.trim_start_matches('#').trim_start())
    } else if block.starts_with("```") {
        ("code", block.trim_matches('`').trim())
    } else if let Some(rest) = block.strip_prefix('>') {
        ("quote", rest.trim_start())
    } else if block.starts_with("- ") || block.starts_with("* ") || block.starts_with("1. ") {
        ("list", block)
    } else {
        ("paragraph", block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionResult;
    use crate::fetch::FetchConfig;
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedExtractor;

    impl Extractor for FixedExtractor {
        fn extract(&self, _html: &str, base_url: &Url, _config: &ExtractConfig) -> Result<ExtractionResult, Error> {
            Ok(ExtractionResult {
                title: Some("Fixed".into()),
                markdown: "# Fixed\n\nBody text".into(),
                links: vec![Link { text: "Home".into(), href: base_url.join("/").unwrap().to_string() }],
                extractor_version: "fixed@1".into(),
            })
        }
    }

    async fn serve(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html").set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn extractor() -> PageExtractor {
        PageExtractor::new(FetchClient::new(FetchConfig::default()).unwrap())
    }

    #[test]
    fn test_content_preview() {
        let long = "word ".repeat(40);
        let markdown = format!("# Title\n\n{long}\n\n- item one\n- item two\n\n> quoted\n\n```\ncode\n```\n\nextra");
        let preview = content_preview(&markdown);

        assert_eq!(preview.len(), 5);
        assert_eq!(preview[0], ContentBlock { kind: "heading".into(), text: "Title".into() });
        assert_eq!(preview[1].kind, "paragraph");
        assert_eq!(preview[1].text.chars().count(), 100);
        assert_eq!(preview[2].kind, "list");
        assert_eq!(preview[3], ContentBlock { kind: "quote".into(), text: "quoted".into() });
        assert_eq!(preview[4], ContentBlock { kind: "code".into(), text: "code".into() });
    }

    #[tokio::test]
    async fn test_extract_with_lectito() {
        let server = serve(crate::extract::tests::ARTICLE_HTML).await;
        let page = extractor().extract(&format!("{}/post", server.uri())).await.unwrap();

        assert_eq!(page.title.as_deref(), Some("Test Article"));
        assert_eq!(page.content_type.as_deref(), Some("text/html"));
        assert!(!page.main_content.is_empty());
        assert!(page.links.iter().any(|l| l.href.ends_with("/about")));
    }

    #[tokio::test]
    async fn test_save_artifacts() {
        let server = serve("<html><body>ignored</body></html>").await;
        let page = extractor()
            .with_extractor(Arc::new(FixedExtractor))
            .extract(&server.uri())
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let files = page.save(&dir.path().join("out")).await.unwrap();

        let key = page.artifact_key();
        assert_eq!(key.len(), 16);
        assert_eq!(files.file_names().html_path, PathBuf::from(format!("{key}.html")));

        let html = std::fs::read_to_string(&files.html_path).unwrap();
        assert!(html.contains("ignored"));

        let markdown = std::fs::read_to_string(&files.markdown_path).unwrap();
        assert!(markdown.starts_with("---\ntitle: Fixed\n"));
        assert!(markdown.contains("extractor: fixed@1"));

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&files.json_path).unwrap()).unwrap();
        assert_eq!(json["title"], "Fixed");
        assert!(json.get("html").is_none());
        assert_eq!(json["main_content"][0]["kind"], "heading");
    }
}
