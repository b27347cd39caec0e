//! extract_webpage and extract_webpage_json tool implementations.
//!
//! Both tools fetch a page, extract its readable content and, when an output
//! directory is known, save HTML, Markdown and JSON artifacts there. Failures
//! are reported in the tool output rather than as protocol errors.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toolbench_client::{PageExtraction, PageExtractor, SavedFiles};
use toolbench_core::Error;

/// Links shown in the text summary.
const LINK_PREVIEW: usize = 5;

/// Characters of link text shown in the text summary.
const LINK_TEXT_CHARS: usize = 50;

/// Input parameters for the extraction tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractWebpageParams {
    /// Page URL; `https://` is assumed when no scheme is given.
    pub url: String,

    /// Directory for saved artifacts. Falls back to the configured output directory.
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    page: &'a PageExtraction,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<SavedFiles>,
}

async fn run(
    extractor: &PageExtractor, default_dir: Option<&Path>, params: &ExtractWebpageParams,
) -> Result<(PageExtraction, Option<SavedFiles>), Error> {
    let page = extractor.extract(&params.url).await?;

    let dir = params.output_dir.as_deref().map(PathBuf::from).or_else(|| default_dir.map(Path::to_path_buf));
    let files = match dir {
        Some(dir) => Some(page.save(&dir).await?),
        None => None,
    };

    Ok((page, files))
}

/// Extract a page and return a readable summary.
pub async fn extract_webpage_impl(
    extractor: &PageExtractor, default_dir: Option<&Path>, params: ExtractWebpageParams,
) -> Result<CallToolResult, McpError> {
    let text = match run(extractor, default_dir, &params).await {
        Ok((page, files)) => summary(&page, files.as_ref()),
        Err(e) => {
            tracing::warn!(url = %params.url, "page extraction failed: {}", e);
            format!("Error extracting content from {}: {}", params.url, e.detail())
        }
    };

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Extract a page and return the full extraction as pretty JSON.
pub async fn extract_webpage_json_impl(
    extractor: &PageExtractor, default_dir: Option<&Path>, params: ExtractWebpageParams,
) -> Result<CallToolResult, McpError> {
    let json = match run(extractor, default_dir, &params).await {
        Ok((page, files)) => {
            let output = JsonOutput { page: &page, files: files.map(|f| f.file_names()) };
            serde_json::to_string_pretty(&output).map_err(|e| Error::ExtractFailed(e.to_string()))?
        }
        Err(e) => {
            tracing::warn!(url = %params.url, "page extraction failed: {}", e);
            serde_json::json!({ "error": e.detail() }).to_string()
        }
    };

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn summary(page: &PageExtraction, files: Option<&SavedFiles>) -> String {
    let mut out = format!(
        "Webpage Extraction Results for: {}\n\nTitle: {}\n",
        page.url,
        page.title.as_deref().unwrap_or("Untitled")
    );

    if !page.main_content.is_empty() {
        out.push_str("\nContent Preview:\n");
        for block in &page.main_content {
            out.push_str(&format!("{}: {}...\n", block.kind.to_uppercase(), block.text));
        }
    }

    if !page.links.is_empty() {
        out.push_str("\nLinks Preview:\n");
        for link in page.links.iter().take(LINK_PREVIEW) {
            let text: String = link.text.chars().take(LINK_TEXT_CHARS).collect();
            out.push_str(&format!("- {}: {}\n", text, link.href));
        }
    }

    if let Some(files) = files {
        out.push_str(&format!(
            "\nFiles saved:\n- HTML: {}\n- Markdown: {}\n- JSON: {}\n",
            files.html_path.display(),
            files.markdown_path.display(),
            files.json_path.display()
        ));
    }

    out
}
