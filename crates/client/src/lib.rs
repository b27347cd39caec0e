//! Outbound HTTP for the demo tools.
//!
//! This crate provides the search dispatcher with its per-provider response
//! parsers, the page fetch pipeline and readable content extraction.

pub mod extract;
pub mod fetch;
pub mod search;

pub use extract::{
    ContentBlock, ExtractConfig, ExtractionResult, Extractor, LectitoExtractor, Link, PageExtraction, PageExtractor,
    SavedFiles, extract_links, markdown_document,
};

pub use fetch::{FetchClient, FetchConfig, FetchResponse};

pub use search::{
    Endpoint, Provider, RawResponse, ResponseParser, SearchConfig, SearchDispatcher, SearchError, SearchOptions,
    SearchRequest,
};
