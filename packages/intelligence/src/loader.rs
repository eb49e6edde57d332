//! Fetches a stored PDF and pulls its text out page by page.

use lopdf::Document;
use reqwest::Client;

use crate::error::{IntelligenceError, Result};

/// Text of one PDF page. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page: u32,
    pub text: String,
}

/// Loads PDFs from `http(s)://` URLs or local filesystem paths.
pub struct DocumentLoader {
    http: Client,
}

impl DocumentLoader {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent("pdfshelf/loader")
            .build()
            .map_err(|e| IntelligenceError::Provider(format!("HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Fetch the document at `reference` and extract every non-empty page.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, reference: &str) -> Result<Vec<PageText>> {
        let bytes = self.fetch(reference).await?;
        tracing::debug!(size = bytes.len(), "Fetched document");

        let pages = tokio::task::spawn_blocking(move || extract_pages(&bytes))
            .await
            .map_err(|e| IntelligenceError::Extraction(e.to_string()))??;

        if pages.is_empty() {
            return Err(IntelligenceError::EmptyDocument);
        }
        Ok(pages)
    }

    async fn fetch(&self, reference: &str) -> Result<Vec<u8>> {
        let load_error = |message: String| IntelligenceError::Load {
            reference: reference.to_string(),
            message,
        };

        if reference.starts_with("http://") || reference.starts_with("https://") {
            let response = self
                .http
                .get(reference)
                .send()
                .await
                .map_err(|e| load_error(e.to_string()))?;
            if !response.status().is_success() {
                return Err(load_error(format!("server returned {}", response.status())));
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| load_error(e.to_string()))?;
            Ok(bytes.to_vec())
        } else {
            tokio::fs::read(reference)
                .await
                .map_err(|e| load_error(e.to_string()))
        }
    }
}

/// Extract text per page, in page order, dropping pages with no text.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<PageText>> {
    let document =
        Document::load_mem(bytes).map_err(|e| IntelligenceError::Extraction(e.to_string()))?;

    let mut pages = Vec::new();
    for page in document.get_pages().into_keys() {
        let text = document
            .extract_text(&[page])
            .map_err(|e| IntelligenceError::Extraction(format!("page {page}: {e}")))?;
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        pages.push(PageText {
            page,
            text: text.to_string(),
        });
    }
    Ok(pages)
}
