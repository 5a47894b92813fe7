//! Text extraction from uploaded documents.
//!
//! The PDF extractor uses the `pdf-extract` crate, which returns every page in
//! one string with form feeds between pages.

use crate::error::{Error, Result};

/// Turns raw document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    /// Extract the document's text. Unreadable documents are an error.
    fn extract(&self, bytes: &[u8]) -> Result<String>;

    /// Get the name of this extractor (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// PDF extractor backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::Extraction(e.to_string()))?;

        let text = join_pages(&raw);
        if text.trim().is_empty() {
            return Err(Error::Extraction("document contains no text".to_string()));
        }

        tracing::debug!("Extracted {} characters from PDF", text.chars().count());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "PdfTextExtractor"
    }
}

/// Replace form-feed page breaks with newlines.
pub fn join_pages(raw: &str) -> String {
    raw.split('\x0C').collect::<Vec<_>>().join("\n")
}
