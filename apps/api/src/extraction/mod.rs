//! Document text extraction: converts an uploaded document into plain text.
//!
//! The handler only sees the `TextExtractor` trait. `AppState` carries an
//! `Arc<dyn TextExtractor>`; the default backend is `DocxTextExtractor`, with
//! `PdfTextExtractor` selectable through `DOCUMENT_FORMAT=pdf`.

pub mod docx;
pub mod pdf;

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, DocumentFormat};

pub use docx::DocxTextExtractor;
pub use pdf::PdfTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Uploaded document is empty")]
    Empty,

    #[error("Failed to extract text from document: {0}")]
    Malformed(String),

    #[error("Text extraction aborted: {0}")]
    Aborted(String),
}

/// Converts raw document bytes into plain text.
///
/// Implementations are synchronous and may be CPU-heavy; callers should go
/// through [`extract_blocking`] from async code.
pub trait TextExtractor: Send + Sync {
    /// Short backend identifier, e.g. "docx".
    fn id(&self) -> &str;

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Builds the process-wide extractor selected by `DOCUMENT_FORMAT`.
pub fn build_extractor(config: &Config) -> Arc<dyn TextExtractor> {
    match config.document_format {
        DocumentFormat::Docx => Arc::new(DocxTextExtractor),
        DocumentFormat::Pdf => Arc::new(PdfTextExtractor),
    }
}

/// Runs the extractor on the blocking pool.
/// A panic inside the extractor library surfaces as `ExtractError::Aborted`.
pub async fn extract_blocking(
    extractor: Arc<dyn TextExtractor>,
    bytes: Bytes,
) -> Result<String, ExtractError> {
    let started = std::time::Instant::now();
    let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
        .await
        .map_err(|e| ExtractError::Aborted(e.to_string()))??;
    debug!(
        "Extracted {} chars in {}ms",
        text.len(),
        started.elapsed().as_millis()
    );
    Ok(text)
}

/// Normalizes line endings to `\n` and trims surrounding whitespace.
pub fn normalize_text(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("\n\n  Hello\r\nWorld \r"), "Hello\nWorld");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_build_extractor_follows_document_format() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(build_extractor(&config).id(), "docx");

        config.document_format = DocumentFormat::Pdf;
        assert_eq!(build_extractor(&config).id(), "pdf");
    }

    #[tokio::test]
    async fn test_extract_blocking_propagates_errors() {
        let extractor: Arc<dyn TextExtractor> = Arc::new(DocxTextExtractor);
        let err = extract_blocking(extractor, Bytes::from_static(b"definitely not a document"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_)));
    }

    struct PanickingExtractor;

    impl TextExtractor for PanickingExtractor {
        fn id(&self) -> &str {
            "panic"
        }

        fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractError> {
            panic!("font table overflow")
        }
    }

    #[tokio::test]
    async fn test_extract_blocking_catches_panics() {
        let extractor: Arc<dyn TextExtractor> = Arc::new(PanickingExtractor);
        let err = extract_blocking(extractor, Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Aborted(_)));
    }
}
