use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::ner::EntityRecognizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Document → text. Default: DocxTextExtractor, selected via DOCUMENT_FORMAT.
    pub extractor: Arc<dyn TextExtractor>,
    /// Text → entities. Loaded once at startup, selected via NER_BACKEND.
    pub recognizer: Arc<dyn EntityRecognizer>,
}
