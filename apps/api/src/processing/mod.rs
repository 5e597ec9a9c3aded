//! Resume processing pipeline: extract → recognize → (optionally) match → assemble.

pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::{extract_blocking, TextExtractor};
use crate::matching::{compute_match, MatchReport};
use crate::ner::{Entity, EntityRecognizer};

/// One uploaded document, alive for a single request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Response body of `POST /process-resume/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub extracted_text: String,
    pub entities: Vec<Entity>,
    /// Present only when a job description was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_match: Option<MatchReport>,
}

/// Runs the full pipeline for one upload. All-or-nothing: the first failing
/// step aborts the request.
pub async fn process_resume(
    extractor: Arc<dyn TextExtractor>,
    recognizer: &dyn EntityRecognizer,
    upload: Upload,
    job_description: Option<&str>,
) -> Result<ProcessedResult, AppError> {
    info!(
        "Processing resume: {} ({} bytes, {})",
        upload.filename.as_deref().unwrap_or("<unnamed>"),
        upload.bytes.len(),
        upload.content_type.as_deref().unwrap_or("unknown type")
    );

    let extracted_text = extract_blocking(extractor, upload.bytes).await?;

    let started = Instant::now();
    let entities = recognizer.recognize(&extracted_text).await?;
    debug!(
        "Recognized {} entities with '{}' backend in {}ms",
        entities.len(),
        recognizer.backend_id(),
        started.elapsed().as_millis()
    );

    let job_match = match job_description {
        Some(job_description) => {
            info!("Job description length: {}", job_description.len());
            let job_entities = recognizer.recognize(job_description).await?;
            Some(compute_match(
                &extracted_text,
                &entities,
                job_description,
                &job_entities,
            ))
        }
        None => None,
    };

    info!(
        "Resume processed: {} chars, {} entities",
        extracted_text.len(),
        entities.len()
    );

    Ok(ProcessedResult {
        extracted_text,
        entities,
        job_match,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::extraction::{normalize_text, ExtractError, TextExtractor};
    use crate::llm_client::LlmError;
    use crate::ner::{Entity, EntityRecognizer, RecognizeError};

    /// Treats the upload as UTF-8 plain text; invalid UTF-8 is a malformed document.
    pub struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn id(&self) -> &str {
            "plain"
        }

        fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
            if bytes.is_empty() {
                return Err(ExtractError::Empty);
            }
            let text = std::str::from_utf8(bytes)
                .map_err(|e| ExtractError::Malformed(e.to_string()))?;
            Ok(normalize_text(text))
        }
    }

    pub struct UnavailableRecognizer;

    #[async_trait]
    impl EntityRecognizer for UnavailableRecognizer {
        fn backend_id(&self) -> &str {
            "unavailable"
        }

        async fn recognize(&self, _text: &str) -> Result<Vec<Entity>, RecognizeError> {
            Err(RecognizeError::Llm(LlmError::EmptyContent))
        }
    }
}
