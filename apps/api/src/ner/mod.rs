//! Named entity recognition: pluggable, trait-based recognizer over plain text.
//!
//! Default: `RegexRecognizer` (pattern + gazetteer, deterministic, no network).
//! Alternative: `LlmRecognizer` (delegates to the Anthropic API via `llm_client`).
//!
//! The recognizer is built once at startup and shared as `Arc<dyn EntityRecognizer>`.

pub mod llm_backend;
pub mod prompts;
pub mod regex_backend;

use std::cmp::Reverse;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, NerBackend};
use crate::llm_client::{LlmClient, LlmError};

pub use llm_backend::LlmRecognizer;
pub use regex_backend::RegexRecognizer;

/// Built-in label taxonomy.
pub mod labels {
    pub const PERSON: &str = "PERSON";
    pub const ORG: &str = "ORG";
    pub const GPE: &str = "GPE";
    pub const DATE: &str = "DATE";
}

/// A recognized span: surface text plus category label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("Entity recognition failed: {0}")]
    Llm(#[from] LlmError),
}

/// The recognizer trait. Implement this to swap backends without touching
/// the handler.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Human-readable backend identifier (e.g. "regex", "llm").
    fn backend_id(&self) -> &str;

    /// Returns every recognized span in order of appearance.
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognizeError>;
}

/// Builds the process-wide recognizer selected by `NER_BACKEND`.
pub fn build_recognizer(config: &Config) -> anyhow::Result<Arc<dyn EntityRecognizer>> {
    match config.ner_backend {
        NerBackend::Regex => Ok(Arc::new(RegexRecognizer::new())),
        NerBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required for the llm backend")?;
            let llm = LlmClient::new(api_key, config.llm_model.clone())?;
            Ok(Arc::new(LlmRecognizer::new(llm)))
        }
    }
}

/// Candidate match as byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl Span {
    pub fn new(start: usize, end: usize, label: &str) -> Self {
        Self {
            start,
            end,
            label: label.to_string(),
        }
    }
}

/// Orders candidates by position and drops overlaps, leftmost-longest first.
/// Ties on identical spans keep the candidate that was collected first.
pub(crate) fn resolve_spans(text: &str, mut spans: Vec<Span>) -> Vec<Entity> {
    spans.retain(|s| s.start < s.end && s.end <= text.len());
    spans.sort_by_key(|s| (s.start, Reverse(s.end)));

    let mut entities = Vec::with_capacity(spans.len());
    let mut last_end = 0;
    for span in spans {
        if span.start < last_end {
            continue;
        }
        last_end = span.end;
        entities.push(Entity {
            text: text[span.start..span.end].to_string(),
            label: span.label,
        });
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_spans_orders_by_position() {
        let text = "Acme Corp hired John Smith";
        let spans = vec![Span::new(16, 26, labels::PERSON), Span::new(0, 9, labels::ORG)];
        let entities = resolve_spans(text, spans);
        assert_eq!(entities[0].text, "Acme Corp");
        assert_eq!(entities[1].text, "John Smith");
    }

    #[test]
    fn test_resolve_spans_prefers_longest_at_same_start() {
        let text = "New York University";
        let spans = vec![Span::new(0, 8, labels::GPE), Span::new(0, 19, labels::ORG)];
        let entities = resolve_spans(text, spans);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, labels::ORG);
    }

    #[test]
    fn test_resolve_spans_drops_overlaps_and_out_of_range() {
        let text = "Jan 2020";
        let spans = vec![
            Span::new(4, 8, labels::DATE),
            Span::new(0, 8, labels::DATE),
            Span::new(5, 40, labels::DATE),
        ];
        let entities = resolve_spans(text, spans);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "Jan 2020");
    }

    #[test]
    fn test_entity_serializes_as_text_and_label() {
        let entity = Entity {
            text: "Acme Corp".to_string(),
            label: labels::ORG.to_string(),
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Acme Corp", "label": "ORG"}));
    }
}
