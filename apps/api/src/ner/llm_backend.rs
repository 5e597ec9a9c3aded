//! LLM-backed recognizer. The model proposes spans; they are only kept if they
//! occur verbatim in the source text, and are re-ordered by position.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::prompts::{render_ner_prompt, NER_SYSTEM};
use super::{resolve_spans, Entity, EntityRecognizer, RecognizeError, Span};
use crate::llm_client::LlmClient;

#[derive(Debug, Deserialize)]
struct LlmEntityList {
    #[serde(default)]
    entities: Vec<LlmEntity>,
}

#[derive(Debug, Deserialize)]
struct LlmEntity {
    text: String,
    label: String,
}

pub struct LlmRecognizer {
    llm: LlmClient,
}

impl LlmRecognizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl EntityRecognizer for LlmRecognizer {
    fn backend_id(&self) -> &str {
        "llm"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognizeError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let reply: LlmEntityList = self
            .llm
            .call_json(&render_ner_prompt(text), NER_SYSTEM)
            .await?;
        let proposed = reply.entities.len();
        let entities = align_to_source(text, reply.entities);
        debug!(
            "LLM proposed {} entities, {} grounded in source (model: {})",
            proposed,
            entities.len(),
            self.llm.model()
        );
        Ok(entities)
    }
}

/// Locates each proposed entity in `text`, scanning forward from the previous
/// hit so repeated mentions map to successive occurrences. Only whole-word
/// hits count; entities that do not occur in the text are dropped.
fn align_to_source(text: &str, proposed: Vec<LlmEntity>) -> Vec<Entity> {
    let mut spans = Vec::with_capacity(proposed.len());
    let mut cursor = 0;

    for candidate in proposed {
        let needle = candidate.text.trim();
        let label = candidate.label.trim().to_uppercase();
        if needle.is_empty() || label.is_empty() {
            continue;
        }

        let found = find_whole_word(text, needle, cursor)
            .or_else(|| find_whole_word(text, needle, 0));
        if let Some(start) = found {
            let end = start + needle.len();
            cursor = end;
            spans.push(Span {
                start,
                end,
                label,
            });
        }
    }

    resolve_spans(text, spans)
}

/// First occurrence of `needle` at or after `from` that does not start or end
/// in the middle of a word.
fn find_whole_word(text: &str, needle: &str, from: usize) -> Option<usize> {
    text[from..]
        .match_indices(needle)
        .map(|(i, _)| from + i)
        .find(|&start| {
            let end = start + needle.len();
            !joins_word(text[..start].chars().next_back(), needle.chars().next())
                && !joins_word(text[end..].chars().next(), needle.chars().next_back())
        })
}

fn joins_word(outside: Option<char>, edge: Option<char>) -> bool {
    matches!((outside, edge), (Some(a), Some(b)) if a.is_alphanumeric() && b.is_alphanumeric())
}
