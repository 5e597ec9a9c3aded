// Entity recognition LLM prompt templates.

pub const NER_SYSTEM: &str = "\
You are a precise named entity recognizer for resumes. \
You MUST respond with valid JSON only. No markdown fences, no explanations. \
Copy every entity exactly as it appears in the input; never paraphrase, \
normalize, or invent entities.";

pub const NER_PROMPT_TEMPLATE: &str = r#"Find every named entity in the following text.

INPUT TEXT:
{text}

LABELS:
- PERSON: people, including fictional
- ORG: companies, agencies, institutions, universities
- GPE: countries, cities, states
- DATE: absolute or relative dates and periods

OUTPUT SCHEMA (return exactly this structure):
{
  "entities": [
    {"text": "exact substring of the input", "label": "PERSON" | "ORG" | "GPE" | "DATE"}
  ]
}

List entities in the order they appear. Repeat an entity each time it occurs.
Return {"entities": []} if there are none."#;

pub fn render_ner_prompt(text: &str) -> String {
    NER_PROMPT_TEMPLATE.replace("{text}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_inserts_text_once() {
        let prompt = render_ner_prompt("John Smith works at Acme Corp.");
        assert!(prompt.contains("INPUT TEXT:\nJohn Smith works at Acme Corp.\n"));
        assert!(!prompt.contains("{text}"));
    }
}
