use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Which entity recognizer backend to load at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NerBackend {
    Regex,
    Llm,
}

impl FromStr for NerBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex" => Ok(NerBackend::Regex),
            "llm" => Ok(NerBackend::Llm),
            other => bail!("NER_BACKEND must be 'regex' or 'llm', got '{other}'"),
        }
    }
}

/// Which document format the text extractor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    Pdf,
}

impl FromStr for DocumentFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docx" => Ok(DocumentFormat::Docx),
            "pdf" => Ok(DocumentFormat::Pdf),
            other => bail!("DOCUMENT_FORMAT must be 'docx' or 'pdf', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub document_format: DocumentFormat,
    pub ner_backend: NerBackend,
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    /// `None` disables the request body limit entirely.
    pub max_upload_bytes: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let document_format = match lookup("DOCUMENT_FORMAT") {
            Some(raw) => raw.parse::<DocumentFormat>()?,
            None => DocumentFormat::Docx,
        };

        let ner_backend = match lookup("NER_BACKEND") {
            Some(raw) => raw.parse::<NerBackend>()?,
            None => NerBackend::Regex,
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if ner_backend == NerBackend::Llm && anthropic_api_key.is_none() {
            bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set (NER_BACKEND=llm)");
        }

        let max_upload_bytes = lookup("MAX_UPLOAD_BYTES")
            .map(|raw| {
                raw.parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")
            })
            .transpose()?;

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            document_format,
            ner_backend,
            anthropic_api_key,
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_upload_bytes,
        })
    }
}
