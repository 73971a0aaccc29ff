/// Extraction client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Handlers depend on the `SyllabusExtractor` trait so tests can substitute
/// a stub.
///
/// Model: gemini-2.0-flash-exp (hardcoded; do not make configurable to prevent drift)
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::syllabus::models::SyllabusDraft;

pub mod prompts;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all extraction calls.
pub const MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("extraction returned empty content")]
    EmptyContent,
}

/// Turns a PDF into a draft syllabus. One attempt per call; retry policy
/// belongs to the caller.
#[async_trait]
pub trait SyllabusExtractor: Send + Sync {
    async fn extract(&self, pdf: &[u8]) -> Result<SyllabusDraft, ExtractionError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Gemini generateContent wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate's first text part.
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_deref()?
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The production extractor. Sends the PDF inline with the extraction
/// prompt and asks for a JSON response.
#[derive(Clone)]
pub struct GeminiExtractor {
    client: Client,
    api_key: String,
}

impl GeminiExtractor {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl SyllabusExtractor for GeminiExtractor {
    async fn extract(&self, pdf: &[u8]) -> Result<SyllabusDraft, ExtractionError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(pdf);
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompts::SYLLABUS_EXTRACTION_PROMPT,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "application/pdf",
                            data: encoded,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let url = format!("{GEMINI_API_URL}/{MODEL}:generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body.first_text().ok_or(ExtractionError::EmptyContent)?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(text);
        debug!("Extraction returned {} bytes of JSON", text.len());

        serde_json::from_str(text).map_err(ExtractionError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(inner) => inner
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(inner.trim_start()),
        None => text,
    }
}

#[cfg(test)]
pub struct StubExtractor(pub SyllabusDraft);

#[cfg(test)]
#[async_trait]
impl SyllabusExtractor for StubExtractor {
    async fn extract(&self, _pdf: &[u8]) -> Result<SyllabusDraft, ExtractionError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
pub struct FailingExtractor;

#[cfg(test)]
#[async_trait]
impl SyllabusExtractor for FailingExtractor {
    async fn extract(&self, _pdf: &[u8]) -> Result<SyllabusDraft, ExtractionError> {
        Err(ExtractionError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}
