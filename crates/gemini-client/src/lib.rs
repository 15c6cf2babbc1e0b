use prediction_core::{NewsScore, Sentiment};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod prompt;


pub use prompt::build_prompt;

const BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "models/gemini-2.5-flash";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// The structured reply the model is constrained to produce. Within valid
/// JSON, missing keys fall back to an empty score list and `unknown`.
#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub news_scores: Vec<NewsScore>,
    #[serde(default)]
    pub sentiment: Sentiment,
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: Client::new(),
            base_url: BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the client at a different host (used by tests and local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model resource name (`models/...`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send the prompt and parse the schema-constrained JSON reply.
    ///
    /// The request declares the response schema, so a healthy model reply is
    /// always parseable; a reply that still fails to parse surfaces as
    /// `InvalidJson` rather than an empty verdict.
    pub async fn generate_verdict(&self, prompt: &str) -> Result<Verdict, GeminiError> {
        let url = format!("{}/v1beta/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![ContentBlock {
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: verdict_schema(),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeminiError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or(GeminiError::EmptyResponse)?;

        tracing::debug!("Model reply: {} chars", text.len());
        Ok(serde_json::from_str(&text)?)
    }
}

/// Response schema declared on every request; mirrors `Verdict`.
fn verdict_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "required": ["news_scores", "sentiment"],
        "properties": {
            "news_scores": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "required": ["title", "summary", "score", "url"],
                    "properties": {
                        "title": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "url": { "type": "STRING" }
                    }
                }
            },
            "sentiment": { "type": "STRING" }
        }
    })
}

// Request structures
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<ContentBlock>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ContentBlock {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

// Response structures
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
