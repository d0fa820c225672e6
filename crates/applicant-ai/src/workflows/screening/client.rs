use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

/// Outbound seam to the text-completion service. Implementations submit one
/// prompt and return the raw response envelope body; the normalizer owns all
/// interpretation of that body.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Failure of the external reasoning call. The orchestrator collapses every
/// variant into the same uncached decline verdict.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion transport failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Connection settings for the Gemini `generateContent` endpoint, including
/// the fixed decoding configuration used for every evaluation.
#[derive(Debug, Clone)]
pub struct ReasoningConfig {
    pub endpoint: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub request_timeout: Duration,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
                .to_string(),
            api_key: String::new(),
            temperature: 0.1,
            max_output_tokens: 500,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Gemini-backed completion client. The request body is assembled with
/// `serde_json::json!` so prompt text containing quotes or newlines is escaped
/// structurally rather than by string replacement.
pub struct GeminiClient {
    config: ReasoningConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: ReasoningConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
            }
        });

        let url = format!("{}?key={}", self.config.endpoint, self.config.api_key);
        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}
