use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub enum RecommendationError {
    /// The completion service itself is unreachable or erroring. This is the
    /// only fatal failure of recommendation synthesis; formatting problems
    /// in the completion text are recovered by parsing and padding instead.
    Unavailable(String),
    Environment(String),
}

impl fmt::Display for RecommendationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationError::Unavailable(msg) => {
                write!(f, "Completion service unavailable: {}", msg)
            }
            RecommendationError::Environment(msg) => write!(f, "Environment error: {}", msg),
        }
    }
}

impl Error for RecommendationError {}

/// Seam to the text-completion collaborator. One completion per call, no
/// streaming.
pub trait CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, RecommendationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn from_env() -> Result<Self, RecommendationError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| RecommendationError::Environment("OPENAI_API_KEY not set".to_string()))?;
        let base_url =
            env::var("OPENAI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| RecommendationError::Environment(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            model,
        })
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, RecommendationError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.7,
            max_tokens: 1000,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RecommendationError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecommendationError::Unavailable(format!(
                "status {}: {}",
                status, body
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RecommendationError::Unavailable(format!("Failed to parse response: {}", e)))?;

        payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| {
                RecommendationError::Unavailable("Completion had no message content".to_string())
            })
    }
}
