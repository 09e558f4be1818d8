use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::AiSettings;
use crate::error::GenerationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

/// A remote "prompt in, text out" capability.
pub trait GenerationBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

impl<B: GenerationBackend> GenerationBackend for Arc<B> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.as_ref().generate(request).await
    }
}

/// Google Gemini `generateContent` over HTTPS.
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    pub fn new(settings: &AiSettings) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;

        let response = self
            .http_client
            .post(self.url(&request.model))
            .header("x-goog-api-key", api_key)
            .json(&request_payload(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status.as_u16(), body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| GenerationError::MalformedResponse(err.to_string()))?;
        extract_candidate_text(&body)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

fn request_payload(request: &GenerationRequest) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }
        ],
        "generationConfig": {
            "temperature": request.temperature
        }
    })
}

fn extract_candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let chunks = parts
        .iter()
        .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>();

    if chunks.is_empty() {
        None
    } else {
        Some(chunks.concat())
    }
}
