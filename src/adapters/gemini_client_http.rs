//! Generative backend implementation using reqwest against a Gemini-style API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::domain::config::API_KEY_ENV;
use crate::domain::{AppError, BackendConfig};
use crate::ports::GenerativeBackend;

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";
const DEFAULT_STATUS_MESSAGE: &str = "Generative backend request failed";
const JSON_MIME_TYPE: &str = "application/json";

/// HTTP transport for the generative backend.
///
/// One request per call; failures are returned as `TransportFailure` and never retried.
#[derive(Clone)]
pub struct HttpGenerativeBackend {
    api_key: String,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGenerativeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGenerativeBackend")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGenerativeBackend {
    /// Create a new client with the given API key and configuration.
    pub fn new(api_key: String, config: &BackendConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::transport(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self { api_key, endpoint: generate_endpoint(config)?, client })
    }

    /// Create from the API key environment variable.
    pub fn from_env(config: &BackendConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::EnvironmentVariableMissing(API_KEY_ENV.into()))?;

        Self::new(api_key, config)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn send_request(&self, request: &ApiRequest<'_>) -> Result<Value, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, JSON_MIME_TYPE)
            .json(request)
            .send()
            .map_err(|e| AppError::transport(format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();
        debug!(status = status.as_u16(), bytes = body_text.len(), "backend responded");

        if !status.is_success() {
            let message = extract_error_message(&body_text).unwrap_or_else(|| {
                if !body_text.trim().is_empty() {
                    body_text.clone()
                } else if status.as_u16() == 429 {
                    "Rate limited".to_string()
                } else if status.is_server_error() {
                    "Server error".to_string()
                } else {
                    DEFAULT_STATUS_MESSAGE.to_string()
                }
            });
            return Err(AppError::transport(message, Some(status.as_u16())));
        }

        let api_response: ApiResponse = serde_json::from_str(&body_text).map_err(|e| {
            AppError::transport(format!("Failed to parse response: {}", e), Some(status.as_u16()))
        })?;

        let text = api_response.candidate_text().ok_or_else(|| {
            let message = match api_response.block_reason() {
                Some(reason) => format!("Prompt was blocked: {}", reason),
                None => "Response contained no candidate text".to_string(),
            };
            AppError::transport(message, Some(status.as_u16()))
        })?;

        Ok(decode_model_text(&text))
    }
}

impl GenerativeBackend for HttpGenerativeBackend {
    fn generate(&self, prompt: &str) -> Result<Value, AppError> {
        info!(endpoint = %self.endpoint, prompt_chars = prompt.len(), "sending prompt");
        let request = ApiRequest {
            contents: vec![RequestContent { role: "user", parts: vec![RequestPart { text: prompt }] }],
            generation_config: GenerationConfig { response_mime_type: JSON_MIME_TYPE },
        };
        self.send_request(&request)
    }
}

fn generate_endpoint(config: &BackendConfig) -> Result<Url, AppError> {
    let mut base = config.api_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("models/{}:generateContent", config.model)).map_err(|e| {
        AppError::InvalidConfig(format!("Cannot build endpoint from '{}': {}", config.api_url, e))
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

impl ApiResponse {
    fn candidate_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|part| part.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

/// Decode model output text as JSON.
///
/// Accepts bare JSON, JSON wrapped in a Markdown code fence, or prose around a
/// single `{...}` block. Undecodable text comes back as a JSON string.
pub(crate) fn decode_model_text(text: &str) -> Value {
    let stripped = strip_code_fence(text);
    if let Ok(value) = serde_json::from_str::<Value>(stripped) {
        return value;
    }
    if let Some(candidate) = extract_json_object(stripped)
        && let Ok(value) = serde_json::from_str::<Value>(candidate)
    {
        return value;
    }
    debug!(chars = text.len(), "model text is not JSON");
    Value::String(text.trim().to_string())
}

fn strip_code_fence(text: &str) -> &str {
    let raw = text.trim();
    let Some(inner) = raw.strip_prefix("```").and_then(|rest| rest.strip_suffix("```")) else {
        return raw;
    };
    let inner = inner.trim_start();
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    inner.trim()
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then_some(&raw[start..=end])
}
