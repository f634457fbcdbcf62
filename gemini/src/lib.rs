//! Minimal Google Gemini API client.
//!
//! This crate provides a focused client for the `generateContent` endpoint
//! with:
//! - Text generation, optionally constrained to a JSON response schema
//! - Image generation via inline data parts
//!
//! Streaming is intentionally not supported; every call is unary.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Errors that can occur when using the Gemini client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API key not configured")]
    NoApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Gemini API client.
#[derive(Clone)]
pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl Gemini {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a Gemini client from the GEMINI_API_KEY environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| Error::NoApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Set the default model for this client.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send a generation request and return the full response.
    pub async fn generate(&self, request: Request) -> Result<Response, Error> {
        let model = request.model.clone().unwrap_or_else(|| self.model.clone());
        let api_request = build_api_request(&request);
        let headers = self.build_headers()?;

        let response = self
            .client
            .post(format!("{API_BASE}/models/{model}:generateContent"))
            .headers(headers)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        parse_response(api_response)
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| Error::Config(format!("Invalid API key: {e}")))?,
        );
        Ok(headers)
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A generation request to send to Gemini.
#[derive(Debug, Clone)]
pub struct Request {
    pub model: Option<String>,
    pub parts: Vec<Part>,
    pub response_mime_type: Option<String>,
    pub response_schema: Option<serde_json::Value>,
}

impl Request {
    /// Create a request with a single text prompt.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            parts: vec![Part::Text {
                text: prompt.into(),
            }],
            response_mime_type: None,
            response_schema: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Constrain the response to JSON conforming to the given schema.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_mime_type = Some("application/json".to_string());
        self.response_schema = Some(schema);
        self
    }
}

/// A part of a request or response content.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { text: String },
    InlineData { mime_type: String, data: String },
}

impl Part {
    /// Extract text from a Text part.
    pub fn as_text(&self) -> Option<&str> {
        if let Part::Text { text } = self {
            Some(text)
        } else {
            None
        }
    }
}

/// A generation response from Gemini.
///
/// Only the first candidate is surfaced; the client never asks for more.
#[derive(Debug, Clone)]
pub struct Response {
    pub parts: Vec<Part>,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl Response {
    /// Get all text content concatenated.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| part.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Get the first inline data part as (mime_type, base64 data).
    pub fn inline_data(&self) -> Option<(&str, &str)> {
        self.parts.iter().find_map(|part| {
            if let Part::InlineData { mime_type, data } = part {
                Some((mime_type.as_str(), data.as_str()))
            } else {
                None
            }
        })
    }
}

/// Token usage information.
#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub response_tokens: usize,
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<ApiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiContent {
    parts: Vec<ApiPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ApiPart {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData")]
    InlineData(ApiInlineData),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    usage_metadata: Option<ApiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    content: Option<ApiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

fn build_api_request(request: &Request) -> ApiRequest {
    let generation_config =
        if request.response_mime_type.is_some() || request.response_schema.is_some() {
            Some(ApiGenerationConfig {
                response_mime_type: request.response_mime_type.clone(),
                response_schema: request.response_schema.clone(),
            })
        } else {
            None
        };

    ApiRequest {
        contents: vec![ApiContent {
            parts: request.parts.iter().map(part_to_api).collect(),
            role: Some("user".to_string()),
        }],
        generation_config,
    }
}

fn part_to_api(part: &Part) -> ApiPart {
    match part {
        Part::Text { text } => ApiPart::Text(text.clone()),
        Part::InlineData { mime_type, data } => ApiPart::InlineData(ApiInlineData {
            mime_type: mime_type.clone(),
            data: data.clone(),
        }),
    }
}

fn parse_response(api_response: ApiResponse) -> Result<Response, Error> {
    let candidate = api_response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::Parse("response contained no candidates".to_string()))?;

    let parts = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| match part {
                    ApiPart::Text(text) => Part::Text { text },
                    ApiPart::InlineData(inline) => Part::InlineData {
                        mime_type: inline.mime_type,
                        data: inline.data,
                    },
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Response {
        parts,
        finish_reason: candidate.finish_reason,
        usage: api_response.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            response_tokens: u.candidates_token_count,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Gemini::new("test-key");
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_client_with_model() {
        let client = Gemini::new("test-key").with_model("gemini-2.5-flash-image");
        assert_eq!(client.model, "gemini-2.5-flash-image");
    }

    #[test]
    fn test_request_builder() {
        let request = Request::text("Hello")
            .with_model("gemini-2.5-flash")
            .with_json_schema(serde_json::json!({"type": "OBJECT"}));

        assert_eq!(request.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(
            request.response_mime_type.as_deref(),
            Some("application/json")
        );
        assert!(request.response_schema.is_some());
    }

    #[test]
    fn test_request_serialization() {
        let request = Request::text("hi").with_json_schema(serde_json::json!({"type": "OBJECT"}));
        let api = build_api_request(&request);
        let value = serde_json::to_value(&api).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_parse_text_response() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "{\"title\": \"ok\"}"}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}
        }"#;

        let api: ApiResponse = serde_json::from_str(raw).unwrap();
        let response = parse_response(api).unwrap();

        assert_eq!(response.text(), "{\"title\": \"ok\"}");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.response_tokens, 34);
    }

    #[test]
    fn test_parse_inline_data_response() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            {"text": "here is your image"},
                            {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                        ]
                    }
                }
            ]
        }"#;

        let api: ApiResponse = serde_json::from_str(raw).unwrap();
        let response = parse_response(api).unwrap();

        let (mime, data) = response.inline_data().expect("inline data present");
        assert_eq!(mime, "image/png");
        assert_eq!(data, "aGVsbG8=");
    }

    #[test]
    fn test_parse_empty_candidates() {
        let api: ApiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(parse_response(api), Err(Error::Parse(_))));
    }
}
