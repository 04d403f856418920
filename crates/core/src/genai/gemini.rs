//! Gemini `generateContent` client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::client::{
    GenerateRequest, GenerateResponse, GenerationClient, GenerationError, GroundingChunk,
    GroundingTool, LatLng, TokenUsage,
};
use crate::config::GenerationConfig;

/// Default REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini API client.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key
    /// * `model` - Model name (e.g., "gemini-2.5-flash")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(30);
        Self {
            client: build_http_client(timeout),
            api_key: api_key.into(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout,
        }
    }

    /// Build a client from the `[generation]` config section.
    ///
    /// Fails with `NotConfigured` when no API key is set.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerationError::NotConfigured)?;

        let mut client = Self::new(api_key, &config.model)
            .with_timeout(Duration::from_secs(config.timeout_secs));
        if let Some(base) = &config.api_base {
            client = client.with_api_base(base);
        }
        Ok(client)
    }

    /// Set a custom API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

// Wire format

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<GeminiToolConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum GeminiTool {
    GoogleMaps {},
    GoogleSearch {},
}

impl From<GroundingTool> for GeminiTool {
    fn from(tool: GroundingTool) -> Self {
        match tool {
            GroundingTool::GoogleMaps => GeminiTool::GoogleMaps {},
            GroundingTool::GoogleSearch => GeminiTool::GoogleSearch {},
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiToolConfig {
    retrieval_config: GeminiRetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRetrievalConfig {
    lat_lng: LatLng,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

fn build_request_body(request: GenerateRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(request.prompt),
            }],
        }],
        tools: request.tools.into_iter().map(GeminiTool::from).collect(),
        tool_config: request.lat_lng.map(|lat_lng| GeminiToolConfig {
            retrieval_config: GeminiRetrievalConfig { lat_lng },
        }),
    }
}

fn into_generate_response(response: GeminiResponse, fallback_model: &str) -> GenerateResponse {
    let usage = response
        .usage_metadata
        .map(|u| TokenUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        })
        .unwrap_or_default();
    let model = response
        .model_version
        .unwrap_or_else(|| fallback_model.to_string());

    let Some(candidate) = response.candidates.into_iter().next() else {
        return GenerateResponse {
            usage,
            model,
            ..Default::default()
        };
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    let grounding_chunks = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default();

    GenerateResponse {
        text,
        grounding_chunks,
        usage,
        model,
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::NotConfigured);
        }

        let body = build_request_body(request);
        debug!(model = %self.model, tools = body.tools.len(), "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.timeout)
                } else {
                    GenerationError::Http(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(GenerationError::Api { status, message });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Json(e.to_string())
            }
        })?;

        Ok(into_generate_response(gemini_response, &self.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_client_creation() {
        let client = GeminiClient::new("key", "gemini-2.5-flash");
        assert_eq!(client.provider(), "gemini");
        assert_eq!(client.model(), "gemini-2.5-flash");
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_gemini_client_custom_base() {
        let client = GeminiClient::new("key", "m").with_api_base("http://localhost:8089/");
        assert_eq!(client.api_base, "http://localhost:8089");
        assert_eq!(
            client.endpoint(),
            "http://localhost:8089/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = GenerationConfig::default();
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(GenerationError::NotConfigured)
        ));

        config.api_key = Some("  ".to_string());
        assert!(GeminiClient::from_config(&config).is_err());

        config.api_key = Some("secret".to_string());
        config.timeout_secs = 12;
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(12));
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_request_serialization_with_location() {
        let request = GenerateRequest::new("What is the AQI?")
            .with_tools(GroundingTool::location_grounding())
            .with_lat_lng(LatLng::new(40.7, -74.0));

        let json = serde_json::to_value(build_request_body(request)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "What is the AQI?"}]}],
                "tools": [{"googleMaps": {}}, {"googleSearch": {}}],
                "toolConfig": {"retrievalConfig": {"latLng": {"latitude": 40.7, "longitude": -74.0}}}
            })
        );
    }

    #[test]
    fn test_request_serialization_without_location() {
        let request =
            GenerateRequest::new("Find Paris").with_tools(vec![GroundingTool::GoogleSearch]);
        let json = serde_json::to_value(build_request_body(request)).unwrap();
        assert!(json.get("toolConfig").is_none());
        assert_eq!(json["tools"], serde_json::json!([{"googleSearch": {}}]));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Location: Paris\n"}, {"text": "IQAir AirVisual"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://aqicn.org", "title": "aqicn.org"}},
                        {"maps": {"uri": "https://maps.google.com/?cid=1", "title": "Paris"}}
                    ]
                }
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 340, "totalTokenCount": 460},
            "modelVersion": "gemini-2.5-flash-001"
        }"#;

        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let response = into_generate_response(parsed, "gemini-2.5-flash");

        assert_eq!(response.text, "Location: Paris\nIQAir AirVisual");
        assert_eq!(response.grounding_chunks.len(), 2);
        assert_eq!(
            response.grounding_chunks[0],
            GroundingChunk::web("aqicn.org", "https://aqicn.org")
        );
        assert_eq!(response.usage.input_tokens, 120);
        assert_eq!(response.usage.output_tokens, 340);
        assert_eq!(response.model, "gemini-2.5-flash-001");
    }

    #[test]
    fn test_response_without_candidates() {
        let parsed: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let response = into_generate_response(parsed, "gemini-2.5-flash");
        assert!(response.text.is_empty());
        assert!(response.grounding_chunks.is_empty());
        assert_eq!(response.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_error_body_parsing() {
        let raw = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiError = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.error.message, "API key not valid.");
    }
}
