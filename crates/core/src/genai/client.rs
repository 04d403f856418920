//! Generation client abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Error type for generation operations.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Not configured")]
    NotConfigured,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Retrieval tools the model may ground its answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundingTool {
    GoogleMaps,
    GoogleSearch,
}

impl GroundingTool {
    /// Maps + web search, the set both pipelines use.
    pub fn location_grounding() -> Vec<GroundingTool> {
        vec![GroundingTool::GoogleMaps, GroundingTool::GoogleSearch]
    }
}

/// A coordinate used to bias grounding retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within range.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GenerationError::InvalidRequest(format!(
                "latitude must be between -90 and 90, got {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GenerationError::InvalidRequest(format!(
                "longitude must be between -180 and 180, got {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Request for a grounded generation.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// User prompt
    pub prompt: String,
    /// Retrieval tools to enable
    pub tools: Vec<GroundingTool>,
    /// Coordinate hint for retrieval
    pub lat_lng: Option<LatLng>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tools: Vec::new(),
            lat_lng: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<GroundingTool>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_lat_lng(mut self, lat_lng: LatLng) -> Self {
        self.lat_lng = Some(lat_lng);
        self
    }
}

/// A citation reference inside a grounding chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// One grounding citation chunk. Either record may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<GroundingRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<GroundingRef>,
}

impl GroundingChunk {
    pub fn web(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            maps: None,
            web: Some(GroundingRef {
                title: Some(title.into()),
                uri: Some(uri.into()),
            }),
        }
    }

    pub fn maps(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            maps: Some(GroundingRef {
                title: Some(title.into()),
                uri: Some(uri.into()),
            }),
            web: None,
        }
    }
}

/// Response from a generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// The generated text (possibly empty)
    pub text: String,
    /// Citation chunks from the first candidate, in order
    pub grounding_chunks: Vec<GroundingChunk>,
    /// Token usage
    pub usage: TokenUsage,
    /// Model used
    pub model: String,
}

/// Trait for grounded generation clients.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Provider name (e.g., "gemini")
    fn provider(&self) -> &str;

    /// Model name (e.g., "gemini-2.5-flash")
    fn model(&self) -> &str;

    /// Send a prompt with its tool configuration and get free text back.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenerationError>;
}
