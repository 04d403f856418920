//! Mock generation client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::genai::{
    GenerateRequest, GenerateResponse, GenerationClient, GenerationError, GroundingChunk,
    TokenUsage,
};

/// A recorded generation call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedGeneration {
    /// The request that was sent.
    pub request: GenerateRequest,
    /// When the call was made.
    pub timestamp: Instant,
}

/// Mock implementation of the GenerationClient trait.
///
/// Provides controllable behavior for testing:
/// - Return scripted responses in order, then a default response
/// - Track requests for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use airsight_core::testing::{fixtures, MockGenerationClient};
///
/// let client = MockGenerationClient::with_text(fixtures::aqi_response_text());
/// let fetcher = AqiFetcher::new(Arc::new(client));
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerationClient {
    /// Responses returned in order before falling back to `default_response`.
    scripted: Arc<RwLock<VecDeque<GenerateResponse>>>,
    /// Response used once the script is exhausted.
    default_response: Arc<RwLock<GenerateResponse>>,
    /// Recorded requests.
    requests: Arc<RwLock<Vec<RecordedGeneration>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<GenerationError>>>,
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationClient {
    /// Create a mock that answers every call with empty text.
    pub fn new() -> Self {
        Self::with_response(GenerateResponse::default())
    }

    /// Create a mock that answers every call with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_response(GenerateResponse {
            text: text.into(),
            ..Default::default()
        })
    }

    /// Create a mock that answers every call with `response`.
    pub fn with_response(response: GenerateResponse) -> Self {
        Self {
            scripted: Arc::new(RwLock::new(VecDeque::new())),
            default_response: Arc::new(RwLock::new(response)),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the default response.
    pub async fn set_response(&self, response: GenerateResponse) {
        *self.default_response.write().await = response;
    }

    /// Replace the default response's text, keeping its grounding chunks.
    pub async fn set_text(&self, text: impl Into<String>) {
        self.default_response.write().await.text = text.into();
    }

    /// Replace the default response's grounding chunks.
    pub async fn set_grounding_chunks(&self, chunks: Vec<GroundingChunk>) {
        self.default_response.write().await.grounding_chunks = chunks;
    }

    /// Queue a response to be returned before the default one.
    pub async fn push_response(&self, response: GenerateResponse) {
        self.scripted.write().await.push_back(response);
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<RecordedGeneration> {
        self.requests.read().await.clone()
    }

    /// Get the number of calls made.
    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }

    /// Make the next call fail with the given error.
    pub async fn set_next_error(&self, error: GenerationError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenerationError> {
        self.requests.write().await.push(RecordedGeneration {
            request,
            timestamp: Instant::now(),
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let mut response = match self.scripted.write().await.pop_front() {
            Some(response) => response,
            None => self.default_response.read().await.clone(),
        };
        if response.model.is_empty() {
            response.model = self.model().to_string();
        }
        if response.usage == TokenUsage::default() {
            response.usage = TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            };
        }
        Ok(response)
    }
}
