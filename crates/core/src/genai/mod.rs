//! Grounded text generation.
//!
//! [`GenerationClient`] is the seam between the pipelines and the hosted
//! model. [`GeminiClient`] talks to the Gemini REST API; tests use
//! [`crate::testing::MockGenerationClient`].

mod client;
mod gemini;

pub use client::{
    GenerateRequest, GenerateResponse, GenerationClient, GenerationError, GroundingChunk,
    GroundingRef, GroundingTool, LatLng, TokenUsage,
};
pub use gemini::{GeminiClient, DEFAULT_API_BASE};
