//! The two grounded-generation pipelines.
//!
//! Both follow the same shape: build a prompt, call the generation client,
//! extract typed fields from the free-text answer and fill gaps with
//! defaults.

mod aqi;
mod search;

pub use aqi::AqiFetcher;
pub use search::LocationSearch;

use std::time::Instant;

use crate::genai::{GenerateRequest, GenerateResponse, GenerationClient, GenerationError};
use crate::metrics::{GENERATION_DURATION, GENERATION_REQUESTS, GENERATION_TOKENS};

/// Call the client and record request, latency and token metrics.
async fn generate_observed<C: GenerationClient + ?Sized>(
    client: &C,
    pipeline: &str,
    request: GenerateRequest,
) -> Result<GenerateResponse, GenerationError> {
    let start = Instant::now();
    let result = client.generate(request).await;
    GENERATION_DURATION
        .with_label_values(&[pipeline])
        .observe(start.elapsed().as_secs_f64());

    match &result {
        Ok(response) => {
            GENERATION_REQUESTS
                .with_label_values(&[pipeline, "success"])
                .inc();
            GENERATION_TOKENS
                .with_label_values(&[client.provider(), "input"])
                .inc_by(u64::from(response.usage.input_tokens));
            GENERATION_TOKENS
                .with_label_values(&[client.provider(), "output"])
                .inc_by(u64::from(response.usage.output_tokens));
        }
        Err(_) => {
            GENERATION_REQUESTS
                .with_label_values(&[pipeline, "failure"])
                .inc();
        }
    }

    result
}
