//! Air quality domain types.
//!
//! Everything here is a request-scoped value object: pipelines build them once
//! from extracted text and hand them to the presentation layer unchanged.

mod category;
mod types;

pub use category::{classify_aqi_badge, classify_aqi_color, AqiCategory};
pub use types::{
    average_aqi, AqiData, LocationSearchResult, Pollutant, PollutantLoad, Pollutants,
    ProviderData, Source, DEFAULT_CONFIDENCE, PROVIDER_ROSTER,
};
