pub mod aqi;
pub mod config;
pub mod extract;
pub mod genai;
pub mod metrics;
pub mod pipeline;
pub mod testing;

pub use aqi::{
    average_aqi, classify_aqi_badge, classify_aqi_color, AqiCategory, AqiData,
    LocationSearchResult, Pollutant, PollutantLoad, Pollutants, ProviderData, Source,
    PROVIDER_ROSTER,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FallbackDefaults,
    GenerationConfig, SanitizedConfig,
};
pub use genai::{GeminiClient, GenerationClient, GenerationError};
pub use pipeline::{AqiFetcher, LocationSearch};
