use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::aqi::Pollutants;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub aqi: FallbackDefaults,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Available generation backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenerationProvider {
    #[default]
    Gemini,
}

impl GenerationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationProvider::Gemini => "gemini",
        }
    }
}

/// Generation service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub provider: GenerationProvider,
    /// Model name (default: "gemini-2.5-flash")
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. When unset the binary falls back to `GEMINI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override of the REST endpoint base URL
    #[serde(default)]
    pub api_base: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            model: default_model(),
            api_key: None,
            api_base: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Location search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Number of candidates the prompt asks for
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    5
}

/// Values the AQI pipeline substitutes for fields the model left out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FallbackDefaults {
    /// Inclusive lower bound of the placeholder AQI
    #[serde(default = "default_placeholder_min")]
    pub placeholder_aqi_min: u32,
    /// Exclusive upper bound of the placeholder AQI
    #[serde(default = "default_placeholder_max")]
    pub placeholder_aqi_max: u32,
    #[serde(default = "default_pollutants")]
    pub pollutants: Pollutants,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_location_name")]
    pub location_name: String,
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    /// Used when the response carries no bullet points
    #[serde(default = "default_recommendations")]
    pub recommendations: Vec<String>,
}

impl Default for FallbackDefaults {
    fn default() -> Self {
        Self {
            placeholder_aqi_min: default_placeholder_min(),
            placeholder_aqi_max: default_placeholder_max(),
            pollutants: default_pollutants(),
            status: default_status(),
            description: default_description(),
            location_name: default_location_name(),
            max_recommendations: default_max_recommendations(),
            recommendations: default_recommendations(),
        }
    }
}

fn default_placeholder_min() -> u32 {
    10
}

fn default_placeholder_max() -> u32 {
    50
}

fn default_pollutants() -> Pollutants {
    Pollutants {
        pm25: 12.0,
        pm10: 20.0,
        no2: 15.0,
        so2: 5.0,
        o3: 30.0,
        co: 0.5,
    }
}

fn default_status() -> String {
    "Good".to_string()
}

fn default_description() -> String {
    "Estimated via grounding tools.".to_string()
}

fn default_location_name() -> String {
    "Search Location".to_string()
}

fn default_max_recommendations() -> usize {
    5
}

fn default_recommendations() -> Vec<String> {
    vec![
        "Sensitive groups should reduce outdoor exercise.".to_string(),
        "Keep windows closed if possible.".to_string(),
    ]
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub generation: SanitizedGenerationConfig,
    pub search: SearchConfig,
    pub aqi: FallbackDefaults,
}

/// Sanitized generation config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedGenerationConfig {
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let generation = &config.generation;
        Self {
            server: config.server.clone(),
            generation: SanitizedGenerationConfig {
                provider: generation.provider.as_str().to_string(),
                model: generation.model.clone(),
                api_base: generation.api_base.clone(),
                api_key_configured: generation
                    .api_key
                    .as_deref()
                    .is_some_and(|k| !k.trim().is_empty()),
                timeout_secs: generation.timeout_secs,
            },
            search: config.search.clone(),
            aqi: config.aqi.clone(),
        }
    }
}
