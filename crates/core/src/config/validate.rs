use super::{types::Config, ConfigError};

/// Longest request timeout accepted for the generation client.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Generation model is set and the timeout is within 1..=300 seconds
/// - Search and recommendation caps are at least 1
/// - The placeholder AQI range is non-empty and pollutant fallbacks are non-negative
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Generation validation
    if config.generation.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "generation.model cannot be empty".to_string(),
        ));
    }
    if config.generation.timeout_secs == 0 || config.generation.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::ValidationError(format!(
            "generation.timeout_secs must be between 1 and {}",
            MAX_TIMEOUT_SECS
        )));
    }

    if config.search.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "search.max_results must be at least 1".to_string(),
        ));
    }

    // AQI fallback validation
    let aqi = &config.aqi;
    if aqi.placeholder_aqi_min >= aqi.placeholder_aqi_max {
        return Err(ConfigError::ValidationError(format!(
            "aqi.placeholder_aqi_min ({}) must be less than aqi.placeholder_aqi_max ({})",
            aqi.placeholder_aqi_min, aqi.placeholder_aqi_max
        )));
    }
    if let Some((pollutant, value)) = aqi
        .pollutants
        .iter()
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
    {
        return Err(ConfigError::ValidationError(format!(
            "aqi.pollutants.{} must be a non-negative number, got {}",
            pollutant.label(),
            value
        )));
    }
    if aqi.max_recommendations == 0 {
        return Err(ConfigError::ValidationError(
            "aqi.max_recommendations must be at least 1".to_string(),
        ));
    }

    Ok(())
}
