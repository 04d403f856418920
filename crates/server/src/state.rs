use airsight_core::{AqiFetcher, Config, GenerationClient, LocationSearch, SanitizedConfig};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    config: Config,
    location_search: LocationSearch<dyn GenerationClient>,
    aqi_fetcher: AqiFetcher<dyn GenerationClient>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn GenerationClient>) -> Self {
        let location_search =
            LocationSearch::with_config(Arc::clone(&client), config.search.clone());
        let aqi_fetcher = AqiFetcher::with_config(client, config.aqi.clone());
        Self {
            config,
            location_search,
            aqi_fetcher,
        }
    }

    /// Replace the AQI fetcher, e.g. to inject a seeded RNG.
    pub fn with_aqi_fetcher(mut self, aqi_fetcher: AqiFetcher<dyn GenerationClient>) -> Self {
        self.aqi_fetcher = aqi_fetcher;
        self
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn location_search(&self) -> &LocationSearch<dyn GenerationClient> {
        &self.location_search
    }

    pub fn aqi_fetcher(&self) -> &AqiFetcher<dyn GenerationClient> {
        &self.aqi_fetcher
    }
}
