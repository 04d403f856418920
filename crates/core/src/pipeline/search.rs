//! Location search: free-text query to a list of coordinate candidates.

use std::sync::Arc;
use tracing::{debug, error, info};

use super::generate_observed;
use crate::aqi::LocationSearchResult;
use crate::config::SearchConfig;
use crate::extract::{extract_line, find_number};
use crate::genai::{GenerateRequest, GenerationClient, GroundingTool};
use crate::metrics::SEARCH_RESULTS;

/// Resolves a free-text place query into location candidates.
///
/// Generic over the generation client so tests can inject a mock; the server
/// uses `LocationSearch<dyn GenerationClient>`.
pub struct LocationSearch<C: GenerationClient + ?Sized> {
    client: Arc<C>,
    config: SearchConfig,
}

impl<C: GenerationClient + ?Sized> LocationSearch<C> {
    /// Create a new location search with default configuration.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            config: SearchConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(client: Arc<C>, config: SearchConfig) -> Self {
        Self { client, config }
    }

    /// Build the prompt for a query.
    pub fn build_prompt(&self, query: &str) -> String {
        format!(
            r#"Search for locations matching: "{query}".
For up to {max} specific results, provide:
1. Title/Name
2. Full Address
3. Approximate Latitude and Longitude coordinates.
4. CURRENT estimated Air Quality Index (AQI) value and Status (e.g., 45, Good).

Format each result on its own line, strictly like this:
Place: [Name] | Address: [Address] | Lat: [Lat] | Lng: [Lng] | AQI: [AQI] | Status: [Status]"#,
            query = query.trim(),
            max = self.config.max_results,
        )
    }

    /// Parse the model's answer, one candidate per line.
    ///
    /// Lines missing any of place, address, latitude or longitude are dropped.
    pub fn parse_response(&self, text: &str) -> Vec<LocationSearchResult> {
        text.lines().filter_map(parse_result_line).collect()
    }

    /// Search for locations matching `query`.
    ///
    /// Never fails: generation errors are logged and yield an empty list.
    pub async fn search_locations(&self, query: &str) -> Vec<LocationSearchResult> {
        if query.trim().is_empty() {
            debug!("Skipping location search for blank query");
            return Vec::new();
        }

        let prompt = self.build_prompt(query);
        debug!(prompt = %prompt, "Location search prompt");

        let request =
            GenerateRequest::new(prompt).with_tools(GroundingTool::location_grounding());

        let response = match generate_observed(self.client.as_ref(), "search", request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, query = %query, "Error searching locations");
                return Vec::new();
            }
        };

        let results = self.parse_response(&response.text);
        SEARCH_RESULTS
            .with_label_values(&[])
            .observe(results.len() as f64);
        info!(
            query = %query,
            results = results.len(),
            model = %response.model,
            "Location search completed"
        );
        results
    }
}

fn parse_result_line(line: &str) -> Option<LocationSearchResult> {
    let title = extract_line(line, "Place")?;
    let address = extract_line(line, "Address")?;
    let lat = find_number(line, "Lat")?;
    let lng = find_number(line, "Lng")?;

    Some(LocationSearchResult {
        title,
        address,
        lat,
        lng,
        aqi: find_number(line, "AQI").map(|v| v.trunc() as i64),
        status: extract_line(line, "Status"),
    })
}
