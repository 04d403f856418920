//! Multi-provider AQI lookup for a coordinate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex_lite::Regex;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::generate_observed;
use crate::aqi::{
    AqiData, Pollutant, Pollutants, ProviderData, Source, DEFAULT_CONFIDENCE, PROVIDER_ROSTER,
};
use crate::config::FallbackDefaults;
use crate::extract::{extract_bullet_list, extract_line, find_number, segment_by_provider};
use crate::genai::{
    GenerateRequest, GenerationClient, GenerationError, GroundingChunk, GroundingTool, LatLng,
};
use crate::metrics::FIELD_FALLBACKS;

/// Heading line that introduces the recommendations block.
const RECOMMENDATIONS_HEADING: &str =
    r"(?im)^[ \t#*_]*[a-z ]*recommendations?[ \t*_:\r]*$";

/// Fetches and assembles the five-provider AQI comparison for a location.
pub struct AqiFetcher<C: GenerationClient + ?Sized> {
    client: Arc<C>,
    defaults: FallbackDefaults,
    rng: Mutex<StdRng>,
}

impl<C: GenerationClient + ?Sized> AqiFetcher<C> {
    /// Create a new fetcher with default fallbacks.
    pub fn new(client: Arc<C>) -> Self {
        Self::with_config(client, FallbackDefaults::default())
    }

    /// Create with custom fallback values.
    pub fn with_config(client: Arc<C>, defaults: FallbackDefaults) -> Self {
        Self {
            client,
            defaults,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the randomness source used for placeholder AQI values.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// Build the prompt for a coordinate.
    pub fn build_prompt(&self, lat: f64, lng: f64) -> String {
        let providers = PROVIDER_ROSTER
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {}", i + 1, name))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Analyze the air quality at latitude {lat}, longitude {lng}.
I need comparative data from these specific providers:
{providers}

For each provider, provide:
- Current AQI Value
- Qualitative Status (Good, Moderate, etc.)
- Pollutant levels (PM2.5, PM10, NO2, SO2, O3, CO)
- A brief methodology note

Structure the response provider by provider, starting each section with the
provider name on its own line. Do not mention a provider's name outside its
own section.
Begin the response with a line "Location: [Location Name]".
End the response with a "Recommendations:" heading followed by up to {max}
overall health recommendations, one per line, each starting with "* ".

Output format hint:
[Provider Name]
AQI: [Value]
Status: [Status]
PM2.5: [Value]
PM10: [Value]
NO2: [Value]
SO2: [Value]
O3: [Value]
CO: [Value]
Description: [Brief methodology note]"#,
            max = self.defaults.max_recommendations,
        )
    }

    /// Turn a model answer and its grounding citations into an [`AqiData`].
    ///
    /// Never fails: every missing field is replaced by its fallback.
    pub fn parse_response(&self, text: &str, grounding_chunks: &[GroundingChunk]) -> AqiData {
        let sections = segment_by_provider(text, &PROVIDER_ROSTER);
        let providers = PROVIDER_ROSTER
            .iter()
            .zip(sections)
            .map(|(name, section)| self.parse_provider(name, section))
            .collect();

        let location_name = extract_line(text, "Location").unwrap_or_else(|| {
            record_fallback("location");
            self.defaults.location_name.clone()
        });

        AqiData::new(
            location_name,
            providers,
            self.parse_recommendations(text),
            sources_from_grounding(grounding_chunks),
            chrono::Local::now().format("%-I:%M:%S %p").to_string(),
        )
    }

    /// Fetch the comparison for a coordinate.
    ///
    /// Generation failures propagate unchanged; invalid coordinates are
    /// rejected before the model is called.
    pub async fn fetch_aqi_data(&self, lat: f64, lng: f64) -> Result<AqiData, GenerationError> {
        let lat_lng = LatLng::new(lat, lng);
        lat_lng.validate()?;

        let prompt = self.build_prompt(lat, lng);
        debug!(prompt = %prompt, "AQI prompt");

        let request = GenerateRequest::new(prompt)
            .with_tools(GroundingTool::location_grounding())
            .with_lat_lng(lat_lng);

        let response = generate_observed(self.client.as_ref(), "aqi", request)
            .await
            .inspect_err(|e| warn!(error = %e, lat, lng, "Error fetching multi-source AQI data"))?;

        let data = self.parse_response(&response.text, &response.grounding_chunks);
        info!(
            location = %data.location_name,
            avg_aqi = data.avg_aqi,
            sources = data.sources.len(),
            model = %response.model,
            "AQI data assembled"
        );
        Ok(data)
    }

    fn parse_provider(&self, name: &str, section: &str) -> ProviderData {
        if section.is_empty() {
            warn!(provider = %name, "Provider missing from response, using fallbacks");
        }

        let aqi_value = find_reading(section, "AQI").unwrap_or_else(|| {
            record_fallback("aqi");
            self.placeholder_aqi()
        });
        let status = extract_line(section, "Status").unwrap_or_else(|| {
            record_fallback("status");
            self.defaults.status.clone()
        });
        let description = extract_line(section, "Description").unwrap_or_else(|| {
            record_fallback("description");
            self.defaults.description.clone()
        });

        let value = |pollutant: Pollutant| {
            find_reading(section, pollutant.label()).unwrap_or_else(|| {
                record_fallback(pollutant.label());
                self.defaults.pollutants.get(pollutant)
            })
        };
        let pollutants = Pollutants {
            pm25: value(Pollutant::Pm25),
            pm10: value(Pollutant::Pm10),
            no2: value(Pollutant::No2),
            so2: value(Pollutant::So2),
            o3: value(Pollutant::O3),
            co: value(Pollutant::Co),
        };

        ProviderData {
            provider_name: name.to_string(),
            aqi_value,
            status,
            pollutants,
            confidence: DEFAULT_CONFIDENCE.to_string(),
            description,
        }
    }

    fn parse_recommendations(&self, text: &str) -> Vec<String> {
        let scope = Regex::new(RECOMMENDATIONS_HEADING)
            .ok()
            .and_then(|re| re.find(text))
            .map_or(text, |heading| &text[heading.end()..]);

        let recommendations = extract_bullet_list(scope, self.defaults.max_recommendations);
        if recommendations.is_empty() {
            record_fallback("recommendations");
            return self.defaults.recommendations.clone();
        }
        recommendations
    }

    /// Uniform integer in `[placeholder_aqi_min, placeholder_aqi_max)`.
    fn placeholder_aqi(&self) -> f64 {
        let (min, max) = (
            self.defaults.placeholder_aqi_min,
            self.defaults.placeholder_aqi_max,
        );
        if min >= max {
            return f64::from(min);
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f64::from(rng.gen_range(min..max))
    }
}

/// AQI and concentration readings are never negative.
fn find_reading(section: &str, label: &str) -> Option<f64> {
    find_number(section, label).filter(|v| *v >= 0.0)
}

/// Map grounding chunks to citations, preferring the maps record.
fn sources_from_grounding(chunks: &[GroundingChunk]) -> Vec<Source> {
    chunks
        .iter()
        .filter(|chunk| chunk.maps.is_some() || chunk.web.is_some())
        .map(|chunk| {
            let refs = [chunk.maps.as_ref(), chunk.web.as_ref()];
            let title = refs
                .iter()
                .flatten()
                .find_map(|r| r.title.clone().filter(|t| !t.is_empty()))
                .unwrap_or_else(|| "Data Source".to_string());
            let uri = refs
                .iter()
                .flatten()
                .find_map(|r| r.uri.clone().filter(|u| !u.is_empty()))
                .unwrap_or_else(|| "#".to_string());
            Source { title, uri }
        })
        .collect()
}

fn record_fallback(field: &str) {
    debug!(field, "Field missing from response, using fallback");
    FIELD_FALLBACKS.with_label_values(&[field]).inc();
}
