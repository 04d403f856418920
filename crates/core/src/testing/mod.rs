//! Testing utilities and a mock generation client.
//!
//! Lets pipelines and the HTTP layer be exercised end to end without calling
//! the hosted model.
//!
//! # Example
//!
//! ```rust,ignore
//! use airsight_core::testing::{fixtures, MockGenerationClient};
//!
//! let client = MockGenerationClient::with_text(fixtures::search_response_text());
//! client.set_next_error(GenerationError::Timeout(Duration::from_secs(30))).await;
//! ```

mod mock_generation_client;

pub use mock_generation_client::{MockGenerationClient, RecordedGeneration};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::aqi::{Pollutants, ProviderData, DEFAULT_CONFIDENCE};
    use crate::genai::{GenerateResponse, GroundingChunk};

    /// A search answer with two complete lines and one missing `Lng`.
    pub fn search_response_text() -> &'static str {
        "Here are the closest matches:\n\
         Place: Eiffel Tower | Address: Champ de Mars, 75007 Paris, France | Lat: 48.8584 | Lng: 2.2945 | AQI: 42 | Status: Good\n\
         Place: Gare du Nord | Address: 18 Rue de Dunkerque, Paris | Lat: 48.8809\n\
         Place: Louvre Museum | Address: Rue de Rivoli, 75001 Paris, France | Lat: 48.8606 | Lng: 2.3376\n"
    }

    /// A well-formed five-provider AQI answer.
    ///
    /// Provider AQIs are 42, 58, 39, 61 and 50 (mean 50).
    pub fn aqi_response_text() -> &'static str {
        r#"Location: Shibuya, Tokyo, Japan

**IQAir AirVisual**
AQI: 42
Status: Good
PM2.5: 10.1
PM10: 18
NO2: 12.5
SO2: 3
O3: 41
CO: 0.4
Description: Ground sensor network blended with satellite data.

**OpenAQ**
AQI: 58
Status: Moderate
PM2.5: 16.4
PM10: 25
NO2: 19
SO2: 4
O3: 36
CO: 0.6
Description: Aggregated government monitoring stations.

**OpenWeatherMap**
AQI: 39
Status: Good
PM2.5: 9.2
PM10: 15
NO2: 11
SO2: 2.5
O3: 44
CO: 0.3
Description: Modelled from atmospheric forecast data.

**AQICN**
AQI: 61
Status: Moderate
PM2.5: 17.8
PM10: 27
NO2: 21
SO2: 5
O3: 33
CO: 0.7
Description: Nearest station readings from the World Air Quality project.

**Google Air Quality**
AQI: 50
Status: Good
PM2.5: 12
PM10: 20
NO2: 15
SO2: 4
O3: 38
CO: 0.5
Description: Proprietary model fusing sensors, traffic and weather.

Recommendations:
* Sensitive groups should limit prolonged outdoor exertion.
* Consider wearing a mask near heavy traffic.
* Ventilate indoor spaces in the early morning.
"#
    }

    /// Grounding chunks matching [`aqi_response_text`], including one with
    /// neither record.
    pub fn aqi_grounding_chunks() -> Vec<GroundingChunk> {
        vec![
            GroundingChunk::web("IQAir Tokyo", "https://www.iqair.com/japan/tokyo"),
            GroundingChunk::maps("Shibuya", "https://maps.google.com/?cid=42"),
            GroundingChunk::default(),
        ]
    }

    /// A full AQI response with text and grounding chunks.
    pub fn aqi_response() -> GenerateResponse {
        GenerateResponse {
            text: aqi_response_text().to_string(),
            grounding_chunks: aqi_grounding_chunks(),
            ..Default::default()
        }
    }

    /// Create a provider reading with reasonable pollutant values.
    pub fn provider_data(name: &str, aqi: f64) -> ProviderData {
        ProviderData {
            provider_name: name.to_string(),
            aqi_value: aqi,
            status: "Good".to_string(),
            pollutants: Pollutants {
                pm25: 12.0,
                pm10: 20.0,
                no2: 15.0,
                so2: 5.0,
                o3: 30.0,
                co: 0.5,
            },
            confidence: DEFAULT_CONFIDENCE.to_string(),
            description: "Test reading.".to_string(),
        }
    }
}
