//! Core air quality data types.

use serde::{Deserialize, Serialize};

/// Confidence label attached to every provider reading.
pub const DEFAULT_CONFIDENCE: &str = "High";

/// Canonical provider roster, in the order the dashboard tabs expect.
pub const PROVIDER_ROSTER: [&str; 5] = [
    "IQAir AirVisual",
    "OpenAQ",
    "OpenWeatherMap",
    "AQICN",
    "Google Air Quality",
];

// ============================================================================
// Pollutants
// ============================================================================

/// Pollutant concentrations reported by a single provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    /// Fine particulates (μg/m³).
    pub pm25: f64,
    /// Coarse particulates (μg/m³).
    pub pm10: f64,
    /// Nitrogen dioxide (μg/m³).
    pub no2: f64,
    /// Sulfur dioxide (μg/m³).
    pub so2: f64,
    /// Ozone (μg/m³).
    pub o3: f64,
    /// Carbon monoxide (mg/m³).
    pub co: f64,
}

impl Pollutants {
    /// Concentration of a single pollutant.
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::O3 => self.o3,
            Pollutant::Co => self.co,
        }
    }

    /// Iterate over `(pollutant, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// The six pollutants every provider reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    So2,
    O3,
    Co,
}

impl Pollutant {
    /// All pollutants in display order.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::O3,
        Pollutant::Co,
    ];

    /// Label used in model responses and on pollutant cards.
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::O3 => "O3",
            Pollutant::Co => "CO",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "Fine Particulates",
            Pollutant::Pm10 => "Coarse Particulates",
            Pollutant::No2 => "Nitrogen Dioxide",
            Pollutant::So2 => "Sulfur Dioxide",
            Pollutant::O3 => "Ozone",
            Pollutant::Co => "Carbon Monoxide",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Co => "mg/m³",
            _ => "μg/m³",
        }
    }

    /// Reference concentration a card's gauge is scaled against.
    pub fn threshold(&self) -> f64 {
        match self {
            Pollutant::Pm25 => 25.0,
            Pollutant::Pm10 => 50.0,
            Pollutant::No2 => 40.0,
            Pollutant::So2 => 20.0,
            Pollutant::O3 => 100.0,
            Pollutant::Co => 4.0,
        }
    }

    /// Percentage of the reference threshold, capped at 100.
    pub fn load_percent(&self, value: f64) -> f64 {
        let percent = value / self.threshold() * 100.0;
        if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        }
    }

    pub fn load_level(&self, value: f64) -> PollutantLoad {
        let percent = self.load_percent(value);
        if percent > 80.0 {
            PollutantLoad::High
        } else if percent > 50.0 {
            PollutantLoad::Elevated
        } else {
            PollutantLoad::Low
        }
    }
}

/// Coarse load level of a pollutant relative to its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollutantLoad {
    Low,
    Elevated,
    High,
}

// ============================================================================
// Provider readings
// ============================================================================

/// One monitoring source's reading for the queried location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderData {
    /// Provider name, one of [`PROVIDER_ROSTER`].
    pub provider_name: String,
    /// Air quality index value.
    pub aqi_value: f64,
    /// Qualitative status, usually an AQI category name.
    pub status: String,
    pub pollutants: Pollutants,
    pub confidence: String,
    /// One-line methodology note.
    pub description: String,
}

/// A grounding citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    /// Link target, `#` when the citation carried none.
    pub uri: String,
}

/// Aggregate multi-provider result for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiData {
    pub location_name: String,
    /// Exactly one reading per roster provider, in roster order.
    pub providers: Vec<ProviderData>,
    pub recommendations: Vec<String>,
    pub sources: Vec<Source>,
    /// Human-readable local time of the fetch.
    pub timestamp: String,
    /// Rounded mean of the providers' AQI values.
    pub avg_aqi: i64,
}

impl AqiData {
    /// Build the aggregate, deriving `avg_aqi` from the providers.
    pub fn new(
        location_name: String,
        providers: Vec<ProviderData>,
        recommendations: Vec<String>,
        sources: Vec<Source>,
        timestamp: String,
    ) -> Self {
        let avg_aqi = average_aqi(&providers);
        Self {
            location_name,
            providers,
            recommendations,
            sources,
            timestamp,
            avg_aqi,
        }
    }
}

/// Rounded arithmetic mean of the providers' AQI values (0 when empty).
pub fn average_aqi(providers: &[ProviderData]) -> i64 {
    if providers.is_empty() {
        return 0;
    }
    let total: f64 = providers.iter().map(|p| p.aqi_value).sum();
    (total / providers.len() as f64).round() as i64
}

// ============================================================================
// Location search
// ============================================================================

/// A location candidate returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSearchResult {
    pub title: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Preview AQI, if the model reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, aqi: f64) -> ProviderData {
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
            description: "test".to_string(),
        }
    }

    #[test]
    fn test_average_aqi_rounds_mean() {
        let providers: Vec<_> = [42.0, 58.0, 39.0, 61.0, 50.0]
            .iter()
            .zip(PROVIDER_ROSTER)
            .map(|(aqi, name)| provider(name, *aqi))
            .collect();
        assert_eq!(average_aqi(&providers), 50);
    }

    #[test]
    fn test_average_aqi_rounds_half_up() {
        let providers = vec![provider("a", 10.0), provider("b", 11.0)];
        assert_eq!(average_aqi(&providers), 11);
    }

    #[test]
    fn test_average_aqi_empty() {
        assert_eq!(average_aqi(&[]), 0);
    }

    #[test]
    fn test_aqi_data_derives_average() {
        let data = AqiData::new(
            "Paris".to_string(),
            vec![provider("a", 20.0), provider("b", 40.0)],
            vec![],
            vec![],
            "10:00:00 AM".to_string(),
        );
        assert_eq!(data.avg_aqi, 30);
    }

    #[test]
    fn test_pollutant_metadata() {
        assert_eq!(Pollutant::Pm25.label(), "PM2.5");
        assert_eq!(Pollutant::Co.unit(), "mg/m³");
        assert_eq!(Pollutant::No2.unit(), "μg/m³");
        assert_eq!(Pollutant::O3.threshold(), 100.0);
    }

    #[test]
    fn test_pollutant_load() {
        assert_eq!(Pollutant::Pm25.load_percent(50.0), 100.0);
        assert_eq!(Pollutant::Pm25.load_level(5.0), PollutantLoad::Low);
        assert_eq!(Pollutant::Pm25.load_level(15.0), PollutantLoad::Elevated);
        assert_eq!(Pollutant::Pm25.load_level(21.0), PollutantLoad::High);
        assert_eq!(Pollutant::Co.load_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_pollutants_iter_order() {
        let p = provider("a", 1.0).pollutants;
        let labels: Vec<_> = p.iter().map(|(k, _)| k.label()).collect();
        assert_eq!(labels, vec!["PM2.5", "PM10", "NO2", "SO2", "O3", "CO"]);
    }

    #[test]
    fn test_search_result_omits_missing_preview() {
        let result = LocationSearchResult {
            title: "Louvre".to_string(),
            address: "Paris".to_string(),
            lat: 48.86,
            lng: 2.33,
            aqi: None,
            status: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("aqi"));
        assert!(!json.contains("status"));
    }
}
