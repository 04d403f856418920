//! AQI severity buckets and their dashboard styling.

use serde::{Deserialize, Serialize};

/// US EPA style AQI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Classify an AQI value. Breakpoints are inclusive upper bounds
    /// (50, 100, 150, 200, 300); anything above 300, or NaN, is Hazardous.
    pub fn from_value(value: f64) -> Self {
        if value <= 50.0 {
            AqiCategory::Good
        } else if value <= 100.0 {
            AqiCategory::Moderate
        } else if value <= 150.0 {
            AqiCategory::UnhealthyForSensitive
        } else if value <= 200.0 {
            AqiCategory::Unhealthy
        } else if value <= 300.0 {
            AqiCategory::VeryUnhealthy
        } else {
            AqiCategory::Hazardous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Text, background and border classes for value displays.
    pub fn color_classes(&self) -> &'static str {
        match self {
            AqiCategory::Good => "text-green-500 bg-green-50 border-green-200",
            AqiCategory::Moderate => "text-yellow-600 bg-yellow-50 border-yellow-200",
            AqiCategory::UnhealthyForSensitive => "text-orange-500 bg-orange-50 border-orange-200",
            AqiCategory::Unhealthy => "text-red-500 bg-red-50 border-red-200",
            AqiCategory::VeryUnhealthy => "text-purple-500 bg-purple-50 border-purple-200",
            AqiCategory::Hazardous => "text-rose-900 bg-rose-50 border-rose-200",
        }
    }

    /// Solid background class for badges and bars.
    pub fn badge_class(&self) -> &'static str {
        match self {
            AqiCategory::Good => "bg-green-500",
            AqiCategory::Moderate => "bg-yellow-500",
            AqiCategory::UnhealthyForSensitive => "bg-orange-500",
            AqiCategory::Unhealthy => "bg-red-500",
            AqiCategory::VeryUnhealthy => "bg-purple-500",
            AqiCategory::Hazardous => "bg-rose-900",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Color classes for an AQI value.
pub fn classify_aqi_color(value: f64) -> &'static str {
    AqiCategory::from_value(value).color_classes()
}

/// Badge class for an AQI value.
pub fn classify_aqi_badge(value: f64) -> &'static str {
    AqiCategory::from_value(value).badge_class()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(AqiCategory::from_value(0.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_value(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_value(51.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_value(100.0), AqiCategory::Moderate);
        assert_eq!(
            AqiCategory::from_value(101.0),
            AqiCategory::UnhealthyForSensitive
        );
        assert_eq!(
            AqiCategory::from_value(150.0),
            AqiCategory::UnhealthyForSensitive
        );
        assert_eq!(AqiCategory::from_value(151.0), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_value(200.0), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_value(201.0), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_value(300.0), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_value(301.0), AqiCategory::Hazardous);
    }

    #[test]
    fn test_fractional_values_between_buckets() {
        assert_eq!(AqiCategory::from_value(50.5), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_value(-3.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_value(f64::NAN), AqiCategory::Hazardous);
    }

    #[test]
    fn test_classify_helpers_agree() {
        assert_eq!(classify_aqi_color(42.0), "text-green-500 bg-green-50 border-green-200");
        assert_eq!(classify_aqi_badge(42.0), "bg-green-500");
        assert_eq!(classify_aqi_badge(175.0), "bg-red-500");
        assert_eq!(classify_aqi_badge(500.0), "bg-rose-900");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(
            AqiCategory::UnhealthyForSensitive.to_string(),
            "Unhealthy for Sensitive Groups"
        );
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&AqiCategory::VeryUnhealthy).unwrap();
        assert_eq!(json, "\"very_unhealthy\"");
    }
}
