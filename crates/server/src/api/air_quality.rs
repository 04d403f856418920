//! Location search and AQI comparison handlers.

use std::sync::Arc;

use airsight_core::{AqiCategory, AqiData, GenerationError, LocationSearchResult};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::state::AppState;

/// Message shown to the user when the comparison cannot be built.
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch air quality data. Please try another location.";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<LocationSearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct AqiParams {
    pub lat: f64,
    pub lng: f64,
}

/// Display classification for one AQI value.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category: AqiCategory,
    pub label: &'static str,
    pub color_classes: &'static str,
    pub badge_class: &'static str,
}

impl CategoryView {
    fn for_value(value: f64) -> Self {
        let category = AqiCategory::from_value(value);
        Self {
            category,
            label: category.label(),
            color_classes: category.color_classes(),
            badge_class: category.badge_class(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesView {
    pub average: CategoryView,
    /// One entry per provider, aligned with `providers`.
    pub providers: Vec<CategoryView>,
}

#[derive(Debug, Serialize)]
pub struct AqiResponse {
    #[serde(flatten)]
    pub data: AqiData,
    pub categories: CategoriesView,
}

impl From<AqiData> for AqiResponse {
    fn from(data: AqiData) -> Self {
        let categories = CategoriesView {
            average: CategoryView::for_value(data.avg_aqi as f64),
            providers: data
                .providers
                .iter()
                .map(|p| CategoryView::for_value(p.aqi_value))
                .collect(),
        };
        Self { data, categories }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/locations/search?q=...
///
/// Always 200; failures surface as an empty result list.
pub async fn search_locations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let results = state.location_search().search_locations(&params.q).await;
    Json(SearchResponse { results })
}

/// GET /api/v1/aqi?lat=...&lng=...
pub async fn get_aqi(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AqiParams>,
) -> Result<Json<AqiResponse>, impl IntoResponse> {
    match state
        .aqi_fetcher()
        .fetch_aqi_data(params.lat, params.lng)
        .await
    {
        Ok(data) => {
            info!(
                lat = params.lat,
                lng = params.lng,
                location = %data.location_name,
                "Served AQI comparison"
            );
            Ok(Json(AqiResponse::from(data)))
        }
        Err(GenerationError::InvalidRequest(message)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )),
        Err(e) => {
            error!(error = %e, lat = params.lat, lng = params.lng, "AQI fetch failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: FETCH_FAILED_MESSAGE.to_string(),
                }),
            ))
        }
    }
}
