//! Geocoding handlers: single lookup, batch lookup, and cache reset.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use fleamap_core::ResolvedCoordinate;
use fleamap_geocoder::PlaceSearch;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeocodeRequest {
    pub location: Option<String>,
    /// Event title, mined for a building name when the location alone fails.
    pub market_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BatchGeocodeRequest {
    pub locations: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct BatchItem {
    location: String,
    coords: Option<ResolvedCoordinate>,
    success: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct BatchSummary {
    total: usize,
    success: usize,
    failed: usize,
    results: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct CacheCleared {
    cleared: usize,
}

fn invalid_body(req_id: &str, rejection: &JsonRejection) -> ApiError {
    ApiError::new(
        req_id,
        "validation_error",
        format!("invalid JSON body: {}", rejection.body_text()),
    )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(super) async fn resolve_location<P: PlaceSearch + 'static>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ResolvedCoordinate>>, ApiError> {
    let Json(body) = payload.map_err(|e| invalid_body(&req_id.0, &e))?;

    let Some(location) = body.location.filter(|l| !l.trim().is_empty()) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "location is required",
        ));
    };

    let hint = body.market_name.as_deref();
    match state.geocoder.resolve(&location, hint).await {
        Some(data) => Ok(Json(ApiResponse {
            data,
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("could not find coordinates for \"{location}\"; check that the address is correct"),
        )),
    }
}

pub(super) async fn resolve_batch<P: PlaceSearch + 'static>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<BatchGeocodeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchSummary>>, ApiError> {
    let Json(body) = payload.map_err(|e| invalid_body(&req_id.0, &e))?;

    let Some(locations) = body.locations else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "locations array is required",
        ));
    };

    let mut results = Vec::with_capacity(locations.len());
    for (index, location) in locations.into_iter().enumerate() {
        if index > 0 && !state.batch_delay.is_zero() {
            tokio::time::sleep(state.batch_delay).await;
        }
        let coords = state.geocoder.resolve(&location, None).await;
        results.push(BatchItem {
            success: coords.is_some(),
            location,
            coords,
        });
    }

    let success = results.iter().filter(|r| r.success).count();
    let failed = results.len() - success;
    tracing::info!(total = results.len(), success, failed, "batch geocoding finished");

    Ok(Json(ApiResponse {
        data: BatchSummary {
            total: results.len(),
            success,
            failed,
            results,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn clear_cache<P: PlaceSearch + 'static>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<CacheCleared>> {
    let cleared = state.geocoder.clear_cache();
    Json(ApiResponse {
        data: CacheCleared { cleared },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "geocoding_test.rs"]
mod tests;
