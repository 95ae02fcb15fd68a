//! `POST /api/v1/analysis`: geocode (or take coordinates), query nearby
//! places, and return the verdict for one machine.

use axum::{extract::State, http::HeaderMap, Extension, Json};
use scout_core::{AnalysisResult, Coordinate, EquipmentProfile, LocationQuery};
use scout_osm::{AnalysisError, LocationInput};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::sessions::SESSION_HEADER;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalysisRequest {
    pub machine_id: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalysisData {
    pub location: LocationQuery,
    pub machine: EquipmentProfile,
    pub result: AnalysisResult,
}

fn parse_site(request: &AnalysisRequest) -> Result<LocationInput, String> {
    let address = request
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty());

    match (address, request.lat, request.lon) {
        (Some(address), None, None) => Ok(LocationInput::Address(address.to_string())),
        (None, Some(lat), Some(lon)) => Coordinate::new(lat, lon)
            .map(LocationInput::Coordinate)
            .map_err(|e| e.to_string()),
        (None, Some(_), None) | (None, None, Some(_)) => {
            Err("lat and lon must be given together".to_string())
        }
        (None, None, None) => Err("provide either address or lat and lon".to_string()),
        (Some(_), _, _) => Err("provide either address or lat and lon, not both".to_string()),
    }
}

fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    let code = match error {
        AnalysisError::GeocodeNotFound { .. } => "geocode_not_found",
        AnalysisError::GeocodeTransport(_) => {
            tracing::error!(error = %error, "geocoding service failed");
            "upstream_unavailable"
        }
        AnalysisError::Superseded => "superseded",
        AnalysisError::Geolocation(_) => "validation_error",
    };
    ApiError::new(request_id, code, error.retry_prompt())
}

pub(super) async fn run_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<ApiResponse<AnalysisData>>, ApiError> {
    let machine = state
        .catalog
        .get(&request.machine_id)
        .cloned()
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("machine '{}' not found", request.machine_id),
            )
        })?;
    let site = parse_site(&request)
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let work = state.scout.analyze(&site, machine.category);

    let session_key = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToOwned::to_owned);

    let outcome = match session_key {
        Some(key) => {
            let lease = state.sessions.acquire(&key);
            lease.session().run(work).await
        }
        None => work.await,
    };

    let (location, result) = outcome.map_err(|e| {
        tracing::info!(request_id = %req_id.0, error = %e, "analysis not completed");
        map_analysis_error(req_id.0.clone(), &e)
    })?;

    tracing::info!(
        request_id = %req_id.0,
        machine = %machine.id,
        classification = %result.classification,
        count = result.competitor_count(),
        "analysis served"
    );

    Ok(Json(ApiResponse {
        data: AnalysisData {
            location,
            machine,
            result,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
