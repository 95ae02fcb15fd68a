use axum::{
    extract::{Path, State},
    Extension, Json,
};
use scout_core::EquipmentProfile;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn list_machines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<EquipmentProfile>>> {
    Json(ApiResponse {
        data: state.catalog.machines().to_vec(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_machine(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EquipmentProfile>>, ApiError> {
    let machine = state
        .catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", format!("machine '{id}' not found")))?;

    Ok(Json(ApiResponse {
        data: machine,
        meta: ResponseMeta::new(req_id.0),
    }))
}
