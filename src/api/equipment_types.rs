//! Equipment type catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::EquipmentType,
};

/// List the equipment type catalog
#[utoipa::path(
    get,
    path = "/equipment-types",
    tag = "equipment-types",
    responses(
        (status = 200, description = "Equipment types ordered by code", body = Vec<EquipmentType>)
    )
)]
pub async fn list_equipment_types(State(state): State<crate::AppState>) -> Json<Vec<EquipmentType>> {
    Json(state.services.lookup.equipment_types())
}

/// Get an equipment type by code
#[utoipa::path(
    get,
    path = "/equipment-types/{code}",
    tag = "equipment-types",
    params(("code" = String, Path, description = "Type code")),
    responses(
        (status = 200, description = "Equipment type", body = EquipmentType),
        (status = 404, description = "Unknown type code")
    )
)]
pub async fn get_equipment_type(
    State(state): State<crate::AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<EquipmentType>> {
    state
        .services
        .lookup
        .equipment_type(&code)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Equipment type {} not found", code)))
}
