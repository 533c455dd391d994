//! Unit endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Sector, Unit, UnitData},
};

/// Get unit by ID
#[utoipa::path(
    get,
    path = "/units/{id}",
    tag = "units",
    params(("id" = Uuid, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit details", body = Unit),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn get_unit(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Unit>> {
    state
        .services
        .lookup
        .unit(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unit {} not found", id)))
}

/// Create a unit under a company
#[utoipa::path(
    post,
    path = "/units",
    tag = "units",
    request_body = UnitData,
    responses(
        (status = 201, description = "Unit created", body = Unit),
        (status = 409, description = "A unit with this name already exists for the company")
    )
)]
pub async fn create_unit(
    State(state): State<crate::AppState>,
    Json(data): Json<UnitData>,
) -> AppResult<(StatusCode, Json<Unit>)> {
    let unit = state.services.store.add_unit(data).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// Replace a unit
#[utoipa::path(
    put,
    path = "/units/{id}",
    tag = "units",
    params(("id" = Uuid, Path, description = "Unit ID")),
    request_body = UnitData,
    responses(
        (status = 200, description = "Unit updated", body = Unit)
    )
)]
pub async fn update_unit(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UnitData>,
) -> AppResult<Json<Unit>> {
    let unit = state.services.store.update_unit(id, data).await?;
    Ok(Json(unit))
}

/// List the sectors of a unit
#[utoipa::path(
    get,
    path = "/units/{id}/sectors",
    tag = "units",
    params(("id" = Uuid, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Sectors of the unit", body = Vec<Sector>)
    )
)]
pub async fn list_unit_sectors(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<Sector>> {
    Json(state.services.lookup.sectors_by_unit(id))
}
