//! Sector endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Equipment, Sector, SectorData},
};

/// Get sector by ID
#[utoipa::path(
    get,
    path = "/sectors/{id}",
    tag = "sectors",
    params(("id" = Uuid, Path, description = "Sector ID")),
    responses(
        (status = 200, description = "Sector details", body = Sector),
        (status = 404, description = "Sector not found")
    )
)]
pub async fn get_sector(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Sector>> {
    state
        .services
        .lookup
        .sector(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Sector {} not found", id)))
}

/// Create a sector under a unit
#[utoipa::path(
    post,
    path = "/sectors",
    tag = "sectors",
    request_body = SectorData,
    responses(
        (status = 201, description = "Sector created", body = Sector),
        (status = 409, description = "A sector with this name already exists for the unit")
    )
)]
pub async fn create_sector(
    State(state): State<crate::AppState>,
    Json(data): Json<SectorData>,
) -> AppResult<(StatusCode, Json<Sector>)> {
    let sector = state.services.store.add_sector(data).await?;
    Ok((StatusCode::CREATED, Json(sector)))
}

/// Replace a sector
#[utoipa::path(
    put,
    path = "/sectors/{id}",
    tag = "sectors",
    params(("id" = Uuid, Path, description = "Sector ID")),
    request_body = SectorData,
    responses(
        (status = 200, description = "Sector updated", body = Sector)
    )
)]
pub async fn update_sector(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<SectorData>,
) -> AppResult<Json<Sector>> {
    let sector = state.services.store.update_sector(id, data).await?;
    Ok(Json(sector))
}

/// List the equipments installed in a sector
#[utoipa::path(
    get,
    path = "/sectors/{id}/equipments",
    tag = "sectors",
    params(("id" = Uuid, Path, description = "Sector ID")),
    responses(
        (status = 200, description = "Equipments of the sector", body = Vec<Equipment>)
    )
)]
pub async fn list_sector_equipments(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<Equipment>> {
    Json(state.services.lookup.equipments_by_sector(id))
}
