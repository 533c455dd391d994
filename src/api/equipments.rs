//! Equipment endpoints: CRUD, search and CSV export

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Equipment, EquipmentData, EquipmentListing, Inspection},
    services::export::EQUIPMENT_EXPORT_FILE_NAME,
};

/// Free-text search over equipments
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched against final code, model, loop, central and the company, unit
    /// and sector names (case-insensitive). Empty matches everything.
    pub term: Option<String>,
}

impl SearchQuery {
    fn term(&self) -> &str {
        self.term.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CodeQuery {
    /// Equipment final code
    pub code: String,
}

/// Search equipments
#[utoipa::path(
    get,
    path = "/equipments",
    tag = "equipments",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching equipments", body = Vec<Equipment>)
    )
)]
pub async fn search_equipments(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Equipment>> {
    Json(state.services.lookup.search_equipments(query.term()))
}

/// Search equipments, with the names of their location and type
#[utoipa::path(
    get,
    path = "/equipments/listing",
    tag = "equipments",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching equipments with resolved names", body = Vec<EquipmentListing>)
    )
)]
pub async fn equipment_listing(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<EquipmentListing>> {
    Json(state.services.lookup.equipment_listing(query.term()))
}

/// Download matching equipments as CSV
#[utoipa::path(
    get,
    path = "/equipments/export",
    tag = "equipments",
    params(SearchQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv"),
        (status = 400, description = "No equipment matches the search")
    )
)]
pub async fn export_equipments(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let csv = state.services.export.equipments_csv(query.term())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EQUIPMENT_EXPORT_FILE_NAME),
            ),
        ],
        csv,
    ))
}

/// Find an equipment by its final code
#[utoipa::path(
    get,
    path = "/equipments/by-code",
    tag = "equipments",
    params(CodeQuery),
    responses(
        (status = 200, description = "Equipment", body = Equipment),
        (status = 404, description = "No equipment with this code")
    )
)]
pub async fn get_equipment_by_code(
    State(state): State<crate::AppState>,
    Query(query): Query<CodeQuery>,
) -> AppResult<Json<Equipment>> {
    state
        .services
        .lookup
        .equipment_by_code(&query.code)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No equipment with code {}", query.code)))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipments/{id}",
    tag = "equipments",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Equipment>> {
    state
        .services
        .lookup
        .equipment(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
}

/// Create an equipment; its final code is composed from its location
#[utoipa::path(
    post,
    path = "/equipments",
    tag = "equipments",
    request_body = EquipmentData,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Sector chain could not be resolved")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<EquipmentData>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.store.add_equipment(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Replace an equipment; its final code is recomposed
#[utoipa::path(
    put,
    path = "/equipments/{id}",
    tag = "equipments",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    request_body = EquipmentData,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<EquipmentData>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.store.update_equipment(id, data).await?;
    Ok(Json(equipment))
}

/// Inspection history of an equipment, newest first
#[utoipa::path(
    get,
    path = "/equipments/{id}/inspections",
    tag = "equipments",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Inspections of the equipment", body = Vec<Inspection>)
    )
)]
pub async fn list_equipment_inspections(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<Inspection>> {
    Json(state.services.lookup.inspections_by_equipment(id))
}
