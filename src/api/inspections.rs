//! Inspection endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Inspection, InspectionData, InspectionQuery},
    services::{lookup::UpcomingInspection, reports::ReportDocument},
};

/// Filter inspections, newest first
#[utoipa::path(
    get,
    path = "/inspections",
    tag = "inspections",
    params(InspectionQuery),
    responses(
        (status = 200, description = "Matching inspections", body = Vec<Inspection>)
    )
)]
pub async fn list_inspections(
    State(state): State<crate::AppState>,
    Query(query): Query<InspectionQuery>,
) -> Json<Vec<Inspection>> {
    Json(state.services.lookup.filter_inspections(&query))
}

/// Inspections ordered by next date, with their due status
#[utoipa::path(
    get,
    path = "/inspections/upcoming",
    tag = "inspections",
    params(InspectionQuery),
    responses(
        (status = 200, description = "Inspections by next date", body = Vec<UpcomingInspection>)
    )
)]
pub async fn upcoming_inspections(
    State(state): State<crate::AppState>,
    Query(query): Query<InspectionQuery>,
) -> Json<Vec<UpcomingInspection>> {
    Json(state.services.lookup.upcoming_inspections(&query))
}

/// Technical report over the filtered inspections
#[utoipa::path(
    get,
    path = "/inspections/report",
    tag = "inspections",
    params(InspectionQuery),
    responses(
        (status = 200, description = "Report document", body = ReportDocument)
    )
)]
pub async fn batch_report(
    State(state): State<crate::AppState>,
    Query(query): Query<InspectionQuery>,
) -> AppResult<Json<ReportDocument>> {
    let report = state.services.export.batch_report(&query)?;
    Ok(Json(report))
}

/// Get inspection by ID
#[utoipa::path(
    get,
    path = "/inspections/{id}",
    tag = "inspections",
    params(("id" = Uuid, Path, description = "Inspection ID")),
    responses(
        (status = 200, description = "Inspection details", body = Inspection),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn get_inspection(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Inspection>> {
    state
        .services
        .lookup
        .inspection(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))
}

/// Report for a single inspection
#[utoipa::path(
    get,
    path = "/inspections/{id}/report",
    tag = "inspections",
    params(("id" = Uuid, Path, description = "Inspection ID")),
    responses(
        (status = 200, description = "Report document", body = ReportDocument),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn inspection_report(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReportDocument>> {
    let report = state.services.export.inspection_report(id)?;
    Ok(Json(report))
}

/// Record an inspection
#[utoipa::path(
    post,
    path = "/inspections",
    tag = "inspections",
    request_body = InspectionData,
    responses(
        (status = 201, description = "Inspection recorded", body = Inspection),
        (status = 400, description = "Invalid inspection")
    )
)]
pub async fn create_inspection(
    State(state): State<crate::AppState>,
    Json(data): Json<InspectionData>,
) -> AppResult<(StatusCode, Json<Inspection>)> {
    let inspection = state.services.store.add_inspection(data).await?;
    Ok((StatusCode::CREATED, Json(inspection)))
}

/// Replace an inspection
#[utoipa::path(
    put,
    path = "/inspections/{id}",
    tag = "inspections",
    params(("id" = Uuid, Path, description = "Inspection ID")),
    request_body = InspectionData,
    responses(
        (status = 200, description = "Inspection updated", body = Inspection),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn update_inspection(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<InspectionData>,
) -> AppResult<Json<Inspection>> {
    let inspection = state.services.store.update_inspection(id, data).await?;
    Ok(Json(inspection))
}
