//! Company endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Company, CompanyData, Unit},
};

/// List all companies, newest first
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    responses(
        (status = 200, description = "Company list", body = Vec<Company>)
    )
)]
pub async fn list_companies(State(state): State<crate::AppState>) -> Json<Vec<Company>> {
    Json(state.services.lookup.companies())
}

/// Get company by ID
#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company details", body = Company),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Company>> {
    state
        .services
        .lookup
        .company(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))
}

/// Create a company; its code is derived from the name
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CompanyData,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 409, description = "A company with this name already exists")
    )
)]
pub async fn create_company(
    State(state): State<crate::AppState>,
    Json(data): Json<CompanyData>,
) -> AppResult<(StatusCode, Json<Company>)> {
    let company = state.services.store.add_company(data).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// Replace a company's fields (its code is kept)
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = CompanyData,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 409, description = "A company with this name already exists")
    )
)]
pub async fn update_company(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<CompanyData>,
) -> AppResult<Json<Company>> {
    let company = state.services.store.update_company(id, data).await?;
    Ok(Json(company))
}

/// List the units of a company
#[utoipa::path(
    get,
    path = "/companies/{id}/units",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Units of the company", body = Vec<Unit>)
    )
)]
pub async fn list_company_units(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<Unit>> {
    Json(state.services.lookup.units_by_company(id))
}
