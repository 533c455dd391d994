//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{companies, equipment_types, equipments, health, inspections, sectors, units};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inspecta API",
        version = "1.0.0",
        description = "Fire-safety equipment inspection REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Companies
        companies::list_companies,
        companies::get_company,
        companies::create_company,
        companies::update_company,
        companies::list_company_units,
        // Units
        units::get_unit,
        units::create_unit,
        units::update_unit,
        units::list_unit_sectors,
        // Sectors
        sectors::get_sector,
        sectors::create_sector,
        sectors::update_sector,
        sectors::list_sector_equipments,
        // Equipments
        equipments::search_equipments,
        equipments::equipment_listing,
        equipments::export_equipments,
        equipments::get_equipment_by_code,
        equipments::get_equipment,
        equipments::create_equipment,
        equipments::update_equipment,
        equipments::list_equipment_inspections,
        // Equipment types
        equipment_types::list_equipment_types,
        equipment_types::get_equipment_type,
        // Inspections
        inspections::list_inspections,
        inspections::upcoming_inspections,
        inspections::batch_report,
        inspections::get_inspection,
        inspections::inspection_report,
        inspections::create_inspection,
        inspections::update_inspection,
    ),
    components(
        schemas(
            crate::models::Company,
            crate::models::CompanyData,
            crate::models::Unit,
            crate::models::UnitData,
            crate::models::Sector,
            crate::models::SectorData,
            crate::models::Equipment,
            crate::models::EquipmentData,
            crate::models::EquipmentListing,
            crate::models::EquipmentType,
            crate::models::Inspection,
            crate::models::InspectionData,
            crate::models::inspection::FunctioningFilter,
            crate::models::inspection::RecencyFilter,
            crate::services::lookup::UpcomingInspection,
            crate::services::status::InspectionStatus,
            crate::services::reports::ReportDocument,
            crate::services::reports::ReportSection,
            crate::services::reports::ReportImage,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "companies", description = "Client companies"),
        (name = "units", description = "Units of a company"),
        (name = "sectors", description = "Sectors of a unit"),
        (name = "equipments", description = "Installed equipments, search and export"),
        (name = "equipment-types", description = "Equipment type catalog"),
        (name = "inspections", description = "Inspections, schedules and reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_inspection_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/inspections/upcoming"));
        assert!(doc.paths.paths.contains_key("/equipments/export"));
        assert!(doc.paths.paths.contains_key("/companies/{id}"));
    }
}
