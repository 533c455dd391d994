//! Inspecta Server - fire-safety equipment inspections
//!
//! REST API over the company / unit / sector / equipment hierarchy.

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inspecta_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("inspecta_server={},tower_http=debug", config.logging.level).into());

    let json = config.logging.format.eq_ignore_ascii_case("json");
    tracing_subscriber::registry()
        .with(filter)
        .with((!json).then(tracing_subscriber::fmt::layer))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Starting Inspecta Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    if config.session.operator.is_none() {
        tracing::warn!("No session operator configured; writes will be rejected");
    }

    // Create repository and services (runs the initial hierarchy load)
    let repository = Repository::new(pool, config.session.operator.clone());
    let services = Services::new(Arc::new(repository)).await;

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Companies
        .route(
            "/companies",
            get(api::companies::list_companies).post(api::companies::create_company),
        )
        .route(
            "/companies/:id",
            get(api::companies::get_company).put(api::companies::update_company),
        )
        .route("/companies/:id/units", get(api::companies::list_company_units))
        // Units
        .route("/units", post(api::units::create_unit))
        .route("/units/:id", get(api::units::get_unit).put(api::units::update_unit))
        .route("/units/:id/sectors", get(api::units::list_unit_sectors))
        // Sectors
        .route("/sectors", post(api::sectors::create_sector))
        .route("/sectors/:id", get(api::sectors::get_sector).put(api::sectors::update_sector))
        .route("/sectors/:id/equipments", get(api::sectors::list_sector_equipments))
        // Equipments
        .route(
            "/equipments",
            get(api::equipments::search_equipments).post(api::equipments::create_equipment),
        )
        .route("/equipments/listing", get(api::equipments::equipment_listing))
        .route("/equipments/export", get(api::equipments::export_equipments))
        .route("/equipments/by-code", get(api::equipments::get_equipment_by_code))
        .route("/equipments/:id", get(api::equipments::get_equipment))
        .route("/equipments/:id", put(api::equipments::update_equipment))
        .route("/equipments/:id/inspections", get(api::equipments::list_equipment_inspections))
        // Equipment types
        .route("/equipment-types", get(api::equipment_types::list_equipment_types))
        .route("/equipment-types/:code", get(api::equipment_types::get_equipment_type))
        // Inspections
        .route(
            "/inspections",
            get(api::inspections::list_inspections).post(api::inspections::create_inspection),
        )
        .route("/inspections/upcoming", get(api::inspections::upcoming_inspections))
        .route("/inspections/report", get(api::inspections::batch_report))
        .route(
            "/inspections/:id",
            get(api::inspections::get_inspection).put(api::inspections::update_inspection),
        )
        .route("/inspections/:id/report", get(api::inspections::inspection_report))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http()),
        )
}
