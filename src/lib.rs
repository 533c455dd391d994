//! Inspecta Server
//!
//! REST JSON API for fire-safety equipment inspections: the
//! company / unit / sector / equipment hierarchy, inspection records and
//! schedules, equipment search, CSV export and report documents.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
