//! Business logic services

pub mod codes;
pub mod export;
pub mod hierarchy;
pub mod integrity;
pub mod lookup;
pub mod reports;
pub mod status;

use std::sync::Arc;

use crate::repository::RemoteStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<hierarchy::HierarchyStore>,
    pub lookup: lookup::LookupService,
    pub export: export::ExportService,
}

impl Services {
    /// Create the hierarchy store over `remote` and run the initial load
    pub async fn new(remote: Arc<dyn RemoteStore>) -> Self {
        let store = Arc::new(hierarchy::HierarchyStore::new(remote));
        let report = store.load().await;
        if !report.failed.is_empty() {
            tracing::warn!(failed = ?report.failed, "Some collections could not be loaded and start empty");
        }

        Self {
            lookup: lookup::LookupService::new(store.clone()),
            export: export::ExportService::new(store.clone()),
            store,
        }
    }
}
