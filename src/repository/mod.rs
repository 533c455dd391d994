//! Storage boundary: the remote store contract and its PostgreSQL adapter

pub mod mapping;
mod query;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        Caller, Company, Equipment, EquipmentType, Inspection, InspectionData, NewCompany,
        NewEquipment, NewSector, NewUnit, Sector, Unit,
    },
};

use mapping::{COMPANIES, EQUIPMENTS, EQUIPMENT_TYPES, INSPECTIONS, SECTORS, UNITS};

/// Operations the hierarchy store consumes from persistent storage.
///
/// Inserts return the canonical row (store-assigned id and timestamps),
/// updates replace a full row by id and return nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Identity of the current caller, `None` when nobody is signed in
    async fn current_caller(&self) -> AppResult<Option<Caller>>;

    async fn list_companies(&self) -> AppResult<Vec<Company>>;
    async fn list_units(&self) -> AppResult<Vec<Unit>>;
    async fn list_sectors(&self) -> AppResult<Vec<Sector>>;
    async fn list_equipments(&self) -> AppResult<Vec<Equipment>>;
    async fn list_inspections(&self) -> AppResult<Vec<Inspection>>;
    async fn list_equipment_types(&self) -> AppResult<Vec<EquipmentType>>;

    async fn insert_company(&self, company: &NewCompany) -> AppResult<Company>;
    async fn insert_unit(&self, unit: &NewUnit) -> AppResult<Unit>;
    async fn insert_sector(&self, sector: &NewSector) -> AppResult<Sector>;
    async fn insert_equipment(&self, equipment: &NewEquipment) -> AppResult<Equipment>;
    async fn insert_inspection(&self, inspection: &InspectionData) -> AppResult<Inspection>;

    async fn update_company(&self, company: &Company) -> AppResult<()>;
    async fn update_unit(&self, unit: &Unit) -> AppResult<()>;
    async fn update_sector(&self, sector: &Sector) -> AppResult<()>;
    async fn update_equipment(&self, equipment: &Equipment) -> AppResult<()>;
    async fn update_inspection(&self, inspection: &Inspection) -> AppResult<()>;
}

/// PostgreSQL-backed remote store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    operator: Option<String>,
}

impl Repository {
    /// Create a new repository with the given database pool, writing on
    /// behalf of `operator`
    pub fn new(pool: Pool<Postgres>, operator: Option<String>) -> Self {
        Self { pool, operator }
    }
}

#[async_trait]
impl RemoteStore for Repository {
    async fn current_caller(&self) -> AppResult<Option<Caller>> {
        Ok(self
            .operator
            .as_deref()
            .map(str::trim)
            .filter(|op| !op.is_empty())
            .map(|op| Caller { id: op.to_string() }))
    }

    async fn list_companies(&self) -> AppResult<Vec<Company>> {
        self.select_all(&COMPANIES).await
    }

    async fn list_units(&self) -> AppResult<Vec<Unit>> {
        self.select_all(&UNITS).await
    }

    async fn list_sectors(&self) -> AppResult<Vec<Sector>> {
        self.select_all(&SECTORS).await
    }

    async fn list_equipments(&self) -> AppResult<Vec<Equipment>> {
        self.select_all(&EQUIPMENTS).await
    }

    async fn list_inspections(&self) -> AppResult<Vec<Inspection>> {
        self.select_all(&INSPECTIONS).await
    }

    async fn list_equipment_types(&self) -> AppResult<Vec<EquipmentType>> {
        self.select_all(&EQUIPMENT_TYPES).await
    }

    async fn insert_company(&self, company: &NewCompany) -> AppResult<Company> {
        self.insert_row(&COMPANIES, company).await
    }

    async fn insert_unit(&self, unit: &NewUnit) -> AppResult<Unit> {
        self.insert_row(&UNITS, unit).await
    }

    async fn insert_sector(&self, sector: &NewSector) -> AppResult<Sector> {
        self.insert_row(&SECTORS, sector).await
    }

    async fn insert_equipment(&self, equipment: &NewEquipment) -> AppResult<Equipment> {
        self.insert_row(&EQUIPMENTS, equipment).await
    }

    async fn insert_inspection(&self, inspection: &InspectionData) -> AppResult<Inspection> {
        self.insert_row(&INSPECTIONS, inspection).await
    }

    async fn update_company(&self, company: &Company) -> AppResult<()> {
        self.update_row(&COMPANIES, company.id, company).await
    }

    async fn update_unit(&self, unit: &Unit) -> AppResult<()> {
        self.update_row(&UNITS, unit.id, unit).await
    }

    async fn update_sector(&self, sector: &Sector) -> AppResult<()> {
        self.update_row(&SECTORS, sector.id, sector).await
    }

    async fn update_equipment(&self, equipment: &Equipment) -> AppResult<()> {
        self.update_row(&EQUIPMENTS, equipment.id, equipment).await
    }

    async fn update_inspection(&self, inspection: &Inspection) -> AppResult<()> {
        self.update_row(&INSPECTIONS, inspection.id, inspection).await
    }
}
