//! Hierarchy store: the in-memory mirror of the remote collections
//!
//! The store is the single source of truth for reads. Every mutation goes
//! through the guard, computes derived fields, waits for the remote store to
//! confirm, and only then touches memory.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::Utc;
use parking_lot::{RwLock, RwLockReadGuard};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        Caller, Company, CompanyData, Equipment, EquipmentData, EquipmentType, Inspection,
        InspectionData, NewCompany, NewEquipment, NewSector, NewUnit, Sector, SectorData, Unit,
        UnitData,
    },
    repository::RemoteStore,
};

use super::{codes, integrity};

/// The six collections, newest first (type catalog by code)
#[derive(Debug, Default, Clone)]
pub struct HierarchyData {
    pub companies: Vec<Company>,
    pub units: Vec<Unit>,
    pub sectors: Vec<Sector>,
    pub equipments: Vec<Equipment>,
    pub inspections: Vec<Inspection>,
    pub equipment_types: Vec<EquipmentType>,
}

/// Outcome of the startup load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Collections that could not be fetched and were left empty
    pub failed: Vec<&'static str>,
}

pub struct HierarchyStore {
    remote: Arc<dyn RemoteStore>,
    data: RwLock<HierarchyData>,
    ready: AtomicBool,
}

fn settle<T>(collection: &'static str, result: AppResult<Vec<T>>, report: &mut LoadReport) -> Vec<T> {
    match result {
        Ok(rows) => {
            tracing::debug!(collection, count = rows.len(), "Collection loaded");
            rows
        }
        Err(e) => {
            tracing::error!(collection, error = %e, "Failed to load collection");
            report.failed.push(collection);
            Vec::new()
        }
    }
}

fn replace_by_id<T: Clone>(records: &mut [T], id: Uuid, record: &T, id_of: impl Fn(&T) -> Uuid) {
    if let Some(slot) = records.iter_mut().find(|r| id_of(r) == id) {
        *slot = record.clone();
    }
}

impl HierarchyStore {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            remote,
            data: RwLock::new(HierarchyData::default()),
            ready: AtomicBool::new(false),
        }
    }

    /// Bulk-load all collections concurrently. A failing collection is logged
    /// and left empty without holding back the others.
    pub async fn load(&self) -> LoadReport {
        let (companies, units, sectors, equipments, inspections, equipment_types) = tokio::join!(
            self.remote.list_companies(),
            self.remote.list_units(),
            self.remote.list_sectors(),
            self.remote.list_equipments(),
            self.remote.list_inspections(),
            self.remote.list_equipment_types(),
        );

        let mut report = LoadReport::default();
        let data = HierarchyData {
            companies: settle("companies", companies, &mut report),
            units: settle("units", units, &mut report),
            sectors: settle("sectors", sectors, &mut report),
            equipments: settle("equipments", equipments, &mut report),
            inspections: settle("inspections", inspections, &mut report),
            equipment_types: settle("equipment_types", equipment_types, &mut report),
        };

        tracing::info!(
            companies = data.companies.len(),
            units = data.units.len(),
            sectors = data.sectors.len(),
            equipments = data.equipments.len(),
            inspections = data.inspections.len(),
            failed = report.failed.len(),
            "Hierarchy store loaded"
        );

        *self.data.write() = data;
        self.ready.store(true, Ordering::Release);
        report
    }

    /// True once the initial load has settled
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Current snapshot for synchronous reads
    pub fn read(&self) -> RwLockReadGuard<'_, HierarchyData> {
        self.data.read()
    }

    async fn require_caller(&self) -> AppResult<Caller> {
        self.remote.current_caller().await?.ok_or_else(|| {
            AppError::NotAuthenticated("Sign in is required to change records".to_string())
        })
    }

    // ---- Companies ----

    pub async fn add_company(&self, data: CompanyData) -> AppResult<Company> {
        data.validate()?;
        integrity::ensure_unique_name(&self.data.read().companies, None, &data.name, None)?;

        let code = codes::generate_code(&data.name);
        let record = NewCompany::new(data, code);

        let caller = self.require_caller().await?;
        let company = self.remote.insert_company(&record).await.map_err(|e| {
            tracing::warn!(name = %record.name, error = %e, "Company insert failed");
            e
        })?;

        self.data.write().companies.insert(0, company.clone());
        tracing::info!(company_id = %company.id, code = %company.code, caller = %caller.id, "Company added");
        Ok(company)
    }

    pub async fn update_company(&self, id: Uuid, data: CompanyData) -> AppResult<Company> {
        data.validate()?;
        let company = {
            let snapshot = self.data.read();
            let existing = snapshot
                .company(id)
                .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))?;
            integrity::ensure_unique_name(&snapshot.companies, None, &data.name, Some(id))?;
            existing.replaced_with(data)
        };

        let caller = self.require_caller().await?;
        self.remote.update_company(&company).await?;

        replace_by_id(&mut self.data.write().companies, id, &company, |c| c.id);
        tracing::info!(company_id = %id, caller = %caller.id, "Company updated");
        Ok(company)
    }

    // ---- Units ----

    pub async fn add_unit(&self, data: UnitData) -> AppResult<Unit> {
        data.validate()?;
        {
            let snapshot = self.data.read();
            integrity::ensure_company_exists(&snapshot, data.company_id)?;
            integrity::ensure_unique_name(&snapshot.units, Some(data.company_id), &data.name, None)?;
        }

        let record = NewUnit {
            company_id: data.company_id,
            code: codes::generate_code(&data.name),
            name: data.name,
        };

        let caller = self.require_caller().await?;
        let unit = self.remote.insert_unit(&record).await?;

        self.data.write().units.insert(0, unit.clone());
        tracing::info!(unit_id = %unit.id, code = %unit.code, caller = %caller.id, "Unit added");
        Ok(unit)
    }

    pub async fn update_unit(&self, id: Uuid, data: UnitData) -> AppResult<Unit> {
        data.validate()?;
        let unit = {
            let snapshot = self.data.read();
            let existing = snapshot
                .unit(id)
                .ok_or_else(|| AppError::NotFound(format!("Unit {} not found", id)))?;
            integrity::ensure_company_exists(&snapshot, data.company_id)?;
            integrity::ensure_unique_name(&snapshot.units, Some(data.company_id), &data.name, Some(id))?;
            existing.replaced_with(data)
        };

        let caller = self.require_caller().await?;
        self.remote.update_unit(&unit).await?;

        replace_by_id(&mut self.data.write().units, id, &unit, |u| u.id);
        tracing::info!(unit_id = %id, caller = %caller.id, "Unit updated");
        Ok(unit)
    }

    // ---- Sectors ----

    pub async fn add_sector(&self, data: SectorData) -> AppResult<Sector> {
        data.validate()?;
        {
            let snapshot = self.data.read();
            integrity::ensure_unit_exists(&snapshot, data.unit_id)?;
            integrity::ensure_unique_name(&snapshot.sectors, Some(data.unit_id), &data.name, None)?;
        }

        let record = NewSector {
            unit_id: data.unit_id,
            code: codes::generate_code(&data.name),
            name: data.name,
        };

        let caller = self.require_caller().await?;
        let sector = self.remote.insert_sector(&record).await?;

        self.data.write().sectors.insert(0, sector.clone());
        tracing::info!(sector_id = %sector.id, code = %sector.code, caller = %caller.id, "Sector added");
        Ok(sector)
    }

    pub async fn update_sector(&self, id: Uuid, data: SectorData) -> AppResult<Sector> {
        data.validate()?;
        let sector = {
            let snapshot = self.data.read();
            let existing = snapshot
                .sector(id)
                .ok_or_else(|| AppError::NotFound(format!("Sector {} not found", id)))?;
            integrity::ensure_unit_exists(&snapshot, data.unit_id)?;
            integrity::ensure_unique_name(&snapshot.sectors, Some(data.unit_id), &data.name, Some(id))?;
            existing.replaced_with(data)
        };

        let caller = self.require_caller().await?;
        self.remote.update_sector(&sector).await?;

        replace_by_id(&mut self.data.write().sectors, id, &sector, |s| s.id);
        tracing::info!(sector_id = %id, caller = %caller.id, "Sector updated");
        Ok(sector)
    }

    // ---- Equipments ----

    fn final_code_for(snapshot: &HierarchyData, data: &EquipmentData) -> AppResult<String> {
        integrity::ensure_equipment_type_exists(snapshot, &data.type_code)?;
        codes::resolve_final_code(snapshot, data).ok_or_else(|| {
            AppError::Validation(format!(
                "Sector {} is not attached to an existing unit and company",
                data.sector_id
            ))
        })
    }

    pub async fn add_equipment(&self, data: EquipmentData) -> AppResult<Equipment> {
        data.validate()?;
        let final_code = Self::final_code_for(&self.data.read(), &data)?;
        let record = NewEquipment::new(data, final_code);

        let caller = self.require_caller().await?;
        let equipment = self.remote.insert_equipment(&record).await?;

        self.data.write().equipments.insert(0, equipment.clone());
        tracing::info!(
            equipment_id = %equipment.id,
            final_code = %equipment.final_code,
            caller = %caller.id,
            "Equipment added"
        );
        Ok(equipment)
    }

    pub async fn update_equipment(&self, id: Uuid, data: EquipmentData) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = {
            let snapshot = self.data.read();
            let existing = snapshot
                .equipment(id)
                .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
            let final_code = Self::final_code_for(&snapshot, &data)?;
            existing.replaced_with(data, final_code)
        };

        let caller = self.require_caller().await?;
        self.remote.update_equipment(&equipment).await?;

        replace_by_id(&mut self.data.write().equipments, id, &equipment, |e| e.id);
        tracing::info!(
            equipment_id = %id,
            final_code = %equipment.final_code,
            caller = %caller.id,
            "Equipment updated"
        );
        Ok(equipment)
    }

    // ---- Inspections ----

    pub async fn add_inspection(&self, data: InspectionData) -> AppResult<Inspection> {
        data.validate()?;
        // The inspection is dated by the store at insert time, i.e. today
        if data.next_date.date_naive() < Utc::now().date_naive() {
            return Err(AppError::Validation(
                "The next inspection date cannot be before the inspection date".to_string(),
            ));
        }
        integrity::ensure_equipment_exists(&self.data.read(), data.equipment_id)?;

        let caller = self.require_caller().await?;
        let inspection = self.remote.insert_inspection(&data).await?;

        self.data.write().inspections.insert(0, inspection.clone());
        tracing::info!(
            inspection_id = %inspection.id,
            equipment_id = %inspection.equipment_id,
            functioning = inspection.functioning,
            caller = %caller.id,
            "Inspection recorded"
        );
        Ok(inspection)
    }

    pub async fn update_inspection(&self, id: Uuid, data: InspectionData) -> AppResult<Inspection> {
        data.validate()?;
        let inspection = {
            let snapshot = self.data.read();
            let existing = snapshot
                .inspection(id)
                .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))?;
            integrity::ensure_equipment_exists(&snapshot, data.equipment_id)?;
            existing.replaced_with(data)
        };
        if inspection.next_date.date_naive() < inspection.date.date_naive() {
            return Err(AppError::Validation(
                "The next inspection date cannot be before the inspection date".to_string(),
            ));
        }

        let caller = self.require_caller().await?;
        self.remote.update_inspection(&inspection).await?;

        replace_by_id(&mut self.data.write().inspections, id, &inspection, |i| i.id);
        tracing::info!(inspection_id = %id, caller = %caller.id, "Inspection updated");
        Ok(inspection)
    }
}
