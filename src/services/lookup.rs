//! Read side: lookups, listings by parent, search and inspection filters.
//!
//! Everything here reads the current in-memory snapshot and never blocks on
//! the remote store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    inspection::FunctioningFilter, Company, Equipment, EquipmentListing, EquipmentType, Inspection,
    InspectionQuery, Sector, Unit,
};

use super::{
    hierarchy::{HierarchyData, HierarchyStore},
    status::{InspectionStatus, DAY_MS},
};

const NOT_AVAILABLE: &str = "N/A";

/// Full ancestor chain of a sector
#[derive(Debug, Clone, Copy)]
pub struct Ancestry<'a> {
    pub company: &'a Company,
    pub unit: &'a Unit,
    pub sector: &'a Sector,
}

/// Inspection row for the maintenance dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingInspection {
    #[serde(flatten)]
    pub inspection: Inspection,
    /// Final code of the inspected equipment, when it still resolves
    pub final_code: Option<String>,
    pub status: InspectionStatus,
}

impl HierarchyData {
    pub fn company(&self, id: Uuid) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn unit(&self, id: Uuid) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn sector(&self, id: Uuid) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    pub fn equipment(&self, id: Uuid) -> Option<&Equipment> {
        self.equipments.iter().find(|e| e.id == id)
    }

    pub fn inspection(&self, id: Uuid) -> Option<&Inspection> {
        self.inspections.iter().find(|i| i.id == id)
    }

    pub fn equipment_type(&self, code: &str) -> Option<&EquipmentType> {
        self.equipment_types.iter().find(|t| t.code == code)
    }

    pub fn equipment_by_code(&self, final_code: &str) -> Option<&Equipment> {
        self.equipments.iter().find(|e| e.final_code == final_code)
    }

    pub fn units_by_company(&self, company_id: Uuid) -> Vec<&Unit> {
        self.units.iter().filter(|u| u.company_id == company_id).collect()
    }

    pub fn sectors_by_unit(&self, unit_id: Uuid) -> Vec<&Sector> {
        self.sectors.iter().filter(|s| s.unit_id == unit_id).collect()
    }

    pub fn equipments_by_sector(&self, sector_id: Uuid) -> Vec<&Equipment> {
        self.equipments.iter().filter(|e| e.sector_id == sector_id).collect()
    }

    pub fn inspections_by_equipment(&self, equipment_id: Uuid) -> Vec<&Inspection> {
        self.inspections
            .iter()
            .filter(|i| i.equipment_id == equipment_id)
            .collect()
    }

    /// Sector, unit and company of `sector_id`, if the whole chain exists
    pub fn ancestry(&self, sector_id: Uuid) -> Option<Ancestry<'_>> {
        let sector = self.sector(sector_id)?;
        let unit = self.unit(sector.unit_id)?;
        let company = self.company(unit.company_id)?;
        Some(Ancestry { company, unit, sector })
    }

    /// Each ancestor resolved on its own, so a broken link higher up still
    /// leaves the lower levels available
    fn partial_ancestry(&self, equipment: &Equipment) -> (Option<&Company>, Option<&Unit>, Option<&Sector>) {
        let sector = self.sector(equipment.sector_id);
        let unit = sector.and_then(|s| self.unit(s.unit_id));
        let company = unit.and_then(|u| self.company(u.company_id));
        (company, unit, sector)
    }

    /// Case-insensitive substring search over the equipment's own fields and
    /// its ancestors' names. An empty term returns every equipment.
    pub fn search_equipments(&self, term: &str) -> Vec<&Equipment> {
        if term.is_empty() {
            return self.equipments.iter().collect();
        }

        let needle = term.to_lowercase();
        let contains = |value: &str| value.to_lowercase().contains(&needle);

        self.equipments
            .iter()
            .filter(|equipment| {
                let (company, unit, sector) = self.partial_ancestry(equipment);
                contains(&equipment.final_code)
                    || contains(&equipment.model)
                    || contains(&equipment.circuit_loop)
                    || contains(&equipment.central)
                    || company.is_some_and(|c| contains(&c.name))
                    || unit.is_some_and(|u| contains(&u.name))
                    || sector.is_some_and(|s| contains(&s.name))
            })
            .collect()
    }

    /// Search results joined with ancestor and type names
    pub fn equipment_listing(&self, term: &str) -> Vec<EquipmentListing> {
        self.search_equipments(term)
            .into_iter()
            .map(|equipment| {
                let (company, unit, sector) = self.partial_ancestry(equipment);
                let name_or_na = |name: Option<&String>| {
                    name.cloned().unwrap_or_else(|| NOT_AVAILABLE.to_string())
                };
                EquipmentListing {
                    company_name: name_or_na(company.map(|c| &c.name)),
                    unit_name: name_or_na(unit.map(|u| &u.name)),
                    sector_name: name_or_na(sector.map(|s| &s.name)),
                    type_name: name_or_na(self.equipment_type(&equipment.type_code).map(|t| &t.name)),
                    equipment: equipment.clone(),
                }
            })
            .collect()
    }

    fn matches_hierarchy(query: &InspectionQuery, chain: &Ancestry<'_>) -> bool {
        query.company_id.map_or(true, |id| chain.company.id == id)
            && query.unit_id.map_or(true, |id| chain.unit.id == id)
            && query.sector_id.map_or(true, |id| chain.sector.id == id)
    }

    /// Inspections matching every filter in `query`, newest first. Inspections
    /// whose equipment chain no longer resolves are left out.
    pub fn filter_inspections(&self, query: &InspectionQuery, now: DateTime<Utc>) -> Vec<&Inspection> {
        let code = query.code.as_deref().filter(|c| !c.is_empty()).map(str::to_lowercase);

        let mut matches: Vec<&Inspection> = self
            .inspections
            .iter()
            .filter(|inspection| {
                let Some(equipment) = self.equipment(inspection.equipment_id) else {
                    return false;
                };
                let Some(chain) = self.ancestry(equipment.sector_id) else {
                    return false;
                };

                if !Self::matches_hierarchy(query, &chain) {
                    return false;
                }
                if query.type_code.as_deref().is_some_and(|t| !t.is_empty() && equipment.type_code != t) {
                    return false;
                }
                if query.model.as_deref().is_some_and(|m| !m.is_empty() && equipment.model != m) {
                    return false;
                }
                match query.status {
                    FunctioningFilter::Working if !inspection.functioning => return false,
                    FunctioningFilter::NotWorking if inspection.functioning => return false,
                    _ => {}
                }
                if let Some(max_days) = query.recency.max_days() {
                    let elapsed = (now - inspection.date).num_milliseconds().div_euclid(DAY_MS);
                    if elapsed > max_days {
                        return false;
                    }
                }
                if let Some(code) = &code {
                    return equipment.final_code.to_lowercase().contains(code);
                }
                true
            })
            .collect();

        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }

    /// Inspections ordered by the closest next date, with their status.
    /// Only the company/unit/sector filters of `query` apply.
    pub fn upcoming_inspections(&self, query: &InspectionQuery, now: DateTime<Utc>) -> Vec<UpcomingInspection> {
        let filtered = query.company_id.is_some() || query.unit_id.is_some() || query.sector_id.is_some();

        let mut rows: Vec<UpcomingInspection> = self
            .inspections
            .iter()
            .filter_map(|inspection| {
                let equipment = self.equipment(inspection.equipment_id);
                if filtered {
                    let chain = equipment.and_then(|e| self.ancestry(e.sector_id))?;
                    if !Self::matches_hierarchy(query, &chain) {
                        return None;
                    }
                }
                Some(UpcomingInspection {
                    inspection: inspection.clone(),
                    final_code: equipment.map(|e| e.final_code.clone()),
                    status: InspectionStatus::at(inspection.next_date, now),
                })
            })
            .collect();

        rows.sort_by(|a, b| a.inspection.next_date.cmp(&b.inspection.next_date));
        rows
    }
}

/// Owned-result facade over the store snapshot for the API layer
#[derive(Clone)]
pub struct LookupService {
    store: Arc<HierarchyStore>,
}

impl LookupService {
    pub fn new(store: Arc<HierarchyStore>) -> Self {
        Self { store }
    }

    pub fn companies(&self) -> Vec<Company> {
        self.store.read().companies.clone()
    }

    pub fn company(&self, id: Uuid) -> Option<Company> {
        self.store.read().company(id).cloned()
    }

    pub fn unit(&self, id: Uuid) -> Option<Unit> {
        self.store.read().unit(id).cloned()
    }

    pub fn sector(&self, id: Uuid) -> Option<Sector> {
        self.store.read().sector(id).cloned()
    }

    pub fn equipment(&self, id: Uuid) -> Option<Equipment> {
        self.store.read().equipment(id).cloned()
    }

    pub fn inspection(&self, id: Uuid) -> Option<Inspection> {
        self.store.read().inspection(id).cloned()
    }

    pub fn equipment_types(&self) -> Vec<EquipmentType> {
        self.store.read().equipment_types.clone()
    }

    pub fn equipment_type(&self, code: &str) -> Option<EquipmentType> {
        self.store.read().equipment_type(code).cloned()
    }

    pub fn equipment_by_code(&self, final_code: &str) -> Option<Equipment> {
        self.store.read().equipment_by_code(final_code).cloned()
    }

    pub fn units_by_company(&self, company_id: Uuid) -> Vec<Unit> {
        self.store.read().units_by_company(company_id).into_iter().cloned().collect()
    }

    pub fn sectors_by_unit(&self, unit_id: Uuid) -> Vec<Sector> {
        self.store.read().sectors_by_unit(unit_id).into_iter().cloned().collect()
    }

    pub fn equipments_by_sector(&self, sector_id: Uuid) -> Vec<Equipment> {
        self.store.read().equipments_by_sector(sector_id).into_iter().cloned().collect()
    }

    pub fn inspections_by_equipment(&self, equipment_id: Uuid) -> Vec<Inspection> {
        self.store
            .read()
            .inspections_by_equipment(equipment_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search_equipments(&self, term: &str) -> Vec<Equipment> {
        self.store.read().search_equipments(term).into_iter().cloned().collect()
    }

    pub fn equipment_listing(&self, term: &str) -> Vec<EquipmentListing> {
        self.store.read().equipment_listing(term)
    }

    pub fn filter_inspections(&self, query: &InspectionQuery) -> Vec<Inspection> {
        self.store
            .read()
            .filter_inspections(query, Utc::now())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn upcoming_inspections(&self, query: &InspectionQuery) -> Vec<UpcomingInspection> {
        self.store.read().upcoming_inspections(query, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::RecencyFilter;
    use crate::services::hierarchy::tests::sample_data;
    use chrono::{Duration, TimeZone};

    fn with_second_equipment() -> HierarchyData {
        let mut data = sample_data();
        let sector = data.sectors[0].clone();
        let mut second = data.equipments[0].clone();
        second.id = Uuid::new_v4();
        second.type_code = "EX".to_string();
        second.model = "Kidde-6".to_string();
        second.circuit_loop = "L9".to_string();
        second.central = "Central North".to_string();
        second.final_code = format!("ACM_PLA_{}_EX_Kidde-6_L9", sector.code);
        data.equipments.push(second);
        data
    }

    #[test]
    fn test_lookups_tolerate_missing_records() {
        let data = sample_data();
        assert!(data.company(Uuid::new_v4()).is_none());
        assert!(data.ancestry(Uuid::new_v4()).is_none());
        assert_eq!(data.equipment_type("SF").map(|t| t.name.as_str()), Some("Sensor de Fumaça"));
        assert!(data.equipment_by_code("ACM_PLA_HAL_SF_X1_L2").is_some());
    }

    #[test]
    fn test_listing_by_parent() {
        let data = with_second_equipment();
        let sector_id = data.sectors[0].id;
        assert_eq!(data.sectors_by_unit(data.units[0].id).len(), 1);
        assert_eq!(data.equipments_by_sector(sector_id).len(), 2);
        assert_eq!(data.inspections_by_equipment(data.equipments[0].id).len(), 1);
        assert!(data.inspections_by_equipment(data.equipments[1].id).is_empty());
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let data = with_second_equipment();
        assert_eq!(data.search_equipments("").len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let data = with_second_equipment();
        // own fields
        assert_eq!(data.search_equipments("kidde").len(), 1);
        assert_eq!(data.search_equipments("l9").len(), 1);
        assert_eq!(data.search_equipments("central north").len(), 1);
        assert_eq!(data.search_equipments("acm_pla_hal_sf").len(), 1);
        // ancestor names
        assert_eq!(data.search_equipments("ACME").len(), 2);
        assert_eq!(data.search_equipments("plant one").len(), 2);
        assert_eq!(data.search_equipments("hAlL").len(), 2);
        assert!(data.search_equipments("nothing like this").is_empty());
    }

    #[test]
    fn test_search_with_broken_chain_still_matches_own_fields() {
        let mut data = with_second_equipment();
        data.units.clear();
        assert_eq!(data.search_equipments("kidde").len(), 1);
        assert!(data.search_equipments("acme").is_empty());
        assert_eq!(data.search_equipments("hall").len(), 2);
    }

    #[test]
    fn test_equipment_listing_fills_names() {
        let mut data = with_second_equipment();
        data.equipments[1].type_code = "ZZ".to_string();
        let rows = data.equipment_listing("kidde");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company_name, "Acme Corp");
        assert_eq!(rows[0].sector_name, "Hall");
        assert_eq!(rows[0].type_name, "N/A");
    }

    #[test]
    fn test_filter_inspections() {
        let mut data = with_second_equipment();
        let now = Utc.with_ymd_and_hms(2025, 2, 20, 12, 0, 0).unwrap();
        let mut broken = data.inspections[0].clone();
        broken.id = Uuid::new_v4();
        broken.equipment_id = data.equipments[1].id;
        broken.functioning = false;
        broken.malfunction_description = "No pressure".to_string();
        broken.date = now - Duration::days(2);
        data.inspections.push(broken.clone());

        let all = data.filter_inspections(&InspectionQuery::default(), now);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, broken.id, "newest first");

        let query = InspectionQuery { status: FunctioningFilter::NotWorking, ..Default::default() };
        assert_eq!(data.filter_inspections(&query, now).len(), 1);

        let query = InspectionQuery { recency: RecencyFilter::Last7Days, ..Default::default() };
        let recent = data.filter_inspections(&query, now);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, broken.id);

        let query = InspectionQuery { type_code: Some("SF".to_string()), ..Default::default() };
        assert_eq!(data.filter_inspections(&query, now).len(), 1);

        let query = InspectionQuery { code: Some("kidde".to_string()), ..Default::default() };
        assert_eq!(data.filter_inspections(&query, now).len(), 1);

        let query = InspectionQuery { company_id: Some(Uuid::new_v4()), ..Default::default() };
        assert!(data.filter_inspections(&query, now).is_empty());
    }

    #[test]
    fn test_recency_counts_whole_days() {
        let data = sample_data();
        let query = InspectionQuery { recency: RecencyFilter::Last7Days, ..Default::default() };

        // Inspection dated 2025-02-01 10:00
        let at = |d, h| Utc.with_ymd_and_hms(2025, 2, d, h, 0, 0).unwrap();
        assert_eq!(data.filter_inspections(&query, at(8, 10)).len(), 1);
        assert_eq!(data.filter_inspections(&query, at(8, 23)).len(), 1);
        assert!(data.filter_inspections(&query, at(9, 10)).is_empty());
    }

    #[test]
    fn test_upcoming_inspections_sorted_by_next_date() {
        let mut data = sample_data();
        let now = Utc.with_ymd_and_hms(2025, 7, 29, 10, 0, 0).unwrap();
        let mut later = data.inspections[0].clone();
        later.id = Uuid::new_v4();
        later.next_date = now + Duration::days(60);
        data.inspections.insert(0, later.clone());

        let rows = data.upcoming_inspections(&InspectionQuery::default(), now);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, InspectionStatus::DueSoon { days: 3 });
        assert_eq!(rows[1].inspection.id, later.id);
        assert_eq!(rows[1].status, InspectionStatus::Scheduled { days: 60 });
        assert_eq!(rows[0].final_code.as_deref(), Some("ACM_PLA_HAL_SF_X1_L2"));

        let query = InspectionQuery { sector_id: Some(Uuid::new_v4()), ..Default::default() };
        assert!(data.upcoming_inspections(&query, now).is_empty());
    }
}
