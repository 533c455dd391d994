//! Data models for Inspecta

pub mod company;
pub mod equipment;
pub mod equipment_type;
pub mod inspection;
pub mod sector;
pub mod unit;

// Re-export commonly used types
pub use company::{Company, CompanyData, NewCompany};
pub use equipment::{Equipment, EquipmentData, EquipmentListing, NewEquipment};
pub use equipment_type::EquipmentType;
pub use inspection::{Inspection, InspectionData, InspectionQuery};
pub use sector::{NewSector, Sector, SectorData};
pub use unit::{NewUnit, Unit, UnitData};

/// Identity of whoever performs a write against the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
}
