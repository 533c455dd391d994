//! API handlers for Inspecta REST endpoints

pub mod companies;
pub mod equipment_types;
pub mod equipments;
pub mod health;
pub mod inspections;
pub mod openapi;
pub mod sectors;
pub mod units;
