//! Equipment model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    pub sector_id: Uuid,
    /// Code from the equipment type catalog (SF, EX, ...)
    pub type_code: String,
    pub model: String,
    /// Loop / circuit the device is wired on
    #[serde(rename = "loop")]
    pub circuit_loop: String,
    /// Alarm central the device reports to
    pub central: String,
    /// `{company}_{unit}_{sector}_{type}_{model}_{loop}`
    pub final_code: String,
}

/// Create / replace equipment request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentData {
    pub sector_id: Uuid,
    #[validate(length(min = 1, message = "Equipment type is required"))]
    pub type_code: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, rename = "loop")]
    pub circuit_loop: String,
    #[serde(default)]
    pub central: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub sector_id: Uuid,
    pub type_code: String,
    pub model: String,
    #[serde(rename = "loop")]
    pub circuit_loop: String,
    pub central: String,
    pub final_code: String,
}

impl NewEquipment {
    pub fn new(data: EquipmentData, final_code: String) -> Self {
        Self {
            sector_id: data.sector_id,
            type_code: data.type_code,
            model: data.model,
            circuit_loop: data.circuit_loop,
            central: data.central,
            final_code,
        }
    }
}

impl Equipment {
    pub fn replaced_with(&self, data: EquipmentData, final_code: String) -> Self {
        Self {
            id: self.id,
            sector_id: data.sector_id,
            type_code: data.type_code,
            model: data.model,
            circuit_loop: data.circuit_loop,
            central: data.central,
            final_code,
        }
    }
}

/// Equipment joined with the names of its ancestors and its type
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentListing {
    #[serde(flatten)]
    pub equipment: Equipment,
    pub company_name: String,
    pub unit_name: String,
    pub sector_name: String,
    pub type_name: String,
}
