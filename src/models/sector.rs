//! Sector model (an area inside a unit)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    pub code: String,
}

/// Create / replace sector request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectorData {
    pub unit_id: Uuid,
    #[validate(length(min = 1, message = "Sector name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSector {
    pub unit_id: Uuid,
    pub name: String,
    pub code: String,
}

impl Sector {
    pub fn replaced_with(&self, data: SectorData) -> Self {
        Self {
            id: self.id,
            unit_id: data.unit_id,
            name: data.name,
            code: self.code.clone(),
        }
    }
}
