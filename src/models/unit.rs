//! Unit model (a site or building of a company)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub code: String,
}

/// Create / replace unit request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitData {
    pub company_id: Uuid,
    #[validate(length(min = 1, message = "Unit name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnit {
    pub company_id: Uuid,
    pub name: String,
    pub code: String,
}

impl Unit {
    pub fn replaced_with(&self, data: UnitData) -> Self {
        Self {
            id: self.id,
            company_id: data.company_id,
            name: data.name,
            code: self.code.clone(),
        }
    }
}
