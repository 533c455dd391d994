//! Company model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Company record, root of the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    /// Person in charge on the client side
    pub responsible: String,
    /// Manufacturer of the fire alarm central
    pub manufacturer: String,
    pub central_model: String,
    /// Fire department project reference
    pub cb_project: String,
    /// Fire department inspection certificate (AVCB)
    pub avcb: String,
    /// Creation timestamp, assigned by the store
    pub date: DateTime<Utc>,
    /// Derived from the name at creation, never recomputed
    pub code: String,
}

/// Editable company fields, used for both creation and full replacement
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub central_model: String,
    #[serde(default)]
    pub cb_project: String,
    #[serde(default)]
    pub avcb: String,
}

/// Insert payload sent to the remote store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    pub responsible: String,
    pub manufacturer: String,
    pub central_model: String,
    pub cb_project: String,
    pub avcb: String,
    pub code: String,
}

impl NewCompany {
    pub fn new(data: CompanyData, code: String) -> Self {
        Self {
            name: data.name,
            address: data.address,
            phone: data.phone,
            website: data.website,
            email: data.email,
            responsible: data.responsible,
            manufacturer: data.manufacturer,
            central_model: data.central_model,
            cb_project: data.cb_project,
            avcb: data.avcb,
            code,
        }
    }
}

impl Company {
    /// Full replacement of the editable fields; id, code and date are kept
    pub fn replaced_with(&self, data: CompanyData) -> Self {
        Self {
            id: self.id,
            name: data.name,
            address: data.address,
            phone: data.phone,
            website: data.website,
            email: data.email,
            responsible: data.responsible,
            manufacturer: data.manufacturer,
            central_model: data.central_model,
            cb_project: data.cb_project,
            avcb: data.avcb,
            date: self.date,
            code: self.code.clone(),
        }
    }
}
