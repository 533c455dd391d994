//! Inspection model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Inspection record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub description: String,
    /// Image as data URL
    pub description_photo: Option<String>,
    pub functioning: bool,
    /// Required when `functioning` is false
    pub malfunction_description: String,
    pub malfunction_photo: Option<String>,
    /// Creation timestamp, assigned by the store
    pub date: DateTime<Utc>,
    /// Scheduled follow-up inspection
    pub next_date: DateTime<Utc>,
}

/// Create / replace inspection request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_malfunction"))]
pub struct InspectionData {
    pub equipment_id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_photo: Option<String>,
    pub functioning: bool,
    #[serde(default)]
    pub malfunction_description: String,
    #[serde(default)]
    pub malfunction_photo: Option<String>,
    pub next_date: DateTime<Utc>,
}

fn validate_malfunction(data: &InspectionData) -> Result<(), ValidationError> {
    if !data.functioning && data.malfunction_description.trim().is_empty() {
        let mut err = ValidationError::new("malfunction_description");
        err.message = Some("A malfunction description is required when the equipment is not working".into());
        return Err(err);
    }
    Ok(())
}

impl Inspection {
    /// Full replacement of the editable fields; id and date are kept
    pub fn replaced_with(&self, data: InspectionData) -> Self {
        Self {
            id: self.id,
            equipment_id: data.equipment_id,
            description: data.description,
            description_photo: data.description_photo,
            functioning: data.functioning,
            malfunction_description: data.malfunction_description,
            malfunction_photo: data.malfunction_photo,
            date: self.date,
            next_date: data.next_date,
        }
    }
}

/// Functioning filter for inspection listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FunctioningFilter {
    #[default]
    All,
    Working,
    NotWorking,
}

/// Recency window, counted in whole days since the inspection date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub enum RecencyFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
}

impl RecencyFilter {
    pub fn max_days(self) -> Option<i64> {
        match self {
            RecencyFilter::All => None,
            RecencyFilter::Last7Days => Some(7),
            RecencyFilter::Last30Days => Some(30),
            RecencyFilter::Last90Days => Some(90),
        }
    }
}

/// Query parameters for inspection listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InspectionQuery {
    pub company_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub sector_id: Option<Uuid>,
    /// Equipment type code
    pub type_code: Option<String>,
    /// Exact equipment model
    pub model: Option<String>,
    #[serde(default)]
    pub status: FunctioningFilter,
    #[serde(default)]
    pub recency: RecencyFilter,
    /// Substring of the equipment final code (case-insensitive)
    pub code: Option<String>,
}
