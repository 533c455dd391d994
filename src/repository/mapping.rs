//! Field/column mapping tables
//!
//! Records travel as camelCase JSON in the application and as snake_case
//! columns in the database. Each entity declares its mapping once here and the
//! adapter translates in both directions with it.

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// One record field and the column storing it
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub field: &'static str,
    pub column: &'static str,
    /// Filled by the database (id, creation timestamp), never written
    pub server_assigned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Table description for one entity
#[derive(Debug)]
pub struct EntityMapping {
    pub entity: &'static str,
    pub table: &'static str,
    pub key: &'static str,
    pub fields: &'static [FieldMapping],
    pub order_by: &'static str,
    pub order: SortOrder,
}

const fn field(field: &'static str, column: &'static str) -> FieldMapping {
    FieldMapping { field, column, server_assigned: false }
}

const fn assigned(field: &'static str, column: &'static str) -> FieldMapping {
    FieldMapping { field, column, server_assigned: true }
}

pub static COMPANIES: EntityMapping = EntityMapping {
    entity: "company",
    table: "companies",
    key: "id",
    fields: &[
        assigned("id", "id"),
        field("name", "name"),
        field("address", "address"),
        field("phone", "phone"),
        field("website", "website"),
        field("email", "email"),
        field("responsible", "responsible"),
        field("manufacturer", "manufacturer"),
        field("centralModel", "central_model"),
        field("cbProject", "cb_project"),
        field("avcb", "avcb"),
        field("code", "code"),
        assigned("date", "date"),
    ],
    order_by: "date",
    order: SortOrder::Descending,
};

pub static UNITS: EntityMapping = EntityMapping {
    entity: "unit",
    table: "units",
    key: "id",
    fields: &[
        assigned("id", "id"),
        field("companyId", "company_id"),
        field("name", "name"),
        field("code", "code"),
    ],
    order_by: "created_at",
    order: SortOrder::Descending,
};

pub static SECTORS: EntityMapping = EntityMapping {
    entity: "sector",
    table: "sectors",
    key: "id",
    fields: &[
        assigned("id", "id"),
        field("unitId", "unit_id"),
        field("name", "name"),
        field("code", "code"),
    ],
    order_by: "created_at",
    order: SortOrder::Descending,
};

pub static EQUIPMENTS: EntityMapping = EntityMapping {
    entity: "equipment",
    table: "equipments",
    key: "id",
    fields: &[
        assigned("id", "id"),
        field("sectorId", "sector_id"),
        field("typeCode", "type_code"),
        field("model", "model"),
        field("loop", "loop"),
        field("central", "central"),
        field("finalCode", "final_code"),
    ],
    order_by: "created_at",
    order: SortOrder::Descending,
};

pub static INSPECTIONS: EntityMapping = EntityMapping {
    entity: "inspection",
    table: "inspections",
    key: "id",
    fields: &[
        assigned("id", "id"),
        field("equipmentId", "equipment_id"),
        field("description", "description"),
        field("descriptionPhoto", "description_photo"),
        field("functioning", "functioning"),
        field("malfunctionDescription", "malfunction_description"),
        field("malfunctionPhoto", "malfunction_photo"),
        assigned("date", "date"),
        field("nextDate", "next_date"),
    ],
    order_by: "date",
    order: SortOrder::Descending,
};

pub static EQUIPMENT_TYPES: EntityMapping = EntityMapping {
    entity: "equipment type",
    table: "equipment_types",
    key: "code",
    fields: &[field("code", "code"), field("name", "name")],
    order_by: "code",
    order: SortOrder::Ascending,
};

impl EntityMapping {
    pub fn column_for(&self, field: &str) -> Option<&'static str> {
        self.fields.iter().find(|f| f.field == field).map(|f| f.column)
    }

    pub fn field_for(&self, column: &str) -> Option<&'static str> {
        self.fields.iter().find(|f| f.column == column).map(|f| f.field)
    }

    /// Translate a serialized record into a column map holding only the
    /// columns the application may write.
    pub fn to_columns(&self, record: Value) -> AppResult<Map<String, Value>> {
        let Value::Object(object) = record else {
            return Err(AppError::Internal(format!("{} record is not an object", self.entity)));
        };

        let mut columns = Map::new();
        for (name, value) in object {
            let mapping = self
                .fields
                .iter()
                .find(|f| f.field == name)
                .ok_or_else(|| AppError::Internal(format!("no column mapped for {}.{}", self.entity, name)))?;
            if !mapping.server_assigned {
                columns.insert(mapping.column.to_string(), value);
            }
        }
        Ok(columns)
    }

    /// Translate a stored row back into record field names. Columns with no
    /// mapping (bookkeeping such as `created_at`) are dropped.
    pub fn to_fields(&self, row: Value) -> AppResult<Value> {
        let Value::Object(object) = row else {
            return Err(AppError::Backend(format!("{} row is not an object", self.entity)));
        };

        let fields = object
            .into_iter()
            .filter_map(|(column, value)| self.field_for(&column).map(|f| (f.to_string(), value)))
            .collect::<Map<String, Value>>();
        Ok(Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compound_fields_map_to_underscore_columns() {
        assert_eq!(UNITS.column_for("companyId"), Some("company_id"));
        assert_eq!(SECTORS.column_for("unitId"), Some("unit_id"));
        assert_eq!(EQUIPMENTS.column_for("finalCode"), Some("final_code"));
        assert_eq!(INSPECTIONS.field_for("next_date"), Some("nextDate"));
        assert_eq!(COMPANIES.field_for("cb_project"), Some("cbProject"));
    }

    #[test]
    fn test_every_mapping_round_trips_names() {
        for mapping in [&COMPANIES, &UNITS, &SECTORS, &EQUIPMENTS, &INSPECTIONS, &EQUIPMENT_TYPES] {
            for f in mapping.fields {
                assert_eq!(mapping.field_for(f.column), Some(f.field), "{}", mapping.entity);
                assert_eq!(mapping.column_for(f.field), Some(f.column), "{}", mapping.entity);
            }
        }
    }

    #[test]
    fn test_to_columns_skips_server_assigned() {
        let columns = COMPANIES
            .to_columns(json!({ "id": "x", "name": "Acme", "centralModel": "CX", "date": "2025-01-01T00:00:00Z" }))
            .unwrap();
        assert_eq!(columns.get("name"), Some(&json!("Acme")));
        assert_eq!(columns.get("central_model"), Some(&json!("CX")));
        assert!(!columns.contains_key("id"));
        assert!(!columns.contains_key("date"));
    }

    #[test]
    fn test_to_columns_rejects_unmapped_field() {
        let err = UNITS.to_columns(json!({ "name": "Plant", "color": "red" })).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_to_fields_drops_bookkeeping_columns() {
        let fields = SECTORS
            .to_fields(json!({ "id": "s", "unit_id": "u", "name": "Hall", "code": "HAL", "created_at": "now" }))
            .unwrap();
        assert_eq!(fields, json!({ "id": "s", "unitId": "u", "name": "Hall", "code": "HAL" }));
    }
}
