//! CSV export and inspection report documents

use std::sync::Arc;

use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{EquipmentListing, InspectionQuery},
};

use super::{
    hierarchy::HierarchyStore,
    reports::{self, ReportDocument},
};

/// File name offered for equipment CSV downloads
pub const EQUIPMENT_EXPORT_FILE_NAME: &str = "equipamentos_export.csv";

/// One flat CSV row, column order preserved
pub type CsvRow = IndexMap<String, String>;

/// Render rows as CSV. The header comes from the first row's keys; every
/// value is quoted and embedded quotes are doubled. Missing keys in later
/// rows are written as empty values.
pub fn to_csv(rows: &[CsvRow]) -> AppResult<String> {
    let first = rows
        .first()
        .ok_or_else(|| AppError::Validation("There is no data to export".to_string()))?;
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    header.write_record(&headers)?;
    let buffer = header
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failure: {}", e)))?;

    let mut body = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(buffer);
    for row in rows {
        body.write_record(headers.iter().map(|h| row.get(*h).map(String::as_str).unwrap_or("")))?;
    }
    let buffer = body
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failure: {}", e)))?;

    let text = String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("CSV export is not UTF-8: {}", e)))?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Flatten search results into export rows
pub fn equipment_rows(listing: &[EquipmentListing]) -> Vec<CsvRow> {
    listing
        .iter()
        .map(|row| {
            let e = &row.equipment;
            IndexMap::from([
                ("Empresa".to_string(), row.company_name.clone()),
                ("Unidade".to_string(), row.unit_name.clone()),
                ("Setor".to_string(), row.sector_name.clone()),
                ("Equipamento".to_string(), row.type_name.clone()),
                ("COD".to_string(), e.type_code.clone()),
                ("Modelo".to_string(), e.model.clone()),
                ("Laco".to_string(), e.circuit_loop.clone()),
                ("Central".to_string(), e.central.clone()),
                ("CodigoFinal".to_string(), e.final_code.clone()),
            ])
        })
        .collect()
}

#[derive(Clone)]
pub struct ExportService {
    store: Arc<HierarchyStore>,
}

impl ExportService {
    pub fn new(store: Arc<HierarchyStore>) -> Self {
        Self { store }
    }

    /// CSV of the equipments matching `term`
    pub fn equipments_csv(&self, term: &str) -> AppResult<String> {
        let listing = self.store.read().equipment_listing(term);
        let csv = to_csv(&equipment_rows(&listing))?;
        tracing::info!(rows = listing.len(), "Equipment CSV exported");
        Ok(csv)
    }

    /// Report for a single inspection
    pub fn inspection_report(&self, id: Uuid) -> AppResult<ReportDocument> {
        let snapshot = self.store.read();
        let inspection = snapshot
            .inspection(id)
            .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))?;
        Ok(reports::inspection_report(&snapshot, inspection))
    }

    /// Technical report over the inspections matching `query`
    pub fn batch_report(&self, query: &InspectionQuery) -> AppResult<ReportDocument> {
        let now = Utc::now();
        let snapshot = self.store.read();
        let inspections = snapshot.filter_inspections(query, now);
        let client = query.company_id.and_then(|id| snapshot.company(id));
        Ok(reports::batch_report(&snapshot, &inspections, client, now.date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::hierarchy::tests::sample_data;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_comma_inside_field_is_kept_together() {
        let csv = to_csv(&[row(&[("A", "1"), ("B", "x,y")])]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["A,B", r#""1","x,y""#]);
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = to_csv(&[row(&[("Model", r#"6" bell"#)])]).unwrap();
        assert_eq!(csv.lines().nth(1), Some(r#""6"" bell""#));
    }

    #[test]
    fn test_missing_keys_are_blank() {
        let csv = to_csv(&[row(&[("A", "1"), ("B", "2")]), row(&[("A", "3")])]).unwrap();
        assert_eq!(csv.lines().nth(2), Some(r#""3","""#));
    }

    #[test]
    fn test_empty_export_is_rejected() {
        assert!(matches!(to_csv(&[]), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_equipment_rows_column_order() {
        let data = sample_data();
        let rows = equipment_rows(&data.equipment_listing(""));
        let csv = to_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Empresa,Unidade,Setor,Equipamento,COD,Modelo,Laco,Central,CodigoFinal")
        );
        assert_eq!(
            lines.next(),
            Some(r#""Acme Corp","Plant One","Hall","Sensor de Fumaça","SF","X1","L2","C1","ACM_PLA_HAL_SF_X1_L2""#)
        );
    }
}
