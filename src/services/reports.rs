//! Inspection report layouts
//!
//! A report is a fixed sequence of titled text blocks plus the inspection
//! photos. Clients render it to PDF; the file name is decided here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Company, Inspection};

use super::hierarchy::HierarchyData;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportImage {
    pub caption: String,
    /// Image as data URL
    pub data: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub file_name: String,
    pub title: String,
    pub sections: Vec<ReportSection>,
    pub images: Vec<ReportImage>,
    pub footer: Option<String>,
}

fn section(heading: &str, lines: Vec<String>) -> ReportSection {
    ReportSection {
        heading: heading.to_string(),
        lines,
    }
}

fn display_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn functioning_label(functioning: bool) -> &'static str {
    if functioning {
        "Working"
    } else {
        "Not working"
    }
}

pub fn inspection_file_name(final_code: &str, inspection_date: DateTime<Utc>) -> String {
    format!("inspecao_{}_{}.pdf", final_code, inspection_date.format("%Y-%m-%d"))
}

pub fn batch_file_name(today: NaiveDate) -> String {
    format!("relatorio_inspecoes_{}.pdf", today.format("%Y-%m-%d"))
}

/// Report for one inspection, with its location and photos
pub fn inspection_report(data: &HierarchyData, inspection: &Inspection) -> ReportDocument {
    let equipment = data.equipment(inspection.equipment_id);
    let sector = equipment.and_then(|e| data.sector(e.sector_id));
    let unit = sector.and_then(|s| data.unit(s.unit_id));
    let company = unit.and_then(|u| data.company(u.company_id));

    let or_na = |value: Option<&String>| value.map(String::as_str).unwrap_or(NOT_AVAILABLE).to_string();
    let final_code = or_na(equipment.map(|e| &e.final_code));

    let mut sections = vec![
        section(
            "Company and location",
            vec![
                format!("Company: {}", or_na(company.map(|c| &c.name))),
                format!("Unit: {}", or_na(unit.map(|u| &u.name))),
                format!("Sector: {}", or_na(sector.map(|s| &s.name))),
            ],
        ),
        section(
            "Equipment",
            vec![
                format!("Code: {}", final_code),
                format!("Model: {}", or_na(equipment.map(|e| &e.model))),
            ],
        ),
        section(
            "Inspection details",
            vec![
                format!("Inspection date: {}", display_date(inspection.date)),
                format!("Next inspection: {}", display_date(inspection.next_date)),
                format!("Status: {}", functioning_label(inspection.functioning)),
            ],
        ),
        section("Inspection description", vec![inspection.description.clone()]),
    ];

    if !inspection.functioning {
        sections.push(section(
            "Malfunction description",
            vec![inspection.malfunction_description.clone()],
        ));
    }

    let mut images = Vec::new();
    if let Some(photo) = &inspection.description_photo {
        images.push(ReportImage {
            caption: "Inspection photo".to_string(),
            data: photo.clone(),
        });
    }
    if let Some(photo) = &inspection.malfunction_photo {
        images.push(ReportImage {
            caption: "Malfunction photo".to_string(),
            data: photo.clone(),
        });
    }

    ReportDocument {
        file_name: inspection_file_name(
            equipment.map(|e| e.final_code.as_str()).unwrap_or("unknown"),
            inspection.date,
        ),
        title: "Inspection Report".to_string(),
        sections,
        images,
        footer: None,
    }
}

/// Technical report over a batch of inspections, optionally addressed to
/// the client company they belong to
pub fn batch_report(
    data: &HierarchyData,
    inspections: &[&Inspection],
    client: Option<&Company>,
    today: NaiveDate,
) -> ReportDocument {
    let mut sections = Vec::new();

    if let Some(company) = client {
        sections.push(section(
            "Client",
            vec![
                format!("Company: {}", company.name),
                format!("Address: {}", company.address),
                format!("Responsible: {}", company.responsible),
                format!("CB project: {}", company.cb_project),
                format!("AVCB: {}", company.avcb),
            ],
        ));
    }

    let working = inspections.iter().filter(|i| i.functioning).count();
    sections.push(section(
        "Summary",
        vec![
            format!("Inspected equipments: {}", inspections.len()),
            format!("Working: {}", working),
            format!("Not working: {}", inspections.len() - working),
        ],
    ));

    for inspection in inspections {
        let Some(equipment) = data.equipment(inspection.equipment_id) else {
            continue;
        };
        let sector = data.sector(equipment.sector_id);
        let unit = sector.and_then(|s| data.unit(s.unit_id));
        let type_name = data
            .equipment_type(&equipment.type_code)
            .map(|t| t.name.as_str())
            .unwrap_or(NOT_AVAILABLE);

        let mut lines = vec![
            format!("Type: {}", type_name),
            format!("Model: {}", equipment.model),
            format!(
                "Location: {} - {}",
                unit.map(|u| u.name.as_str()).unwrap_or(NOT_AVAILABLE),
                sector.map(|s| s.name.as_str()).unwrap_or(NOT_AVAILABLE)
            ),
            format!("Inspection date: {}", display_date(inspection.date)),
            format!("Status: {}", functioning_label(inspection.functioning)),
            format!("Description: {}", inspection.description),
        ];
        if !inspection.functioning {
            lines.push(format!("Problem found: {}", inspection.malfunction_description));
        }

        sections.push(ReportSection {
            heading: format!("Equipment: {}", equipment.final_code),
            lines,
        });
    }

    ReportDocument {
        file_name: batch_file_name(today),
        title: "Technical Inspection Report".to_string(),
        sections,
        images: Vec::new(),
        footer: Some(format!("Issued on {}", today.format("%d/%m/%Y"))),
    }
}
