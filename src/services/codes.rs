//! Derived codes: entity codes from names and the equipment final code

use crate::models::EquipmentData;

use super::hierarchy::HierarchyData;

/// Derive a short code from a display name: whitespace removed, first three
/// characters, upper-cased. Shorter names give shorter codes.
pub fn generate_code(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// Join the ancestor codes and the equipment's own parts, verbatim
pub fn compose_final_code(
    company_code: &str,
    unit_code: &str,
    sector_code: &str,
    type_code: &str,
    model: &str,
    circuit_loop: &str,
) -> String {
    [company_code, unit_code, sector_code, type_code, model, circuit_loop].join("_")
}

/// Final code for an equipment at its current position in the hierarchy.
/// `None` when the sector, its unit or their company cannot be found.
pub fn resolve_final_code(data: &HierarchyData, equipment: &EquipmentData) -> Option<String> {
    let chain = data.ancestry(equipment.sector_id)?;
    Some(compose_final_code(
        &chain.company.code,
        &chain.unit.code,
        &chain.sector.code,
        &equipment.type_code,
        &equipment.model,
        &equipment.circuit_loop,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::hierarchy::tests::sample_data;
    use uuid::Uuid;

    #[test]
    fn test_generate_code() {
        assert_eq!(generate_code("Acme Corp"), "ACM");
        assert_eq!(generate_code("ab"), "AB");
        assert_eq!(generate_code(""), "");
        assert_eq!(generate_code("  a b\tc d"), "ABC");
        assert_eq!(generate_code("Plant One"), "PLA");
    }

    #[test]
    fn test_compose_keeps_parts_verbatim() {
        assert_eq!(
            compose_final_code("ACM", "PLA", "HAL", "SF", "dx-100 ", "l1"),
            "ACM_PLA_HAL_SF_dx-100 _l1"
        );
    }

    #[test]
    fn test_resolve_final_code() {
        let data = sample_data();
        let sector = &data.sectors[0];
        let equipment = EquipmentData {
            sector_id: sector.id,
            type_code: "SF".to_string(),
            model: "X1".to_string(),
            circuit_loop: "L2".to_string(),
            central: "C1".to_string(),
        };
        assert_eq!(resolve_final_code(&data, &equipment).as_deref(), Some("ACM_PLA_HAL_SF_X1_L2"));
    }

    #[test]
    fn test_resolve_final_code_unresolved_ancestry() {
        let data = sample_data();
        let equipment = EquipmentData {
            sector_id: Uuid::new_v4(),
            type_code: "SF".to_string(),
            model: "X1".to_string(),
            circuit_loop: "L2".to_string(),
            central: String::new(),
        };
        assert_eq!(resolve_final_code(&data, &equipment), None);
    }
}
