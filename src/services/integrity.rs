//! Integrity checks run before any write reaches the remote store

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Company, Sector, Unit},
};

use super::hierarchy::HierarchyData;

/// Records whose name must be unique within a parent scope
pub trait ScopedName {
    /// Entity label used in conflict messages
    const ENTITY: &'static str;
    /// Parent entity label, `None` for globally unique names
    const SCOPE: Option<&'static str>;

    fn id(&self) -> Uuid;
    fn name(&self) -> &str;
    fn scope(&self) -> Option<Uuid>;
}

impl ScopedName for Company {
    const ENTITY: &'static str = "company";
    const SCOPE: Option<&'static str> = None;

    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn scope(&self) -> Option<Uuid> {
        None
    }
}

impl ScopedName for Unit {
    const ENTITY: &'static str = "unit";
    const SCOPE: Option<&'static str> = Some("company");

    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn scope(&self) -> Option<Uuid> {
        Some(self.company_id)
    }
}

impl ScopedName for Sector {
    const ENTITY: &'static str = "sector";
    const SCOPE: Option<&'static str> = Some("unit");

    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn scope(&self) -> Option<Uuid> {
        Some(self.unit_id)
    }
}

/// Reject `name` when another record in `scope` already carries it.
/// `exclude` is the id of the record being updated.
pub fn ensure_unique_name<T: ScopedName>(
    records: &[T],
    scope: Option<Uuid>,
    name: &str,
    exclude: Option<Uuid>,
) -> AppResult<()> {
    let taken = records
        .iter()
        .any(|r| r.scope() == scope && r.name() == name && Some(r.id()) != exclude);

    if !taken {
        return Ok(());
    }

    Err(AppError::Conflict(match T::SCOPE {
        None => format!("A {} named '{}' already exists", T::ENTITY, name),
        Some(parent) => format!(
            "A {} named '{}' already exists for this {}",
            T::ENTITY, name, parent
        ),
    }))
}

pub fn ensure_company_exists(data: &HierarchyData, id: Uuid) -> AppResult<()> {
    data.company(id)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Company {} does not exist", id)))
}

pub fn ensure_unit_exists(data: &HierarchyData, id: Uuid) -> AppResult<()> {
    data.unit(id)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Unit {} does not exist", id)))
}

pub fn ensure_equipment_exists(data: &HierarchyData, id: Uuid) -> AppResult<()> {
    data.equipment(id)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Equipment {} does not exist", id)))
}

pub fn ensure_equipment_type_exists(data: &HierarchyData, code: &str) -> AppResult<()> {
    data.equipment_type(code)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Equipment type {} does not exist", code)))
}
