use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID type for the employee aggregate (a002)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for EmployeeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EmployeeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Roster member (aggregate a002).
///
/// The roster is configuration, not code: any number of employees can log
/// entries, and presentation splits iterate the roster in `position` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    pub base: BaseAggregate<EmployeeId>,

    /// Name shown in forms, badges and charts
    pub display_name: String,

    /// Badge/chart color (CSS color value)
    pub color: String,

    /// Ordering within the roster
    pub position: i32,
}

impl Employee {
    pub fn new(id: Uuid, display_name: String, color: String, position: i32) -> Self {
        let code = format!("EMP-{:03}", position);
        let base = BaseAggregate::new(EmployeeId::new(id), code, display_name.clone());
        Self {
            base,
            display_name,
            color,
            position,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.display_name.trim().is_empty() {
            return Err("El nombre no puede estar vacío".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Employee {
    type Id = EmployeeId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "employee"
    }

    fn element_name() -> &'static str {
        "Empleada"
    }

    fn list_name() -> &'static str {
        "Empleadas"
    }
}
