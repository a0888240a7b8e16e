use anyhow::Result;
use contracts::domain::a002_employee::aggregate::Employee;
use uuid::Uuid;

use super::repository;

/// Default roster seeded on an empty installation: the two original
/// employees of the store this tracker was built for.
const DEFAULT_ROSTER: [(&str, &str); 2] = [("Ingrid", "#e74c3c"), ("Marta", "#3498db")];

pub async fn get_by_id(id: Uuid) -> Result<Option<Employee>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<Employee>> {
    repository::list_all().await
}

/// Create or update a roster member
pub async fn upsert(employee: Employee) -> Result<Employee> {
    employee.validate().map_err(|e| anyhow::anyhow!(e))?;
    let is_new = repository::upsert_employee(&employee).await?;
    if is_new {
        tracing::info!("Added employee {} to the roster", employee.display_name);
    }
    Ok(employee)
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}

/// Seed the default roster when no employees exist yet
pub async fn ensure_default_roster() -> Result<()> {
    if repository::count().await? > 0 {
        return Ok(());
    }

    tracing::info!("Empty roster, seeding default employees");
    for (position, (name, color)) in DEFAULT_ROSTER.iter().enumerate() {
        let employee = Employee::new(
            Uuid::new_v4(),
            name.to_string(),
            color.to_string(),
            position as i32 + 1,
        );
        repository::upsert_employee(&employee).await?;
    }

    Ok(())
}
