use contracts::domain::a002_employee::aggregate::Employee;

use crate::system::auth::api::fetch_with_auth;

/// Roster in position order
pub async fn list_employees(access_token: &str) -> Result<Vec<Employee>, String> {
    fetch_with_auth("/api/employee", access_token).await
}
