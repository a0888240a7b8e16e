use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_employee::aggregate::Employee;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a002_employee::service;

#[derive(Debug, Deserialize)]
pub struct UpsertEmployeeRequest {
    /// Present for updates, absent for new roster members
    pub id: Option<String>,
    pub display_name: String,
    pub color: Option<String>,
    pub position: Option<i32>,
}

/// GET /api/employee
pub async fn list_all() -> Result<Json<Vec<Employee>>, StatusCode> {
    match service::list_all().await {
        Ok(employees) => Ok(Json(employees)),
        Err(e) => {
            tracing::error!("Failed to list employees: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/employee/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Employee>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match service::get_by_id(uuid).await {
        Ok(Some(employee)) => Ok(Json(employee)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get employee {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/employee
pub async fn upsert(
    Json(request): Json<UpsertEmployeeRequest>,
) -> Result<Json<Employee>, (StatusCode, Json<serde_json::Value>)> {
    let bad_request = |msg: &str| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": msg})),
        )
    };

    let employee = match request.id {
        Some(ref id) => {
            let uuid = Uuid::parse_str(id).map_err(|_| bad_request("invalid id"))?;
            let mut existing = service::get_by_id(uuid)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to load employee {}: {}", id, e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({"error": "internal error"})),
                    )
                })?
                .ok_or_else(|| bad_request("employee not found"))?;

            existing.display_name = request.display_name.clone();
            existing.base.description = request.display_name;
            if let Some(color) = request.color {
                existing.color = color;
            }
            if let Some(position) = request.position {
                existing.position = position;
            }
            existing.base.touch();
            existing
        }
        None => Employee::new(
            Uuid::new_v4(),
            request.display_name,
            request.color.unwrap_or_else(|| "#888888".to_string()),
            request.position.unwrap_or(0),
        ),
    };

    match service::upsert(employee).await {
        Ok(saved) => Ok(Json(saved)),
        Err(e) => Err(bad_request(&e.to_string())),
    }
}

/// DELETE /api/employee/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match service::delete(uuid).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete employee {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
