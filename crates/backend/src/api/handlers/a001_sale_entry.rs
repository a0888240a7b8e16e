use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contracts::domain::a001_sale_entry::aggregate::SaleEntry;
use contracts::domain::a001_sale_entry::dto::{
    CreateSaleEntryRequest, DailyLedgerDay, LastSaleResponse, UpdateSaleEntryRequest,
};
use contracts::shared::calc::CalcError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_sale_entry::{export, service};
use crate::domain::a001_sale_entry::repository::SaleEntryListQuery;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub employee_id: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl RangeQuery {
    /// Open-ended defaults: text comparison over YYYY-MM-DD covers all dates
    fn bounds(self) -> (String, String) {
        (
            self.date_from.unwrap_or_else(|| "0000-01-01".to_string()),
            self.date_to.unwrap_or_else(|| "9999-12-31".to_string()),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse {
    pub items: Vec<SaleEntry>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

/// Validation failures carry the Spanish message the form shows the user
fn error_response(e: anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    if let Some(calc_err) = e.downcast_ref::<CalcError>() {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": calc_err.to_string()})),
        )
    } else {
        tracing::error!("Sale entry operation failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "internal error"})),
        )
    }
}

/// GET /api/sale-entry
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<PaginatedResponse>, StatusCode> {
    let page_size = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let page = if page_size > 0 { offset / page_size } else { 0 };

    let list_query = SaleEntryListQuery {
        date_from: query.date_from,
        date_to: query.date_to,
        employee_id: query.employee_id,
        limit: page_size,
        offset,
    };

    match service::list(list_query).await {
        Ok(result) => {
            let total_pages = if page_size > 0 {
                (result.total + page_size - 1) / page_size
            } else {
                1
            };
            Ok(Json(PaginatedResponse {
                items: result.items,
                total: result.total,
                page,
                page_size,
                total_pages,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to list sale entries: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn require_fields(entry_date: &str, employee_id: &str) -> Result<(), (StatusCode, Json<serde_json::Value>)> {
    if entry_date.trim().is_empty() || employee_id.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "La fecha y la empleada son obligatorias"})),
        ));
    }
    Ok(())
}

/// POST /api/sale-entry
pub async fn create(
    Json(request): Json<CreateSaleEntryRequest>,
) -> Result<Json<SaleEntry>, (StatusCode, Json<serde_json::Value>)> {
    require_fields(&request.entry_date, &request.employee_id)?;
    service::create(request).await.map(Json).map_err(error_response)
}

/// GET /api/sale-entry/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<SaleEntry>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match service::get_by_id(uuid).await {
        Ok(Some(entry)) => Ok(Json(entry)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get sale entry {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/sale-entry/:id
pub async fn update(
    Path(id): Path<String>,
    Json(request): Json<UpdateSaleEntryRequest>,
) -> Result<Json<SaleEntry>, (StatusCode, Json<serde_json::Value>)> {
    let uuid = Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "invalid id"})),
        )
    })?;
    require_fields(&request.entry_date, &request.employee_id)?;
    service::update(uuid, request)
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/sale-entry/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match service::delete(uuid).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete sale entry {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/sale-entry/day/:date
pub async fn delete_day(Path(date): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::delete_day(&date).await {
        Ok(affected) => Ok(Json(serde_json::json!({"deleted": affected}))),
        Err(e) => {
            tracing::error!("Failed to delete entries for {}: {}", date, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/sale-entry/daily
pub async fn daily_ledger(
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<DailyLedgerDay>>, StatusCode> {
    let (date_from, date_to) = query.bounds();
    match service::daily_ledger(&date_from, &date_to).await {
        Ok(days) => Ok(Json(days)),
        Err(e) => {
            tracing::error!("Failed to build daily ledger: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/sale-entry/last
pub async fn last_entry() -> Result<Json<Option<LastSaleResponse>>, StatusCode> {
    match service::last_entry().await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to get last sale entry: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/sale-entry/export
pub async fn export_csv(Query(query): Query<RangeQuery>) -> Result<impl IntoResponse, StatusCode> {
    let (date_from, date_to) = query.bounds();
    let bytes = export::export_csv(&date_from, &date_to).await.map_err(|e| {
        tracing::error!("Failed to export sale entries: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let filename = export::export_filename(&date_from, &date_to);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}
