use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d400_period_summary::dto::{
    PeriodSummaryRequest, PeriodSummaryResponse,
};
use serde::Deserialize;

use crate::dashboards::d400_period_summary::service;

#[derive(Debug, Deserialize)]
pub struct PeriodSummaryQuery {
    pub date_from: String,
    pub date_to: String,
    pub monthly_goal: Option<f64>,
}

/// GET /api/d400/period_summary
pub async fn get_period_summary(
    Query(query): Query<PeriodSummaryQuery>,
) -> Result<Json<PeriodSummaryResponse>, StatusCode> {
    let request = PeriodSummaryRequest {
        date_from: query.date_from,
        date_to: query.date_to,
        monthly_goal: query.monthly_goal,
    };

    match service::get_period_summary(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to build period summary: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
