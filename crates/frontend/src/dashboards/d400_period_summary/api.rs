use contracts::dashboards::d400_period_summary::{PeriodSummaryRequest, PeriodSummaryResponse};

use crate::system::auth::api::fetch_with_auth;

pub async fn get_period_summary(
    access_token: &str,
    request: &PeriodSummaryRequest,
) -> Result<PeriodSummaryResponse, String> {
    let mut path = format!(
        "/api/d400/period_summary?date_from={}&date_to={}",
        request.date_from, request.date_to
    );
    if let Some(goal) = request.monthly_goal {
        path.push_str(&format!("&monthly_goal={}", goal));
    }

    fetch_with_auth(&path, access_token).await
}
