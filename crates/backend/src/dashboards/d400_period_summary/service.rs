use anyhow::Result;
use contracts::dashboards::d400_period_summary::dto::{
    DayPoint, EmployeeSlice, GoalProgress, PeriodSummaryRequest, PeriodSummaryResponse,
};
use contracts::domain::a001_sale_entry::aggregate::SaleEntry;
use contracts::domain::common::AggregateId;
use contracts::shared::calc::{
    aggregate_sales, get_summary_stats, revenue_by_employee, unify_history_sales,
    AggregatedPeriod,
};
use std::collections::BTreeMap;

use crate::domain::a001_sale_entry::repository as entry_repository;
use crate::domain::a002_employee::service as employee_service;

/// Period summary dashboard.
///
/// Statistics describe the per-day combined rows (historical variability);
/// the period totals and their ratios come from summing the whole period
/// and re-deriving, never from averaging per-day ratios.
pub async fn get_period_summary(request: PeriodSummaryRequest) -> Result<PeriodSummaryResponse> {
    let entries = entry_repository::list_between(&request.date_from, &request.date_to).await?;
    let unique = unify_history_sales(&entries);

    // One combined row per day, ascending for the evolution charts
    let mut by_day: BTreeMap<String, Vec<SaleEntry>> = BTreeMap::new();
    for entry in &unique {
        by_day
            .entry(entry.entry_date.clone())
            .or_default()
            .push(entry.clone());
    }

    let mut series = Vec::with_capacity(by_day.len());
    let mut day_rows: Vec<AggregatedPeriod> = Vec::with_capacity(by_day.len());
    for (date, day_entries) in &by_day {
        if let Some(combined) = aggregate_sales(day_entries) {
            series.push(DayPoint {
                date: date.clone(),
                revenue: combined.totals.revenue,
                conversion: combined.ratios.conversion,
            });
            day_rows.push(combined);
        }
    }

    let totals = aggregate_sales(&unique)
        .map(|p| p.totals)
        .unwrap_or_default();

    let roster = employee_service::list_all().await?;
    let roster_ids: Vec<String> = roster.iter().map(|e| e.base.id.as_string()).collect();
    let by_employee = revenue_by_employee(&unique, &roster_ids)
        .into_iter()
        .zip(roster.iter())
        .map(|((employee_id, revenue), employee)| EmployeeSlice {
            employee_id,
            display_name: employee.display_name.clone(),
            color: employee.color.clone(),
            revenue,
        })
        .collect();

    let goal = request
        .monthly_goal
        .map(|target| GoalProgress::new(target, totals.revenue));

    Ok(PeriodSummaryResponse {
        period: format!("{}..{}", request.date_from, request.date_to),
        days_recorded: by_day.len(),
        totals,
        revenue: get_summary_stats(&day_rows, |d| d.totals.revenue),
        conversion: get_summary_stats(&day_rows, |d| d.ratios.conversion),
        ticket_medio: get_summary_stats(&day_rows, |d| d.ratios.ticket_medio),
        productividad: get_summary_stats(&day_rows, |d| d.ratios.productividad),
        series,
        by_employee,
        goal,
    })
}
