use anyhow::Result;
use contracts::domain::a001_sale_entry::aggregate::SaleEntry;
use contracts::domain::a001_sale_entry::dto::{
    CreateSaleEntryRequest, DailyLedgerDay, LastSaleResponse, LastSaleTrends,
    UpdateSaleEntryRequest,
};
use contracts::shared::calc::{
    aggregate_sales, calculate_trend, unify_daily_sales_with_dropped,
};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::repository;

pub use repository::{SaleEntryListQuery, SaleEntryListResult};

/// Register a new daily entry. Ratios are computed here, never client-side.
pub async fn create(request: CreateSaleEntryRequest) -> Result<SaleEntry> {
    let entry = SaleEntry::new_from_submission(
        Uuid::new_v4(),
        request.entry_date.clone(),
        request.employee_id.clone(),
        request.figures(),
    )?;
    entry.validate().map_err(|e| anyhow::anyhow!(e))?;

    repository::upsert_entry(&entry).await?;
    tracing::info!(
        "Registered sale entry {} for {} on {}",
        entry.base.code,
        entry.employee_id,
        entry.entry_date
    );
    Ok(entry)
}

/// Correct an existing entry: figures are replaced and ratios recomputed
pub async fn update(id: Uuid, request: UpdateSaleEntryRequest) -> Result<SaleEntry> {
    let mut entry = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Sale entry not found: {}", id))?;

    entry.entry_date = request.entry_date.clone();
    entry.employee_id = request.employee_id.clone();
    entry.apply_figures(request.figures())?;
    entry.base.description = format!("{} {}", entry.employee_id, entry.entry_date);
    entry.validate().map_err(|e| anyhow::anyhow!(e))?;

    repository::upsert_entry(&entry).await?;
    Ok(entry)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<SaleEntry>> {
    repository::get_by_id(id).await
}

pub async fn list(query: SaleEntryListQuery) -> Result<SaleEntryListResult> {
    repository::list(query).await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}

/// Delete a whole day: every entry of that date goes, duplicates included.
/// Deleting by day instead of by entry avoids leaving stale duplicates
/// behind a deduplicated view.
pub async fn delete_day(date: &str) -> Result<u64> {
    let affected = repository::soft_delete_day(date).await?;
    tracing::info!("Deleted {} sale entries for {}", affected, date);
    Ok(affected)
}

/// Daily ledger: entries grouped by calendar day, most recent day first.
/// Within a day one entry per employee survives (the most recent one) and
/// the combined row re-derives ratios from the summed figures.
pub async fn daily_ledger(date_from: &str, date_to: &str) -> Result<Vec<DailyLedgerDay>> {
    let entries = repository::list_between(date_from, date_to).await?;

    // Entries arrive most-recent-first; BTreeMap re-sorts days ascending,
    // reversed below for display order
    let mut by_day: BTreeMap<String, Vec<SaleEntry>> = BTreeMap::new();
    for entry in entries {
        by_day.entry(entry.entry_date.clone()).or_default().push(entry);
    }

    let mut days = Vec::with_capacity(by_day.len());
    for (date, day_entries) in by_day.into_iter().rev() {
        let (kept, dropped) = unify_daily_sales_with_dropped(&day_entries);
        if !dropped.is_empty() {
            tracing::warn!(
                "Day {} has {} duplicate entries hidden by deduplication",
                date,
                dropped.len()
            );
        }
        let combined = aggregate_sales(&kept);
        days.push(DailyLedgerDay {
            date,
            entries: kept,
            combined,
            dropped_duplicates: dropped.len(),
        });
    }

    Ok(days)
}

/// The most recent entry with trends against the one before it
pub async fn last_entry() -> Result<Option<LastSaleResponse>> {
    let recent = repository::last_entries(2).await?;
    let mut iter = recent.into_iter();

    let Some(entry) = iter.next() else {
        return Ok(None);
    };

    let trends = iter.next().map(|previous| LastSaleTrends {
        revenue: calculate_trend(entry.revenue, previous.revenue),
        conversion: calculate_trend(entry.conversion, previous.conversion),
        ticket_medio: calculate_trend(entry.ticket_medio, previous.ticket_medio),
        productividad: calculate_trend(entry.productividad, previous.productividad),
    });

    Ok(Some(LastSaleResponse { entry, trends }))
}
