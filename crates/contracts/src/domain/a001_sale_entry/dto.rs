use serde::{Deserialize, Serialize};

use super::aggregate::SaleEntry;
use crate::shared::calc::{AggregatedPeriod, SaleFigures, Trend};

/// Submission payload for a new daily entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSaleEntryRequest {
    /// "YYYY-MM-DD"
    pub entry_date: String,
    pub employee_id: String,
    pub visitors: i64,
    pub transactions: i64,
    pub units: i64,
    pub revenue: f64,
    pub hours_worked: f64,
}

impl CreateSaleEntryRequest {
    pub fn figures(&self) -> SaleFigures {
        SaleFigures {
            visitors: self.visitors,
            transactions: self.transactions,
            units: self.units,
            revenue: self.revenue,
            hours_worked: self.hours_worked,
        }
    }
}

/// Correction payload for an existing entry; ratios are recomputed server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSaleEntryRequest {
    pub entry_date: String,
    pub employee_id: String,
    pub visitors: i64,
    pub transactions: i64,
    pub units: i64,
    pub revenue: f64,
    pub hours_worked: f64,
}

impl UpdateSaleEntryRequest {
    pub fn figures(&self) -> SaleFigures {
        SaleFigures {
            visitors: self.visitors,
            transactions: self.transactions,
            units: self.units,
            revenue: self.revenue,
            hours_worked: self.hours_worked,
        }
    }
}

/// One day of the daily ledger: per-employee entries plus the combined row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLedgerDay {
    /// "YYYY-MM-DD"
    pub date: String,
    /// One entry per employee, duplicates already removed
    pub entries: Vec<SaleEntry>,
    /// Sum-then-derive combination of the day's entries
    pub combined: Option<AggregatedPeriod>,
    /// Entries hidden by deduplication (stale duplicates still in storage)
    pub dropped_duplicates: usize,
}

/// Trends of the most recent entry against the one before it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastSaleTrends {
    pub revenue: Trend,
    pub conversion: Trend,
    pub ticket_medio: Trend,
    pub productividad: Trend,
}

/// The most recent entry with trends against the previous one.
/// `trends` is None when only a single entry exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastSaleResponse {
    pub entry: SaleEntry,
    pub trends: Option<LastSaleTrends>,
}
