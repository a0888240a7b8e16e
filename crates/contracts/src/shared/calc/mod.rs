//! Sales calculation engine
//!
//! Pure functions over in-memory records: per-entry KPI ratios,
//! deduplication and aggregation of daily entries, and descriptive
//! summary statistics for the dashboards. No I/O, no shared state.

pub mod aggregate;
pub mod ratios;
pub mod stats;

pub use aggregate::{
    aggregate_sales, revenue_by_employee, unify_daily_sales, unify_daily_sales_with_dropped,
    unify_history_sales, AggregatedPeriod, DailyFigures,
};
pub use ratios::{calculate_ratios, round_to, validate_calculations, CalcError, SaleFigures, SaleRatios};
pub use stats::{calculate_trend, get_summary_stats, SummaryStats, Trend, TrendDirection};
