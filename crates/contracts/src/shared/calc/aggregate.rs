use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ratios::{calculate_ratios, SaleFigures, SaleRatios};

/// Seam between persisted sale entries and the calculation engine
pub trait DailyFigures {
    /// Employee identifier the record belongs to
    fn employee_id(&self) -> &str;
    /// Calendar day of the record (YYYY-MM-DD)
    fn entry_day(&self) -> &str;
    /// The five raw figures
    fn figures(&self) -> SaleFigures;
}

/// Summed figures over several entries plus ratios re-derived from the sums
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPeriod {
    #[serde(flatten)]
    pub totals: SaleFigures,
    #[serde(flatten)]
    pub ratios: SaleRatios,
}

/// Keep the first record per employee, drop the rest.
///
/// Order-dependent: callers pass records most-recent-first, so the most
/// recent report per employee wins. Duplicate stacks for the same
/// employee/day were the cause of a past aggregation bug; use
/// [`unify_daily_sales_with_dropped`] when the dropped records matter.
pub fn unify_daily_sales<T: DailyFigures + Clone>(entries: &[T]) -> Vec<T> {
    unify_daily_sales_with_dropped(entries).0
}

/// Same as [`unify_daily_sales`] but also returns the discarded duplicates
pub fn unify_daily_sales_with_dropped<T: DailyFigures + Clone>(entries: &[T]) -> (Vec<T>, Vec<T>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for entry in entries {
        if seen.insert(entry.employee_id().to_string()) {
            kept.push(entry.clone());
        } else {
            dropped.push(entry.clone());
        }
    }
    (kept, dropped)
}

/// Keep the first record per (calendar day, employee) pair.
///
/// For cross-day collections: one record per employee per day survives,
/// not one per employee overall. Same ordering contract as
/// [`unify_daily_sales`].
pub fn unify_history_sales<T: DailyFigures + Clone>(entries: &[T]) -> Vec<T> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    entries
        .iter()
        .filter(|e| seen.insert((e.entry_day().to_string(), e.employee_id().to_string())))
        .cloned()
        .collect()
}

/// Combine entries into one period: sum the five figures field-wise and
/// re-derive the ratios from the sums.
///
/// Per-entry ratios are ratios of sums and cannot be averaged; the only
/// correct combined ratio comes from recomputing over the summed totals.
/// Returns None for an empty collection. When the sums are degenerate
/// (zero visitors and transactions, or any divisor still zero) the ratios
/// default to zero instead of erroring: aggregation always produces a
/// result for non-empty input.
pub fn aggregate_sales<T: DailyFigures>(entries: &[T]) -> Option<AggregatedPeriod> {
    if entries.is_empty() {
        return None;
    }

    let mut totals = SaleFigures::default();
    for entry in entries {
        let f = entry.figures();
        totals.visitors += f.visitors;
        totals.transactions += f.transactions;
        totals.units += f.units;
        totals.revenue += f.revenue;
        totals.hours_worked += f.hours_worked;
    }

    if totals.visitors == 0 && totals.transactions == 0 {
        return Some(AggregatedPeriod {
            totals,
            ratios: SaleRatios::default(),
        });
    }

    let ratios = calculate_ratios(&totals).unwrap_or_default();
    Some(AggregatedPeriod { totals, ratios })
}

/// Revenue split by roster member, in roster order.
///
/// The roster is passed in rather than assumed: the split works for any
/// participant count. Entries for employees missing from the roster are
/// ignored.
pub fn revenue_by_employee<T: DailyFigures>(entries: &[T], roster: &[String]) -> Vec<(String, f64)> {
    roster
        .iter()
        .map(|employee| {
            let total = entries
                .iter()
                .filter(|e| e.employee_id() == employee.as_str())
                .map(|e| e.figures().revenue)
                .sum();
            (employee.clone(), total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestEntry {
        day: &'static str,
        employee: &'static str,
        figures: SaleFigures,
    }

    impl DailyFigures for TestEntry {
        fn employee_id(&self) -> &str {
            self.employee
        }
        fn entry_day(&self) -> &str {
            self.day
        }
        fn figures(&self) -> SaleFigures {
            self.figures
        }
    }

    fn entry(day: &'static str, employee: &'static str, revenue: f64) -> TestEntry {
        TestEntry {
            day,
            employee,
            figures: SaleFigures {
                visitors: 10,
                transactions: 5,
                units: 10,
                revenue,
                hours_worked: 4.0,
            },
        }
    }

    #[test]
    fn test_aggregate_two_entries_rederives_ratios_from_sums() {
        let entries = vec![entry("2025-03-01", "ana", 500.0), entry("2025-03-01", "berta", 500.0)];
        let period = aggregate_sales(&entries).unwrap();
        assert_eq!(period.totals.visitors, 20);
        assert_eq!(period.totals.transactions, 10);
        assert_eq!(period.totals.units, 20);
        assert_eq!(period.totals.revenue, 1000.0);
        assert_eq!(period.totals.hours_worked, 8.0);
        assert_eq!(period.ratios.conversion, 50.0);
        assert_eq!(period.ratios.apo, 2.0);
        assert_eq!(period.ratios.pmv, 50.0);
        assert_eq!(period.ratios.ticket_medio, 100.0);
        assert_eq!(period.ratios.productividad, 125.0);
    }

    #[test]
    fn test_aggregate_empty_collection_is_none() {
        let entries: Vec<TestEntry> = Vec::new();
        assert!(aggregate_sales(&entries).is_none());
    }

    #[test]
    fn test_aggregate_all_zero_counts_falls_back_to_zero_ratios() {
        let zero = TestEntry {
            day: "2025-03-01",
            employee: "ana",
            figures: SaleFigures::default(),
        };
        let period = aggregate_sales(&[zero.clone(), zero]).unwrap();
        assert_eq!(period.totals, SaleFigures::default());
        assert_eq!(period.ratios, SaleRatios::default());
    }

    #[test]
    fn test_aggregate_invalid_sums_fall_back_instead_of_erroring() {
        // Nonzero visitors/transactions but zero hours: single-entry policy
        // would reject this, the aggregate policy defaults to zero ratios.
        let degenerate = TestEntry {
            day: "2025-03-01",
            employee: "ana",
            figures: SaleFigures {
                visitors: 10,
                transactions: 5,
                units: 0,
                revenue: 100.0,
                hours_worked: 0.0,
            },
        };
        let period = aggregate_sales(&[degenerate]).unwrap();
        assert_eq!(period.totals.revenue, 100.0);
        assert_eq!(period.ratios, SaleRatios::default());
    }

    #[test]
    fn test_unify_daily_sales_keeps_first_per_employee() {
        let a1 = entry("2025-03-01", "ana", 100.0);
        let a2 = entry("2025-03-01", "ana", 200.0);
        let b = entry("2025-03-01", "berta", 300.0);
        let unique = unify_daily_sales(&[a1, a2, b]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].employee, "ana");
        assert_eq!(unique[0].figures.revenue, 100.0);
        assert_eq!(unique[1].employee, "berta");
    }

    #[test]
    fn test_unify_daily_sales_surfaces_dropped_duplicates() {
        let a1 = entry("2025-03-01", "ana", 100.0);
        let a2 = entry("2025-03-01", "ana", 200.0);
        let (kept, dropped) = unify_daily_sales_with_dropped(&[a1, a2]);
        assert_eq!(kept.len(), 1);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].figures.revenue, 200.0);
    }

    #[test]
    fn test_unify_history_sales_keeps_one_per_day_and_employee() {
        let entries = vec![
            entry("2025-03-02", "ana", 100.0),
            entry("2025-03-02", "ana", 150.0),
            entry("2025-03-01", "ana", 200.0),
        ];
        let unique = unify_history_sales(&entries);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].day, "2025-03-02");
        assert_eq!(unique[0].figures.revenue, 100.0);
        assert_eq!(unique[1].day, "2025-03-01");
    }

    #[test]
    fn test_revenue_by_employee_follows_roster_order() {
        let entries = vec![
            entry("2025-03-01", "berta", 300.0),
            entry("2025-03-01", "ana", 100.0),
            entry("2025-03-02", "ana", 50.0),
        ];
        let roster = vec!["ana".to_string(), "berta".to_string(), "carla".to_string()];
        let split = revenue_by_employee(&entries, &roster);
        assert_eq!(split[0], ("ana".to_string(), 150.0));
        assert_eq!(split[1], ("berta".to_string(), 300.0));
        assert_eq!(split[2], ("carla".to_string(), 0.0));
    }
}
