use crate::shared::calc::{SaleFigures, SummaryStats};
use serde::{Deserialize, Serialize};

/// Request for the period summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryRequest {
    /// Start date, "YYYY-MM-DD" inclusive
    pub date_from: String,
    /// End date, "YYYY-MM-DD" inclusive
    pub date_to: String,
    /// Monthly sales goal. Explicit request data, kept client-side;
    /// the server holds no goal state.
    pub monthly_goal: Option<f64>,
}

impl PeriodSummaryRequest {
    /// Request covering one calendar month
    pub fn for_month(year: i32, month: u32) -> Self {
        Self {
            date_from: format!("{:04}-{:02}-01", year, month),
            date_to: last_day_of_month(year, month),
            monthly_goal: None,
        }
    }

    /// Request covering one calendar year
    pub fn for_year(year: i32) -> Self {
        Self {
            date_from: format!("{:04}-01-01", year),
            date_to: format!("{:04}-12-31", year),
            monthly_goal: None,
        }
    }
}

/// Response for the period summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryResponse {
    /// Period in format "YYYY-MM-DD..YYYY-MM-DD"
    pub period: String,
    /// Distinct calendar days with at least one entry
    pub days_recorded: usize,
    /// Field-wise sums over the deduplicated entries of the period
    pub totals: SaleFigures,
    /// Per-day descriptive statistics (dashboard display, not re-derivation)
    pub revenue: SummaryStats,
    pub conversion: SummaryStats,
    pub ticket_medio: SummaryStats,
    pub productividad: SummaryStats,
    /// One point per day, ascending by date, for the evolution charts
    pub series: Vec<DayPoint>,
    /// Revenue split by roster member, in roster order
    pub by_employee: Vec<EmployeeSlice>,
    /// Progress against the requested goal, when one was sent
    pub goal: Option<GoalProgress>,
}

/// One day in the evolution series (combined across employees)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPoint {
    /// "YYYY-MM-DD"
    pub date: String,
    pub revenue: f64,
    pub conversion: f64,
}

/// Revenue attributed to one roster member over the period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSlice {
    pub employee_id: String,
    pub display_name: String,
    pub color: String,
    pub revenue: f64,
}

/// Progress toward the monthly goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    pub target: f64,
    pub achieved: f64,
    /// Rounded to the nearest whole percent
    pub percentage: i64,
}

impl GoalProgress {
    pub fn new(target: f64, achieved: f64) -> Self {
        let percentage = if target > 0.0 {
            (achieved * 100.0 / target).round() as i64
        } else {
            0
        };
        Self {
            target,
            achieved,
            percentage,
        }
    }
}

/// Last day of a calendar month, "YYYY-MM-DD"
pub fn last_day_of_month(year: i32, month: u32) -> String {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 31,
    };
    format!("{:04}-{:02}-{:02}", year, month, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_month_covers_whole_month() {
        let request = PeriodSummaryRequest::for_month(2025, 2);
        assert_eq!(request.date_from, "2025-02-01");
        assert_eq!(request.date_to, "2025-02-28");

        let leap = PeriodSummaryRequest::for_month(2024, 2);
        assert_eq!(leap.date_to, "2024-02-29");
    }

    #[test]
    fn test_goal_progress_percentage() {
        assert_eq!(GoalProgress::new(5000.0, 2500.0).percentage, 50);
        assert_eq!(GoalProgress::new(5000.0, 6000.0).percentage, 120);
        assert_eq!(GoalProgress::new(0.0, 1000.0).percentage, 0);
    }
}
