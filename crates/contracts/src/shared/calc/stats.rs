use serde::{Deserialize, Serialize};

use super::ratios::round_to;

/// Descriptive statistics over one field of a collection.
///
/// `avg` is the arithmetic mean over the record count. This is display
/// material for the dashboards (historical variability), not the
/// sum-then-derive rule of the aggregator, and must not be used to
/// combine ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Positive,
    Negative,
    Neutral,
}

/// Relative change between a current and a previous value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Absolute relative change in percent, 1 decimal
    pub percentage: f64,
    pub direction: TrendDirection,
}

/// {average, minimum, maximum, total} of one selected field, 2 decimals;
/// all zeros for an empty collection.
pub fn get_summary_stats<T>(items: &[T], field: impl Fn(&T) -> f64) -> SummaryStats {
    if items.is_empty() {
        return SummaryStats::default();
    }

    let values: Vec<f64> = items.iter().map(field).collect();
    let total: f64 = values.iter().sum();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    SummaryStats {
        avg: round_to(total / values.len() as f64, 2),
        min: round_to(min, 2),
        max: round_to(max, 2),
        total: round_to(total, 2),
    }
}

/// Trend between two scalar values; {0, Neutral} when previous is zero
/// rather than dividing by zero.
pub fn calculate_trend(current: f64, previous: f64) -> Trend {
    if previous == 0.0 {
        return Trend {
            percentage: 0.0,
            direction: TrendDirection::Neutral,
        };
    }

    let change = (current - previous) * 100.0 / previous;
    let direction = if change > 0.0 {
        TrendDirection::Positive
    } else if change < 0.0 {
        TrendDirection::Negative
    } else {
        TrendDirection::Neutral
    };

    Trend {
        percentage: round_to(change.abs(), 1),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats() {
        let values = [100.0, 250.0, 175.0, 75.0];
        let stats = get_summary_stats(&values, |v| *v);
        assert_eq!(stats.total, 600.0);
        assert_eq!(stats.avg, 150.0);
        assert_eq!(stats.min, 75.0);
        assert_eq!(stats.max, 250.0);
    }

    #[test]
    fn test_summary_stats_empty_collection() {
        let values: [f64; 0] = [];
        let stats = get_summary_stats(&values, |v| *v);
        assert_eq!(stats, SummaryStats::default());
    }

    #[test]
    fn test_summary_stats_rounds_average() {
        let values = [1.0, 1.0, 2.0];
        let stats = get_summary_stats(&values, |v| *v);
        assert_eq!(stats.avg, 1.33);
    }

    #[test]
    fn test_trend_positive_and_negative() {
        let up = calculate_trend(120.0, 100.0);
        assert_eq!(up.percentage, 20.0);
        assert_eq!(up.direction, TrendDirection::Positive);

        let down = calculate_trend(80.0, 100.0);
        assert_eq!(down.percentage, 20.0);
        assert_eq!(down.direction, TrendDirection::Negative);
    }

    #[test]
    fn test_trend_zero_previous_is_neutral() {
        for current in [0.0, 50.0, -3.0] {
            let trend = calculate_trend(current, 0.0);
            assert_eq!(trend.percentage, 0.0);
            assert_eq!(trend.direction, TrendDirection::Neutral);
        }
    }

    #[test]
    fn test_trend_equal_values_is_neutral() {
        let trend = calculate_trend(100.0, 100.0);
        assert_eq!(trend.percentage, 0.0);
        assert_eq!(trend.direction, TrendDirection::Neutral);
    }
}
