use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five raw figures of one report (or of summed reports)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleFigures {
    /// Visitors through the door ("clientes")
    pub visitors: i64,
    /// Closed transactions ("operaciones")
    pub transactions: i64,
    /// Units sold ("unidades")
    pub units: i64,
    /// Revenue in currency units ("venta")
    pub revenue: f64,
    /// Hours worked
    pub hours_worked: f64,
}

/// Derived KPI ratios, each rounded to 2 decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRatios {
    /// Transactions as a percentage of visitors
    pub conversion: f64,
    /// Units per transaction (UPT)
    pub apo: f64,
    /// Average price per unit sold
    pub pmv: f64,
    /// Average ticket (revenue per transaction)
    pub ticket_medio: f64,
    /// Revenue per hour worked
    pub productividad: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A divisor field was zero or negative; the computation is rejected,
    /// not defaulted. The submission flow shows this message to the user.
    #[error("el campo '{0}' debe ser mayor que 0")]
    InvalidInput(&'static str),
}

/// Round to `decimals` places, half away from zero at the last digit
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Compute all KPI ratios from the raw figures.
///
/// Fails when any of visitors, transactions, units or hours is <= 0;
/// revenue is only ever a numerator and is not checked.
pub fn calculate_ratios(figures: &SaleFigures) -> Result<SaleRatios, CalcError> {
    if figures.visitors <= 0 {
        return Err(CalcError::InvalidInput("clientes"));
    }
    if figures.transactions <= 0 {
        return Err(CalcError::InvalidInput("operaciones"));
    }
    if figures.units <= 0 {
        return Err(CalcError::InvalidInput("unidades"));
    }
    if figures.hours_worked <= 0.0 {
        return Err(CalcError::InvalidInput("horas trabajadas"));
    }

    let visitors = figures.visitors as f64;
    let transactions = figures.transactions as f64;
    let units = figures.units as f64;

    Ok(SaleRatios {
        conversion: round_to(transactions * 100.0 / visitors, 2),
        apo: round_to(units / transactions, 2),
        pmv: round_to(figures.revenue / units, 2),
        ticket_medio: round_to(figures.revenue / transactions, 2),
        productividad: round_to(figures.revenue / figures.hours_worked, 2),
    })
}

/// Cross-check: ticket_medio must equal apo * pmv within 0.01.
///
/// Diagnostic only; downstream logic never consumes the recomputed value.
pub fn validate_calculations(ratios: &SaleRatios) -> bool {
    let expected_ticket = ratios.apo * ratios.pmv;
    (ratios.ticket_medio - expected_ticket).abs() < 0.01
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_figures() -> SaleFigures {
        SaleFigures {
            visitors: 40,
            transactions: 10,
            units: 25,
            revenue: 500.0,
            hours_worked: 8.0,
        }
    }

    #[test]
    fn test_calculate_ratios() {
        let ratios = calculate_ratios(&valid_figures()).unwrap();
        assert_eq!(ratios.conversion, 25.0);
        assert_eq!(ratios.apo, 2.5);
        assert_eq!(ratios.pmv, 20.0);
        assert_eq!(ratios.ticket_medio, 50.0);
        assert_eq!(ratios.productividad, 62.5);
    }

    #[test]
    fn test_ratios_are_rounded_to_two_decimals() {
        let figures = SaleFigures {
            visitors: 3,
            transactions: 1,
            units: 1,
            revenue: 10.0,
            hours_worked: 3.0,
        };
        let ratios = calculate_ratios(&figures).unwrap();
        // 1 * 100 / 3 = 33.333... -> 33.33
        assert_eq!(ratios.conversion, 33.33);
        // 10 / 3 = 3.333... -> 3.33
        assert_eq!(ratios.productividad, 3.33);
    }

    #[test]
    fn test_zero_or_negative_divisors_are_rejected() {
        for (field, figures) in [
            ("clientes", SaleFigures { visitors: 0, ..valid_figures() }),
            ("operaciones", SaleFigures { transactions: 0, ..valid_figures() }),
            ("unidades", SaleFigures { units: -1, ..valid_figures() }),
            ("horas trabajadas", SaleFigures { hours_worked: 0.0, ..valid_figures() }),
        ] {
            let err = calculate_ratios(&figures).unwrap_err();
            assert_eq!(err, CalcError::InvalidInput(field));
        }
    }

    #[test]
    fn test_zero_revenue_is_allowed() {
        let figures = SaleFigures {
            revenue: 0.0,
            ..valid_figures()
        };
        let ratios = calculate_ratios(&figures).unwrap();
        assert_eq!(ratios.pmv, 0.0);
        assert_eq!(ratios.ticket_medio, 0.0);
        assert_eq!(ratios.productividad, 0.0);
        assert_eq!(ratios.conversion, 25.0);
    }

    #[test]
    fn test_validate_calculations_holds_for_valid_inputs() {
        for figures in [
            valid_figures(),
            SaleFigures { visitors: 123, transactions: 17, units: 31, revenue: 1234.56, hours_worked: 7.5 },
            SaleFigures { visitors: 1, transactions: 1, units: 1, revenue: 0.01, hours_worked: 0.5 },
        ] {
            let ratios = calculate_ratios(&figures).unwrap();
            assert!(ratios.conversion.is_finite());
            assert!(validate_calculations(&ratios), "failed for {:?}", figures);
        }
    }

    #[test]
    fn test_validate_calculations_detects_inconsistency() {
        let ratios = SaleRatios {
            conversion: 25.0,
            apo: 2.0,
            pmv: 20.0,
            ticket_medio: 50.0, // 2.0 * 20.0 = 40.0, off by 10
            productividad: 62.5,
        };
        assert!(!validate_calculations(&ratios));
    }

    #[test]
    fn test_round_to_half_away_from_zero() {
        assert_eq!(round_to(2.375, 2), 2.38);
        assert_eq!(round_to(-2.375, 2), -2.38);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(20.0, 1), 20.0);
    }
}
