use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::calc::{calculate_ratios, CalcError, DailyFigures, SaleFigures, SaleRatios};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID type for the sale entry aggregate (a001)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleEntryId(pub Uuid);

impl SaleEntryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for SaleEntryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SaleEntryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// One employee's one-day sales report (aggregate a001).
///
/// The five raw figures come from the submission form; the five ratios are
/// computed once through the calculation engine and stored with the entry.
/// The entry never changes except through an explicit update (which
/// recomputes the ratios) or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleEntry {
    #[serde(flatten)]
    pub base: BaseAggregate<SaleEntryId>,

    /// Calendar day of the report (YYYY-MM-DD)
    pub entry_date: String,

    /// Roster member the report belongs to (a002_employee id)
    pub employee_id: String,

    pub visitors: i64,
    pub transactions: i64,
    pub units: i64,
    pub revenue: f64,
    pub hours_worked: f64,

    // Derived ratios, stored as computed at submit/update time
    pub conversion: f64,
    pub apo: f64,
    pub pmv: f64,
    pub ticket_medio: f64,
    pub productividad: f64,
}

impl SaleEntry {
    /// Build a new entry from a submission. Fails with the calculation
    /// engine's validation error when any divisor figure is not positive;
    /// the submission flow shows that error to the user.
    pub fn new_from_submission(
        id: Uuid,
        entry_date: String,
        employee_id: String,
        figures: SaleFigures,
    ) -> Result<Self, CalcError> {
        let ratios = calculate_ratios(&figures)?;
        let code = format!("VTA-{}", &id.to_string()[..8]);
        let description = format!("{} {}", employee_id, entry_date);
        let base = BaseAggregate::new(SaleEntryId::new(id), code, description);
        Ok(Self::from_parts(base, entry_date, employee_id, figures, ratios))
    }

    pub fn from_parts(
        base: BaseAggregate<SaleEntryId>,
        entry_date: String,
        employee_id: String,
        figures: SaleFigures,
        ratios: SaleRatios,
    ) -> Self {
        Self {
            base,
            entry_date,
            employee_id,
            visitors: figures.visitors,
            transactions: figures.transactions,
            units: figures.units,
            revenue: figures.revenue,
            hours_worked: figures.hours_worked,
            conversion: ratios.conversion,
            apo: ratios.apo,
            pmv: ratios.pmv,
            ticket_medio: ratios.ticket_medio,
            productividad: ratios.productividad,
        }
    }

    pub fn figures(&self) -> SaleFigures {
        SaleFigures {
            visitors: self.visitors,
            transactions: self.transactions,
            units: self.units,
            revenue: self.revenue,
            hours_worked: self.hours_worked,
        }
    }

    pub fn ratios(&self) -> SaleRatios {
        SaleRatios {
            conversion: self.conversion,
            apo: self.apo,
            pmv: self.pmv,
            ticket_medio: self.ticket_medio,
            productividad: self.productividad,
        }
    }

    /// Replace the raw figures and recompute the stored ratios
    pub fn apply_figures(&mut self, figures: SaleFigures) -> Result<(), CalcError> {
        let ratios = calculate_ratios(&figures)?;
        self.visitors = figures.visitors;
        self.transactions = figures.transactions;
        self.units = figures.units;
        self.revenue = figures.revenue;
        self.hours_worked = figures.hours_worked;
        self.conversion = ratios.conversion;
        self.apo = ratios.apo;
        self.pmv = ratios.pmv;
        self.ticket_medio = ratios.ticket_medio;
        self.productividad = ratios.productividad;
        self.base.touch();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.entry_date.trim().is_empty() {
            return Err("La fecha es obligatoria".into());
        }
        if self.employee_id.trim().is_empty() {
            return Err("La empleada es obligatoria".into());
        }
        calculate_ratios(&self.figures()).map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl DailyFigures for SaleEntry {
    fn employee_id(&self) -> &str {
        &self.employee_id
    }
    fn entry_day(&self) -> &str {
        &self.entry_date
    }
    fn figures(&self) -> SaleFigures {
        SaleEntry::figures(self)
    }
}

impl AggregateRoot for SaleEntry {
    type Id = SaleEntryId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "sale_entry"
    }

    fn element_name() -> &'static str {
        "Venta diaria"
    }

    fn list_name() -> &'static str {
        "Ventas diarias"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::calc::validate_calculations;

    #[test]
    fn test_new_from_submission_stores_consistent_ratios() {
        let figures = SaleFigures {
            visitors: 40,
            transactions: 10,
            units: 25,
            revenue: 500.0,
            hours_worked: 8.0,
        };
        let entry = SaleEntry::new_from_submission(
            Uuid::new_v4(),
            "2025-03-01".into(),
            "ana".into(),
            figures,
        )
        .unwrap();
        assert_eq!(entry.conversion, 25.0);
        assert!(validate_calculations(&entry.ratios()));
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_new_from_submission_rejects_zero_visitors() {
        let figures = SaleFigures {
            visitors: 0,
            transactions: 10,
            units: 25,
            revenue: 500.0,
            hours_worked: 8.0,
        };
        let result = SaleEntry::new_from_submission(
            Uuid::new_v4(),
            "2025-03-01".into(),
            "ana".into(),
            figures,
        );
        assert!(result.is_err());
    }
}
