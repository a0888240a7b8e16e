use anyhow::Result;
use contracts::domain::a001_sale_entry::aggregate::SaleEntry;
use contracts::shared::calc::unify_history_sales;

use super::repository;

const CSV_HEADERS: [&str; 12] = [
    "Fecha",
    "Empleada",
    "Ventas (EUR)",
    "Unidades",
    "Operaciones",
    "Clientes",
    "Horas",
    "Conversion (%)",
    "Ticket Medio (EUR)",
    "APO",
    "PMV (EUR)",
    "Productividad (EUR/h)",
];

/// CSV export of a date range, deduplicated the same way the ledger is.
/// Rows ascend by date, then employee.
pub async fn export_csv(date_from: &str, date_to: &str) -> Result<Vec<u8>> {
    let entries = repository::list_between(date_from, date_to).await?;
    let mut unique = unify_history_sales(&entries);
    unique.sort_by(|a, b| {
        a.entry_date
            .cmp(&b.entry_date)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    write_csv(&unique)
}

fn write_csv(entries: &[SaleEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for entry in entries {
        writer.write_record([
            entry.entry_date.clone(),
            entry.employee_id.clone(),
            format!("{:.2}", entry.revenue),
            entry.units.to_string(),
            entry.transactions.to_string(),
            entry.visitors.to_string(),
            format!("{:.2}", entry.hours_worked),
            format!("{:.2}", entry.conversion),
            format!("{:.2}", entry.ticket_medio),
            format!("{:.2}", entry.apo),
            format!("{:.2}", entry.pmv),
            format!("{:.2}", entry.productividad),
        ])?;
    }

    Ok(writer.into_inner()?)
}

/// Suggested filename for a range export
pub fn export_filename(date_from: &str, date_to: &str) -> String {
    format!("ventas_{}_{}.csv", date_from, date_to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::calc::SaleFigures;
    use uuid::Uuid;

    fn entry(date: &str, employee: &str) -> SaleEntry {
        SaleEntry::new_from_submission(
            Uuid::new_v4(),
            date.to_string(),
            employee.to_string(),
            SaleFigures {
                visitors: 40,
                transactions: 10,
                units: 25,
                revenue: 500.0,
                hours_worked: 8.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_csv_header_and_row_layout() {
        let bytes = write_csv(&[entry("2025-03-01", "ana")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Fecha,Empleada,Ventas (EUR),Unidades,Operaciones,Clientes,Horas,\
             Conversion (%),Ticket Medio (EUR),APO,PMV (EUR),Productividad (EUR/h)"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2025-03-01,ana,500.00,25,10,40,8.00,25.00,50.00,2.50,20.00,62.50"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_export_has_only_headers() {
        let bytes = write_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
