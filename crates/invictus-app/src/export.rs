//! # CSV Export Projections
//!
//! Pure formatting over the recorded collections. Semicolon-separated
//! (the shop's spreadsheets use comma decimals); history exports quote
//! every field with `""` escaping, the earnings summary keeps the bare
//! label;value shape its spreadsheet template expects.
//!
//! The numbers here are projections of the same aggregates the earnings
//! screen uses, so the TOTAL row reconciles with the grid by
//! construction: Σ barber rows + products + admin = TOTAL.

use chrono::{DateTime, Utc};

use invictus_core::report;
use invictus_core::{InventoryLogEntry, Sale, ServiceRecord, WeeklySummary};

const SEP: char = ';';

/// Timestamp format used across the history exports.
const TIMESTAMP: &str = "%d/%m/%Y %H:%M:%S";

/// Quotes one field, doubling embedded quotes.
fn field(value: impl ToString) -> String {
    format!("\"{}\"", value.to_string().replace('"', "\"\""))
}

/// The earnings summary: one row per rostered barber (uppercased, as
/// the accountant's template has it), then product revenue, the shop
/// share, the reconciling TOTAL, and the export timestamp.
pub fn earnings_summary_csv(
    barbers: &[String],
    services: &[ServiceRecord],
    sales: &[Sale],
    exported_at: DateTime<Utc>,
) -> String {
    let mut csv = String::new();

    for barber in barbers {
        let total = report::barber_total(services, barber);
        csv.push_str(&format!(
            "{}{SEP}{}\n",
            barber.to_uppercase(),
            total.format_cop()
        ));
    }

    csv.push_str(&format!(
        "PRODUCTOS BARBERIA{SEP}{}\n",
        report::product_revenue(sales).format_cop()
    ));
    csv.push_str(&format!(
        "ADMINISTRADOR{SEP}{}\n",
        report::admin_total(services).format_cop()
    ));
    csv.push_str(&format!(
        "TOTAL{SEP}{}\n",
        report::grand_total(services, sales).format_cop()
    ));

    csv.push_str(&format!(
        "\nFecha de exportación{SEP}{}\n",
        exported_at.format(TIMESTAMP)
    ));

    csv
}

/// The product sales history, one quoted row per `Sale` record.
pub fn sales_history_csv(sales: &[Sale]) -> String {
    let mut csv = String::new();
    csv.push_str("Fecha;Producto;Cantidad;Total;Método de Pago;Usuario\n");

    for sale in sales {
        let row = [
            field(sale.created_at.format(TIMESTAMP)),
            field(&sale.product_name),
            field(sale.quantity),
            field(sale.total().format_cop()),
            field(sale.payment_method),
            field(&sale.user_name),
        ];
        csv.push_str(&row.join(&SEP.to_string()));
        csv.push('\n');
    }

    csv
}

/// The inventory audit trail, one quoted row per log entry.
pub fn inventory_history_csv(entries: &[InventoryLogEntry]) -> String {
    let mut csv = String::new();
    csv.push_str("Fecha;Acción;Producto;Cantidad;Usuario;Detalles\n");

    for entry in entries {
        let row = [
            field(entry.created_at.format(TIMESTAMP)),
            field(entry.action.label()),
            field(&entry.product_name),
            field(entry.quantity),
            field(&entry.user_name),
            field(&entry.details),
        ];
        csv.push_str(&row.join(&SEP.to_string()));
        csv.push('\n');
    }

    csv
}

/// The weekly archive, one row per closed week.
pub fn weekly_history_csv(summaries: &[WeeklySummary]) -> String {
    let mut csv = String::new();
    csv.push_str("Semana;Barberos;Ganancia Productos;Ganancia Admin;Total\n");

    for summary in summaries {
        csv.push_str(&format!(
            "{} - {}{SEP}{}{SEP}{}{SEP}{}{SEP}{}\n",
            summary.week_start.format("%d/%m/%Y"),
            summary.week_end.format("%d/%m/%Y"),
            summary.barber_total().format_cop(),
            invictus_core::Money::from_cents(summary.product_sales_cents).format_cop(),
            invictus_core::Money::from_cents(summary.admin_cents).format_cop(),
            invictus_core::Money::from_cents(summary.total_cents).format_cop(),
        ));
    }

    csv
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use invictus_core::PaymentMethod;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn record(barber: &str, barber_cents: i64, admin_cents: i64, tip_cents: i64) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4().to_string(),
            barber_name: barber.to_string(),
            barber_cents,
            admin_cents,
            tip_cents,
            total_cents: barber_cents + admin_cents,
            payment_method: PaymentMethod::Cash,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn sale(product: &str, qty: i64, sell: i64) -> Sale {
        Sale {
            id: Uuid::new_v4().to_string(),
            lot_id: "lot".to_string(),
            product_name: product.to_string(),
            quantity: qty,
            buy_price_cents: 1000,
            sell_price_cents: sell,
            total_cents: qty * sell,
            payment_method: PaymentMethod::Transfer,
            user_name: "aux".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_earnings_summary_reconciles() {
        let barbers = vec!["Barbero 1".to_string(), "Barbero 2".to_string()];
        let services = vec![
            record("Barbero 1", 2_000_000, 1_500_000, 500_000),
            record("Barbero 2", 1_000_000, 1_000_000, 0),
        ];
        let sales = vec![sale("Wax", 2, 2_000)];

        let csv = earnings_summary_csv(&barbers, &services, &sales, Utc::now());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "BARBERO 1;20.000,00");
        assert_eq!(lines[1], "BARBERO 2;10.000,00");
        assert_eq!(lines[2], "PRODUCTOS BARBERIA;40,00");
        assert_eq!(lines[3], "ADMINISTRADOR;25.000,00");
        // 30.000,00 + 40,00 + 25.000,00
        assert_eq!(lines[4], "TOTAL;55.040,00");
        assert!(lines[6].starts_with("Fecha de exportación;"));
    }

    #[test]
    fn test_rostered_barber_without_earnings_gets_a_row() {
        let barbers = vec!["Barbero 1".to_string(), "Barbero 2".to_string()];
        let services = vec![record("Barbero 1", 1000, 1000, 0)];

        let csv = earnings_summary_csv(&barbers, &services, &[], Utc::now());
        assert!(csv.contains("BARBERO 2;0,00\n"));
    }

    #[test]
    fn test_history_fields_are_quoted_and_escaped() {
        let mut s = sale("Cera \"Premium\"", 1, 2_000);
        s.user_name = "aux".to_string();

        let csv = sales_history_csv(&[s]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Fecha;Producto;Cantidad;Total;Método de Pago;Usuario");
        assert!(lines[1].contains("\"Cera \"\"Premium\"\"\""));
        assert!(lines[1].contains("\"Transfer\""));
        assert!(lines[1].ends_with("\"aux\""));
    }

    #[test]
    fn test_inventory_history_columns() {
        let entry = InventoryLogEntry {
            id: Uuid::new_v4().to_string(),
            action: invictus_core::InventoryAction::Add,
            product_name: "Wax".to_string(),
            quantity: 5,
            user_name: "admin".to_string(),
            details: "Received 5 units".to_string(),
            created_at: Utc::now(),
        };

        let csv = inventory_history_csv(&[entry]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Fecha;Acción;Producto;Cantidad;Usuario;Detalles");
        assert!(lines[1].contains("\"Add\";\"Wax\";\"5\";\"admin\""));
    }

    #[test]
    fn test_weekly_history_rows() {
        let mut earnings = BTreeMap::new();
        earnings.insert("Barbero 1".to_string(), 300_000);
        let summary = WeeklySummary {
            id: Uuid::new_v4().to_string(),
            week_start: chrono::NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(),
            week_end: chrono::NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
            barber_earnings: earnings,
            product_sales_cents: 40_000,
            admin_cents: 150_000,
            total_cents: 490_000,
            created_at: Utc::now(),
        };

        let csv = weekly_history_csv(&[summary]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Semana;Barberos;Ganancia Productos;Ganancia Admin;Total");
        assert_eq!(
            lines[1],
            "27/07/2026 - 02/08/2026;3.000,00;400,00;1.500,00;4.900,00"
        );
    }
}
