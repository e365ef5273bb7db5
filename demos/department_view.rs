//! Department view walkthrough.
//!
//! Demonstrates how the same rate table resolves to different views
//! for different departments.

use ratedeck::config::PortalConfig;
use ratedeck::core::department::Department;
use ratedeck::core::product::ProductType;
use ratedeck::core::row::{CellValue, RateRow};
use ratedeck::export::bundle::assemble_view;
use ratedeck::store::MemoryStore;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  ratedeck: Department View Example       ║");
    println!("╚══════════════════════════════════════════╝\n");

    let config = PortalConfig::standard();
    let product = ProductType::new("international_outbound_rates");

    let store = MemoryStore::new().with_table(
        product.clone(),
        vec![
            RateRow::new()
                .with("id", CellValue::number(dec!(1)))
                .with("country", CellValue::text("Peru"))
                .with("call_type", CellValue::text("Mobile"))
                .with("destid", CellValue::text("5113"))
                .with("destination", CellValue::text("Peru Mobile"))
                .with("cost_usd", CellValue::number(dec!(0.0350)))
                .with("refer_legend", CellValue::text("A")),
            RateRow::new()
                .with("id", CellValue::number(dec!(2)))
                .with("country", CellValue::text("Kenya"))
                .with("call_type", CellValue::text("Fixed"))
                .with("destid", CellValue::text("5207"))
                .with("destination", CellValue::text("Kenya Fixed"))
                .with("cost_usd", CellValue::number(dec!(0.1275)))
                .with("refer_legend", CellValue::text("S")),
        ],
    );

    for department in ["HR", "Sales", "Operations", "Engineering"] {
        let department = Department::new(department);
        let bundle = assemble_view(&config, &store, &product, &department).unwrap();

        println!("━━━ {} ━━━\n", department);
        println!(
            "Visible columns: {}",
            bundle
                .table_columns
                .iter()
                .map(|h| h.display.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!(
            "Floor families:  {}",
            bundle
                .allowed_floors
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        for row in &bundle.rows {
            let floors: Vec<String> = bundle
                .allowed_floors
                .iter()
                .map(|floor| {
                    let value = match row.get(floor) {
                        Some(CellValue::Number(d)) => d.to_string(),
                        Some(CellValue::Text(s)) => s.clone(),
                        _ => "-".to_string(),
                    };
                    format!("{}={}", floor, value)
                })
                .collect();
            println!("  row {}: {}", row.decimal_or_zero(&"id".into()), floors.join("  "));
        }
        println!();
    }
}
