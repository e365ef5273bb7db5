//! Export sheet shaping example.
//!
//! Shows the positional sheet data a workbook writer would receive,
//! including the legend and assumptions block.

use ratedeck::config::PortalConfig;
use ratedeck::core::department::Department;
use ratedeck::core::product::ProductType;
use ratedeck::core::row::{CellValue, RateRow};
use ratedeck::export::sheet::build_export;
use ratedeck::store::MemoryStore;
use rust_decimal_macros::dec;

fn main() {
    let config = PortalConfig::standard();
    let product = ProductType::new("international_outbound_rates");

    let store = MemoryStore::new().with_table(
        product.clone(),
        vec![RateRow::new()
            .with("id", CellValue::number(dec!(1)))
            .with("country", CellValue::text("Vietnam"))
            .with("call_type", CellValue::text("Mobile"))
            .with("destid", CellValue::text("5841"))
            .with("destination", CellValue::text("Vietnam Mobile"))
            .with("cost_usd", CellValue::number(dec!(0.0680)))
            .with("refer_legend", CellValue::text("A"))],
    );

    let sheet = build_export(&config, &store, &product, &Department::new("Sales")).unwrap();

    println!("Sheet:     {}", sheet.title);
    println!("File name: {}", sheet.file_name);
    println!();

    let headers: Vec<&str> = sheet.columns.iter().map(|h| h.display.as_str()).collect();
    println!("{}", headers.join(" | "));
    for row in &sheet.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                CellValue::Number(d) => d.to_string(),
                CellValue::Text(s) => s.clone(),
                CellValue::Null => String::new(),
            })
            .collect();
        println!("{}", cells.join(" | "));
    }

    if let Some(legend) = &sheet.legend {
        println!("\nLegend (*)");
        for entry in &legend.legend_alpha {
            println!("  {:>4}  {}", entry.code, entry.description);
        }
        for entry in &legend.legend_num {
            println!("  {:>4}  {}", entry.code, entry.description);
        }
        println!("\nAssumptions:");
        for line in &legend.assumptions {
            println!("  {}", line);
        }
    }
}
