//! Random rate-row generation for benches, demos, and test fixtures.

use crate::core::row::{CellValue, RateRow};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random outbound rate table.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of rows to generate.
    pub row_count: usize,
    /// Minimum cost in tenths of a cent (scale 4).
    pub min_cost_ten_thousandths: i64,
    /// Maximum cost in tenths of a cent (scale 4).
    pub max_cost_ten_thousandths: i64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            row_count: 100,
            min_cost_ten_thousandths: 10,     // 0.0010 USD
            max_cost_ten_thousandths: 20_000, // 2.0000 USD
        }
    }
}

const COUNTRIES: [&str; 8] = [
    "Peru", "Chile", "Kenya", "Vietnam", "Poland", "Morocco", "Fiji", "Nepal",
];
const CALL_TYPES: [&str; 3] = ["Fixed", "Mobile", "Premium"];
const LEGEND_CODES: [&str; 4] = ["A", "B", "S", "B|S"];

/// Generate random outbound rate rows with the base columns the
/// standard derivation plan reads.
pub fn generate_outbound_rows(config: &SampleConfig) -> Vec<RateRow> {
    let mut rng = rand::thread_rng();
    (0..config.row_count)
        .map(|i| {
            let country = COUNTRIES[rng.gen_range(0..COUNTRIES.len())];
            let call_type = CALL_TYPES[rng.gen_range(0..CALL_TYPES.len())];
            let legend = LEGEND_CODES[rng.gen_range(0..LEGEND_CODES.len())];
            let cost = Decimal::new(
                rng.gen_range(config.min_cost_ten_thousandths..=config.max_cost_ten_thousandths),
                4,
            );
            RateRow::new()
                .with("id", CellValue::number(Decimal::from(i as u64 + 1)))
                .with("country", CellValue::text(country))
                .with("call_type", CellValue::text(call_type))
                .with("destid", CellValue::text(format!("{:04}", 5000 + i)))
                .with(
                    "destination",
                    CellValue::text(format!("{} {}", country, call_type)),
                )
                .with("cost_usd", CellValue::number(cost))
                .with("refer_legend", CellValue::text(legend))
        })
        .collect()
}
