use crate::core::currency::{CurrencyCode, FxRateTable};
use crate::core::row::{CellValue, ColumnName, RateRow};
use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Decimal places published for USD floor prices.
pub const USD_SCALE: u32 = 4;

/// Pricing formula for one derived column.
///
/// The chain for outbound rates starts from the row's cost: the MM
/// floor is `cost / 0.85`, the small-volume list price is
/// `mm_floor * 1.7`, and each named tier is a fraction of that list
/// price. Every variant recomputes its own intermediates from the
/// unrounded cost-derived values; rounding happens only on the
/// published figure, so chained tiers never accumulate cent drift from
/// a previously rounded column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formula {
    /// `cost / 0.85`, published at 4 decimal places.
    MmFloor,
    /// Margin of the MM floor over cost, as a whole percent.
    MmFloorMargin,
    /// `mm_floor * 1.7`, published at 4 decimal places.
    SmallVolumeListPrice,
    /// Margin of the small-volume list price over cost.
    SmallVolumeMargin,
    /// A tier floor: `list_price * fraction`.
    TierFloor { fraction: Decimal },
    /// Margin of a tier floor over cost.
    TierMargin { fraction: Decimal },
    /// Convert `amount` (denominated per `currency`) into USD via the
    /// request's FX table.
    FxToUsd {
        amount: ColumnName,
        currency: ColumnName,
    },
}

impl Formula {
    /// Evaluate against one row. `cost` is the row's zero-coerced cost
    /// column, computed once per row by the engine.
    ///
    /// Total: every outcome, including division by zero and missing FX
    /// quotes, is a valid cell value.
    pub fn evaluate(&self, cost: Decimal, row: &RateRow, fx: &FxRateTable) -> CellValue {
        match self {
            Self::MmFloor => CellValue::Number(round_usd(mm_floor(cost))),
            Self::MmFloorMargin => margin_percent(mm_floor(cost), cost),
            Self::SmallVolumeListPrice => CellValue::Number(round_usd(list_price(cost))),
            Self::SmallVolumeMargin => margin_percent(list_price(cost), cost),
            Self::TierFloor { fraction } => {
                CellValue::Number(round_usd(list_price(cost) * fraction))
            }
            Self::TierMargin { fraction } => margin_percent(list_price(cost) * fraction, cost),
            Self::FxToUsd { amount, currency } => convert_to_usd(row, amount, currency, fx),
        }
    }
}

/// The MM floor: cost grossed up by the 15% margin target.
fn mm_floor(cost: Decimal) -> Decimal {
    cost / dec!(0.85)
}

/// The small-volume list price: MM floor with the 1.7 uplift.
///
/// Deliberately built on the unrounded MM floor.
fn list_price(cost: Decimal) -> Decimal {
    mm_floor(cost) * dec!(1.7)
}

/// Round a USD amount half-up and publish at a fixed 4-dp scale.
fn round_usd(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(USD_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(USD_SCALE);
    rounded
}

/// Margin of `price` over `cost` as `"<integer>%"` text, rounded
/// half-up. A zero price has no meaningful margin and yields null.
fn margin_percent(price: Decimal, cost: Decimal) -> CellValue {
    if price.is_zero() {
        return CellValue::Null;
    }
    let percent = (price - cost) / price * dec!(100);
    let rounded = percent
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    CellValue::Text(format!("{}%", rounded))
}

fn convert_to_usd(
    row: &RateRow,
    amount: &ColumnName,
    currency: &ColumnName,
    fx: &FxRateTable,
) -> CellValue {
    let Some(code) = row.text(currency) else {
        return CellValue::Null;
    };
    let amount = row.decimal_or_zero(amount);
    match fx.to_base(amount, &CurrencyCode::new(code.trim())) {
        Ok(converted) => CellValue::Number(round_usd(converted)),
        Err(err) => {
            warn!("cannot convert {} to USD: {}", amount, err);
            CellValue::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_fx() -> FxRateTable {
        FxRateTable::new(CurrencyCode::new("USD"))
    }

    #[test]
    fn test_mm_floor_at_reference_cost() {
        let value = Formula::MmFloor.evaluate(dec!(0.85), &RateRow::new(), &no_fx());
        assert_eq!(value, CellValue::Number(dec!(1.0000)));
    }

    #[test]
    fn test_list_price_at_reference_cost() {
        let value = Formula::SmallVolumeListPrice.evaluate(dec!(0.85), &RateRow::new(), &no_fx());
        assert_eq!(value, CellValue::Number(dec!(1.7000)));
    }

    #[test]
    fn test_small_volume_margin_is_fifty_percent() {
        // (1.7 - 0.85) / 1.7 * 100 = 50
        let value = Formula::SmallVolumeMargin.evaluate(dec!(0.85), &RateRow::new(), &no_fx());
        assert_eq!(value, CellValue::Text("50%".to_string()));
    }

    #[test]
    fn test_zero_cost_margins_are_null() {
        let fx = no_fx();
        let row = RateRow::new();
        for formula in [
            Formula::MmFloorMargin,
            Formula::SmallVolumeMargin,
            Formula::TierMargin {
                fraction: dec!(0.65),
            },
        ] {
            assert_eq!(formula.evaluate(Decimal::ZERO, &row, &fx), CellValue::Null);
        }
    }

    #[test]
    fn test_zero_cost_floors_publish_zero() {
        let value = Formula::MmFloor.evaluate(Decimal::ZERO, &RateRow::new(), &no_fx());
        assert_eq!(value, CellValue::Number(dec!(0.0000)));
    }

    #[test]
    fn test_tier_uses_unrounded_list_price() {
        // cost 0.0123: list price = 0.0123 / 0.85 * 1.7 = 0.0246 exactly,
        // CDA tier = 0.0246 * 0.65 = 0.01599 -> 0.0160 published.
        let value = Formula::TierFloor {
            fraction: dec!(0.65),
        }
        .evaluate(dec!(0.0123), &RateRow::new(), &no_fx());
        assert_eq!(value, CellValue::Number(dec!(0.0160)));
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // cost 1, price chain: mm floor = 1.17647..., margin = 15.0%
        let value = Formula::MmFloorMargin.evaluate(dec!(1), &RateRow::new(), &no_fx());
        assert_eq!(value, CellValue::Text("15%".to_string()));
    }

    #[test]
    fn test_fx_to_usd_missing_rate_is_null() {
        let row = RateRow::new()
            .with("amount", CellValue::number(dec!(10)))
            .with("currency", CellValue::text("EUR"));
        let formula = Formula::FxToUsd {
            amount: "amount".into(),
            currency: "currency".into(),
        };
        assert_eq!(
            formula.evaluate(Decimal::ZERO, &row, &no_fx()),
            CellValue::Null
        );
    }

    #[test]
    fn test_fx_to_usd_converts() {
        let mut fx = no_fx();
        fx.set_rate(CurrencyCode::new("AUD"), dec!(0.65)).unwrap();
        let row = RateRow::new()
            .with("amount", CellValue::number(dec!(2)))
            .with("currency", CellValue::text("AUD"));
        let formula = Formula::FxToUsd {
            amount: "amount".into(),
            currency: "currency".into(),
        };
        assert_eq!(
            formula.evaluate(Decimal::ZERO, &row, &fx),
            CellValue::Number(dec!(1.3000))
        );
    }
}
