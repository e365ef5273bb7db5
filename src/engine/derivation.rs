use crate::core::currency::FxRateTable;
use crate::core::product::ProductType;
use crate::core::row::{ColumnName, RateRow};
use crate::engine::formula::Formula;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One derived column: the name it publishes under and the formula
/// that computes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColumn {
    pub name: ColumnName,
    pub formula: Formula,
}

impl DerivedColumn {
    pub fn new(name: impl Into<ColumnName>, formula: Formula) -> Self {
        Self {
            name: name.into(),
            formula,
        }
    }
}

/// Ordered derivation plan for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationSpec {
    /// Column the cost-based formulas read, zero-coerced.
    pub cost_column: ColumnName,
    /// Derived columns in publish order.
    pub columns: Vec<DerivedColumn>,
}

impl DerivationSpec {
    pub fn new(cost_column: impl Into<ColumnName>, columns: Vec<DerivedColumn>) -> Self {
        Self {
            cost_column: cost_column.into(),
            columns,
        }
    }

    /// Apply the plan to one row, returning the widened copy.
    ///
    /// Add-only: a derived name already present in the row (a stored
    /// value from the admin upload) is left exactly as stored.
    pub fn apply(&self, row: &RateRow, fx: &FxRateTable) -> RateRow {
        let mut out = row.clone();
        let cost = row.decimal_or_zero(&self.cost_column);
        for column in &self.columns {
            if out.contains(&column.name) {
                continue;
            }
            out.insert(column.name.clone(), column.formula.evaluate(cost, row, fx));
        }
        out
    }
}

/// Derivation plans for every product that has one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivationConfig {
    specs: HashMap<ProductType, DerivationSpec>,
}

impl DerivationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: ProductType, spec: DerivationSpec) {
        self.specs.insert(product, spec);
    }

    pub fn spec(&self, product: &ProductType) -> Option<&DerivationSpec> {
        self.specs.get(product)
    }
}

/// The derivation engine: widens raw rate rows with the computed
/// pricing columns for their product.
///
/// Stateless and pure over its inputs; configuration and the FX table
/// are read-only, so concurrent per-request use needs no locking.
///
/// # Examples
///
/// ```
/// use ratedeck::core::currency::{CurrencyCode, FxRateTable};
/// use ratedeck::core::product::ProductType;
/// use ratedeck::core::row::{CellValue, RateRow};
/// use ratedeck::engine::derivation::{
///     DerivationConfig, DerivationEngine, DerivationSpec, DerivedColumn,
/// };
/// use ratedeck::engine::formula::Formula;
/// use rust_decimal_macros::dec;
///
/// let product = ProductType::new("international_outbound_rates");
/// let mut config = DerivationConfig::new();
/// config.insert(
///     product.clone(),
///     DerivationSpec::new(
///         "cost_usd",
///         vec![DerivedColumn::new("mh_floor_usd", Formula::MmFloor)],
///     ),
/// );
///
/// let fx = FxRateTable::new(CurrencyCode::new("USD"));
/// let rows = vec![RateRow::new().with("cost_usd", CellValue::number(dec!(0.85)))];
/// let derived = DerivationEngine::derive(&config, &fx, &product, rows);
///
/// assert_eq!(
///     derived[0].get(&"mh_floor_usd".into()),
///     Some(&CellValue::number(dec!(1.0000)))
/// );
/// ```
pub struct DerivationEngine;

impl DerivationEngine {
    /// Derive the configured columns for `product` across `rows`.
    ///
    /// A product without a derivation spec passes its rows through
    /// unchanged — by move, with no copy and no error.
    pub fn derive(
        config: &DerivationConfig,
        fx: &FxRateTable,
        product: &ProductType,
        rows: Vec<RateRow>,
    ) -> Vec<RateRow> {
        let Some(spec) = config.spec(product) else {
            debug!("no derivation spec for {}; passing rows through", product);
            return rows;
        };
        debug!(
            "deriving {} columns across {} rows for {}",
            spec.columns.len(),
            rows.len(),
            product
        );
        rows.iter().map(|row| spec.apply(row, fx)).collect()
    }
}
