use crate::config::catalog::ColumnHeader;
use crate::config::PortalConfig;
use crate::core::currency::{CurrencyCode, FxRateQuote, FxRateTable};
use crate::core::department::Department;
use crate::core::product::ProductType;
use crate::core::row::{ColumnName, RateRow};
use crate::engine::derivation::DerivationEngine;
use crate::store::{RateStore, StoreError};
use crate::visibility::filter::VisibilityFilter;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days a quotation remains valid from the moment it is assembled.
const QUOTE_VALIDITY_DAYS: i64 = 120;

/// The complete data bundle for one department's view of one product.
///
/// This is what the API layer serializes and the dashboard renders:
/// projected rows, the ordered column headers for layout, the floor
/// families the department may price against, and the FX quotes for
/// currency toggles. All presentation decisions stay downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewBundle {
    pub bundle_id: Uuid,
    pub product: ProductType,
    pub department: Department,
    pub generated_at: DateTime<Utc>,
    /// End of the 120-day quotation window.
    pub valid_until: DateTime<Utc>,
    /// Viewable table columns, in configured order.
    pub table_columns: Vec<ColumnHeader>,
    /// Display names of every floor family this product exposes.
    pub floor_price_names: Vec<ColumnHeader>,
    /// Floor families granted to this department.
    pub allowed_floors: Vec<ColumnName>,
    pub has_dynamic_rates: bool,
    /// Derived rows, restricted to what the department may see.
    pub rows: Vec<RateRow>,
    /// FX quotes as supplied by the store (valid ones only).
    pub fx_rates: Vec<FxRateQuote>,
}

/// Fetch, derive, filter, and package one product view.
///
/// Storage failures propagate; everything downstream of the fetch is
/// total and cannot fail.
///
/// # Examples
///
/// ```
/// use ratedeck::config::PortalConfig;
/// use ratedeck::core::department::Department;
/// use ratedeck::core::product::ProductType;
/// use ratedeck::core::row::{CellValue, RateRow};
/// use ratedeck::export::bundle::assemble_view;
/// use ratedeck::store::MemoryStore;
/// use rust_decimal_macros::dec;
///
/// let config = PortalConfig::standard();
/// let product = ProductType::new("international_outbound_rates");
/// let store = MemoryStore::new().with_table(
///     product.clone(),
///     vec![RateRow::new()
///         .with("country", CellValue::text("Peru"))
///         .with("cost_usd", CellValue::number(dec!(0.85)))],
/// );
///
/// let bundle =
///     assemble_view(&config, &store, &product, &Department::new("Sales")).unwrap();
/// assert_eq!(bundle.rows.len(), 1);
/// assert!(bundle.has_dynamic_rates);
/// ```
pub fn assemble_view(
    config: &PortalConfig,
    store: &dyn RateStore,
    product: &ProductType,
    department: &Department,
) -> Result<ViewBundle, StoreError> {
    let rows = store.fetch_rows(product)?;
    let quotes = store.fetch_fx_rates()?;
    let fx = FxRateTable::from_quotes(CurrencyCode::new("USD"), &quotes);

    let derived = DerivationEngine::derive(&config.derivations, &fx, product, rows);
    let view = VisibilityFilter::resolve(config, product, department);
    let projected: Vec<RateRow> = derived.iter().map(|row| view.project(row)).collect();

    debug!(
        "assembled {} rows / {} columns for {} ({})",
        projected.len(),
        view.visible_columns.len(),
        product,
        department
    );

    let generated_at = Utc::now();
    Ok(ViewBundle {
        bundle_id: Uuid::new_v4(),
        product: product.clone(),
        department: department.clone(),
        generated_at,
        valid_until: generated_at + Duration::days(QUOTE_VALIDITY_DAYS),
        table_columns: view.visible_columns.clone(),
        floor_price_names: view.floor_price_names.clone(),
        allowed_floors: view.allowed_floors.clone(),
        has_dynamic_rates: view.has_dynamic_rates,
        rows: projected,
        fx_rates: fx.quotes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::row::CellValue;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn outbound() -> ProductType {
        ProductType::new("international_outbound_rates")
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new().with_table(
            outbound(),
            vec![
                RateRow::new()
                    .with("id", CellValue::number(dec!(1)))
                    .with("country", CellValue::text("Peru"))
                    .with("cost_usd", CellValue::number(dec!(0.85))),
                RateRow::new()
                    .with("id", CellValue::number(dec!(2)))
                    .with("country", CellValue::text("Chile"))
                    .with("cost_usd", CellValue::text("not-a-number")),
            ],
        )
    }

    #[test]
    fn test_bundle_projects_rows() {
        let config = PortalConfig::standard();
        let bundle = assemble_view(
            &config,
            &sample_store(),
            &outbound(),
            &Department::new("HR"),
        )
        .unwrap();

        assert_eq!(bundle.rows.len(), 2);
        for row in &bundle.rows {
            // cost_usd is not in the Default view and HR has no rule of
            // its own, so the raw cost never leaves the core.
            assert!(!row.contains(&"cost_usd".into()));
            assert!(row.contains(&"small_volume_list_price_usd".into()));
        }
    }

    #[test]
    fn test_bundle_quote_window() {
        let config = PortalConfig::standard();
        let bundle = assemble_view(
            &config,
            &sample_store(),
            &outbound(),
            &Department::new("Sales"),
        )
        .unwrap();
        assert_eq!(
            bundle.valid_until - bundle.generated_at,
            Duration::days(120)
        );
    }

    #[test]
    fn test_bundle_unknown_product_is_store_error() {
        let config = PortalConfig::standard();
        let result = assemble_view(
            &config,
            &sample_store(),
            &ProductType::new("pstn_replacement_outbound"),
            &Department::new("Sales"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bundle_keeps_valid_fx_quotes_only() {
        let config = PortalConfig::standard();
        let store = sample_store().with_fx_rates(vec![
            FxRateQuote {
                currency: CurrencyCode::new("EUR"),
                rate_to_usd: dec!(1.08),
            },
            FxRateQuote {
                currency: CurrencyCode::new("XXX"),
                rate_to_usd: dec!(-1),
            },
        ]);
        let bundle =
            assemble_view(&config, &store, &outbound(), &Department::new("Sales")).unwrap();
        assert_eq!(bundle.fx_rates.len(), 1);
        assert_eq!(bundle.fx_rates[0].currency, CurrencyCode::new("EUR"));
    }
}
