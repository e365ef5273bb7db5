use crate::config::catalog::ColumnHeader;
use crate::config::legend::LegendConfig;
use crate::config::PortalConfig;
use crate::core::currency::{CurrencyCode, FxRateTable};
use crate::core::department::Department;
use crate::core::product::ProductType;
use crate::core::row::CellValue;
use crate::engine::derivation::DerivationEngine;
use crate::store::{RateStore, StoreError};
use crate::visibility::filter::VisibilityFilter;
use serde::{Deserialize, Serialize};

/// A spreadsheet-shaped view of one product for one department, ready
/// for the workbook-writer collaborator.
///
/// Cells are positional: `rows[i][j]` belongs under `columns[j]`.
/// Fonts, borders, and merges are the writer's business; this layer
/// only decides what data appears and in which order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSheet {
    /// Worksheet title.
    pub title: String,
    /// Suggested download file name.
    pub file_name: String,
    /// Column headers in layout order.
    pub columns: Vec<ColumnHeader>,
    /// Cell values aligned with `columns`.
    pub rows: Vec<Vec<CellValue>>,
    /// Legend and assumptions block, when the product has one.
    pub legend: Option<LegendConfig>,
}

/// Build the export sheet for one product and department.
///
/// Exports carry only the department's viewable table columns — floor
/// grants shape the interactive view, not the downloadable file,
/// matching the portal's export endpoint.
///
/// # Examples
///
/// ```
/// use ratedeck::config::PortalConfig;
/// use ratedeck::core::department::Department;
/// use ratedeck::core::product::ProductType;
/// use ratedeck::core::row::{CellValue, RateRow};
/// use ratedeck::export::sheet::build_export;
/// use ratedeck::store::MemoryStore;
/// use rust_decimal_macros::dec;
///
/// let config = PortalConfig::standard();
/// let product = ProductType::new("international_outbound_rates");
/// let store = MemoryStore::new().with_table(
///     product.clone(),
///     vec![RateRow::new()
///         .with("country", CellValue::text("Peru"))
///         .with("cost_usd", CellValue::number(dec!(0.035)))],
/// );
///
/// let sheet = build_export(&config, &store, &product, &Department::new("Sales")).unwrap();
/// assert_eq!(sheet.columns.len(), 6);
/// assert!(sheet.legend.is_some());
/// ```
pub fn build_export(
    config: &PortalConfig,
    store: &dyn RateStore,
    product: &ProductType,
    department: &Department,
) -> Result<ExportSheet, StoreError> {
    let rows = store.fetch_rows(product)?;
    let quotes = store.fetch_fx_rates()?;
    let fx = FxRateTable::from_quotes(CurrencyCode::new("USD"), &quotes);

    let derived = DerivationEngine::derive(&config.derivations, &fx, product, rows);
    let view = VisibilityFilter::resolve(config, product, department);

    let cells: Vec<Vec<CellValue>> = derived
        .iter()
        .map(|row| {
            view.visible_columns
                .iter()
                .map(|header| row.get(&header.name).cloned().unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(ExportSheet {
        title: "Rates".to_string(),
        file_name: format!("Department_Rates_{}.xlsx", product),
        columns: view.visible_columns,
        rows: cells,
        legend: config.legend(product).cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::row::RateRow;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn outbound() -> ProductType {
        ProductType::new("international_outbound_rates")
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new().with_table(
            outbound(),
            vec![RateRow::new()
                .with("id", CellValue::number(dec!(7)))
                .with("country", CellValue::text("Peru"))
                .with("destid", CellValue::text("5113"))
                .with("cost_usd", CellValue::number(dec!(0.035)))],
        )
    }

    #[test]
    fn test_cells_align_with_headers() {
        let config = PortalConfig::standard();
        let sheet = build_export(
            &config,
            &sample_store(),
            &outbound(),
            &Department::new("Sales"),
        )
        .unwrap();

        let country_idx = sheet
            .columns
            .iter()
            .position(|h| h.name.as_str() == "country")
            .unwrap();
        assert_eq!(sheet.rows[0][country_idx], CellValue::text("Peru"));

        // Columns missing from the row export as blanks, not errors.
        let call_type_idx = sheet
            .columns
            .iter()
            .position(|h| h.name.as_str() == "call_type")
            .unwrap();
        assert_eq!(sheet.rows[0][call_type_idx], CellValue::Null);
    }

    #[test]
    fn test_export_excludes_floor_columns() {
        let config = PortalConfig::standard();
        let sheet = build_export(
            &config,
            &sample_store(),
            &outbound(),
            &Department::new("Operations"),
        )
        .unwrap();
        for header in &sheet.columns {
            assert!(!header.name.as_str().contains("floor"));
            assert!(!header.name.as_str().contains("margin"));
        }
    }

    #[test]
    fn test_legend_only_where_configured() {
        let config = PortalConfig::standard();
        let store = sample_store().with_table(
            ProductType::new("international_surcharge"),
            vec![RateRow::new()],
        );

        let outbound_sheet =
            build_export(&config, &store, &outbound(), &Department::new("Sales")).unwrap();
        assert!(outbound_sheet.legend.is_some());

        let surcharge_sheet = build_export(
            &config,
            &store,
            &ProductType::new("international_surcharge"),
            &Department::new("Sales"),
        )
        .unwrap();
        assert!(surcharge_sheet.legend.is_none());
    }

    #[test]
    fn test_file_name_carries_product() {
        let config = PortalConfig::standard();
        let sheet = build_export(
            &config,
            &sample_store(),
            &outbound(),
            &Department::new("Sales"),
        )
        .unwrap();
        assert_eq!(
            sheet.file_name,
            "Department_Rates_international_outbound_rates.xlsx"
        );
    }
}
