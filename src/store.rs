use crate::core::currency::FxRateQuote;
use crate::core::product::ProductType;
use crate::core::row::RateRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors surfaced by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no rate table stored for product {product}")]
    UnknownProduct { product: ProductType },
    #[error("storage backend failure: {reason}")]
    Backend { reason: String },
}

/// The storage collaborator seam.
///
/// Implementations return base columns only, one row per persisted
/// record, with column names matching the configuration keys. The core
/// never writes back through this trait.
pub trait RateStore {
    fn fetch_rows(&self, product: &ProductType) -> Result<Vec<RateRow>, StoreError>;

    fn fetch_fx_rates(&self) -> Result<Vec<FxRateQuote>, StoreError>;
}

/// In-process store backed by plain maps, for tests, demos, and CLI
/// input files.
///
/// # Examples
///
/// ```
/// use ratedeck::core::product::ProductType;
/// use ratedeck::core::row::{CellValue, RateRow};
/// use ratedeck::store::{MemoryStore, RateStore};
///
/// let product = ProductType::new("international_outbound_rates");
/// let store = MemoryStore::new().with_table(
///     product.clone(),
///     vec![RateRow::new().with("country", CellValue::text("Peru"))],
/// );
///
/// assert_eq!(store.fetch_rows(&product).unwrap().len(), 1);
/// assert!(store.fetch_rows(&ProductType::new("missing")).is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    tables: HashMap<ProductType, Vec<RateRow>>,
    #[serde(default)]
    fx_rates: Vec<FxRateQuote>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, product: ProductType, rows: Vec<RateRow>) -> Self {
        self.tables.insert(product, rows);
        self
    }

    pub fn with_fx_rates(mut self, quotes: Vec<FxRateQuote>) -> Self {
        self.fx_rates = quotes;
        self
    }

    pub fn insert_table(&mut self, product: ProductType, rows: Vec<RateRow>) {
        self.tables.insert(product, rows);
    }

    pub fn products(&self) -> Vec<ProductType> {
        let mut products: Vec<ProductType> = self.tables.keys().cloned().collect();
        products.sort();
        products
    }
}

impl RateStore for MemoryStore {
    fn fetch_rows(&self, product: &ProductType) -> Result<Vec<RateRow>, StoreError> {
        self.tables
            .get(product)
            .cloned()
            .ok_or_else(|| StoreError::UnknownProduct {
                product: product.clone(),
            })
    }

    fn fetch_fx_rates(&self) -> Result<Vec<FxRateQuote>, StoreError> {
        Ok(self.fx_rates.clone())
    }
}
