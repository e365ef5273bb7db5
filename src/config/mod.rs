//! Immutable portal configuration, constructed once at startup and
//! passed by reference into the engine and the filter.

pub mod catalog;
pub mod legend;
pub mod rules;
pub mod standard;

use crate::config::catalog::ColumnCatalog;
use crate::config::legend::LegendConfig;
use crate::config::rules::AccessTable;
use crate::core::product::ProductType;
use crate::engine::derivation::DerivationConfig;
use std::collections::HashMap;

/// Everything the portal core needs to know about its products.
///
/// All tables are read-only after construction; requests only borrow
/// them, so the whole struct is freely shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    /// Display mappings, floor families, upload templates.
    pub catalog: ColumnCatalog,
    /// Which table columns each department may view.
    pub view_rules: AccessTable,
    /// Which floor-price families each department may view.
    pub floor_rules: AccessTable,
    /// Derived-column plans per product.
    pub derivations: DerivationConfig,
    /// Export legend/assumption blocks per product.
    pub legends: HashMap<ProductType, LegendConfig>,
}

impl PortalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn legend(&self, product: &ProductType) -> Option<&LegendConfig> {
        self.legends.get(product)
    }
}
