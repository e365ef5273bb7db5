use crate::core::department::Department;
use crate::core::product::ProductType;
use crate::core::row::ColumnName;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Department access rules for one concern (table columns or floor
/// families), keyed by product.
///
/// Resolution walks an explicit chain: the exact department entry,
/// then the `"Default"` entry, then nothing. A product with no rule
/// table at all resolves to nothing for every department — absence of
/// configuration means no access.
///
/// # Examples
///
/// ```
/// use ratedeck::config::rules::AccessTable;
/// use ratedeck::core::department::Department;
/// use ratedeck::core::product::ProductType;
///
/// let mut table = AccessTable::new();
/// let product = ProductType::new("international_outbound_rates");
/// table.insert(
///     product.clone(),
///     Department::fallback(),
///     vec!["id".into(), "country".into()],
/// );
///
/// let granted = table.resolve(&product, &Department::new("Finance"));
/// assert_eq!(granted.len(), 2);
///
/// let none = table.resolve(&ProductType::new("unknown"), &Department::new("Finance"));
/// assert!(none.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessTable {
    rules: HashMap<ProductType, BTreeMap<Department, Vec<ColumnName>>>,
}

impl AccessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        product: ProductType,
        department: Department,
        columns: Vec<ColumnName>,
    ) {
        self.rules
            .entry(product)
            .or_default()
            .insert(department, columns);
    }

    /// Whether any rule table exists for the product.
    pub fn has_product(&self, product: &ProductType) -> bool {
        self.rules.contains_key(product)
    }

    /// Resolve the granted list for a department, in declared order.
    ///
    /// Never fails: unknown products and departments fall through the
    /// chain to the empty grant.
    pub fn resolve(&self, product: &ProductType, department: &Department) -> &[ColumnName] {
        let Some(table) = self.rules.get(product) else {
            return &[];
        };
        let fallback = Department::fallback();
        for candidate in [department, &fallback] {
            if let Some(columns) = table.get(candidate) {
                return columns;
            }
        }
        &[]
    }

    /// Every column granted to any department of the product, deduped,
    /// in department order then declaration order.
    pub fn granted_columns(&self, product: &ProductType) -> Vec<ColumnName> {
        let mut seen = Vec::new();
        if let Some(table) = self.rules.get(product) {
            for columns in table.values() {
                for column in columns {
                    if !seen.contains(column) {
                        seen.push(column.clone());
                    }
                }
            }
        }
        seen
    }
}
