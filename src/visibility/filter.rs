use crate::config::catalog::ColumnHeader;
use crate::config::PortalConfig;
use crate::core::department::Department;
use crate::core::product::ProductType;
use crate::core::row::{ColumnName, RateRow};
use serde::{Deserialize, Serialize};

/// What one department may see of one product.
///
/// Produced by [`VisibilityFilter::resolve`]; consumed by the bundle
/// and export assembly. Column order is the order declared in
/// configuration — the presentation layer lays tables out in exactly
/// this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedView {
    pub product: ProductType,
    pub department: Department,
    /// Viewable table columns with display names, in rule order.
    pub visible_columns: Vec<ColumnHeader>,
    /// Floor families granted to this department (price column names).
    pub allowed_floors: Vec<ColumnName>,
    /// Display names of every floor family any department of this
    /// product is granted, for informational bundling.
    pub floor_price_names: Vec<ColumnHeader>,
    /// Whether the product has a floor rule table at all.
    pub has_dynamic_rates: bool,
    /// Columns a projected row retains: the visible columns plus the
    /// granted floor families' price/margin pairs.
    projected_columns: Vec<ColumnName>,
}

impl ResolvedView {
    /// Restrict a derived row to what this department may see.
    pub fn project(&self, row: &RateRow) -> RateRow {
        self.projected_columns
            .iter()
            .filter_map(|column| {
                row.get(column)
                    .map(|value| (column.clone(), value.clone()))
            })
            .collect()
    }

    /// The visible column names, without display names.
    pub fn visible_names(&self) -> Vec<ColumnName> {
        self.visible_columns
            .iter()
            .map(|header| header.name.clone())
            .collect()
    }
}

/// Resolves department views against the portal configuration.
///
/// Stateless; both lookups (columns and floors) walk the
/// department → `"Default"` → empty chain and never fail. A product
/// with no view rule table resolves to an empty view — no
/// configuration means no access.
///
/// # Examples
///
/// ```
/// use ratedeck::config::PortalConfig;
/// use ratedeck::core::department::Department;
/// use ratedeck::core::product::ProductType;
/// use ratedeck::visibility::filter::VisibilityFilter;
///
/// let config = PortalConfig::standard();
/// let view = VisibilityFilter::resolve(
///     &config,
///     &ProductType::new("international_outbound_rates"),
///     &Department::new("Sales"),
/// );
///
/// assert_eq!(view.visible_columns.len(), 6);
/// assert_eq!(view.allowed_floors.len(), 2);
/// assert!(view.has_dynamic_rates);
/// ```
pub struct VisibilityFilter;

impl VisibilityFilter {
    pub fn resolve(
        config: &PortalConfig,
        product: &ProductType,
        department: &Department,
    ) -> ResolvedView {
        let granted = config.view_rules.resolve(product, department);

        // Rule order is the layout contract; unmapped names drop out
        // silently because configuration may name columns that were
        // since removed from presentation.
        let visible_columns: Vec<ColumnHeader> = granted
            .iter()
            .filter_map(|column| {
                config
                    .catalog
                    .display_name(product, column)
                    .map(|display| ColumnHeader::new(column.clone(), display))
            })
            .collect();

        let allowed_floors: Vec<ColumnName> =
            config.floor_rules.resolve(product, department).to_vec();

        let floor_price_names: Vec<ColumnHeader> = config
            .floor_rules
            .granted_columns(product)
            .into_iter()
            .filter_map(|column| {
                config
                    .catalog
                    .display_name(product, &column)
                    .map(|display| ColumnHeader::new(column, display))
            })
            .collect();

        let mut projected_columns: Vec<ColumnName> =
            visible_columns.iter().map(|h| h.name.clone()).collect();
        for floor in &allowed_floors {
            for column in [Some(floor), config.catalog.margin_partner(product, floor)]
                .into_iter()
                .flatten()
            {
                if !projected_columns.contains(column) {
                    projected_columns.push(column.clone());
                }
            }
        }

        ResolvedView {
            product: product.clone(),
            department: department.clone(),
            visible_columns,
            allowed_floors,
            floor_price_names,
            has_dynamic_rates: config.floor_rules.has_product(product),
            projected_columns,
        }
    }
}
