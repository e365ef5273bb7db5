use crate::core::product::ProductType;
use crate::core::row::ColumnName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A column name paired with its human-facing display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub name: ColumnName,
    pub display: String,
}

impl ColumnHeader {
    pub fn new(name: impl Into<ColumnName>, display: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: display.into(),
        }
    }
}

/// A floor price tier and its companion margin column.
///
/// Floor access rules grant families by their price column name; a
/// grant always covers the pair, so a department that may see a tier's
/// price may also see the margin earned at that tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorFamily {
    pub price: ColumnName,
    pub margin: ColumnName,
}

impl FloorFamily {
    pub fn new(price: impl Into<ColumnName>, margin: impl Into<ColumnName>) -> Self {
        Self {
            price: price.into(),
            margin: margin.into(),
        }
    }
}

/// Presentation mapping for every product: which columns are
/// displayable, under what headers, in what canonical order.
///
/// This is the seam the visibility filter checks configured column
/// names against — a rule naming a column with no catalog entry is
/// silently unpresentable, not an error, since rules may outlive a
/// column that was dropped from presentation.
///
/// Also carries the admin upload template headers and the floor-family
/// pairs per product.
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    mappings: HashMap<ProductType, Vec<ColumnHeader>>,
    templates: HashMap<ProductType, Vec<String>>,
    families: HashMap<ProductType, Vec<FloorFamily>>,
}

impl ColumnCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mapping(&mut self, product: ProductType, columns: Vec<ColumnHeader>) {
        self.mappings.insert(product, columns);
    }

    pub fn set_template(&mut self, product: ProductType, headers: Vec<String>) {
        self.templates.insert(product, headers);
    }

    pub fn set_families(&mut self, product: ProductType, families: Vec<FloorFamily>) {
        self.families.insert(product, families);
    }

    /// Display name for a column, if the product still presents it.
    pub fn display_name(&self, product: &ProductType, column: &ColumnName) -> Option<&str> {
        self.mappings.get(product).and_then(|columns| {
            columns
                .iter()
                .find(|header| &header.name == column)
                .map(|header| header.display.as_str())
        })
    }

    pub fn is_mapped(&self, product: &ProductType, column: &ColumnName) -> bool {
        self.display_name(product, column).is_some()
    }

    /// All mapped columns for a product, in catalog order.
    pub fn columns(&self, product: &ProductType) -> &[ColumnHeader] {
        self.mappings
            .get(product)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Header row for the admin upload template.
    pub fn template_columns(&self, product: &ProductType) -> &[String] {
        self.templates
            .get(product)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Floor families declared for a product.
    pub fn families(&self, product: &ProductType) -> &[FloorFamily] {
        self.families
            .get(product)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The margin column paired with a floor price column.
    pub fn margin_partner(
        &self,
        product: &ProductType,
        price: &ColumnName,
    ) -> Option<&ColumnName> {
        self.families(product)
            .iter()
            .find(|family| &family.price == price)
            .map(|family| &family.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> (ColumnCatalog, ProductType) {
        let product = ProductType::new("international_outbound_rates");
        let mut catalog = ColumnCatalog::new();
        catalog.set_mapping(
            product.clone(),
            vec![
                ColumnHeader::new("id", "ID"),
                ColumnHeader::new("country", "Country"),
                ColumnHeader::new("cda_floor_price_usd", "CDA Floor USD"),
            ],
        );
        catalog.set_families(
            product.clone(),
            vec![FloorFamily::new(
                "cda_floor_price_usd",
                "cda_floor_margin_percent",
            )],
        );
        (catalog, product)
    }

    #[test]
    fn test_display_name_lookup() {
        let (catalog, product) = sample_catalog();
        assert_eq!(
            catalog.display_name(&product, &"country".into()),
            Some("Country")
        );
        assert_eq!(catalog.display_name(&product, &"wholesale_cfp".into()), None);
    }

    #[test]
    fn test_unknown_product_has_no_columns() {
        let (catalog, _) = sample_catalog();
        assert!(catalog.columns(&ProductType::new("missing")).is_empty());
    }

    #[test]
    fn test_margin_partner() {
        let (catalog, product) = sample_catalog();
        assert_eq!(
            catalog.margin_partner(&product, &"cda_floor_price_usd".into()),
            Some(&"cda_floor_margin_percent".into())
        );
        assert_eq!(
            catalog.margin_partner(&product, &"country".into()),
            None
        );
    }
}
