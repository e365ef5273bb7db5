//! The standard production catalog: products, mappings, access rules,
//! derivation plans, and export legends, as shipped with the portal.

use crate::config::catalog::{ColumnHeader, FloorFamily};
use crate::config::legend::{LegendConfig, LegendEntry};
use crate::config::rules::AccessTable;
use crate::config::PortalConfig;
use crate::core::department::Department;
use crate::core::product::ProductType;
use crate::core::row::ColumnName;
use crate::engine::derivation::{DerivationSpec, DerivedColumn};
use crate::engine::formula::Formula;
use rust_decimal_macros::dec;

/// Products served by the standard catalog.
pub fn standard_products() -> Vec<ProductType> {
    vec![
        ProductType::new("pstn_replacement_fee"),
        ProductType::new("pstn_replacement_outbound"),
        ProductType::new("international_outbound_rates"),
        ProductType::new("international_surcharge"),
    ]
}

impl PortalConfig {
    /// Build the full production configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratedeck::config::PortalConfig;
    /// use ratedeck::core::product::ProductType;
    ///
    /// let config = PortalConfig::standard();
    /// let outbound = ProductType::new("international_outbound_rates");
    /// assert!(config.derivations.spec(&outbound).is_some());
    /// assert!(config.floor_rules.has_product(&outbound));
    /// ```
    pub fn standard() -> Self {
        let mut config = PortalConfig::new();
        let outbound = ProductType::new("international_outbound_rates");
        let surcharge = ProductType::new("international_surcharge");
        let pstn_fee = ProductType::new("pstn_replacement_fee");

        config
            .catalog
            .set_mapping(outbound.clone(), outbound_mapping());
        config
            .catalog
            .set_mapping(surcharge.clone(), surcharge_mapping());
        config
            .catalog
            .set_families(outbound.clone(), outbound_families());
        config.catalog.set_template(
            outbound.clone(),
            to_strings(&[
                "ID",
                "Country",
                "Type",
                "DEST ID",
                "Destination",
                "OBC Applicable",
                "Cost (USD)",
                "Wholesale CFP",
                "Refer Legend",
                "SL (Internal)",
                "Comments (Internal)",
            ]),
        );
        config.catalog.set_template(
            surcharge.clone(),
            to_strings(&[
                "ID",
                "OBC Region Country",
                "OBC Region Destination",
                "Origin Country Code",
                "Origin Country Name",
                "Dest ID",
                "Region Type - CO",
                "Surcharge Amount",
                "Currency",
                "KEY (Internal)",
                "Amount (USD)",
            ]),
        );

        config.view_rules = view_rules(&outbound, &surcharge, &pstn_fee);
        config.floor_rules = floor_rules(&outbound);

        config
            .derivations
            .insert(outbound.clone(), outbound_derivation());
        config
            .derivations
            .insert(surcharge.clone(), surcharge_derivation());

        config.legends.insert(outbound, outbound_legend());
        config
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_columns(items: &[&str]) -> Vec<ColumnName> {
    items.iter().map(|s| ColumnName::new(*s)).collect()
}

fn outbound_mapping() -> Vec<ColumnHeader> {
    vec![
        ColumnHeader::new("id", "ID"),
        ColumnHeader::new("country", "Country"),
        ColumnHeader::new("currency", "CURRENCY"),
        ColumnHeader::new("call_type", "Type"),
        ColumnHeader::new("destid", "DEST ID"),
        ColumnHeader::new("destination", "Destination"),
        ColumnHeader::new("obc_applicable", "OBC Applicable"),
        ColumnHeader::new("cost_usd", "Cost (USD)"),
        ColumnHeader::new("wholesale_cfp", "Wholesale CFP"),
        ColumnHeader::new("mh_floor_usd", "MM Floor USD"),
        ColumnHeader::new("mh_floor_margin_percent", "MM Floor Margin %"),
        ColumnHeader::new("cda_floor_price_usd", "CDA Floor USD"),
        ColumnHeader::new("cda_floor_margin_percent", "CDA Margin %"),
        ColumnHeader::new("cpaas_high_volumes_floor_usd", "CpaaS High Vol USD"),
        ColumnHeader::new("cpaas_high_volumes_margin_percent", "CpaaS High Vol Margin %"),
        ColumnHeader::new("service_provider_medium_volume_floor_usd", "SP/Med Vol USD"),
        ColumnHeader::new(
            "service_provider_medium_volume_margin_percent",
            "SP/Med Vol Margin %",
        ),
        ColumnHeader::new("small_volume_list_price_usd", "Small Vol List Price USD"),
        ColumnHeader::new("small_volume_margin_percent", "Small Vol Margin %"),
        ColumnHeader::new("refer_legend", "Refer Legend"),
        ColumnHeader::new("sl_internal", "SL (Internal)"),
        ColumnHeader::new("comments_internal", "Comments (Internal)"),
    ]
}

fn surcharge_mapping() -> Vec<ColumnHeader> {
    vec![
        ColumnHeader::new("id", "ID"),
        ColumnHeader::new("obc_region_country", "OBC Region Country"),
        ColumnHeader::new("obc_region_destination", "OBC Region Destination"),
        ColumnHeader::new("origin_country_code", "Origin Country Code"),
        ColumnHeader::new("origin_country_name", "Origin Country Name"),
        ColumnHeader::new("dest_id", "Dest ID"),
        ColumnHeader::new("region_type_co", "Region Type - CO"),
        ColumnHeader::new("amount", "Surcharge Amount"),
        ColumnHeader::new("currency", "Currency"),
        ColumnHeader::new("key_internal", "KEY (Internal)"),
        ColumnHeader::new("amount_usd", "Amount (USD)"),
    ]
}

fn outbound_families() -> Vec<FloorFamily> {
    vec![
        FloorFamily::new("mh_floor_usd", "mh_floor_margin_percent"),
        FloorFamily::new("cda_floor_price_usd", "cda_floor_margin_percent"),
        FloorFamily::new(
            "cpaas_high_volumes_floor_usd",
            "cpaas_high_volumes_margin_percent",
        ),
        FloorFamily::new(
            "service_provider_medium_volume_floor_usd",
            "service_provider_medium_volume_margin_percent",
        ),
        FloorFamily::new("small_volume_list_price_usd", "small_volume_margin_percent"),
    ]
}

fn view_rules(
    outbound: &ProductType,
    surcharge: &ProductType,
    pstn_fee: &ProductType,
) -> AccessTable {
    let mut rules = AccessTable::new();
    rules.insert(
        outbound.clone(),
        Department::fallback(),
        to_columns(&[
            "id",
            "country",
            "call_type",
            "destid",
            "destination",
            "refer_legend",
        ]),
    );
    rules.insert(
        surcharge.clone(),
        Department::fallback(),
        to_columns(&[
            "id",
            "obc_region_country",
            "obc_region_destination",
            "origin_country_code",
            "origin_country_name",
            "dest_id",
            "region_type_co",
            "amount",
            "currency",
            "key_internal",
            "amount_usd",
        ]),
    );
    // pstn_replacement_fee keeps its legacy rule even though the product
    // has no presentation mapping yet; the filter drops the names until
    // a mapping lands.
    rules.insert(
        pstn_fee.clone(),
        Department::fallback(),
        to_columns(&["country_name", "name"]),
    );
    rules
}

fn floor_rules(outbound: &ProductType) -> AccessTable {
    let mut rules = AccessTable::new();
    rules.insert(
        outbound.clone(),
        Department::new("HR"),
        to_columns(&["small_volume_list_price_usd"]),
    );
    rules.insert(
        outbound.clone(),
        Department::new("Sales"),
        to_columns(&[
            "small_volume_list_price_usd",
            "service_provider_medium_volume_floor_usd",
        ]),
    );
    rules.insert(
        outbound.clone(),
        Department::new("Marketing"),
        to_columns(&[
            "small_volume_list_price_usd",
            "service_provider_medium_volume_floor_usd",
            "cpaas_high_volumes_floor_usd",
        ]),
    );
    rules.insert(
        outbound.clone(),
        Department::new("Operations"),
        to_columns(&[
            "cda_floor_price_usd",
            "cpaas_high_volumes_floor_usd",
            "service_provider_medium_volume_floor_usd",
            "small_volume_list_price_usd",
        ]),
    );
    rules.insert(
        outbound.clone(),
        Department::fallback(),
        to_columns(&["small_volume_list_price_usd"]),
    );
    rules
}

fn outbound_derivation() -> DerivationSpec {
    DerivationSpec::new(
        "cost_usd",
        vec![
            DerivedColumn::new("mh_floor_usd", Formula::MmFloor),
            DerivedColumn::new("mh_floor_margin_percent", Formula::MmFloorMargin),
            DerivedColumn::new("small_volume_list_price_usd", Formula::SmallVolumeListPrice),
            DerivedColumn::new("small_volume_margin_percent", Formula::SmallVolumeMargin),
            DerivedColumn::new(
                "cda_floor_price_usd",
                Formula::TierFloor {
                    fraction: dec!(0.65),
                },
            ),
            DerivedColumn::new(
                "cda_floor_margin_percent",
                Formula::TierMargin {
                    fraction: dec!(0.65),
                },
            ),
            DerivedColumn::new(
                "cpaas_high_volumes_floor_usd",
                Formula::TierFloor {
                    fraction: dec!(0.75),
                },
            ),
            DerivedColumn::new(
                "cpaas_high_volumes_margin_percent",
                Formula::TierMargin {
                    fraction: dec!(0.75),
                },
            ),
            DerivedColumn::new(
                "service_provider_medium_volume_floor_usd",
                Formula::TierFloor {
                    fraction: dec!(0.85),
                },
            ),
            DerivedColumn::new(
                "service_provider_medium_volume_margin_percent",
                Formula::TierMargin {
                    fraction: dec!(0.85),
                },
            ),
        ],
    )
}

fn surcharge_derivation() -> DerivationSpec {
    // Surcharge rows are quoted in destination-local currency; the USD
    // amount is stored when the upload already carries it and
    // backfilled from the FX table when it does not.
    DerivationSpec::new(
        "amount",
        vec![DerivedColumn::new(
            "amount_usd",
            Formula::FxToUsd {
                amount: "amount".into(),
                currency: "currency".into(),
            },
        )],
    )
}

fn outbound_legend() -> LegendConfig {
    LegendConfig {
        legend_alpha: vec![
            LegendEntry::new("A", "Standard destinations open for calling"),
            LegendEntry::new(
                "B",
                "Permanently Blocked Destination. May be unblocked upon request.",
            ),
            LegendEntry::new(
                "C",
                "Calls originating from Algeria, Tunisia, Morocco or Satellite Phone networks \
                 such as Inmarsat will incur a $1.00 per minute surcharge.",
            ),
            LegendEntry::new(
                "S",
                "International surcharge may apply. Refer to International Surcharge tab to see \
                 surcharge scenarios.",
            ),
            LegendEntry::new(
                "B|S",
                "Permanently Blocked Destinations. May be unblocked upon request.",
            ),
        ],
        legend_num: vec![
            LegendEntry::new(
                "1",
                "60/60 Billing Increment (Sixty (60) second minimum and Sixty (60) second \
                 increments).",
            ),
            LegendEntry::new(
                "2",
                "60/6 Billing Increment (Sixty (60) second minimum and Six (6) second \
                 increments).",
            ),
            LegendEntry::new(
                "3",
                "60/1 Billing Increment (Sixty (60) second minimum and One (1) second \
                 increments).",
            ),
            LegendEntry::new(
                "4",
                "30/6 Billing Increments (Thirty (30) second minimum and Six (6) second \
                 increments).",
            ),
            LegendEntry::new(
                "5",
                "6/6 Billing Increments (Six (6) second minimum and Six (6) second increments).",
            ),
        ],
        assumptions: to_strings(&[
            "1 : The currency for this quotation is indicated above",
            "2 : The charges quoted are valid for 120 days from the date of this proposal, are \
             confidential, invalidate any previously-quoted charges for similar services, are \
             valid for this proposal only, and show per minute rates; calls are invoiced based \
             on billing increments agreed in contract",
            "3 : International outbound traffic terminated to certain destination are subject to \
             OBC surcharge based on where the call originated. Refer \"International Surcharge\" \
             for more details.",
            "4 : Surcharge rates are in the local currency of the destinations and charged on \
             per minute basis in addition to base termination rate. Basis the quote currency \
             agreed as part of the contract, currency conversion would take place using exchange \
             rate during order delivery to bill the surcharge amount.",
            "5 : Domestic traffic (PSTN replacement) generated through DID not provided by the \
             supplier will be treated as international traffic and will be subject to OBC \
             surcharge.",
            "6 : Low ACD traffic is supported on best effort basis. Supplier may, at its \
             election, either reclassify the Service as a call center service and apply the \
             rates applicable to such service, increase the rates to pass through any increased \
             rates, penalties, or fees applied to such traffic by the terminating carrier or \
             suspend the service.",
            "7 : In-country Calling Line Identification (CLI) on international call termination \
             is supported on a best-effort basis and cannot be guaranteed. The supplier reserves \
             the right to block such traffic if necessary.",
            "8 : Permanently Blocked Destinations are destinations proactively blocked by \
             Supplier as a security feature due to their susceptibility to hacking or fraud. \
             Individual destinations can be opened by Supplier at special request.",
            "9 : Charges are exclusive of service tax or any other local levies, which shall be \
             charged as per the regulations of the country of invoice origin.",
            "10 : Supplier reserves the right to adjust the quoted charges of Products & \
             Services, by giving notice to Customer at any time before acceptance of the Order, \
             to reflect any variations in foreign exchange currency rates and market shifts that \
             have occurred between the date of quotation and the date of Order.",
            "11 : The terms and conditions mentioned above are indicative only; for more details \
             refer to Supplier's General Terms & Conditions and applicable Service Schedule(s) \
             documents.",
            "12 : Changes to the design associated with this pricing may result in amended \
             charges.",
            "13 : Capacity is subject to availability.",
            "14 : Dialing Codes are available upon request. Codes and destination names can \
             change during the term of the agreement.",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_products_have_consistent_rules() {
        let config = PortalConfig::standard();
        let outbound = ProductType::new("international_outbound_rates");

        // Every derived outbound column publishes under a mapped name.
        let spec = config.derivations.spec(&outbound).unwrap();
        for column in &spec.columns {
            assert!(
                config.catalog.is_mapped(&outbound, &column.name),
                "derived column {} has no display mapping",
                column.name
            );
        }

        // Every floor family price and margin is mapped too.
        for family in config.catalog.families(&outbound) {
            assert!(config.catalog.is_mapped(&outbound, &family.price));
            assert!(config.catalog.is_mapped(&outbound, &family.margin));
        }
    }

    #[test]
    fn test_floor_grants_reference_known_families() {
        let config = PortalConfig::standard();
        let outbound = ProductType::new("international_outbound_rates");
        let families = config.catalog.families(&outbound);
        for granted in config.floor_rules.granted_columns(&outbound) {
            assert!(
                families.iter().any(|family| family.price == granted),
                "floor grant {} is not a declared family",
                granted
            );
        }
    }

    #[test]
    fn test_every_ruled_product_is_enumerated() {
        let products = standard_products();
        assert_eq!(products.len(), 4);
        let config = PortalConfig::standard();
        for product in &products {
            // Enumerated products may lack rules, but never the other
            // way around.
            let _ = config.view_rules.resolve(product, &Department::fallback());
        }
        assert!(products.contains(&ProductType::new("international_outbound_rates")));
        assert!(products.contains(&ProductType::new("international_surcharge")));
    }

    #[test]
    fn test_legacy_rule_without_mapping_stays() {
        let config = PortalConfig::standard();
        let pstn_fee = ProductType::new("pstn_replacement_fee");
        assert!(config.view_rules.has_product(&pstn_fee));
        assert!(config.catalog.columns(&pstn_fee).is_empty());
    }
}
