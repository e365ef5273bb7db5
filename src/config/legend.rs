use serde::{Deserialize, Serialize};

/// One legend code and its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub code: String,
    pub description: String,
}

impl LegendEntry {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Legend tables and assumption lines attached to a product's export.
///
/// Pure data: the workbook writer decides layout and styling. Products
/// without a legend export the data table alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Alpha destination-status codes (A, B, S, ...).
    pub legend_alpha: Vec<LegendEntry>,
    /// Numeric billing-increment codes (1..5).
    pub legend_num: Vec<LegendEntry>,
    /// Quotation assumption lines, in print order.
    pub assumptions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_round_trip() {
        let legend = LegendConfig {
            legend_alpha: vec![LegendEntry::new("A", "Standard destinations")],
            legend_num: vec![LegendEntry::new("1", "60/60 billing increment")],
            assumptions: vec!["Charges are per minute.".to_string()],
        };
        let json = serde_json::to_string(&legend).unwrap();
        let back: LegendConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, legend);
    }
}
