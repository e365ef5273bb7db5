use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Name of a rate table column.
///
/// Column names are the stable keys shared between the storage layer,
/// the derivation specs, and the visibility rules. Display names live
/// in the column catalog, never here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A single cell in a rate row.
///
/// Numbers are exact decimals and serialize as strings, the same wire
/// shape the portal's storage layer produces for numeric columns.
/// Incoming JSON strings stay `Text` even when they look numeric;
/// coercion happens at the point of use (see
/// [`RateRow::decimal_or_zero`]).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Number(Decimal),
    Text(String),
}

impl CellValue {
    pub fn number(value: Decimal) -> Self {
        Self::Number(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Serialize for CellValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Number(value) => serializer.serialize_str(&value.to_string()),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = CellValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("null, a number, or a string")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CellValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CellValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(CellValue::Text(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(CellValue::Number(Decimal::from(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(CellValue::Number(Decimal::from(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                // Parse via the shortest round-trip form so 0.035 stays
                // exactly 0.035. Non-finite floats carry through as text.
                match v.to_string().parse::<Decimal>() {
                    Ok(d) => Ok(CellValue::Number(d)),
                    Err(_) => Ok(CellValue::Text(v.to_string())),
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(CellValue::Text(v.to_string()))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// One rate record: a mapping from column name to cell value.
///
/// Base columns come from the storage collaborator. The derivation
/// engine works on a copy and only ever adds keys; it never removes or
/// overwrites a column that is already present.
///
/// # Examples
///
/// ```
/// use ratedeck::core::row::{CellValue, RateRow};
/// use rust_decimal_macros::dec;
///
/// let row = RateRow::new()
///     .with("country", CellValue::text("Peru"))
///     .with("cost_usd", CellValue::number(dec!(0.035)));
///
/// assert_eq!(row.decimal_or_zero(&"cost_usd".into()), dec!(0.035));
/// assert_eq!(row.decimal_or_zero(&"missing".into()), dec!(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateRow {
    cells: HashMap<ColumnName, CellValue>,
}

impl RateRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mainly for tests and demos.
    pub fn with(mut self, column: impl Into<ColumnName>, value: CellValue) -> Self {
        self.cells.insert(column.into(), value);
        self
    }

    pub fn insert(&mut self, column: ColumnName, value: CellValue) {
        self.cells.insert(column, value);
    }

    /// Insert only when the column is absent. Returns whether the value
    /// was stored. This is the primitive behind the add-only derivation
    /// contract: a stored base value always wins over a computed one.
    pub fn insert_if_absent(&mut self, column: ColumnName, value: CellValue) -> bool {
        if self.cells.contains_key(&column) {
            return false;
        }
        self.cells.insert(column, value);
        true
    }

    pub fn get(&self, column: &ColumnName) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn contains(&self, column: &ColumnName) -> bool {
        self.cells.contains_key(column)
    }

    /// Numeric view of a cell with zero-coercion: numbers pass through,
    /// text is parsed, and anything else (missing, null, unparseable)
    /// reads as zero. Malformed input never aborts a batch.
    pub fn decimal_or_zero(&self, column: &ColumnName) -> Decimal {
        match self.cells.get(column) {
            Some(CellValue::Number(value)) => *value,
            Some(CellValue::Text(value)) => value.trim().parse().unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }

    /// Text view of a cell; `None` unless the cell holds text.
    pub fn text(&self, column: &ColumnName) -> Option<&str> {
        match self.cells.get(column) {
            Some(CellValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnName> {
        self.cells.keys()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(ColumnName, CellValue)> for RateRow {
    fn from_iter<T: IntoIterator<Item = (ColumnName, CellValue)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_coercion_from_text() {
        let row = RateRow::new().with("cost_usd", CellValue::text(" 0.85 "));
        assert_eq!(row.decimal_or_zero(&"cost_usd".into()), dec!(0.85));
    }

    #[test]
    fn test_decimal_coercion_garbage_is_zero() {
        let row = RateRow::new()
            .with("cost_usd", CellValue::text("abc"))
            .with("empty", CellValue::Null);
        assert_eq!(row.decimal_or_zero(&"cost_usd".into()), Decimal::ZERO);
        assert_eq!(row.decimal_or_zero(&"empty".into()), Decimal::ZERO);
        assert_eq!(row.decimal_or_zero(&"missing".into()), Decimal::ZERO);
    }

    #[test]
    fn test_insert_if_absent_keeps_stored_value() {
        let mut row = RateRow::new().with("amount_usd", CellValue::text("9.9900"));
        let stored = row.insert_if_absent("amount_usd".into(), CellValue::number(dec!(1)));
        assert!(!stored);
        assert_eq!(
            row.get(&"amount_usd".into()),
            Some(&CellValue::text("9.9900"))
        );
    }

    #[test]
    fn test_json_round_trip_shapes() {
        let json = r#"{"country":"Peru","cost_usd":0.035,"refer_legend":null}"#;
        let row: RateRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.decimal_or_zero(&"cost_usd".into()), dec!(0.035));
        assert_eq!(row.text(&"country".into()), Some("Peru"));
        assert!(row.get(&"refer_legend".into()).unwrap().is_null());

        // Numbers serialize as strings, like pg numerics on the wire.
        let out = serde_json::to_value(&row).unwrap();
        assert_eq!(out["cost_usd"], "0.035");
        assert_eq!(out["refer_legend"], serde_json::Value::Null);
    }

    #[test]
    fn test_numeric_looking_text_stays_text() {
        let json = r#"{"destid":"5113"}"#;
        let row: RateRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.text(&"destid".into()), Some("5113"));
        assert_eq!(row.decimal_or_zero(&"destid".into()), dec!(5113));
    }
}
