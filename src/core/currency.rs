use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// # Examples
///
/// ```
/// use ratedeck::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let aud = CurrencyCode::new("AUD");
/// assert_ne!(usd, aud);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from FX rate operations.
#[derive(Debug, Error)]
pub enum FxError {
    #[error("no FX rate available for {currency}")]
    RateNotFound { currency: CurrencyCode },
    #[error("FX rate must be positive, got {rate} for {currency}")]
    InvalidRate {
        currency: CurrencyCode,
        rate: Decimal,
    },
}

/// One FX quote as the storage collaborator supplies it: how many units
/// of the base currency one unit of `currency` is worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxRateQuote {
    pub currency: CurrencyCode,
    pub rate_to_usd: Decimal,
}

/// FX rate table keyed against a single base currency (USD in the
/// standard catalog).
///
/// Used by the derivation engine to backfill USD amounts for products
/// quoted in local currencies, and echoed into the view bundle so the
/// presentation layer can offer currency toggles.
///
/// # Examples
///
/// ```
/// use ratedeck::core::currency::{CurrencyCode, FxRateTable};
/// use rust_decimal_macros::dec;
///
/// let mut rates = FxRateTable::new(CurrencyCode::new("USD"));
/// rates.set_rate(CurrencyCode::new("AUD"), dec!(0.65)).unwrap();
///
/// let usd = rates.to_base(dec!(100), &CurrencyCode::new("AUD")).unwrap();
/// assert_eq!(usd, dec!(65.00));
/// ```
#[derive(Debug, Clone)]
pub struct FxRateTable {
    base: CurrencyCode,
    /// currency -> units of base per unit of currency
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl FxRateTable {
    /// Create an empty table with the given base currency.
    pub fn new(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
        }
    }

    /// Build a table from stored quotes, dropping invalid ones.
    ///
    /// A non-positive quote is a data problem in the store, not a
    /// reason to fail the whole request; it is logged and skipped.
    pub fn from_quotes(base: CurrencyCode, quotes: &[FxRateQuote]) -> Self {
        let mut table = Self::new(base);
        for quote in quotes {
            if let Err(err) = table.set_rate(quote.currency.clone(), quote.rate_to_usd) {
                warn!("dropping FX quote: {}", err);
            }
        }
        table
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Set the rate for one currency: 1 unit = `rate` units of base.
    pub fn set_rate(&mut self, currency: CurrencyCode, rate: Decimal) -> Result<(), FxError> {
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate { currency, rate });
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Rate from a currency into the base. The base converts at 1.
    pub fn rate(&self, currency: &CurrencyCode) -> Result<Decimal, FxError> {
        if currency == &self.base {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| FxError::RateNotFound {
                currency: currency.clone(),
            })
    }

    /// Convert an amount from `currency` into the base currency.
    pub fn to_base(&self, amount: Decimal, currency: &CurrencyCode) -> Result<Decimal, FxError> {
        let rate = self.rate(currency)?;
        Ok(amount * rate)
    }

    /// All quotes in the table, in currency order.
    pub fn quotes(&self) -> Vec<FxRateQuote> {
        self.rates
            .iter()
            .map(|(currency, rate)| FxRateQuote {
                currency: currency.clone(),
                rate_to_usd: *rate,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_base_converts_at_one() {
        let table = FxRateTable::new(CurrencyCode::new("USD"));
        let result = table.to_base(dec!(42), &CurrencyCode::new("USD")).unwrap();
        assert_eq!(result, dec!(42));
    }

    #[test]
    fn test_missing_rate_is_error() {
        let table = FxRateTable::new(CurrencyCode::new("USD"));
        assert!(table.rate(&CurrencyCode::new("EUR")).is_err());
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let mut table = FxRateTable::new(CurrencyCode::new("USD"));
        let result = table.set_rate(CurrencyCode::new("EUR"), dec!(-1.08));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_quotes_drops_invalid() {
        let quotes = vec![
            FxRateQuote {
                currency: CurrencyCode::new("EUR"),
                rate_to_usd: dec!(1.08),
            },
            FxRateQuote {
                currency: CurrencyCode::new("BAD"),
                rate_to_usd: dec!(0),
            },
        ];
        let table = FxRateTable::from_quotes(CurrencyCode::new("USD"), &quotes);
        assert_eq!(table.quotes().len(), 1);
        assert_eq!(table.rate(&CurrencyCode::new("EUR")).unwrap(), dec!(1.08));
    }

    #[test]
    fn test_conversion() {
        let mut table = FxRateTable::new(CurrencyCode::new("USD"));
        table.set_rate(CurrencyCode::new("INR"), dec!(0.012)).unwrap();
        let result = table.to_base(dec!(1000), &CurrencyCode::new("INR")).unwrap();
        assert_eq!(result, dec!(12));
    }
}
