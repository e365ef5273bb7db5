use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a rate product (one rate table in the portal).
///
/// Selects which derivation formulas, visibility rules, and display
/// mappings apply. Product types are fixed at startup by the
/// configuration catalog; they are never created at runtime.
///
/// # Examples
///
/// ```
/// use ratedeck::core::product::ProductType;
///
/// let outbound = ProductType::new("international_outbound_rates");
/// let surcharge = ProductType::new("international_surcharge");
/// assert_ne!(outbound, surcharge);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductType(String);

impl ProductType {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
