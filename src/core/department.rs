use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the rule entry that applies when a department has no
/// explicit rule of its own.
pub const FALLBACK_RULE: &str = "Default";

/// Name of a department requesting rate data.
///
/// Departments are opaque labels ("Sales", "Marketing", "HR", ...)
/// carried in from the session layer. The reserved name
/// [`FALLBACK_RULE`] marks the rule entry used when no exact match
/// exists; it is a configuration sentinel, not a real department.
///
/// # Examples
///
/// ```
/// use ratedeck::core::department::Department;
///
/// let sales = Department::new("Sales");
/// assert_ne!(sales, Department::fallback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Department(String);

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `"Default"` rule sentinel.
    pub fn fallback() -> Self {
        Self(FALLBACK_RULE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Department {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
