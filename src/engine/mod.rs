//! The derivation engine: formula model and the row transform.

pub mod derivation;
pub mod formula;
