//! # ratedeck
//!
//! Telecom rate deck pricing engine with department-scoped visibility.
//!
//! Given raw rate rows for a product, this engine derives the chained
//! floor-price and margin columns with exact decimal arithmetic, then
//! resolves which columns and floor-price families a requesting
//! department may see. Routing, sessions, storage, and spreadsheet
//! styling live outside this crate; it consumes rows from a storage
//! collaborator and hands shaped data to the presentation layer.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: products, departments, rows, cells,
//!   currencies
//! - **config** — Immutable startup configuration: column catalog,
//!   access rules, derivation plans, export legends
//! - **engine** — The derivation engine (floor prices and margins)
//! - **visibility** — Department view resolution and row projection
//! - **export** — View bundle and export sheet assembly
//! - **store** — Storage collaborator trait and in-memory store
//! - **sample** — Random rate-row generation for benches and demos

pub mod config;
pub mod core;
pub mod engine;
pub mod export;
pub mod sample;
pub mod store;
pub mod visibility;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::PortalConfig;
    pub use crate::core::currency::{CurrencyCode, FxRateQuote, FxRateTable};
    pub use crate::core::department::Department;
    pub use crate::core::product::ProductType;
    pub use crate::core::row::{CellValue, ColumnName, RateRow};
    pub use crate::engine::derivation::DerivationEngine;
    pub use crate::export::bundle::{assemble_view, ViewBundle};
    pub use crate::export::sheet::{build_export, ExportSheet};
    pub use crate::store::{MemoryStore, RateStore};
    pub use crate::visibility::filter::{ResolvedView, VisibilityFilter};
}
