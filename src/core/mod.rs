//! Core business logic - framework-agnostic pricing operations.
//!
//! Persistence-backed operations take a `&DatabaseConnection` and return
//! [`crate::errors::Result`]. The costing engine and the static unit and currency
//! tables are pure and never touch the database.

/// Pure unit cost, batch, break-even, and scenario calculations
pub mod costing;
/// Supported currencies and their formatting
pub mod currency;
/// Recipe lines linking products to materials
pub mod ingredient;
/// Material ledger: pricing, stock levels, and price history
pub mod material;
/// Product catalog and snapshot loading
pub mod product;
/// Report rows, catalog summary, and CSV export
pub mod report;
/// Shop-wide labor rate and overhead settings
pub mod settings;
/// Supplier directory
pub mod supplier;
/// Reusable product pricing presets
pub mod template;
/// Units of measure
pub mod units;
