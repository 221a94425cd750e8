/// Database connection and table creation
pub mod database;

/// Costing settings and starter materials from config.toml
pub mod costing;
