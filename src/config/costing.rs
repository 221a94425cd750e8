//! Costing configuration loading from config.toml
//!
//! `config.toml` seeds the shop-wide settings row on first run and can list
//! starter materials. Every field is optional; a missing file means "use the
//! documented defaults".

use crate::{
    core::{
        currency::CurrencyCode,
        settings::{CostingSettings, OverheadComponents},
        units::UnitType,
    },
    entities::material::MaterialCategory,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Initial labor and overhead settings
    #[serde(default)]
    pub costing: CostingConfig,
    /// Materials to create when the database has none
    #[serde(default)]
    pub materials: Vec<MaterialSeed>,
}

/// The `[costing]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CostingConfig {
    /// Cost of one hour of labor
    pub hourly_labor_rate: f64,
    /// Display currency
    pub currency: CurrencyCode,
    /// Overhead breakdown, in percent
    pub overhead: OverheadConfig,
}

impl Default for CostingConfig {
    fn default() -> Self {
        let defaults = CostingSettings::default();
        Self {
            hourly_labor_rate: defaults.hourly_labor_rate,
            currency: defaults.currency,
            overhead: OverheadConfig::default(),
        }
    }
}

impl CostingConfig {
    /// Converts the file representation into engine settings.
    #[must_use]
    pub const fn to_settings(&self) -> CostingSettings {
        CostingSettings {
            hourly_labor_rate: self.hourly_labor_rate,
            overhead: OverheadComponents {
                electricity: self.overhead.electricity,
                rent: self.overhead.rent,
                utilities: self.overhead.utilities,
                insurance: self.overhead.insurance,
                maintenance: self.overhead.maintenance,
                other: self.overhead.other,
            },
            currency: self.currency,
        }
    }
}

/// The `[costing.overhead]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverheadConfig {
    /// Electricity share, in percent
    pub electricity: f64,
    /// Rent share, in percent
    pub rent: f64,
    /// Utilities share, in percent
    pub utilities: f64,
    /// Insurance share, in percent
    pub insurance: f64,
    /// Maintenance share, in percent
    pub maintenance: f64,
    /// Any other overhead, in percent
    pub other: f64,
}

impl Default for OverheadConfig {
    fn default() -> Self {
        let defaults = OverheadComponents::default();
        Self {
            electricity: defaults.electricity,
            rent: defaults.rent,
            utilities: defaults.utilities,
            insurance: defaults.insurance,
            maintenance: defaults.maintenance,
            other: defaults.other,
        }
    }
}

/// Configuration for a single starter material
#[derive(Debug, Deserialize, Clone)]
pub struct MaterialSeed {
    /// Unique material name
    pub name: String,
    /// Material category
    pub category: MaterialCategory,
    /// Price paid for one bulk purchase
    pub bulk_price: f64,
    /// Quantity received per bulk purchase, in `unit`
    pub bulk_amount: f64,
    /// Unit the material is bought and consumed in
    pub unit: UnitType,
    /// Quantity on hand when seeded
    #[serde(default)]
    pub current_stock: f64,
    /// Stock level considered low
    #[serde(default)]
    pub minimum_stock: f64,
    /// Stock level at which to reorder
    #[serde(default)]
    pub reorder_point: f64,
    /// Currency of `bulk_price`; defaults to USD
    #[serde(default)]
    pub currency: CurrencyCode,
}

/// Loads costing configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type or an unknown enum value
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads `./config.toml`, falling back to defaults when the file does not exist.
///
/// A file that exists but cannot be parsed is still an error.
///
/// # Errors
/// Returns an error if `config.toml` exists but cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        info!("No config.toml found, using default costing settings");
        return Ok(Config::default());
    }

    debug!("Loading configuration from {}", path.display());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_costing_config() {
        let toml_str = r#"
            [costing]
            hourly_labor_rate = 22.5
            currency = "EUR"

            [costing.overhead]
            rent = 8.0
            electricity = 4.0

            [[materials]]
            name = "Soy Wax"
            category = "raw_ingredient"
            bulk_price = 150.0
            bulk_amount = 10.0
            unit = "kg"
            current_stock = 25.0

            [[materials]]
            name = "Glass Jar"
            category = "packaging"
            bulk_price = 36.0
            bulk_amount = 24.0
            unit = "pc"
            currency = "GBP"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.costing.hourly_labor_rate, 22.5);
        assert_eq!(config.costing.currency, CurrencyCode::Eur);
        assert_eq!(config.costing.overhead.rent, 8.0);
        assert_eq!(config.costing.overhead.electricity, 4.0);
        // Unspecified components keep their defaults
        assert_eq!(config.costing.overhead.utilities, 2.0);

        assert_eq!(config.materials.len(), 2);
        assert_eq!(config.materials[0].unit, UnitType::Kilogram);
        assert_eq!(config.materials[0].current_stock, 25.0);
        assert_eq!(config.materials[0].currency, CurrencyCode::Usd);
        assert_eq!(config.materials[1].category, MaterialCategory::Packaging);
        assert_eq!(config.materials[1].currency, CurrencyCode::Gbp);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        let settings = config.costing.to_settings();
        assert_eq!(settings, CostingSettings::default());
        assert!(config.materials.is_empty());
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let toml_str = r#"
            [[materials]]
            name = "Mystery"
            category = "other"
            bulk_price = 1.0
            bulk_amount = 1.0
            unit = "furlong"
        "#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
