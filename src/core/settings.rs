//! Settings resolution - The shop-wide labor rate and overhead breakdown.
//!
//! Settings live in a single `labor_settings` row. When that row is missing the
//! documented defaults apply. [`CostingSettings::from_record`] is the only place
//! this fallback is decided, so every caller derives the same hourly rate.

use crate::{
    config::costing::CostingConfig,
    core::currency::CurrencyCode,
    entities::{LaborSettings, labor_settings},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Hourly labor rate used when no settings have been saved.
pub const DEFAULT_HOURLY_RATE: f64 = 15.0;

/// Overhead percentages, one per cost center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverheadComponents {
    /// Electricity
    pub electricity: f64,
    /// Rent
    pub rent: f64,
    /// Utilities
    pub utilities: f64,
    /// Insurance
    pub insurance: f64,
    /// Equipment maintenance
    pub maintenance: f64,
    /// Anything else
    pub other: f64,
}

impl Default for OverheadComponents {
    /// Documented defaults, summing to 15%.
    fn default() -> Self {
        Self {
            electricity: 3.0,
            rent: 5.0,
            utilities: 2.0,
            insurance: 2.0,
            maintenance: 2.0,
            other: 1.0,
        }
    }
}

impl OverheadComponents {
    /// Sum of all components, in percent.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.electricity
            + self.rent
            + self.utilities
            + self.insurance
            + self.maintenance
            + self.other
    }

    fn values(&self) -> [f64; 6] {
        [
            self.electricity,
            self.rent,
            self.utilities,
            self.insurance,
            self.maintenance,
            self.other,
        ]
    }
}

/// Resolved configuration handed to the costing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostingSettings {
    /// Cost of one hour of labor
    pub hourly_labor_rate: f64,
    /// Overhead breakdown
    pub overhead: OverheadComponents,
    /// Display currency
    pub currency: CurrencyCode,
}

impl Default for CostingSettings {
    fn default() -> Self {
        Self {
            hourly_labor_rate: DEFAULT_HOURLY_RATE,
            overhead: OverheadComponents::default(),
            currency: CurrencyCode::default(),
        }
    }
}

impl CostingSettings {
    /// Builds settings from the stored row, or the defaults if there is none.
    #[must_use]
    pub fn from_record(record: Option<&labor_settings::Model>) -> Self {
        record.map_or_else(Self::default, |row| Self {
            hourly_labor_rate: row.hourly_labor_rate,
            overhead: OverheadComponents {
                electricity: row.electricity_percentage,
                rent: row.rent_percentage,
                utilities: row.utilities_percentage,
                insurance: row.insurance_percentage,
                maintenance: row.maintenance_percentage,
                other: row.other_percentage,
            },
            currency: row.currency_code,
        })
    }

    /// Total overhead percentage, the default for new products.
    #[must_use]
    pub fn overhead_percentage(&self) -> f64 {
        self.overhead.total()
    }

    fn validate(&self) -> Result<()> {
        let rate = self.hourly_labor_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::InvalidAmount { amount: rate });
        }
        for value in self.overhead.values() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidAmount { amount: value });
            }
        }
        Ok(())
    }
}

/// Fetches the stored settings row, if any. The lowest id wins should more than one exist.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_settings_record(db: &DatabaseConnection) -> Result<Option<labor_settings::Model>> {
    LaborSettings::find()
        .order_by_asc(labor_settings::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Resolves the settings the costing engine should use right now.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn resolve_settings(db: &DatabaseConnection) -> Result<CostingSettings> {
    let record = get_settings_record(db).await?;
    if record.is_none() {
        debug!("No labor settings stored, using defaults");
    }
    Ok(CostingSettings::from_record(record.as_ref()))
}

/// Resolves the current hourly labor rate (stored value or [`DEFAULT_HOURLY_RATE`]).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn resolve_hourly_rate(db: &DatabaseConnection) -> Result<f64> {
    Ok(resolve_settings(db).await?.hourly_labor_rate)
}

/// Resolves the current total overhead percentage.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn resolve_overhead_percentage(db: &DatabaseConnection) -> Result<f64> {
    Ok(resolve_settings(db).await?.overhead_percentage())
}

/// Saves settings into the singleton row, creating it if needed.
///
/// # Errors
/// Returns an error if any value is negative or not finite, or the write fails.
pub async fn save_settings(
    db: &DatabaseConnection,
    settings: &CostingSettings,
) -> Result<labor_settings::Model> {
    settings.validate()?;
    let now = chrono::Utc::now().naive_utc();

    let saved = match get_settings_record(db).await? {
        Some(existing) => {
            let mut row: labor_settings::ActiveModel = existing.into();
            apply_settings(&mut row, settings, now);
            row.update(db).await?
        }
        None => {
            let mut row = labor_settings::ActiveModel {
                ..Default::default()
            };
            apply_settings(&mut row, settings, now);
            row.insert(db).await?
        }
    };

    info!(
        "Saved labor settings: rate {:.2}/hr, overhead {:.1}%",
        saved.hourly_labor_rate,
        settings.overhead_percentage()
    );
    Ok(saved)
}

fn apply_settings(
    row: &mut labor_settings::ActiveModel,
    settings: &CostingSettings,
    now: chrono::NaiveDateTime,
) {
    row.hourly_labor_rate = Set(settings.hourly_labor_rate);
    row.electricity_percentage = Set(settings.overhead.electricity);
    row.rent_percentage = Set(settings.overhead.rent);
    row.utilities_percentage = Set(settings.overhead.utilities);
    row.insurance_percentage = Set(settings.overhead.insurance);
    row.maintenance_percentage = Set(settings.overhead.maintenance);
    row.other_percentage = Set(settings.overhead.other);
    row.currency_code = Set(settings.currency);
    row.updated_at = Set(now);
}

/// Updates only the hourly labor rate, keeping the rest of the current settings.
///
/// # Errors
/// Returns an error if the rate is negative or not finite.
pub async fn update_hourly_rate(db: &DatabaseConnection, rate: f64) -> Result<CostingSettings> {
    let mut settings = resolve_settings(db).await?;
    settings.hourly_labor_rate = rate;
    save_settings(db, &settings).await?;
    Ok(settings)
}

/// Replaces the overhead breakdown, keeping the rest of the current settings.
///
/// # Errors
/// Returns an error if any percentage is negative or not finite.
pub async fn update_overhead(
    db: &DatabaseConnection,
    overhead: OverheadComponents,
) -> Result<CostingSettings> {
    let mut settings = resolve_settings(db).await?;
    settings.overhead = overhead;
    save_settings(db, &settings).await?;
    Ok(settings)
}

/// Inserts the settings row from `config.toml` values if none exists yet.
///
/// Returns `true` when a row was created.
///
/// # Errors
/// Returns an error if the insert fails.
pub async fn seed_settings(db: &DatabaseConnection, config: &CostingConfig) -> Result<bool> {
    if get_settings_record(db).await?.is_some() {
        return Ok(false);
    }
    save_settings(db, &config.to_settings()).await?;
    info!("Seeded labor settings from configuration");
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_default_overhead_sums_to_fifteen() {
        assert_eq!(OverheadComponents::default().total(), 15.0);
        assert_eq!(CostingSettings::default().overhead_percentage(), 15.0);
    }

    #[test]
    fn test_from_record_none_uses_defaults() {
        let settings = CostingSettings::from_record(None);
        assert_eq!(settings.hourly_labor_rate, DEFAULT_HOURLY_RATE);
        assert_eq!(settings, CostingSettings::default());
    }

    #[tokio::test]
    async fn test_resolve_without_row_falls_back() -> Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(resolve_hourly_rate(&db).await?, 15.0);
        assert_eq!(resolve_overhead_percentage(&db).await?, 15.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_resolve() -> Result<()> {
        let db = setup_test_db().await?;

        let settings = CostingSettings {
            hourly_labor_rate: 22.0,
            overhead: OverheadComponents {
                rent: 10.0,
                ..OverheadComponents::default()
            },
            currency: CurrencyCode::Eur,
        };
        save_settings(&db, &settings).await?;

        let resolved = resolve_settings(&db).await?;
        assert_eq!(resolved, settings);
        assert_eq!(resolved.overhead_percentage(), 20.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_keeps_single_row() -> Result<()> {
        let db = setup_test_db().await?;

        update_hourly_rate(&db, 18.0).await?;
        update_hourly_rate(&db, 20.0).await?;

        let rows = LaborSettings::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hourly_labor_rate, 20.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_overhead_keeps_rate() -> Result<()> {
        let db = setup_test_db().await?;
        update_hourly_rate(&db, 30.0).await?;

        let overhead = OverheadComponents {
            electricity: 1.0,
            rent: 1.0,
            utilities: 1.0,
            insurance: 1.0,
            maintenance: 1.0,
            other: 0.0,
        };
        let updated = update_overhead(&db, overhead).await?;
        assert_eq!(updated.hourly_labor_rate, 30.0);
        assert_eq!(resolve_overhead_percentage(&db).await?, 5.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_values() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_hourly_rate(&db, -1.0).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -1.0 })));

        let result = update_overhead(
            &db,
            OverheadComponents {
                rent: f64::NAN,
                ..OverheadComponents::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        assert!(get_settings_record(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_settings_only_once() -> Result<()> {
        let db = setup_test_db().await?;
        let config = CostingConfig {
            hourly_labor_rate: 25.0,
            ..CostingConfig::default()
        };

        assert!(seed_settings(&db, &config).await?);
        update_hourly_rate(&db, 40.0).await?;

        // A second seed must not overwrite user edits
        assert!(!seed_settings(&db, &config).await?);
        assert_eq!(resolve_hourly_rate(&db).await?, 40.0);
        Ok(())
    }
}
