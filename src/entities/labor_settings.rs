//! Labor settings entity - The single row holding shop-wide costing settings.
//!
//! Exactly one row is expected. When the table is empty, `core::settings`
//! falls back to documented defaults instead of failing.

use crate::core::currency::CurrencyCode;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Labor settings database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labor_settings")]
pub struct Model {
    /// Always the single settings row
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Cost of one hour of production labor
    pub hourly_labor_rate: f64,
    /// Overhead share for electricity, in percent
    pub electricity_percentage: f64,
    /// Overhead share for rent, in percent
    pub rent_percentage: f64,
    /// Overhead share for utilities, in percent
    pub utilities_percentage: f64,
    /// Overhead share for insurance, in percent
    pub insurance_percentage: f64,
    /// Overhead share for maintenance, in percent
    pub maintenance_percentage: f64,
    /// Any other overhead, in percent
    pub other_percentage: f64,
    /// Currency used when displaying costs and prices
    pub currency_code: CurrencyCode,
    /// When the settings were last changed
    pub updated_at: DateTime,
}

/// `LaborSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
