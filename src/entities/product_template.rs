//! Product template entity - Reusable starting points for new products.
//!
//! Instantiating a template copies its fields into a new product. Later edits to
//! the template do not affect products created from it.

use super::product::ProductCategory;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product template database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Template name (e.g., "Standard 8oz Candle")
    #[sea_orm(unique)]
    pub name: String,
    /// Description copied to new products
    pub description: String,
    /// Category copied to new products
    pub category: ProductCategory,
    /// Default markup, in percent
    pub markup_percentage: f64,
    /// Default overhead, in percent
    pub overhead_percentage: f64,
    /// Default hours of labor per unit
    pub time_to_produce_hours: f64,
    /// When the template was created
    pub created_at: DateTime,
}

/// Templates are copied, never linked, so they have no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
