//! Product entity - Represents an item the shop makes and sells.
//!
//! A product owns its ingredient lines and notes. Only the pricing inputs are
//! stored (markup, overhead, production time, fixed costs); every cost and price
//! figure is recomputed from current materials by `core::costing`.

use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Catalog grouping for products.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Food
    #[sea_orm(string_value = "food")]
    Food,
    /// Beverage
    #[sea_orm(string_value = "beverage")]
    Beverage,
    /// Cosmetics
    #[sea_orm(string_value = "cosmetics")]
    Cosmetics,
    /// Candles
    #[sea_orm(string_value = "candles")]
    Candles,
    /// Jewelry
    #[sea_orm(string_value = "jewelry")]
    Jewelry,
    /// Clothing
    #[sea_orm(string_value = "clothing")]
    Clothing,
    /// Crafts
    #[sea_orm(string_value = "crafts")]
    Crafts,
    /// Other
    #[sea_orm(string_value = "other")]
    Other,
}

impl ProductCategory {
    /// Label shown in lists and autocomplete
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Beverage => "Beverage",
            Self::Cosmetics => "Cosmetics",
            Self::Candles => "Candles",
            Self::Jewelry => "Jewelry",
            Self::Clothing => "Clothing",
            Self::Crafts => "Crafts",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::iter()
            .find(|category| {
                category.to_value() == needle || category.label().to_lowercase() == needle
            })
            .ok_or_else(|| format!("Unknown product category: {s}"))
    }
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Lavender Candle")
    #[sea_orm(unique)]
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Catalog category
    pub category: ProductCategory,
    /// Percentage added on top of total cost to reach the selling price
    pub markup_percentage: f64,
    /// Percentage added on top of prime cost for overhead
    pub overhead_percentage: f64,
    /// Hours of labor needed to make one unit
    pub time_to_produce_hours: f64,
    /// Fixed monthly costs attributed to this product, used for break-even
    pub fixed_costs: f64,
    /// Planned monthly sales volume
    pub target_units_per_month: i64,
    /// Template this product was copied from, if any (not a live link)
    pub template_id: Option<i64>,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product owns many ingredient lines
    #[sea_orm(has_many = "super::ingredient::Entity")]
    Ingredients,
    /// One product owns many notes
    #[sea_orm(has_many = "super::product_note::Entity")]
    Notes,
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl Related<super::product_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_category_parses_stored_value_and_label() {
        for category in ProductCategory::iter() {
            assert_eq!(category.to_value().parse::<ProductCategory>().unwrap(), category);
            assert_eq!(category.label().parse::<ProductCategory>().unwrap(), category);
        }
        assert!("not a category".parse::<ProductCategory>().is_err());
    }
}
