//! Material entity - Represents a purchasable raw material.
//!
//! A material is bought in bulk (`bulk_price` for `bulk_amount` of `unit_type`)
//! and consumed by product recipes through ingredient lines. Unit price and stock
//! status are never stored; they are derived on every read by `core::material`.

use crate::core::{currency::CurrencyCode, units::UnitType};
use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Broad grouping used to organise the material list.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    /// Raw ingredient (wax, flour, oils)
    #[sea_orm(string_value = "raw_ingredient")]
    RawIngredient,
    /// Packaging
    #[sea_orm(string_value = "packaging")]
    Packaging,
    /// Fabric
    #[sea_orm(string_value = "fabric")]
    Fabric,
    /// Hardware
    #[sea_orm(string_value = "hardware")]
    Hardware,
    /// Chemical
    #[sea_orm(string_value = "chemical")]
    Chemical,
    /// Tool
    #[sea_orm(string_value = "tool")]
    Tool,
    /// Other
    #[sea_orm(string_value = "other")]
    Other,
}

impl MaterialCategory {
    /// Label shown in lists and autocomplete
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RawIngredient => "Raw Ingredient",
            Self::Packaging => "Packaging",
            Self::Fabric => "Fabric",
            Self::Hardware => "Hardware",
            Self::Chemical => "Chemical",
            Self::Tool => "Tool",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaterialCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::iter()
            .find(|category| {
                category.to_value() == needle || category.label().to_lowercase() == needle
            })
            .ok_or_else(|| format!("Unknown material category: {s}"))
    }
}

/// Material database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the material
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Soy Wax", "Cotton Wick")
    #[sea_orm(unique)]
    pub name: String,
    /// Organisational category
    pub category: MaterialCategory,
    /// Price paid for one bulk purchase
    pub bulk_price: f64,
    /// Quantity received in one bulk purchase, in `unit_type`
    pub bulk_amount: f64,
    /// Unit the bulk amount and recipe amounts are expressed in
    pub unit_type: UnitType,
    /// Quantity currently on hand, in `unit_type`
    pub current_stock: f64,
    /// Below this level the material counts as low stock
    pub minimum_stock: f64,
    /// At or below this level the material should be reordered
    pub reorder_point: f64,
    /// Optional stock keeping unit code
    pub sku: Option<String>,
    /// Currency the bulk price was paid in
    pub currency_code: CurrencyCode,
    /// Optional supplier the material is bought from (informational only)
    pub supplier_id: Option<i64>,
    /// When the material was created
    pub created_at: DateTime,
    /// When any field was last edited
    pub updated_at: DateTime,
}

/// Defines relationships between Material and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One material is used by many ingredient lines
    #[sea_orm(has_many = "super::ingredient::Entity")]
    Ingredients,
    /// One material has many price snapshots
    #[sea_orm(has_many = "super::price_history::Entity")]
    PriceHistory,
    /// Each material may reference a supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id",
        on_delete = "SetNull"
    )]
    Supplier,
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl Related<super::price_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PriceHistory.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_category_parses_stored_value_and_label() {
        for category in MaterialCategory::iter() {
            assert_eq!(category.to_value().parse::<MaterialCategory>().unwrap(), category);
            assert_eq!(category.label().parse::<MaterialCategory>().unwrap(), category);
        }
        assert!("not a category".parse::<MaterialCategory>().is_err());
    }
}
