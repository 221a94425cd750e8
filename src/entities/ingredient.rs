//! Ingredient entity - Join row between a product and a material.
//!
//! Each line carries the amount of the material (in the material's own unit)
//! consumed by one unit of the product.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ingredient database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    /// Unique identifier for the recipe line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product this line belongs to
    pub product_id: i64,
    /// Material consumed; `None` only if the reference was cleared
    pub material_id: Option<i64>,
    /// Quantity of material per product unit
    pub amount_required: f64,
}

/// Defines relationships between Ingredient and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    /// Each line references one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id",
        on_delete = "Cascade"
    )]
    Material,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
