//! Price history entity - Immutable snapshots of a material's bulk pricing.
//!
//! Snapshots are only written by an explicit "record price" action, never on edit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Price history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_history")]
pub struct Model {
    /// Unique identifier for the snapshot
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Material this snapshot belongs to
    pub material_id: i64,
    /// Bulk price at the time of recording
    pub bulk_price: f64,
    /// Bulk amount at the time of recording
    pub bulk_amount: f64,
    /// Unit price derived when the snapshot was taken
    pub unit_price: f64,
    /// When the snapshot was taken
    pub recorded_at: DateTime,
    /// Optional free-form reason (e.g., "supplier raised prices")
    pub note: Option<String>,
}

/// Defines relationships between PriceHistory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each snapshot belongs to one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id",
        on_delete = "Cascade"
    )]
    Material,
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
