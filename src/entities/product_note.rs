//! Product note entity - Free-form notes attached to a product.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product note database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_notes")]
pub struct Model {
    /// Unique identifier for the note
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product the note is attached to
    pub product_id: i64,
    /// Note text
    pub content: String,
    /// When the note was added
    pub created_at: DateTime,
}

/// Defines relationships between ProductNote and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each note belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
