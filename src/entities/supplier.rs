//! Supplier entity - Where materials are bought. Informational only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier name
    #[sea_orm(unique)]
    pub name: String,
    /// Contact email address
    pub contact_email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the supplier was added
    pub created_at: DateTime,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supplier provides many materials
    #[sea_orm(has_many = "super::material::Entity")]
    Materials,
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
