//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod ingredient;
pub mod labor_settings;
pub mod material;
pub mod price_history;
pub mod product;
pub mod product_note;
pub mod product_template;
pub mod supplier;

// Re-export specific types to avoid conflicts
pub use ingredient::{Column as IngredientColumn, Entity as Ingredient, Model as IngredientModel};
pub use labor_settings::{
    Column as LaborSettingsColumn, Entity as LaborSettings, Model as LaborSettingsModel,
};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
pub use price_history::{
    Column as PriceHistoryColumn, Entity as PriceHistory, Model as PriceHistoryModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_note::{
    Column as ProductNoteColumn, Entity as ProductNote, Model as ProductNoteModel,
};
pub use product_template::{
    Column as ProductTemplateColumn, Entity as ProductTemplate, Model as ProductTemplateModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
