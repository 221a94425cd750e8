//! Database configuration module for `PricingBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{
    Ingredient, LaborSettings, Material, PriceHistory, Product, ProductNote, ProductTemplate,
    Supplier,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/pricing_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// # Errors
/// Returns an error if the data directory cannot be created or the connection fails.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {database_url}");

    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(dir)?;
    }

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Directory holding a file-backed `SQLite` database, if it has one.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates all tables that do not exist yet.
///
/// Parent tables are created before the tables that reference them. Running this
/// against an already initialised database is a no-op.
///
/// # Errors
/// Returns an error if any `CREATE TABLE` statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Supplier),
        schema.create_table_from_entity(Material),
        schema.create_table_from_entity(PriceHistory),
        schema.create_table_from_entity(ProductTemplate),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Ingredient),
        schema.create_table_from_entity(ProductNote),
        schema.create_table_from_entity(LaborSettings),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    info!("Database tables ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        IngredientModel, LaborSettingsModel, MaterialModel, PriceHistoryModel, ProductModel,
        ProductNoteModel, ProductTemplateModel, SupplierModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<SupplierModel> = Supplier::find().limit(1).all(&db).await?;
        let _: Vec<MaterialModel> = Material::find().limit(1).all(&db).await?;
        let _: Vec<PriceHistoryModel> = PriceHistory::find().limit(1).all(&db).await?;
        let _: Vec<ProductTemplateModel> = ProductTemplate::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<IngredientModel> = Ingredient::find().limit(1).all(&db).await?;
        let _: Vec<ProductNoteModel> = ProductNote::find().limit(1).all(&db).await?;
        let _: Vec<LaborSettingsModel> = LaborSettings::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<MaterialModel> = Material::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[test]
    fn test_default_database_url_is_sqlite() {
        assert!(DEFAULT_DATABASE_URL.starts_with("sqlite://"));
        assert_eq!(
            sqlite_parent_dir(DEFAULT_DATABASE_URL),
            Some(Path::new("data"))
        );
    }

    #[test]
    fn test_sqlite_parent_dir_skips_memory_and_bare_files() {
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite://pricing.sqlite?mode=rwc"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/db"), None);
    }
}
