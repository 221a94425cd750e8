//! Shared test utilities for `PricingBuddy`.
//!
//! This module provides common helper functions for setting up test databases,
//! creating persisted test entities with sensible defaults, and building
//! in-memory models for the pure costing functions.

use crate::{
    core::{
        costing::{IngredientLine, ProductSnapshot},
        currency::CurrencyCode,
        material::{self, NewMaterial},
        product::{self, NewProduct},
        units::UnitType,
    },
    entities::{self, material::MaterialCategory, product::ProductCategory},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

fn epoch() -> chrono::NaiveDateTime {
    chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.naive_utc()
}

/// Builds an unsaved material model for pure function tests.
///
/// # Defaults
/// * `unit_type`: kilogram
/// * all stock levels: 0.0
/// * currency: USD
pub fn material_model(bulk_price: f64, bulk_amount: f64) -> entities::material::Model {
    entities::material::Model {
        id: 1,
        name: "Test Material".to_string(),
        category: MaterialCategory::RawIngredient,
        bulk_price,
        bulk_amount,
        unit_type: UnitType::Kilogram,
        current_stock: 0.0,
        minimum_stock: 0.0,
        reorder_point: 0.0,
        sku: None,
        currency_code: CurrencyCode::Usd,
        supplier_id: None,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// Builds an unsaved product model with no fixed costs and no volume target.
pub fn product_model(
    markup_percentage: f64,
    overhead_percentage: f64,
    time_to_produce_hours: f64,
) -> entities::product::Model {
    entities::product::Model {
        id: 1,
        name: "Test Product".to_string(),
        description: String::new(),
        category: ProductCategory::Crafts,
        markup_percentage,
        overhead_percentage,
        time_to_produce_hours,
        fixed_costs: 0.0,
        target_units_per_month: 0,
        template_id: None,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// Builds a snapshot from `(amount_required, material)` pairs.
/// Ingredient ids are assigned sequentially from 1.
pub fn snapshot_with(
    product: entities::product::Model,
    lines: Vec<(f64, Option<entities::material::Model>)>,
) -> ProductSnapshot {
    let product_id = product.id;
    let lines = lines
        .into_iter()
        .zip(1_i64..)
        .map(|((amount_required, material), id)| IngredientLine {
            ingredient: entities::ingredient::Model {
                id,
                product_id,
                material_id: material.as_ref().map(|m| m.id),
                amount_required,
            },
            material,
        })
        .collect();
    ProductSnapshot::new(product, lines)
}

/// Creates a test material priced per kilogram.
///
/// # Defaults
/// * `category`: raw ingredient
/// * stock levels: 0.0
pub async fn create_test_material(
    db: &DatabaseConnection,
    name: &str,
    bulk_price: f64,
    bulk_amount: f64,
) -> Result<entities::material::Model> {
    material::create_material(
        db,
        NewMaterial::new(
            name,
            MaterialCategory::RawIngredient,
            bulk_price,
            bulk_amount,
            UnitType::Kilogram,
        ),
    )
    .await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * `markup_percentage`: 30.0
/// * `overhead_percentage`: the shop setting
/// * `time_to_produce_hours`: 1.0
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        NewProduct::new(name, ProductCategory::Crafts, 30.0, 1.0),
    )
    .await
}

/// Creates a test product with custom pricing inputs.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    markup_percentage: f64,
    overhead_percentage: f64,
    time_to_produce_hours: f64,
) -> Result<entities::product::Model> {
    let mut new_product = NewProduct::new(
        name,
        ProductCategory::Crafts,
        markup_percentage,
        time_to_produce_hours,
    );
    new_product.overhead_percentage = Some(overhead_percentage);
    product::create_product(db, new_product).await
}

/// Sets up a database holding one material and one product.
/// Returns (db, material, product) for recipe-related tests.
pub async fn setup_with_material_and_product() -> Result<(
    DatabaseConnection,
    entities::material::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let material = create_test_material(&db, "Test Material", 150.0, 10.0).await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, material, product))
}
