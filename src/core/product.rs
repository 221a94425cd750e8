//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, updating, and deleting
//! products, and for loading the [`ProductSnapshot`] the costing engine consumes.
//! Products own their ingredient lines and notes; deleting a product removes both.

use crate::{
    core::{
        costing::{IngredientLine, ProductSnapshot},
        ingredient::get_ingredients_for_product,
        settings,
    },
    entities::{
        Ingredient, Material, Product, ProductNote, ingredient, product,
        product::ProductCategory, product_note,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::{debug, info};

/// Input for [`create_product`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Unique product name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Product category
    pub category: ProductCategory,
    /// Markup applied on top of total cost, in percent
    pub markup_percentage: f64,
    /// `None` uses the shop's current total overhead percentage
    pub overhead_percentage: Option<f64>,
    /// Hours of labor per unit
    pub time_to_produce_hours: f64,
    /// Fixed monthly costs
    pub fixed_costs: f64,
    /// Expected units sold per month
    pub target_units_per_month: i64,
    /// Template the product was created from
    pub template_id: Option<i64>,
}

impl NewProduct {
    /// A product with no description, no fixed costs, and the shop's default overhead.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: ProductCategory,
        markup_percentage: f64,
        time_to_produce_hours: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            markup_percentage,
            overhead_percentage: None,
            time_to_produce_hours,
            fixed_costs: 0.0,
            target_units_per_month: 0,
            template_id: None,
        }
    }
}

/// Partial update of a product's pricing inputs. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPricingUpdate {
    /// New markup percentage
    pub markup_percentage: Option<f64>,
    /// New overhead percentage
    pub overhead_percentage: Option<f64>,
    /// New hours of labor per unit
    pub time_to_produce_hours: Option<f64>,
    /// New fixed monthly costs
    pub fixed_costs: Option<f64>,
    /// New monthly volume target
    pub target_units_per_month: Option<i64>,
}

fn validate_non_negative(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidAmount { amount: value });
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }
    Ok(())
}

fn not_found(product_id: i64) -> Error {
    Error::ProductNotFound {
        name: product_id.to_string(),
    }
}

/// Retrieves all products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific product by its exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with the specified parameters, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - Any percentage, time, or fixed cost is negative or not finite
/// - The target volume is negative
/// - The database insert operation fails (e.g. duplicate name)
pub async fn create_product(
    db: &DatabaseConnection,
    new_product: NewProduct,
) -> Result<product::Model> {
    validate_name(&new_product.name)?;
    validate_non_negative(new_product.markup_percentage)?;
    validate_non_negative(new_product.time_to_produce_hours)?;
    validate_non_negative(new_product.fixed_costs)?;
    if new_product.target_units_per_month < 0 {
        return Err(Error::Config {
            message: "Target units per month cannot be negative".to_string(),
        });
    }

    let overhead_percentage = match new_product.overhead_percentage {
        Some(value) => {
            validate_non_negative(value)?;
            value
        }
        None => settings::resolve_overhead_percentage(db).await?,
    };

    let now = chrono::Utc::now().naive_utc();
    let model = product::ActiveModel {
        name: Set(new_product.name.trim().to_string()),
        description: Set(new_product.description.trim().to_string()),
        category: Set(new_product.category),
        markup_percentage: Set(new_product.markup_percentage),
        overhead_percentage: Set(overhead_percentage),
        time_to_produce_hours: Set(new_product.time_to_produce_hours),
        fixed_costs: Set(new_product.fixed_costs),
        target_units_per_month: Set(new_product.target_units_per_month),
        template_id: Set(new_product.template_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!("Created product '{}' (id {})", created.name, created.id);
    Ok(created)
}

/// Applies a partial update to a product's pricing inputs and refreshes `updated_at`.
///
/// # Errors
/// Returns an error if any provided value is invalid or the product does not exist.
pub async fn update_product_pricing(
    db: &DatabaseConnection,
    product_id: i64,
    update: ProductPricingUpdate,
) -> Result<product::Model> {
    for value in [
        update.markup_percentage,
        update.overhead_percentage,
        update.time_to_produce_hours,
        update.fixed_costs,
    ]
    .into_iter()
    .flatten()
    {
        validate_non_negative(value)?;
    }
    if update.target_units_per_month.is_some_and(|t| t < 0) {
        return Err(Error::Config {
            message: "Target units per month cannot be negative".to_string(),
        });
    }

    let mut model: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(product_id))?
        .into();

    if let Some(markup) = update.markup_percentage {
        model.markup_percentage = Set(markup);
    }
    if let Some(overhead) = update.overhead_percentage {
        model.overhead_percentage = Set(overhead);
    }
    if let Some(hours) = update.time_to_produce_hours {
        model.time_to_produce_hours = Set(hours);
    }
    if let Some(fixed) = update.fixed_costs {
        model.fixed_costs = Set(fixed);
    }
    if let Some(target) = update.target_units_per_month {
        model.target_units_per_month = Set(target);
    }
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Renames a product and replaces its description.
///
/// # Errors
/// Returns an error if the new name is blank or the product does not exist.
pub async fn update_product_details(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    description: String,
) -> Result<product::Model> {
    validate_name(&new_name)?;

    let mut model: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(product_id))?
        .into();

    model.name = Set(new_name.trim().to_string());
    model.description = Set(description.trim().to_string());
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Deletes a product together with its ingredient lines and notes, in one transaction.
///
/// # Errors
/// Returns `ProductNotFound` if the product does not exist.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found(product_id))?;

    Ingredient::delete_many()
        .filter(ingredient::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    ProductNote::delete_many()
        .filter(product_note::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Product::delete_by_id(product_id).exec(&txn).await?;

    txn.commit().await?;

    info!("Deleted product '{}'", product.name);
    Ok(product)
}

/// Copies a product and all of its ingredient lines under a new name.
///
/// # Errors
/// Returns an error if the new name is blank or already taken, or the source product does not exist.
pub async fn duplicate_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
) -> Result<product::Model> {
    validate_name(&new_name)?;

    let txn = db.begin().await?;

    let source = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found(product_id))?;

    let now = chrono::Utc::now().naive_utc();
    let copy = product::ActiveModel {
        name: Set(new_name.trim().to_string()),
        description: Set(source.description.clone()),
        category: Set(source.category),
        markup_percentage: Set(source.markup_percentage),
        overhead_percentage: Set(source.overhead_percentage),
        time_to_produce_hours: Set(source.time_to_produce_hours),
        fixed_costs: Set(source.fixed_costs),
        target_units_per_month: Set(source.target_units_per_month),
        template_id: Set(source.template_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let lines = Ingredient::find()
        .filter(ingredient::Column::ProductId.eq(product_id))
        .order_by_asc(ingredient::Column::Id)
        .all(&txn)
        .await?;
    for line in lines {
        ingredient::ActiveModel {
            product_id: Set(copy.id),
            material_id: Set(line.material_id),
            amount_required: Set(line.amount_required),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!("Duplicated product '{}' as '{}'", source.name, copy.name);
    Ok(copy)
}

/// Loads a product and resolves each ingredient line to its current material.
///
/// A line whose material no longer exists resolves to `None` and costs nothing.
///
/// # Errors
/// Returns `ProductNotFound` if the product does not exist.
pub async fn load_snapshot(db: &DatabaseConnection, product_id: i64) -> Result<ProductSnapshot> {
    let product = get_product_by_id(db, product_id)
        .await?
        .ok_or_else(|| not_found(product_id))?;

    let ingredients = get_ingredients_for_product(db, product_id).await?;
    let material_ids: Vec<i64> = ingredients.iter().filter_map(|i| i.material_id).collect();

    let materials: HashMap<i64, _> = if material_ids.is_empty() {
        HashMap::new()
    } else {
        Material::find()
            .filter(crate::entities::material::Column::Id.is_in(material_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect()
    };

    let lines = ingredients
        .into_iter()
        .map(|ingredient| {
            let material = ingredient
                .material_id
                .and_then(|id| materials.get(&id).cloned());
            if material.is_none() {
                debug!(
                    "Ingredient {} of product {product_id} has no material, costing it at zero",
                    ingredient.id
                );
            }
            IngredientLine {
                ingredient,
                material,
            }
        })
        .collect();

    Ok(ProductSnapshot::new(product, lines))
}

/// Loads a snapshot by product name.
///
/// # Errors
/// Returns `ProductNotFound` if no product has that name.
pub async fn load_snapshot_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<ProductSnapshot>> {
    match get_product_by_name(db, name).await? {
        Some(product) => Ok(Some(load_snapshot(db, product.id).await?)),
        None => Ok(None),
    }
}

/// Loads snapshots for every product, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn load_all_snapshots(db: &DatabaseConnection) -> Result<Vec<ProductSnapshot>> {
    let products = get_all_products(db).await?;
    let mut snapshots = Vec::with_capacity(products.len());
    for product in products {
        snapshots.push(load_snapshot(db, product.id).await?);
    }
    Ok(snapshots)
}

/// Attaches a note to a product.
///
/// # Errors
/// Returns an error if the note is blank or the product does not exist.
pub async fn add_note(
    db: &DatabaseConnection,
    product_id: i64,
    content: String,
) -> Result<product_note::Model> {
    if content.trim().is_empty() {
        return Err(Error::Config {
            message: "Note cannot be empty".to_string(),
        });
    }
    if get_product_by_id(db, product_id).await?.is_none() {
        return Err(not_found(product_id));
    }

    product_note::ActiveModel {
        product_id: Set(product_id),
        content: Set(content.trim().to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a product's notes, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_notes_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<product_note::Model>> {
    ProductNote::find()
        .filter(product_note::Column::ProductId.eq(product_id))
        .order_by_desc(product_note::Column::CreatedAt)
        .order_by_desc(product_note::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{
            costing::CostBreakdown,
            ingredient::add_ingredient,
            material::{delete_material, update_material_price},
        },
        test_utils::*,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_product(
            &db,
            NewProduct::new("", ProductCategory::Candles, 30.0, 1.0),
        )
        .await;
        assert!(matches!(result, Err(Error::Config { message: _ })));

        let result = create_product(
            &db,
            NewProduct::new("Candle", ProductCategory::Candles, -5.0, 1.0),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -5.0 })));

        let result = create_product(
            &db,
            NewProduct::new("Candle", ProductCategory::Candles, 30.0, f64::INFINITY),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let mut negative_target = NewProduct::new("Candle", ProductCategory::Candles, 30.0, 1.0);
        negative_target.target_units_per_month = -1;
        let result = create_product(&db, negative_target).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_uses_settings_overhead() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_test_product(&db, "Candle").await?;
        assert_eq!(product.overhead_percentage, 15.0);

        let mut explicit = NewProduct::new("Soap", ProductCategory::Cosmetics, 40.0, 0.5);
        explicit.overhead_percentage = Some(22.0);
        let soap = create_product(&db, explicit).await?;
        assert_eq!(soap.overhead_percentage, 22.0);

        let all = get_all_products(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Candle");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_pricing_partial() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Candle").await?;

        let updated = update_product_pricing(
            &db,
            product.id,
            ProductPricingUpdate {
                markup_percentage: Some(50.0),
                fixed_costs: Some(200.0),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.markup_percentage, 50.0);
        assert_eq!(updated.fixed_costs, 200.0);
        assert_eq!(updated.time_to_produce_hours, product.time_to_produce_hours);
        assert_eq!(updated.overhead_percentage, product.overhead_percentage);

        let result = update_product_pricing(
            &db,
            product.id,
            ProductPricingUpdate {
                overhead_percentage: Some(-1.0),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -1.0 })));

        let result = update_product_pricing(&db, 999, ProductPricingUpdate::default()).await;
        assert!(matches!(result, Err(Error::ProductNotFound { name: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_details() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Candle").await?;

        let renamed = update_product_details(
            &db,
            product.id,
            " Lavender Candle ".to_string(),
            "8oz jar".to_string(),
        )
        .await?;
        assert_eq!(renamed.name, "Lavender Candle");
        assert_eq!(renamed.description, "8oz jar");
        assert!(get_product_by_name(&db, "Lavender Candle").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_snapshot_reflects_current_prices() -> Result<()> {
        let db = setup_test_db().await?;
        let wax = create_test_material(&db, "Soy Wax", 150.0, 10.0).await?;
        let product = create_custom_product(&db, "Candle", 30.0, 15.0, 2.0).await?;
        add_ingredient(&db, product.id, wax.id, 2.0).await?;

        let snapshot = load_snapshot(&db, product.id).await?;
        let cost = CostBreakdown::compute(&snapshot, 15.0);
        assert_eq!(cost.material_cost, 30.0);
        assert!((cost.final_price - 89.7).abs() < 1e-9);

        // No cache: the next read sees the edit
        update_material_price(&db, wax.id, 200.0, 10.0).await?;
        let snapshot = load_snapshot(&db, product.id).await?;
        assert_eq!(CostBreakdown::compute(&snapshot, 15.0).material_cost, 40.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_snapshot_after_material_deleted() -> Result<()> {
        let db = setup_test_db().await?;
        let wax = create_test_material(&db, "Soy Wax", 150.0, 10.0).await?;
        let wick = create_test_material(&db, "Wick", 5.0, 100.0).await?;
        let product = create_test_product(&db, "Candle").await?;
        add_ingredient(&db, product.id, wax.id, 2.0).await?;
        add_ingredient(&db, product.id, wick.id, 1.0).await?;

        delete_material(&db, wax.id).await?;

        let snapshot = load_snapshot(&db, product.id).await?;
        assert_eq!(snapshot.ingredient_count(), 1);
        assert!((crate::core::costing::material_cost(&snapshot) - 0.05).abs() < 1e-12);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_snapshot_missing_product() -> Result<()> {
        let db = setup_test_db().await?;
        let result = load_snapshot(&db, 42).await;
        assert!(matches!(result, Err(Error::ProductNotFound { name: _ })));
        assert!(load_snapshot_by_name(&db, "Nothing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_cascades() -> Result<()> {
        let db = setup_test_db().await?;
        let wax = create_test_material(&db, "Soy Wax", 150.0, 10.0).await?;
        let product = create_test_product(&db, "Candle").await?;
        add_ingredient(&db, product.id, wax.id, 2.0).await?;
        add_note(&db, product.id, "Try coconut wax".to_string()).await?;

        let deleted = delete_product(&db, product.id).await?;
        assert_eq!(deleted.id, product.id);

        assert!(get_product_by_id(&db, product.id).await?.is_none());
        assert!(get_ingredients_for_product(&db, product.id).await?.is_empty());
        assert!(get_notes_for_product(&db, product.id).await?.is_empty());
        // Shared material survives
        assert!(Material::find_by_id(wax.id).one(&db).await?.is_some());

        let result = delete_product(&db, product.id).await;
        assert!(matches!(result, Err(Error::ProductNotFound { name: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_product_copies_recipe() -> Result<()> {
        let db = setup_test_db().await?;
        let wax = create_test_material(&db, "Soy Wax", 150.0, 10.0).await?;
        let wick = create_test_material(&db, "Wick", 5.0, 100.0).await?;
        let product = create_custom_product(&db, "Candle", 30.0, 15.0, 2.0).await?;
        add_ingredient(&db, product.id, wax.id, 2.0).await?;
        add_ingredient(&db, product.id, wick.id, 1.0).await?;

        let copy = duplicate_product(&db, product.id, "Candle Large".to_string()).await?;
        assert_ne!(copy.id, product.id);
        assert_eq!(copy.markup_percentage, 30.0);

        let original = load_snapshot(&db, product.id).await?;
        let copied = load_snapshot(&db, copy.id).await?;
        assert_eq!(copied.ingredient_count(), 2);
        assert_eq!(
            CostBreakdown::compute(&original, 15.0),
            CostBreakdown::compute(&copied, 15.0)
        );

        // Lines are independent copies
        add_ingredient(&db, copy.id, wax.id, 1.0).await?;
        let original = load_snapshot(&db, product.id).await?;
        assert_eq!(original.lines[0].ingredient.amount_required, 2.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_notes() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Candle").await?;

        add_note(&db, product.id, "first".to_string()).await?;
        add_note(&db, product.id, "second".to_string()).await?;

        let notes = get_notes_for_product(&db, product.id).await?;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "second");

        let result = add_note(&db, product.id, "   ".to_string()).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));
        let result = add_note(&db, 999, "orphan".to_string()).await;
        assert!(matches!(result, Err(Error::ProductNotFound { name: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_all_snapshots() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_product(&db, "B").await?;
        create_test_product(&db, "A").await?;

        let snapshots = load_all_snapshots(&db).await?;
        let names: Vec<&str> = snapshots.iter().map(|s| s.product.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        Ok(())
    }
}
