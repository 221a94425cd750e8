//! Material ledger - Raw materials, their derived unit price, stock status, and price history.
//!
//! The pure functions at the top of this module derive values from a material
//! snapshot and never fail: degenerate denominators yield `0.0` or `None`. The
//! async functions below them are the persistence boundary for material edits.

use crate::{
    config::costing::MaterialSeed,
    core::{currency::CurrencyCode, units::UnitType},
    entities::{
        Ingredient, Material, PriceHistory, ingredient, material, material::MaterialCategory,
        price_history,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt;
use tracing::{info, warn};

/// Stock level classification, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StockStatus {
    /// Above the minimum stock level
    InStock,
    /// At or below the minimum stock level
    LowStock,
    /// At or below the reorder point
    ReorderNeeded,
    /// Nothing on hand
    OutOfStock,
}

impl StockStatus {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::ReorderNeeded => "Reorder Needed",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price of one unit of the material: `bulk_price / bulk_amount`.
///
/// Returns `0.0` when `bulk_amount <= 0`.
#[must_use]
pub fn unit_price(material: &material::Model) -> f64 {
    unit_price_of(material.bulk_price, material.bulk_amount)
}

fn unit_price_of(bulk_price: f64, bulk_amount: f64) -> f64 {
    if bulk_amount > 0.0 {
        bulk_price / bulk_amount
    } else {
        0.0
    }
}

/// Classifies the current stock level.
///
/// Checks run in a fixed order: out of stock, then reorder point, then minimum stock.
#[must_use]
pub fn stock_status(material: &material::Model) -> StockStatus {
    if material.current_stock <= 0.0 {
        StockStatus::OutOfStock
    } else if material.current_stock <= material.reorder_point {
        StockStatus::ReorderNeeded
    } else if material.current_stock <= material.minimum_stock {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// Current stock as a percentage of the minimum stock level, capped at 100.
///
/// Without a positive minimum the result is `100` if anything is on hand, else `0`.
#[must_use]
pub fn stock_level_percentage(material: &material::Model) -> f64 {
    if material.minimum_stock > 0.0 {
        (material.current_stock / material.minimum_stock * 100.0).clamp(0.0, 100.0)
    } else if material.current_stock > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Percentage change of the current unit price against the second-most-recent snapshot.
///
/// `history` must be ordered newest first, as returned by [`get_price_history`].
/// Returns `None` with fewer than two snapshots or when the earlier price is zero.
#[must_use]
pub fn price_change_percentage(
    material: &material::Model,
    history: &[price_history::Model],
) -> Option<f64> {
    let previous = history.get(1)?.unit_price;
    if previous == 0.0 {
        return None;
    }
    Some((unit_price(material) - previous) / previous * 100.0)
}

/// Value of the stock on hand at the current unit price.
#[must_use]
pub fn stock_value(material: &material::Model) -> f64 {
    material.current_stock.max(0.0) * unit_price(material)
}

/// Input for [`create_material`].
#[derive(Debug, Clone)]
pub struct NewMaterial {
    /// Unique material name
    pub name: String,
    /// Material category
    pub category: MaterialCategory,
    /// Price paid for one bulk purchase
    pub bulk_price: f64,
    /// Quantity received per bulk purchase
    pub bulk_amount: f64,
    /// Unit of `bulk_amount` and of recipe amounts
    pub unit_type: UnitType,
    /// Quantity on hand
    pub current_stock: f64,
    /// Stock level considered low
    pub minimum_stock: f64,
    /// Stock level at which to reorder
    pub reorder_point: f64,
    /// Optional stock keeping unit
    pub sku: Option<String>,
    /// Currency of `bulk_price`
    pub currency_code: CurrencyCode,
    /// Supplier the material is bought from
    pub supplier_id: Option<i64>,
}

impl NewMaterial {
    /// A material with no stock levels, no SKU, and USD pricing.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: MaterialCategory,
        bulk_price: f64,
        bulk_amount: f64,
        unit_type: UnitType,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            bulk_price,
            bulk_amount,
            unit_type,
            current_stock: 0.0,
            minimum_stock: 0.0,
            reorder_point: 0.0,
            sku: None,
            currency_code: CurrencyCode::default(),
            supplier_id: None,
        }
    }
}

fn validate_pricing(bulk_price: f64, bulk_amount: f64) -> Result<()> {
    if !bulk_price.is_finite() || bulk_price < 0.0 {
        return Err(Error::InvalidAmount { amount: bulk_price });
    }
    if !bulk_amount.is_finite() || bulk_amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: bulk_amount,
        });
    }
    Ok(())
}

fn validate_stock(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidAmount { amount: value });
    }
    Ok(())
}

fn not_found(material_id: i64) -> Error {
    Error::MaterialNotFound {
        name: material_id.to_string(),
    }
}

/// Retrieves all materials, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_materials(db: &DatabaseConnection) -> Result<Vec<material::Model>> {
    Material::find()
        .order_by_asc(material::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a material by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_material_by_id(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Option<material::Model>> {
    Material::find_by_id(material_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a material by its exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_material_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<material::Model>> {
    Material::find()
        .filter(material::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns every material whose stock status is not [`StockStatus::InStock`],
/// most urgent first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_materials_needing_attention(
    db: &DatabaseConnection,
) -> Result<Vec<(material::Model, StockStatus)>> {
    let mut flagged: Vec<(material::Model, StockStatus)> = get_all_materials(db)
        .await?
        .into_iter()
        .map(|m| {
            let status = stock_status(&m);
            (m, status)
        })
        .filter(|(_, status)| *status != StockStatus::InStock)
        .collect();

    flagged.sort_by_key(|(m, status)| {
        let urgency = match status {
            StockStatus::OutOfStock => 0,
            StockStatus::ReorderNeeded => 1,
            StockStatus::LowStock => 2,
            StockStatus::InStock => 3,
        };
        (urgency, m.name.clone())
    });
    Ok(flagged)
}

/// Creates a new material after validating its name, pricing, and stock levels.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The bulk price is negative or not finite
/// - The bulk amount is not a positive finite number
/// - Any stock level is negative or not finite
/// - The database insert fails (e.g. duplicate name)
pub async fn create_material(
    db: &DatabaseConnection,
    new_material: NewMaterial,
) -> Result<material::Model> {
    if new_material.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Material name cannot be empty".to_string(),
        });
    }
    validate_pricing(new_material.bulk_price, new_material.bulk_amount)?;
    validate_stock(new_material.current_stock)?;
    validate_stock(new_material.minimum_stock)?;
    validate_stock(new_material.reorder_point)?;

    let now = chrono::Utc::now().naive_utc();
    let model = material::ActiveModel {
        name: Set(new_material.name.trim().to_string()),
        category: Set(new_material.category),
        bulk_price: Set(new_material.bulk_price),
        bulk_amount: Set(new_material.bulk_amount),
        unit_type: Set(new_material.unit_type),
        current_stock: Set(new_material.current_stock),
        minimum_stock: Set(new_material.minimum_stock),
        reorder_point: Set(new_material.reorder_point),
        sku: Set(new_material.sku),
        currency_code: Set(new_material.currency_code),
        supplier_id: Set(new_material.supplier_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!("Created material '{}' (id {})", created.name, created.id);
    Ok(created)
}

async fn find_for_update(db: &DatabaseConnection, material_id: i64) -> Result<material::ActiveModel> {
    Material::find_by_id(material_id)
        .one(db)
        .await?
        .map(Into::into)
        .ok_or_else(|| not_found(material_id))
}

/// Changes the bulk price and amount. Does not record price history.
///
/// # Errors
/// Returns an error if the pricing is invalid or the material does not exist.
pub async fn update_material_price(
    db: &DatabaseConnection,
    material_id: i64,
    bulk_price: f64,
    bulk_amount: f64,
) -> Result<material::Model> {
    validate_pricing(bulk_price, bulk_amount)?;

    let mut model = find_for_update(db, material_id).await?;
    model.bulk_price = Set(bulk_price);
    model.bulk_amount = Set(bulk_amount);
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = model.update(db).await?;
    info!(
        "Updated price of material '{}' to {:.2} per {} {}",
        updated.name, updated.bulk_price, updated.bulk_amount, updated.unit_type
    );
    Ok(updated)
}

fn warn_if_short(material: &material::Model) {
    let status = stock_status(material);
    if status != StockStatus::InStock {
        warn!("Material '{}' is now {status}", material.name);
    }
}

/// Sets the quantity currently on hand.
///
/// # Errors
/// Returns `InvalidAmount` for a negative or non-finite quantity, and
/// `MaterialNotFound` for an unknown id.
pub async fn update_material_stock(
    db: &DatabaseConnection,
    material_id: i64,
    current_stock: f64,
) -> Result<material::Model> {
    validate_stock(current_stock)?;

    let mut model = find_for_update(db, material_id).await?;
    model.current_stock = Set(current_stock);
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = model.update(db).await?;
    warn_if_short(&updated);
    Ok(updated)
}

/// Sets the minimum stock level and reorder point.
///
/// # Errors
/// Returns `InvalidAmount` for a negative or non-finite level, and
/// `MaterialNotFound` for an unknown id.
pub async fn update_stock_thresholds(
    db: &DatabaseConnection,
    material_id: i64,
    minimum_stock: f64,
    reorder_point: f64,
) -> Result<material::Model> {
    validate_stock(minimum_stock)?;
    validate_stock(reorder_point)?;

    let mut model = find_for_update(db, material_id).await?;
    model.minimum_stock = Set(minimum_stock);
    model.reorder_point = Set(reorder_point);
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Sets the quantity on hand and, when given, the thresholds, in one transaction.
///
/// Every value is checked before anything is written, so a rejected update
/// leaves the material untouched.
///
/// # Errors
/// Returns `InvalidAmount` for a negative or non-finite value, and
/// `MaterialNotFound` for an unknown id.
pub async fn update_stock_levels(
    db: &DatabaseConnection,
    material_id: i64,
    current_stock: f64,
    minimum_stock: Option<f64>,
    reorder_point: Option<f64>,
) -> Result<material::Model> {
    validate_stock(current_stock)?;
    for value in [minimum_stock, reorder_point].into_iter().flatten() {
        validate_stock(value)?;
    }

    let txn = db.begin().await?;
    let mut model: material::ActiveModel = Material::find_by_id(material_id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found(material_id))?
        .into();
    model.current_stock = Set(current_stock);
    if let Some(minimum_stock) = minimum_stock {
        model.minimum_stock = Set(minimum_stock);
    }
    if let Some(reorder_point) = reorder_point {
        model.reorder_point = Set(reorder_point);
    }
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = model.update(&txn).await?;
    txn.commit().await?;

    warn_if_short(&updated);
    Ok(updated)
}

/// Links the material to a supplier, or clears the link with `None`.
///
/// # Errors
/// Returns `SupplierNotFound` for an unknown supplier, or `MaterialNotFound` for an unknown material.
pub async fn assign_supplier(
    db: &DatabaseConnection,
    material_id: i64,
    supplier_id: Option<i64>,
) -> Result<material::Model> {
    if let Some(id) = supplier_id {
        if crate::core::supplier::get_supplier_by_id(db, id)
            .await?
            .is_none()
        {
            return Err(Error::SupplierNotFound {
                name: id.to_string(),
            });
        }
    }

    let mut model = find_for_update(db, material_id).await?;
    model.supplier_id = Set(supplier_id);
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Appends an immutable snapshot of the material's current bulk pricing.
///
/// The material itself is not modified.
///
/// # Errors
/// Returns `MaterialNotFound` if the material does not exist.
pub async fn record_price_history(
    db: &DatabaseConnection,
    material_id: i64,
    note: Option<String>,
) -> Result<price_history::Model> {
    let material = get_material_by_id(db, material_id)
        .await?
        .ok_or_else(|| not_found(material_id))?;

    let snapshot = price_history::ActiveModel {
        material_id: Set(material.id),
        bulk_price: Set(material.bulk_price),
        bulk_amount: Set(material.bulk_amount),
        unit_price: Set(unit_price(&material)),
        recorded_at: Set(chrono::Utc::now().naive_utc()),
        note: Set(note.filter(|n| !n.trim().is_empty())),
        ..Default::default()
    };

    snapshot.insert(db).await.map_err(Into::into)
}

/// Retrieves the material's price snapshots, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_price_history(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Vec<price_history::Model>> {
    PriceHistory::find()
        .filter(price_history::Column::MaterialId.eq(material_id))
        .order_by_desc(price_history::Column::RecordedAt)
        .order_by_desc(price_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a material together with every ingredient line that uses it and its price history.
///
/// Products that used the material lose that recipe line. Everything happens in one
/// database transaction. Returns the number of ingredient lines removed.
///
/// # Errors
/// Returns `MaterialNotFound` if the material does not exist. Nothing is deleted on failure.
pub async fn delete_material(db: &DatabaseConnection, material_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let material = Material::find_by_id(material_id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found(material_id))?;

    let removed_lines = Ingredient::delete_many()
        .filter(ingredient::Column::MaterialId.eq(material_id))
        .exec(&txn)
        .await?
        .rows_affected;

    PriceHistory::delete_many()
        .filter(price_history::Column::MaterialId.eq(material_id))
        .exec(&txn)
        .await?;

    Material::delete_by_id(material_id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        "Deleted material '{}' and {removed_lines} ingredient line(s)",
        material.name
    );
    Ok(removed_lines)
}

/// Creates the starter materials from `config.toml` when the ledger is empty.
///
/// Returns the number of materials created. Does nothing if any material exists,
/// so edits made through the bot are never overwritten.
///
/// # Errors
/// Returns an error if a seed is invalid or a write fails.
pub async fn seed_materials(db: &DatabaseConnection, seeds: &[MaterialSeed]) -> Result<usize> {
    if seeds.is_empty() || Material::find().one(db).await?.is_some() {
        return Ok(0);
    }

    for seed in seeds {
        let mut new_material = NewMaterial::new(
            &seed.name,
            seed.category,
            seed.bulk_price,
            seed.bulk_amount,
            seed.unit,
        );
        new_material.current_stock = seed.current_stock;
        new_material.minimum_stock = seed.minimum_stock;
        new_material.reorder_point = seed.reorder_point;
        new_material.currency_code = seed.currency;
        create_material(db, new_material).await?;
    }

    info!("Seeded {} material(s) from configuration", seeds.len());
    Ok(seeds.len())
}
