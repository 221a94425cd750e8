//! Ingredient lines - The amount of each material a product consumes.
//!
//! A line's cost is always derived from the material's current unit price. A line
//! whose material cannot be resolved costs nothing instead of failing the product.

use crate::{
    core::material::unit_price,
    entities::{Ingredient, Material, Product, ingredient, material},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Cost of one ingredient line: `amount_required * unit_price(material)`.
///
/// Returns `0.0` when the material is absent.
#[must_use]
pub fn line_cost(amount_required: f64, material: Option<&material::Model>) -> f64 {
    material.map_or(0.0, |m| amount_required * unit_price(m))
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Retrieves all ingredient lines of a product in insertion order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_ingredients_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<ingredient::Model>> {
    Ingredient::find()
        .filter(ingredient::Column::ProductId.eq(product_id))
        .order_by_asc(ingredient::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds `amount` of a material to a product's recipe.
///
/// If the material is already on the recipe its amount is increased instead of
/// creating a second line.
///
/// # Errors
/// Returns an error if the amount is not a positive finite number, or the
/// product or material does not exist.
pub async fn add_ingredient(
    db: &DatabaseConnection,
    product_id: i64,
    material_id: i64,
    amount: f64,
) -> Result<ingredient::Model> {
    validate_amount(amount)?;

    if Product::find_by_id(product_id).one(db).await?.is_none() {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }
    if Material::find_by_id(material_id).one(db).await?.is_none() {
        return Err(Error::MaterialNotFound {
            name: material_id.to_string(),
        });
    }

    let existing = Ingredient::find()
        .filter(ingredient::Column::ProductId.eq(product_id))
        .filter(ingredient::Column::MaterialId.eq(material_id))
        .one(db)
        .await?;

    if let Some(line) = existing {
        let total = line.amount_required + amount;
        debug!(
            "Material {material_id} already on product {product_id}, raising amount to {total}"
        );
        let mut line: ingredient::ActiveModel = line.into();
        line.amount_required = Set(total);
        return line.update(db).await.map_err(Into::into);
    }

    let line = ingredient::ActiveModel {
        product_id: Set(product_id),
        material_id: Set(Some(material_id)),
        amount_required: Set(amount),
        ..Default::default()
    };
    let created = line.insert(db).await?;
    info!("Added material {material_id} x{amount} to product {product_id}");
    Ok(created)
}

/// Replaces the amount on an existing ingredient line.
///
/// # Errors
/// Returns an error if the amount is not a positive finite number or the line does not exist.
pub async fn update_ingredient_amount(
    db: &DatabaseConnection,
    ingredient_id: i64,
    amount: f64,
) -> Result<ingredient::Model> {
    validate_amount(amount)?;

    let mut line: ingredient::ActiveModel = Ingredient::find_by_id(ingredient_id)
        .one(db)
        .await?
        .ok_or(Error::IngredientNotFound { id: ingredient_id })?
        .into();

    line.amount_required = Set(amount);
    line.update(db).await.map_err(Into::into)
}

/// Removes a line from its product's recipe.
///
/// # Errors
/// Returns `IngredientNotFound` if no line has the given id.
pub async fn remove_ingredient(db: &DatabaseConnection, ingredient_id: i64) -> Result<()> {
    let result = Ingredient::delete_by_id(ingredient_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::IngredientNotFound { id: ingredient_id });
    }
    Ok(())
}

/// Removes a material from a product's recipe by ids.
///
/// Returns `false` when the material was not on the recipe.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn remove_material_from_product(
    db: &DatabaseConnection,
    product_id: i64,
    material_id: i64,
) -> Result<bool> {
    let result = Ingredient::delete_many()
        .filter(ingredient::Column::ProductId.eq(product_id))
        .filter(ingredient::Column::MaterialId.eq(material_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
