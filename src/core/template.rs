//! Product templates - Reusable pricing presets for new products.
//!
//! A template stores category, markup, overhead, and production time. Creating a
//! product from a template copies those values; later template edits do not
//! reach products already created from it.

use crate::{
    core::product::{self, NewProduct},
    entities::{ProductModel, ProductTemplate, product::ProductCategory, product_template},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`create_template`].
#[derive(Debug, Clone)]
pub struct NewTemplate {
    /// Unique template name
    pub name: String,
    /// Description copied to new products
    pub description: String,
    /// Category copied to new products
    pub category: ProductCategory,
    /// Default markup, in percent
    pub markup_percentage: f64,
    /// Default overhead, in percent
    pub overhead_percentage: f64,
    /// Default hours of labor per unit
    pub time_to_produce_hours: f64,
}

fn validate(new_template: &NewTemplate) -> Result<()> {
    if new_template.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Template name cannot be empty".to_string(),
        });
    }
    for value in [
        new_template.markup_percentage,
        new_template.overhead_percentage,
        new_template.time_to_produce_hours,
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidAmount { amount: value });
        }
    }
    Ok(())
}

/// Retrieves all templates, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_templates(db: &DatabaseConnection) -> Result<Vec<product_template::Model>> {
    ProductTemplate::find()
        .order_by_asc(product_template::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a template by exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_template_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product_template::Model>> {
    ProductTemplate::find()
        .filter(product_template::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a template.
///
/// # Errors
/// Returns an error if the name is blank or taken, or any number is negative.
pub async fn create_template(
    db: &DatabaseConnection,
    new_template: NewTemplate,
) -> Result<product_template::Model> {
    validate(&new_template)?;

    let created = product_template::ActiveModel {
        name: Set(new_template.name.trim().to_string()),
        description: Set(new_template.description.trim().to_string()),
        category: Set(new_template.category),
        markup_percentage: Set(new_template.markup_percentage),
        overhead_percentage: Set(new_template.overhead_percentage),
        time_to_produce_hours: Set(new_template.time_to_produce_hours),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created template '{}'", created.name);
    Ok(created)
}

/// Saves an existing product's pricing inputs as a new template.
///
/// # Errors
/// Returns `ProductNotFound` for an unknown product, or an error if the template cannot be saved.
pub async fn template_from_product(
    db: &DatabaseConnection,
    product_id: i64,
    name: String,
) -> Result<product_template::Model> {
    let source = product::get_product_by_id(db, product_id)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    create_template(
        db,
        NewTemplate {
            name,
            description: source.description,
            category: source.category,
            markup_percentage: source.markup_percentage,
            overhead_percentage: source.overhead_percentage,
            time_to_produce_hours: source.time_to_produce_hours,
        },
    )
    .await
}

/// Creates a product with the template's values. The product starts with no ingredients.
///
/// # Errors
/// Returns `TemplateNotFound` for an unknown template, or an error if the product cannot be created.
pub async fn instantiate_template(
    db: &DatabaseConnection,
    template_id: i64,
    product_name: String,
) -> Result<ProductModel> {
    let template = ProductTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::TemplateNotFound {
            name: template_id.to_string(),
        })?;

    let mut new_product = NewProduct::new(
        product_name,
        template.category,
        template.markup_percentage,
        template.time_to_produce_hours,
    );
    new_product.description = template.description;
    new_product.overhead_percentage = Some(template.overhead_percentage);
    new_product.template_id = Some(template.id);

    product::create_product(db, new_product).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn soap_template() -> NewTemplate {
        NewTemplate {
            name: "Cold Process Soap".to_string(),
            description: "4oz bar".to_string(),
            category: ProductCategory::Cosmetics,
            markup_percentage: 60.0,
            overhead_percentage: 12.0,
            time_to_produce_hours: 0.25,
        }
    }

    #[tokio::test]
    async fn test_instantiate_copies_values() -> Result<()> {
        let db = setup_test_db().await?;
        let template = create_template(&db, soap_template()).await?;

        let product = instantiate_template(&db, template.id, "Lavender Soap".to_string()).await?;
        assert_eq!(product.template_id, Some(template.id));
        assert_eq!(product.category, ProductCategory::Cosmetics);
        assert_eq!(product.markup_percentage, 60.0);
        assert_eq!(product.overhead_percentage, 12.0);
        assert_eq!(product.time_to_produce_hours, 0.25);
        assert_eq!(product.description, "4oz bar");
        Ok(())
    }

    #[tokio::test]
    async fn test_instantiate_unknown_template() -> Result<()> {
        let db = setup_test_db().await?;
        let result = instantiate_template(&db, 7, "Nothing".to_string()).await;
        assert!(matches!(result, Err(Error::TemplateNotFound { name: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_template_from_product() -> Result<()> {
        let db = setup_test_db().await?;
        let candle = create_custom_product(&db, "Candle", 45.0, 18.0, 1.5).await?;

        let template = template_from_product(&db, candle.id, "Candle Preset".to_string()).await?;
        assert_eq!(template.markup_percentage, 45.0);
        assert_eq!(template.overhead_percentage, 18.0);
        assert_eq!(template.time_to_produce_hours, 1.5);

        let found = get_template_by_name(&db, "Candle Preset").await?.unwrap();
        assert_eq!(found.id, template.id);
        assert_eq!(get_all_templates(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_template_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let mut bad = soap_template();
        bad.markup_percentage = -10.0;
        let result = create_template(&db, bad).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -10.0 })));

        let mut blank = soap_template();
        blank.name = " ".to_string();
        let result = create_template(&db, blank).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));
        Ok(())
    }
}
