//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! material names, product names, units, and categories, improving the user
//! experience by suggesting valid options as the user types.

use crate::{
    bot::BotData,
    core::{material, product, units::UnitType},
    entities::{material::MaterialCategory, product::ProductCategory},
    errors::Error,
};
use sea_orm::Iterable;

/// Discord rejects autocomplete responses with more choices than this.
const MAX_CHOICES: usize = 25;

fn filter_names(names: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect();
    matching.sort();
    matching
}

/// Provides autocomplete suggestions for material names.
///
/// Returns up to 25 material names containing the partial input (case-insensitive).
/// Database errors yield no suggestions rather than an error.
pub async fn autocomplete_material_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let Ok(materials) = material::get_all_materials(db).await else {
        return Vec::new();
    };
    filter_names(materials.into_iter().map(|m| m.name), partial)
}

/// Provides autocomplete suggestions for product names.
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let Ok(products) = product::get_all_products(db).await else {
        return Vec::new();
    };
    filter_names(products.into_iter().map(|p| p.name), partial)
}

/// Suggests unit abbreviations, matching on abbreviation or display name.
pub async fn autocomplete_unit(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    UnitType::iter()
        .filter(|unit| {
            unit.abbreviation().contains(&partial_lower)
                || unit.display_name().to_lowercase().contains(&partial_lower)
        })
        .map(|unit| unit.abbreviation().to_string())
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests material category labels.
pub async fn autocomplete_material_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_names(
        MaterialCategory::iter().map(|c| c.label().to_string()),
        partial,
    )
}

/// Suggests product category labels.
pub async fn autocomplete_product_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_names(
        ProductCategory::iter().map(|c| c.label().to_string()),
        partial,
    )
}
