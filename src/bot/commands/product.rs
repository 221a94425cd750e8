//! Product Discord commands - the `/product` command group.
//!
//! This module contains commands for managing products and their recipes. Pricing
//! views live in the costing commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            costing::CostBreakdown,
            ingredient, material,
            product::{self, NewProduct},
            report::{format_money, format_percent},
            settings, template,
        },
        entities::product::ProductCategory,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing products and recipes.
    #[poise::command(
        slash_command,
        subcommands(
            "product_add",
            "product_list",
            "product_ingredient_add",
            "product_ingredient_remove",
            "product_duplicate",
            "product_delete",
            "product_from_template",
            "product_save_template",
            "product_note"
        )
    )]
    pub async fn product(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/product add` - Add a new product\n\
            `/product list` - List products with suggested prices\n\
            `/product ingredient_add` - Add a material to a recipe\n\
            `/product ingredient_remove` - Remove a material from a recipe\n\
            `/product duplicate` - Copy a product and its recipe\n\
            `/product delete` - Delete a product\n\
            `/product from_template` - Create a product from a template\n\
            `/product save_template` - Save a product's pricing as a template\n\
            `/product note` - Add a note to a product and show recent notes";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new product, optionally starting from a saved template.
    #[poise::command(slash_command, rename = "add")]
    #[allow(clippy::too_many_arguments)]
    pub async fn product_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Unique product name (e.g., 'Lavender Candle')"] name: String,
        #[description = "Product category"]
        #[autocomplete = "autocomplete::autocomplete_product_category"]
        category: String,
        #[description = "Markup over total cost, in percent (e.g., 30)"] markup: f64,
        #[description = "Hours of labor per unit (e.g., 0.5)"] hours: f64,
        #[description = "Overhead percent (defaults to your settings)"] overhead: Option<f64>,
        #[description = "Monthly fixed costs for break-even analysis"] fixed_costs: Option<f64>,
        #[description = "Units you aim to sell per month"] target_units: Option<i64>,
        #[description = "Short description"] description: Option<String>,
    ) -> Result<()> {
        let category = match category.parse::<ProductCategory>() {
            Ok(category) => category,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let mut new_product = NewProduct::new(&name, category, markup, hours);
        new_product.overhead_percentage = overhead;
        new_product.fixed_costs = fixed_costs.unwrap_or(0.0);
        new_product.target_units_per_month = target_units.unwrap_or(0);
        new_product.description = description.unwrap_or_default();

        let db = &ctx.data().database;
        match product::create_product(db, new_product).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Product '{}' added with {:.1}% markup and {:.1}% overhead. \
                     Use `/product ingredient_add` to build its recipe.",
                    created.name, created.markup_percentage, created.overhead_percentage
                ))
                .await?;
            }
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!("❌ Invalid amount `{amount}`: values cannot be negative."))
                    .await?;
            }
            Err(Error::Config { message }) => {
                ctx.say(format!("❌ {message}")).await?;
            }
            Err(e @ Error::Database(_)) => {
                let err_msg = format!("{e:?}");
                if err_msg.contains("UNIQUE") || err_msg.contains("unique") {
                    ctx.say(format!(
                        "⚠️ A product named '{name}' already exists. Product names must be unique.",
                    ))
                    .await?;
                } else {
                    ctx.say(format!("❌ Failed to add product '{name}'."))
                        .await?;
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Creates a product from a saved template.
    #[poise::command(slash_command, rename = "from_template")]
    pub async fn product_from_template(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Template to copy"] template_name: String,
        #[description = "Name for the new product"] name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found) = template::get_template_by_name(db, &template_name).await? else {
            ctx.say(format!("❌ Template '{template_name}' not found."))
                .await?;
            return Ok(());
        };

        let created = template::instantiate_template(db, found.id, name).await?;
        ctx.say(format!(
            "✅ Product '{}' created from template '{}'.",
            created.name, found.name
        ))
        .await?;
        Ok(())
    }

    /// Saves a product's category, markup, overhead, and labor time as a template.
    #[poise::command(slash_command, rename = "save_template")]
    pub async fn product_save_template(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to save"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Template name"] template_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(source) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let saved = template::template_from_product(db, source.id, template_name).await?;
        ctx.say(format!(
            "✅ Saved '{}' as template '{}'.",
            source.name, saved.name
        ))
        .await?;
        Ok(())
    }

    /// Adds a note to a product and shows its latest notes.
    #[poise::command(slash_command, rename = "note")]
    pub async fn product_note(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to annotate"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Note text"] content: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        match product::add_note(db, found.id, content).await {
            Ok(_) => {}
            Err(Error::Config { message }) => {
                ctx.say(format!("❌ {message}")).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        let notes = product::get_notes_for_product(db, found.id).await?;
        let recent: Vec<String> = notes
            .iter()
            .take(5)
            .map(|n| format!("• {}: {}", n.created_at.format("%Y-%m-%d"), n.content))
            .collect();
        ctx.say(format!(
            "📝 Notes for '{}':\n{}",
            found.name,
            recent.join("\n")
        ))
        .await?;
        Ok(())
    }

    /// Lists products with their suggested price and margin.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let costing = settings::resolve_settings(db).await?;
        let snapshots = product::load_all_snapshots(db).await?;

        if snapshots.is_empty() {
            ctx.say("No products have been defined yet. Use `/product add` to create some!")
                .await?;
            return Ok(());
        }

        let total = snapshots.len();
        let fields: Vec<(String, String, bool)> = snapshots
            .iter()
            .take(25)
            .map(|snapshot| {
                let cost = CostBreakdown::compute(snapshot, costing.hourly_labor_rate);
                (
                    format!("{} ({})", snapshot.product.name, snapshot.product.category),
                    format!(
                        "Price: **{}** • Cost: {}\nMargin: {} • {} ingredient(s)",
                        format_money(cost.final_price, costing.currency),
                        format_money(cost.total_cost, costing.currency),
                        format_percent(cost.profit_margin),
                        snapshot.ingredient_count()
                    ),
                    false,
                )
            })
            .collect();

        let mut embed = serenity::CreateEmbed::default()
            .title("**Product List**")
            .color(0x0058_65F2)
            .fields(fields);
        if total > 25 {
            embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Showing 25 of {total} products"
            )));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a material to a product's recipe. Repeating a material adds to its amount.
    #[poise::command(slash_command, rename = "ingredient_add")]
    pub async fn product_ingredient_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product whose recipe to change"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product_name: String,
        #[description = "Material to add"]
        #[autocomplete = "autocomplete::autocomplete_material_name"]
        material_name: String,
        #[description = "Amount used per unit, in the material's unit"] amount: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found_product) = product::get_product_by_name(db, &product_name).await? else {
            ctx.say(format!("❌ Product '{product_name}' not found."))
                .await?;
            return Ok(());
        };
        let Some(found_material) = material::get_material_by_name(db, &material_name).await?
        else {
            ctx.say(format!("❌ Material '{material_name}' not found."))
                .await?;
            return Ok(());
        };

        match ingredient::add_ingredient(db, found_product.id, found_material.id, amount).await {
            Ok(line) => {
                let line_cost = ingredient::line_cost(line.amount_required, Some(&found_material));
                ctx.say(format!(
                    "✅ '{}' now uses {} {} of '{}' ({} per unit).",
                    found_product.name,
                    line.amount_required,
                    found_material.unit_type.abbreviation(),
                    found_material.name,
                    format_money(line_cost, found_material.currency_code)
                ))
                .await?;
            }
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!("❌ Invalid amount `{amount}`: must be a positive number."))
                    .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Removes a material from a product's recipe.
    #[poise::command(slash_command, rename = "ingredient_remove")]
    pub async fn product_ingredient_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product whose recipe to change"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product_name: String,
        #[description = "Material to remove"]
        #[autocomplete = "autocomplete::autocomplete_material_name"]
        material_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found_product) = product::get_product_by_name(db, &product_name).await? else {
            ctx.say(format!("❌ Product '{product_name}' not found."))
                .await?;
            return Ok(());
        };
        let Some(found_material) = material::get_material_by_name(db, &material_name).await?
        else {
            ctx.say(format!("❌ Material '{material_name}' not found."))
                .await?;
            return Ok(());
        };

        if ingredient::remove_material_from_product(db, found_product.id, found_material.id).await? {
            ctx.say(format!(
                "✅ Removed '{}' from '{}'.",
                found_material.name, found_product.name
            ))
            .await?;
        } else {
            ctx.say(format!(
                "⚠️ '{}' is not part of the recipe for '{}'.",
                found_material.name, found_product.name
            ))
            .await?;
        }
        Ok(())
    }

    /// Copies a product and its recipe under a new name.
    #[poise::command(slash_command, rename = "duplicate")]
    pub async fn product_duplicate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to copy"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Name for the copy"] new_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(source) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        match product::duplicate_product(db, source.id, new_name.clone()).await {
            Ok(copy) => {
                ctx.say(format!("✅ Copied '{}' to '{}'.", source.name, copy.name))
                    .await?;
            }
            Err(e @ Error::Database(_)) => {
                let err_msg = format!("{e:?}");
                if err_msg.contains("UNIQUE") || err_msg.contains("unique") {
                    ctx.say(format!("⚠️ A product named '{new_name}' already exists."))
                        .await?;
                } else {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Deletes a product, its recipe, and its notes.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn product_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let deleted = product::delete_product(db, found.id).await?;
        ctx.say(format!("🗑️ Product '{}' has been deleted.", deleted.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
