//! Material Discord commands - the `/material` command group.
//!
//! These commands record what materials cost in bulk, how much is on hand, and
//! how their prices move over time.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            material::{self, NewMaterial},
            report::format_money,
            settings,
            units::UnitType,
        },
        entities::material::MaterialCategory,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for the material ledger.
    #[poise::command(
        slash_command,
        subcommands(
            "material_add",
            "material_list",
            "material_price",
            "material_stock",
            "material_history",
            "material_record_price",
            "material_delete"
        )
    )]
    pub async fn material(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Material management command. Available subcommands:\n\
            `/material add` - Add a new material\n\
            `/material list` - List materials with unit prices and stock\n\
            `/material price` - Change a material's bulk price\n\
            `/material stock` - Update stock on hand and thresholds\n\
            `/material history` - Show recorded price snapshots\n\
            `/material record_price` - Snapshot the current price\n\
            `/material delete` - Delete a material";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a material bought in bulk.
    #[poise::command(slash_command, rename = "add")]
    #[allow(clippy::too_many_arguments)]
    pub async fn material_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Unique material name (e.g., 'Soy Wax')"] name: String,
        #[description = "Material category"]
        #[autocomplete = "autocomplete::autocomplete_material_category"]
        category: String,
        #[description = "Price paid for the bulk package (e.g., 150.00)"] bulk_price: f64,
        #[description = "Amount in the bulk package (e.g., 10)"] bulk_amount: f64,
        #[description = "Unit of the bulk amount"]
        #[autocomplete = "autocomplete::autocomplete_unit"]
        unit: String,
        #[description = "Amount currently on hand"] current_stock: Option<f64>,
        #[description = "Stock level considered low"] minimum_stock: Option<f64>,
        #[description = "Stock level at which to reorder"] reorder_point: Option<f64>,
        #[description = "Your SKU or part number"] sku: Option<String>,
    ) -> Result<()> {
        let category = match category.parse::<MaterialCategory>() {
            Ok(category) => category,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };
        let unit_type = match unit.parse::<UnitType>() {
            Ok(unit_type) => unit_type,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let db = &ctx.data().database;
        let currency = settings::resolve_settings(db).await?.currency;

        let mut new_material = NewMaterial::new(&name, category, bulk_price, bulk_amount, unit_type);
        new_material.current_stock = current_stock.unwrap_or(0.0);
        new_material.minimum_stock = minimum_stock.unwrap_or(0.0);
        new_material.reorder_point = reorder_point.unwrap_or(0.0);
        new_material.sku = sku.filter(|s| !s.trim().is_empty());
        new_material.currency_code = currency;

        match material::create_material(db, new_material).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Material '{}' added at **{}** per {}.",
                    created.name,
                    format_money(material::unit_price(&created), created.currency_code),
                    created.unit_type.abbreviation()
                ))
                .await?;
            }
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!(
                    "❌ Invalid amount `{amount}`: prices and stock cannot be negative, and the bulk amount must be positive."
                ))
                .await?;
            }
            Err(Error::Config { message }) => {
                ctx.say(format!("❌ {message}")).await?;
            }
            Err(e @ Error::Database(_)) => {
                let err_msg = format!("{e:?}");
                if err_msg.contains("UNIQUE") || err_msg.contains("unique") {
                    ctx.say(format!(
                        "⚠️ A material named '{name}' already exists. Material names must be unique.",
                    ))
                    .await?;
                } else {
                    ctx.say(format!("❌ Failed to add material '{name}'."))
                        .await?;
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Lists materials with unit prices and stock status.
    #[poise::command(slash_command, rename = "list")]
    pub async fn material_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let materials = material::get_all_materials(db).await?;

        if materials.is_empty() {
            ctx.say("No materials have been added yet. Use `/material add` to create some!")
                .await?;
            return Ok(());
        }

        let total = materials.len();
        let fields: Vec<(String, String, bool)> = materials
            .into_iter()
            .take(25)
            .map(|m| {
                let unit = m.unit_type.abbreviation();
                (
                    format!("{} ({})", m.name, m.category),
                    format!(
                        "{} per {unit}\nStock: {:.2} {unit} • {}",
                        format_money(material::unit_price(&m), m.currency_code),
                        m.current_stock,
                        material::stock_status(&m)
                    ),
                    true,
                )
            })
            .collect();

        let mut embed = serenity::CreateEmbed::default()
            .title("**Material List**")
            .color(0x0058_65F2)
            .fields(fields);
        if total > 25 {
            embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Showing 25 of {total} materials"
            )));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Changes a material's bulk price. Products pick up the new price immediately.
    #[poise::command(slash_command, rename = "price")]
    pub async fn material_price(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Material to reprice"]
        #[autocomplete = "autocomplete::autocomplete_material_name"]
        name: String,
        #[description = "New bulk price"] bulk_price: f64,
        #[description = "Amount in the bulk package"] bulk_amount: f64,
        #[description = "Also record a price history snapshot (default: no)"] record: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(existing) = material::get_material_by_name(db, &name).await? else {
            ctx.say(format!("❌ Material '{name}' not found.")).await?;
            return Ok(());
        };

        let old_unit_price = material::unit_price(&existing);
        let updated = match material::update_material_price(db, existing.id, bulk_price, bulk_amount).await {
            Ok(updated) => updated,
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!(
                    "❌ Invalid amount `{amount}`: the price cannot be negative and the bulk amount must be positive."
                ))
                .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        if record.unwrap_or(false) {
            material::record_price_history(db, updated.id, None).await?;
        }

        ctx.say(format!(
            "✅ '{}' now costs **{}** per {} (was {}).",
            updated.name,
            format_money(material::unit_price(&updated), updated.currency_code),
            updated.unit_type.abbreviation(),
            format_money(old_unit_price, updated.currency_code)
        ))
        .await?;
        Ok(())
    }

    /// Updates stock on hand and, optionally, the low-stock thresholds.
    #[poise::command(slash_command, rename = "stock")]
    pub async fn material_stock(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Material to update"]
        #[autocomplete = "autocomplete::autocomplete_material_name"]
        name: String,
        #[description = "Amount currently on hand"] current_stock: f64,
        #[description = "Stock level considered low"] minimum_stock: Option<f64>,
        #[description = "Stock level at which to reorder"] reorder_point: Option<f64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(existing) = material::get_material_by_name(db, &name).await? else {
            ctx.say(format!("❌ Material '{name}' not found.")).await?;
            return Ok(());
        };

        let result = material::update_stock_levels(
            db,
            existing.id,
            current_stock,
            minimum_stock,
            reorder_point,
        )
        .await;

        match result {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ '{}' stock set to {:.2} {} • **{}** ({:.0}% of minimum)",
                    updated.name,
                    updated.current_stock,
                    updated.unit_type.abbreviation(),
                    material::stock_status(&updated),
                    material::stock_level_percentage(&updated)
                ))
                .await?;
            }
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!("❌ Invalid stock amount `{amount}`."))
                    .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Shows a material's recorded price snapshots.
    #[poise::command(slash_command, rename = "history")]
    pub async fn material_history(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Material to inspect"]
        #[autocomplete = "autocomplete::autocomplete_material_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(existing) = material::get_material_by_name(db, &name).await? else {
            ctx.say(format!("❌ Material '{name}' not found.")).await?;
            return Ok(());
        };

        let history = material::get_price_history(db, existing.id).await?;
        if history.is_empty() {
            ctx.say(format!(
                "No price history for '{}'. Use `/material record_price` to start one.",
                existing.name
            ))
            .await?;
            return Ok(());
        }

        let currency = existing.currency_code;
        let mut lines: Vec<String> = history
            .iter()
            .take(10)
            .map(|entry| {
                let note = entry
                    .note
                    .as_deref()
                    .map(|n| format!(" - {n}"))
                    .unwrap_or_default();
                format!(
                    "• {}: {} per unit ({} for {}){note}",
                    entry.recorded_at.format("%Y-%m-%d"),
                    format_money(entry.unit_price, currency),
                    format_money(entry.bulk_price, currency),
                    entry.bulk_amount
                )
            })
            .collect();
        if let Some(change) = material::price_change_percentage(&existing, &history) {
            lines.push(format!("\nChange since previous snapshot: **{change:+.1}%**"));
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("Price history: {}", existing.name))
            .color(0x0058_65F2)
            .description(lines.join("\n"));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Records the material's current price as a history snapshot.
    #[poise::command(slash_command, rename = "record_price")]
    pub async fn material_record_price(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Material to snapshot"]
        #[autocomplete = "autocomplete::autocomplete_material_name"]
        name: String,
        #[description = "Optional note (e.g., supplier or reason)"] note: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(existing) = material::get_material_by_name(db, &name).await? else {
            ctx.say(format!("❌ Material '{name}' not found.")).await?;
            return Ok(());
        };

        let entry = material::record_price_history(db, existing.id, note).await?;
        ctx.say(format!(
            "✅ Recorded {} per unit for '{}'.",
            format_money(entry.unit_price, existing.currency_code),
            existing.name
        ))
        .await?;
        Ok(())
    }

    /// Deletes a material and removes it from every recipe.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn material_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Material to delete"]
        #[autocomplete = "autocomplete::autocomplete_material_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(existing) = material::get_material_by_name(db, &name).await? else {
            ctx.say(format!("❌ Material '{name}' not found.")).await?;
            return Ok(());
        };

        let removed_lines = material::delete_material(db, existing.id).await?;
        ctx.say(format!(
            "🗑️ Deleted '{}'. Removed it from {removed_lines} recipe line(s).",
            existing.name
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
