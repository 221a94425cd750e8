//! Costing Discord commands - unit cost, batch, break-even, what-if, and export.
//!
//! Every command loads a fresh snapshot and resolves the labor rate on each call,
//! so a material price change shows up in the very next reply.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            costing::{
                BatchCost, BreakEvenAnalysis, CostBreakdown, ScenarioAnalysis, rank_by_margin,
            },
            currency::CurrencyCode,
            material, product,
            report::{
                CatalogSummary, cost_report_row, export_products_csv, format_money,
                format_percent,
            },
            settings,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    fn signed_money(amount: f64, currency: CurrencyCode) -> String {
        if amount > 0.0 {
            format!("+{}", format_money(amount, currency))
        } else {
            format_money(amount, currency)
        }
    }

    /// Shows a product's full cost breakdown and suggested price.
    #[poise::command(slash_command)]
    pub async fn cost(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to price"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(snapshot) = product::load_snapshot_by_name(db, &product_name).await? else {
            ctx.say(format!("❌ Product '{product_name}' not found."))
                .await?;
            return Ok(());
        };
        let costing = settings::resolve_settings(db).await?;
        let currency = costing.currency;
        let cost = CostBreakdown::compute(&snapshot, costing.hourly_labor_rate);
        let p = &snapshot.product;

        let ingredients = if snapshot.lines.is_empty() {
            "No ingredients yet.".to_string()
        } else {
            snapshot
                .lines
                .iter()
                .map(|line| match &line.material {
                    Some(m) => format!(
                        "• {} {} {} @ {} = {}",
                        line.ingredient.amount_required,
                        m.unit_type.abbreviation(),
                        m.name,
                        format_money(material::unit_price(m), currency),
                        format_money(line.cost(), currency)
                    ),
                    None => format!("• (missing material) = {}", format_money(0.0, currency)),
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let embed = serenity::CreateEmbed::default()
            .title(format!("Cost breakdown: {}", p.name))
            .color(0x0058_65F2)
            .field("Ingredients", ingredients, false)
            .field("Material Cost", format_money(cost.material_cost, currency), true)
            .field(
                "Labor Cost",
                format!(
                    "{} ({}h @ {}/h)",
                    format_money(cost.labor_cost, currency),
                    p.time_to_produce_hours,
                    format_money(costing.hourly_labor_rate, currency)
                ),
                true,
            )
            .field("Prime Cost", format_money(cost.prime_cost, currency), true)
            .field(
                "Total Cost",
                format!(
                    "{} (+{} overhead)",
                    format_money(cost.total_cost, currency),
                    format_percent(p.overhead_percentage)
                ),
                true,
            )
            .field(
                "Final Price",
                format!(
                    "**{}** (+{} markup)",
                    format_money(cost.final_price, currency),
                    format_percent(p.markup_percentage)
                ),
                true,
            )
            .field(
                "Net Profit",
                format!(
                    "{} ({} margin)",
                    format_money(cost.net_profit, currency),
                    format_percent(cost.profit_margin)
                ),
                true,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Prices a batch, with material discounts at 10, 100, and 1000 units.
    #[poise::command(slash_command)]
    pub async fn batch(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to price"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product_name: String,
        #[description = "Number of units in the batch"]
        #[min = 1]
        quantity: u32,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(snapshot) = product::load_snapshot_by_name(db, &product_name).await? else {
            ctx.say(format!("❌ Product '{product_name}' not found."))
                .await?;
            return Ok(());
        };
        let costing = settings::resolve_settings(db).await?;
        let currency = costing.currency;
        let batch = BatchCost::compute(&snapshot, quantity, costing.hourly_labor_rate);

        let embed = serenity::CreateEmbed::default()
            .title(format!("Batch of {quantity}: {}", snapshot.product.name))
            .color(0x0058_65F2)
            .field(
                "Material Discount",
                format_percent(batch.scale_discount * 100.0),
                true,
            )
            .field("Material Cost", format_money(batch.material_cost, currency), true)
            .field("Labor Cost", format_money(batch.labor_cost, currency), true)
            .field("Total Cost", format_money(batch.total_cost, currency), true)
            .field("Batch Price", format_money(batch.final_price, currency), true)
            .field("Batch Profit", format_money(batch.net_profit, currency), true)
            .field(
                "Per Unit",
                format!(
                    "Cost {} • Price {}",
                    format_money(batch.unit_total_cost, currency),
                    format_money(batch.unit_final_price, currency)
                ),
                false,
            )
            .field(
                "Savings",
                format!(
                    "{} per unit, {} total",
                    format_money(batch.savings_per_unit, currency),
                    format_money(batch.total_savings, currency)
                ),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows how many units cover the product's monthly fixed costs.
    #[poise::command(slash_command)]
    pub async fn breakeven(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to analyze"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(snapshot) = product::load_snapshot_by_name(db, &product_name).await? else {
            ctx.say(format!("❌ Product '{product_name}' not found."))
                .await?;
            return Ok(());
        };
        let costing = settings::resolve_settings(db).await?;
        let currency = costing.currency;
        let analysis = BreakEvenAnalysis::compute(&snapshot, costing.hourly_labor_rate);

        if analysis.contribution_margin <= 0.0 {
            ctx.say(format!(
                "⚠️ '{}' earns {} per unit, so it never breaks even. Raise the markup first.",
                snapshot.product.name,
                format_money(analysis.contribution_margin, currency)
            ))
            .await?;
            return Ok(());
        }

        let target = if analysis.target_units > 0 {
            format!(
                "{} units → {} profit ({} safety margin){}",
                analysis.target_units,
                format_money(analysis.profit_at_target, currency),
                format_percent(analysis.safety_margin_percent),
                if analysis.target_is_profitable() { " ✅" } else { " ⚠️" }
            )
        } else {
            "No monthly target set.".to_string()
        };

        let embed = serenity::CreateEmbed::default()
            .title(format!("Break-even: {}", snapshot.product.name))
            .color(0x0058_65F2)
            .field("Fixed Costs", format_money(analysis.fixed_costs, currency), true)
            .field(
                "Contribution / Unit",
                format_money(analysis.contribution_margin, currency),
                true,
            )
            .field(
                "Break-even",
                format!(
                    "**{} units** ({})",
                    analysis.break_even_units,
                    format_money(analysis.break_even_revenue, currency)
                ),
                false,
            )
            .field("Monthly Target", target, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Projects costs and profit if material prices or the labor rate change.
    #[poise::command(slash_command)]
    pub async fn whatif(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to analyze"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product_name: String,
        #[description = "Material price change in percent (e.g., 10 or -5)"]
        material_change: f64,
        #[description = "Labor rate change in percent (e.g., -20)"] labor_change: f64,
    ) -> Result<()> {
        if !material_change.is_finite() || !labor_change.is_finite() {
            ctx.say("❌ Changes must be valid numbers.").await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let Some(snapshot) = product::load_snapshot_by_name(db, &product_name).await? else {
            ctx.say(format!("❌ Product '{product_name}' not found."))
                .await?;
            return Ok(());
        };
        let costing = settings::resolve_settings(db).await?;
        let currency = costing.currency;
        let scenario = ScenarioAnalysis::compute(
            &snapshot,
            material_change,
            labor_change,
            costing.hourly_labor_rate,
        );

        let row = |label: &str, before: f64, after: f64, delta: f64| {
            format!(
                "{label}: {} → {} ({})",
                format_money(before, currency),
                format_money(after, currency),
                signed_money(delta, currency)
            )
        };
        let body = [
            row(
                "Prime cost",
                scenario.original.prime_cost,
                scenario.projected.prime_cost,
                scenario.prime_cost_delta,
            ),
            row(
                "Total cost",
                scenario.original.total_cost,
                scenario.projected.total_cost,
                scenario.total_cost_delta,
            ),
            row(
                "Final price",
                scenario.original.final_price,
                scenario.projected.final_price,
                scenario.final_price_delta,
            ),
            row(
                "Net profit",
                scenario.original.net_profit,
                scenario.projected.net_profit,
                scenario.profit_delta,
            ),
            format!("Profit change: {:+.1}%", scenario.profit_change_percent),
        ]
        .join("\n");

        let embed = serenity::CreateEmbed::default()
            .title(format!(
                "What if: materials {material_change:+.1}%, labor {labor_change:+.1}%"
            ))
            .color(0x0058_65F2)
            .description(format!("**{}**\n{body}", snapshot.product.name));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Summarizes the catalog: margins, best and worst products, and stock value.
    #[poise::command(slash_command)]
    pub async fn summary(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let costing = settings::resolve_settings(db).await?;
        let currency = costing.currency;
        let snapshots = product::load_all_snapshots(db).await?;
        let materials = material::get_all_materials(db).await?;
        let summary = CatalogSummary::compute(&snapshots, &materials, costing.hourly_labor_rate);

        let ranking = rank_by_margin(&snapshots, costing.hourly_labor_rate)
            .into_iter()
            .take(10)
            .enumerate()
            .map(|(i, (snapshot, cost))| {
                format!(
                    "{}. {} - {} at {}",
                    i + 1,
                    snapshot.product.name,
                    format_percent(cost.profit_margin),
                    format_money(cost.final_price, currency)
                )
            })
            .collect::<Vec<_>>();

        let embed = serenity::CreateEmbed::default()
            .title("**Catalog Summary**")
            .color(0x0058_65F2)
            .field("Products", summary.product_count.to_string(), true)
            .field("Average Margin", format_percent(summary.average_margin), true)
            .field(
                "Inventory Value",
                format_money(summary.inventory_value, currency),
                true,
            )
            .field(
                "Most Profitable",
                summary.most_profitable.unwrap_or_else(|| "-".to_string()),
                true,
            )
            .field(
                "Least Profitable",
                summary.least_profitable.unwrap_or_else(|| "-".to_string()),
                true,
            )
            .field(
                "By Margin",
                if ranking.is_empty() {
                    "No products yet.".to_string()
                } else {
                    ranking.join("\n")
                },
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Exports every product's cost breakdown as a CSV file.
    #[poise::command(slash_command)]
    pub async fn export(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let rate = settings::resolve_hourly_rate(db).await?;
        let rows: Vec<_> = product::load_all_snapshots(db)
            .await?
            .iter()
            .map(|snapshot| cost_report_row(snapshot, rate))
            .collect();

        let csv = export_products_csv(&rows)?;
        let file_name = format!(
            "pricing_report_{}.csv",
            chrono::Utc::now().format("%Y%m%d")
        );
        info!("Exporting {} product(s) to {file_name}", rows.len());

        ctx.send(
            poise::CreateReply::default()
                .content(format!("📄 Cost report for {} product(s).", rows.len()))
                .attachment(serenity::CreateAttachment::bytes(csv.into_bytes(), file_name)),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
