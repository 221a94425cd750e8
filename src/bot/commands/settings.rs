//! Settings Discord commands - the shop-wide labor rate and overhead breakdown.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{
            report::{format_money, format_percent},
            settings::{self, CostingSettings, OverheadComponents},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    fn settings_embed(title: &str, current: &CostingSettings) -> serenity::CreateEmbed {
        let o = &current.overhead;
        let breakdown = [
            ("Electricity", o.electricity),
            ("Rent", o.rent),
            ("Utilities", o.utilities),
            ("Insurance", o.insurance),
            ("Maintenance", o.maintenance),
            ("Other", o.other),
        ]
        .iter()
        .map(|(label, value)| format!("{label}: {}", format_percent(*value)))
        .collect::<Vec<_>>()
        .join("\n");

        serenity::CreateEmbed::default()
            .title(title)
            .color(0x0058_65F2)
            .field(
                "Labor Rate",
                format!(
                    "{}/hour",
                    format_money(current.hourly_labor_rate, current.currency)
                ),
                true,
            )
            .field(
                "Total Overhead",
                format_percent(current.overhead_percentage()),
                true,
            )
            .field("Currency", current.currency.to_string(), true)
            .field("Overhead Breakdown", breakdown, false)
    }

    /// Parent command for shop-wide costing settings.
    #[poise::command(
        slash_command,
        subcommands("settings_show", "settings_labor_rate", "settings_overhead")
    )]
    pub async fn settings(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Settings command. Available subcommands:\n\
            `/settings show` - Show the labor rate and overhead\n\
            `/settings labor_rate` - Set the hourly labor rate\n\
            `/settings overhead` - Change overhead percentages";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the labor rate and overhead breakdown used for every product.
    #[poise::command(slash_command, rename = "show")]
    pub async fn settings_show(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let current = settings::resolve_settings(db).await?;
        ctx.send(poise::CreateReply::default().embed(settings_embed("**Settings**", &current)))
            .await?;
        Ok(())
    }

    /// Sets the hourly labor rate.
    #[poise::command(slash_command, rename = "labor_rate")]
    pub async fn settings_labor_rate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Cost of one hour of labor (e.g., 18.50)"] rate: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match settings::update_hourly_rate(db, rate).await {
            Ok(updated) => {
                ctx.send(
                    poise::CreateReply::default()
                        .embed(settings_embed("✅ Labor rate updated", &updated)),
                )
                .await?;
            }
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!("❌ Invalid rate `{amount}`: must be zero or more."))
                    .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Changes overhead percentages. Omitted components keep their value.
    ///
    /// Existing products keep the overhead they were created with; the new total
    /// becomes the default for products added afterwards.
    #[poise::command(slash_command, rename = "overhead")]
    pub async fn settings_overhead(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Electricity, in percent"] electricity: Option<f64>,
        #[description = "Rent, in percent"] rent: Option<f64>,
        #[description = "Utilities, in percent"] utilities: Option<f64>,
        #[description = "Insurance, in percent"] insurance: Option<f64>,
        #[description = "Maintenance, in percent"] maintenance: Option<f64>,
        #[description = "Anything else, in percent"] other: Option<f64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let current = settings::resolve_settings(db).await?.overhead;
        let overhead = OverheadComponents {
            electricity: electricity.unwrap_or(current.electricity),
            rent: rent.unwrap_or(current.rent),
            utilities: utilities.unwrap_or(current.utilities),
            insurance: insurance.unwrap_or(current.insurance),
            maintenance: maintenance.unwrap_or(current.maintenance),
            other: other.unwrap_or(current.other),
        };

        match settings::update_overhead(db, overhead).await {
            Ok(updated) => {
                ctx.send(
                    poise::CreateReply::default()
                        .embed(settings_embed("✅ Overhead updated", &updated)),
                )
                .await?;
            }
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!(
                    "❌ Invalid percentage `{amount}`: must be zero or more."
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
