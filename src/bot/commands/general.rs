//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**PricingBuddy Help**\n\
        Track what your materials cost and what your products should sell for.\n\n\
        **Materials**\n\
        • `/material add|list|price|stock|history|record_price|delete` - Manage the materials you buy.\n\n\
        **Products**\n\
        • `/product add|list|ingredient_add|ingredient_remove|duplicate|delete` - Manage products and recipes.\n\n\
        **Pricing**\n\
        • `/cost <product>` - Full cost breakdown and suggested price.\n\
        • `/batch <product> <quantity>` - Batch pricing with volume discounts.\n\
        • `/breakeven <product>` - Units needed to cover fixed costs.\n\
        • `/whatif <product> <material %> <labor %>` - Project a cost change.\n\
        • `/export` - Download every product's costs as CSV.\n\n\
        **Settings**\n\
        • `/settings show|labor_rate|overhead` - Shop-wide labor rate and overhead.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
