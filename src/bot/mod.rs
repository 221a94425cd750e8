//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the PricingBuddy application,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (material, product, costing, settings, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

pub use commands::*;
pub use handlers::*;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Every slash command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::material(),
        commands::product(),
        commands::cost(),
        commands::batch(),
        commands::breakeven(),
        commands::whatif(),
        commands::summary(),
        commands::export(),
        commands::settings(),
    ]
}

/// Builds the poise framework, registers commands globally, and runs the client
/// until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or the gateway connection fails.
#[instrument(skip(token, database))]
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}
