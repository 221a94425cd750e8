//! Unified error type for `PricingBuddy`.
//!
//! Only persistence, validation, and I/O can fail. The costing engine itself is
//! total over its inputs and never produces an [`Error`].

use thiserror::Error;

/// All errors that can surface from the core, config, and bot layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or invalid user-provided field
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable explanation
        message: String,
    },

    /// Any error reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A price, quantity, or percentage that is negative, zero where not allowed, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// No material with the given name or id
    #[error("Material not found: {name}")]
    MaterialNotFound {
        /// Name or id used for the lookup
        name: String,
    },

    /// No product with the given name or id
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name or id used for the lookup
        name: String,
    },

    /// No ingredient line with the given id
    #[error("Ingredient not found: {id}")]
    IngredientNotFound {
        /// Ingredient id
        id: i64,
    },

    /// No product template with the given name or id
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// Name or id used for the lookup
        name: String,
    },

    /// No supplier with the given name or id
    #[error("Supplier not found: {name}")]
    SupplierNotFound {
        /// Name or id used for the lookup
        name: String,
    },

    /// CSV report generation failed
    #[error("Export error: {message}")]
    Export {
        /// Underlying failure
        message: String,
    },

    /// I/O failure (config file, export buffer)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Export {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
