//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Unit cost, batch, break-even, what-if, and export commands
pub mod costing;

/// General utility commands
pub mod general;

/// Material ledger commands
pub mod material;

/// Product catalog and recipe commands
pub mod product;

/// Labor rate and overhead commands
pub mod settings;

// Export commands
pub use costing::*;
pub use general::*;
pub use material::*;
pub use product::*;
pub use settings::*;
