//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for material, product, unit, and category names
pub mod autocomplete;
