//! Report generation business logic.
//!
//! This module turns product snapshots into report rows, catalog summaries, and a
//! CSV export. All functions are framework-agnostic and return structured data or
//! plain strings that the bot layer can send as-is.

use crate::{
    core::{
        costing::{CostBreakdown, ProductSnapshot},
        currency::CurrencyCode,
        material::stock_value,
    },
    entities::material,
    errors::Result,
};
use serde::{Serialize, Serializer};

fn two_places<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

/// One product's cost report, in export column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReportRow {
    /// Product name
    #[serde(rename = "Name")]
    pub name: String,
    /// Material cost per unit
    #[serde(rename = "Material Cost", serialize_with = "two_places")]
    pub material_cost: f64,
    /// Labor cost per unit
    #[serde(rename = "Labor Cost", serialize_with = "two_places")]
    pub labor_cost: f64,
    /// Material plus labor
    #[serde(rename = "Prime Cost", serialize_with = "two_places")]
    pub prime_cost: f64,
    /// Overhead applied to the prime cost
    #[serde(rename = "Overhead %", serialize_with = "two_places")]
    pub overhead_percentage: f64,
    /// Prime cost with overhead
    #[serde(rename = "Total Cost", serialize_with = "two_places")]
    pub total_cost: f64,
    /// Markup applied to the total cost
    #[serde(rename = "Markup %", serialize_with = "two_places")]
    pub markup_percentage: f64,
    /// Selling price per unit
    #[serde(rename = "Final Price", serialize_with = "two_places")]
    pub final_price: f64,
    /// Final price minus total cost
    #[serde(rename = "Net Profit", serialize_with = "two_places")]
    pub net_profit: f64,
    /// Net profit as a share of the final price
    #[serde(rename = "Margin %", serialize_with = "two_places")]
    pub profit_margin: f64,
    /// Hours of labor per unit
    #[serde(rename = "Time (hrs)", serialize_with = "two_places")]
    pub time_to_produce_hours: f64,
    /// Number of recipe lines
    #[serde(rename = "Ingredients")]
    pub ingredient_count: usize,
}

/// Builds the report row for one product at the given labor rate.
#[must_use]
pub fn cost_report_row(snapshot: &ProductSnapshot, hourly_rate: f64) -> CostReportRow {
    let cost = CostBreakdown::compute(snapshot, hourly_rate);
    let product = &snapshot.product;
    CostReportRow {
        name: product.name.clone(),
        material_cost: cost.material_cost,
        labor_cost: cost.labor_cost,
        prime_cost: cost.prime_cost,
        overhead_percentage: product.overhead_percentage,
        total_cost: cost.total_cost,
        markup_percentage: product.markup_percentage,
        final_price: cost.final_price,
        net_profit: cost.net_profit,
        profit_margin: cost.profit_margin,
        time_to_produce_hours: product.time_to_produce_hours,
        ingredient_count: snapshot.ingredient_count(),
    }
}

/// Writes report rows as CSV with a header line. An empty slice yields only the header.
///
/// # Errors
/// Returns [`crate::errors::Error::Export`] if a row cannot be serialized.
pub fn export_products_csv(rows: &[CostReportRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record([
        "Name",
        "Material Cost",
        "Labor Cost",
        "Prime Cost",
        "Overhead %",
        "Total Cost",
        "Markup %",
        "Final Price",
        "Net Profit",
        "Margin %",
        "Time (hrs)",
        "Ingredients",
    ])?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::errors::Error::Export {
            message: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| crate::errors::Error::Export {
        message: e.to_string(),
    })
}

/// Total value of stock on hand: the sum of `current_stock * unit_price`.
#[must_use]
pub fn inventory_value(materials: &[material::Model]) -> f64 {
    materials.iter().map(stock_value).sum()
}

/// Catalog-wide figures for the summary view.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    /// Number of products in the catalog
    pub product_count: usize,
    /// Mean profit margin across products, `0.0` for an empty catalog
    pub average_margin: f64,
    /// Product with the highest net profit
    pub most_profitable: Option<String>,
    /// Product with the lowest net profit
    pub least_profitable: Option<String>,
    /// Value of all stock on hand
    pub inventory_value: f64,
}

impl CatalogSummary {
    /// Computes the summary. Ties on margin go to the product that sorts first.
    #[must_use]
    pub fn compute(
        snapshots: &[ProductSnapshot],
        materials: &[material::Model],
        hourly_rate: f64,
    ) -> Self {
        let margins: Vec<(&str, f64)> = snapshots
            .iter()
            .map(|s| {
                (
                    s.product.name.as_str(),
                    CostBreakdown::compute(s, hourly_rate).profit_margin,
                )
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let average_margin = if margins.is_empty() {
            0.0
        } else {
            margins.iter().map(|(_, m)| m).sum::<f64>() / margins.len() as f64
        };

        let most_profitable = margins
            .iter()
            .fold(None::<(&str, f64)>, |best, &(name, margin)| match best {
                Some((_, best_margin)) if best_margin >= margin => best,
                _ => Some((name, margin)),
            })
            .map(|(name, _)| name.to_string());
        let least_profitable = margins
            .iter()
            .fold(None::<(&str, f64)>, |worst, &(name, margin)| match worst {
                Some((_, worst_margin)) if worst_margin <= margin => worst,
                _ => Some((name, margin)),
            })
            .map(|(name, _)| name.to_string());

        Self {
            product_count: snapshots.len(),
            average_margin,
            most_profitable,
            least_profitable,
            inventory_value: inventory_value(materials),
        }
    }
}

/// Formats an amount in the given currency, e.g. `$89.70`.
#[must_use]
pub fn format_money(amount: f64, currency: CurrencyCode) -> String {
    currency.format_amount(amount)
}

/// Formats a percentage with one decimal place, e.g. `23.1%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
