//! Costing engine - Derives unit economics from a product snapshot.
//!
//! Every function here is pure and synchronous. Inputs are plain snapshots that
//! the caller loaded from the database (see [`crate::core::product::load_snapshot`])
//! plus a resolved hourly labor rate. Nothing is cached: callers recompute on every
//! read so a material price edit is reflected immediately.
//!
//! The unit cost pyramid is evaluated in a fixed order:
//!
//! 1. material cost = sum of ingredient line costs
//! 2. labor cost = hours to produce * hourly rate
//! 3. prime cost = material + labor
//! 4. total cost = prime * (1 + overhead% / 100)
//! 5. final price = total * (1 + markup% / 100)
//! 6. net profit = final price - total cost
//! 7. profit margin = net profit / final price * 100, or 0 when the price is not positive
//!
//! No function in this module can fail or panic on numeric input. Degenerate
//! denominators resolve to `0.0`.

use crate::{
    core::ingredient::line_cost,
    entities::{ingredient, material, product},
};

/// One recipe line with its material resolved, if it still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    /// The stored recipe line
    pub ingredient: ingredient::Model,
    /// Its material, or `None` if the material was deleted
    pub material: Option<material::Model>,
}

impl IngredientLine {
    /// Cost of this line at the material's current unit price.
    #[must_use]
    pub fn cost(&self) -> f64 {
        line_cost(self.ingredient.amount_required, self.material.as_ref())
    }
}

/// A product together with its resolved recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    /// The product being priced
    pub product: product::Model,
    /// Every recipe line of the product
    pub lines: Vec<IngredientLine>,
}

impl ProductSnapshot {
    /// Pairs a product with its already-loaded recipe lines.
    #[must_use]
    pub const fn new(product: product::Model, lines: Vec<IngredientLine>) -> Self {
        Self { product, lines }
    }

    /// Number of recipe lines, including ones whose material is missing.
    #[must_use]
    pub fn ingredient_count(&self) -> usize {
        self.lines.len()
    }
}

/// Sum of all ingredient line costs for one unit.
#[must_use]
pub fn material_cost(snapshot: &ProductSnapshot) -> f64 {
    snapshot.lines.iter().map(IngredientLine::cost).sum()
}

/// Labor cost for one unit: hours to produce times the hourly rate.
#[must_use]
pub fn labor_cost(product: &product::Model, hourly_rate: f64) -> f64 {
    product.time_to_produce_hours * hourly_rate
}

fn apply_percentage(base: f64, percentage: f64) -> f64 {
    base * (1.0 + percentage / 100.0)
}

fn margin_percent(profit: f64, price: f64) -> f64 {
    if price > 0.0 {
        profit / price * 100.0
    } else {
        0.0
    }
}

/// Per-unit cost and price figures for a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Sum of ingredient line costs
    pub material_cost: f64,
    /// Hours to produce times the hourly rate
    pub labor_cost: f64,
    /// Material plus labor
    pub prime_cost: f64,
    /// Prime cost with overhead applied
    pub total_cost: f64,
    /// Total cost with markup applied
    pub final_price: f64,
    /// Final price minus total cost
    pub net_profit: f64,
    /// Net profit as a percentage of the final price
    pub profit_margin: f64,
}

impl CostBreakdown {
    /// Runs the full pyramid for one unit of the product.
    #[must_use]
    pub fn compute(snapshot: &ProductSnapshot, hourly_rate: f64) -> Self {
        Self::from_parts(
            material_cost(snapshot),
            labor_cost(&snapshot.product, hourly_rate),
            snapshot.product.overhead_percentage,
            snapshot.product.markup_percentage,
        )
    }

    /// Runs the pyramid from already-known material and labor costs.
    #[must_use]
    pub fn from_parts(
        material_cost: f64,
        labor_cost: f64,
        overhead_percentage: f64,
        markup_percentage: f64,
    ) -> Self {
        let prime_cost = material_cost + labor_cost;
        let total_cost = apply_percentage(prime_cost, overhead_percentage);
        let final_price = apply_percentage(total_cost, markup_percentage);
        let net_profit = final_price - total_cost;

        Self {
            material_cost,
            labor_cost,
            prime_cost,
            total_cost,
            final_price,
            net_profit,
            profit_margin: margin_percent(net_profit, final_price),
        }
    }
}

/// Scale discount on the material portion of a batch.
///
/// | quantity | discount |
/// |---|---|
/// | 1000 and up | 15% |
/// | 100 to 999 | 10% |
/// | 10 to 99 | 5% |
/// | below 10 | none |
#[must_use]
pub const fn scale_discount(quantity: u32) -> f64 {
    match quantity {
        1000.. => 0.15,
        100.. => 0.10,
        10.. => 0.05,
        _ => 0.0,
    }
}

/// Costs for producing `quantity` units at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchCost {
    /// Number of units in the batch
    pub quantity: u32,
    /// Fraction taken off the material cost (0.05 = 5%)
    pub scale_discount: f64,
    /// Discounted material cost for the whole batch
    pub material_cost: f64,
    /// Labor cost for the whole batch (never discounted)
    pub labor_cost: f64,
    /// Discounted material plus labor
    pub prime_cost: f64,
    /// Prime cost with overhead applied
    pub total_cost: f64,
    /// Total cost with markup applied
    pub final_price: f64,
    /// Final price minus total cost
    pub net_profit: f64,
    /// Prime cost divided by the quantity
    pub unit_prime_cost: f64,
    /// Total cost divided by the quantity
    pub unit_total_cost: f64,
    /// Final price divided by the quantity
    pub unit_final_price: f64,
    /// Single-unit prime cost minus the batch prime cost per unit
    pub savings_per_unit: f64,
    /// Savings per unit across the whole batch
    pub total_savings: f64,
}

impl BatchCost {
    /// Scales the pyramid to `quantity` units with the tiered material discount.
    ///
    /// A quantity of zero yields an empty batch with all figures at zero.
    #[must_use]
    pub fn compute(snapshot: &ProductSnapshot, quantity: u32, hourly_rate: f64) -> Self {
        let unit = CostBreakdown::compute(snapshot, hourly_rate);
        let discount = scale_discount(quantity);
        let qty = f64::from(quantity);

        let material_cost = unit.material_cost * qty * (1.0 - discount);
        let labor_cost = unit.labor_cost * qty;
        let batch = CostBreakdown::from_parts(
            material_cost,
            labor_cost,
            snapshot.product.overhead_percentage,
            snapshot.product.markup_percentage,
        );

        let per_unit = |value: f64| if quantity == 0 { 0.0 } else { value / qty };
        let unit_prime_cost = per_unit(batch.prime_cost);
        let savings_per_unit = if quantity == 0 {
            0.0
        } else {
            unit.prime_cost - unit_prime_cost
        };

        Self {
            quantity,
            scale_discount: discount,
            material_cost,
            labor_cost,
            prime_cost: batch.prime_cost,
            total_cost: batch.total_cost,
            final_price: batch.final_price,
            net_profit: batch.net_profit,
            unit_prime_cost,
            unit_total_cost: per_unit(batch.total_cost),
            unit_final_price: per_unit(batch.final_price),
            savings_per_unit,
            total_savings: savings_per_unit * qty,
        }
    }
}

/// Units needed so that the contribution margin covers the fixed costs.
///
/// Returns `0` when the margin is not positive. A product that loses money on
/// every unit never breaks even; `0` is kept for compatibility with existing
/// reports and callers should check the margin before presenting it.
#[must_use]
pub fn break_even_units(fixed_costs: f64, contribution_margin: f64) -> u64 {
    if contribution_margin > 0.0 {
        // Cast saturates: negative/NaN become 0, overflow becomes u64::MAX.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let units = (fixed_costs / contribution_margin).ceil() as u64;
        units
    } else {
        0
    }
}

/// Monthly break-even figures for a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakEvenAnalysis {
    /// Final price minus total cost, per unit
    pub contribution_margin: f64,
    /// Fixed monthly costs of the product
    pub fixed_costs: f64,
    /// Units per month needed to cover the fixed costs
    pub break_even_units: u64,
    /// Revenue at the break-even volume
    pub break_even_revenue: f64,
    /// Target monthly volume of the product
    pub target_units: i64,
    /// Profit if exactly the target volume is sold
    pub profit_at_target: f64,
    /// How far the target sits above break-even, as a percentage of the target
    pub safety_margin_percent: f64,
}

impl BreakEvenAnalysis {
    /// Computes the analysis from one-unit costs and the product's fixed costs and target volume.
    #[must_use]
    pub fn compute(snapshot: &ProductSnapshot, hourly_rate: f64) -> Self {
        let unit = CostBreakdown::compute(snapshot, hourly_rate);
        let contribution_margin = unit.final_price - unit.total_cost;
        let fixed_costs = snapshot.product.fixed_costs;
        let units = break_even_units(fixed_costs, contribution_margin);
        let target_units = snapshot.product.target_units_per_month;

        // Volumes far below 2^53 are exact in f64.
        #[allow(clippy::cast_precision_loss)]
        let (units_f, target_f) = (units as f64, target_units as f64);

        let safety_margin_percent = if target_f > units_f {
            (target_f - units_f) / target_f * 100.0
        } else {
            0.0
        };

        Self {
            contribution_margin,
            fixed_costs,
            break_even_units: units,
            break_even_revenue: units_f * unit.final_price,
            target_units,
            profit_at_target: target_f * contribution_margin - fixed_costs,
            safety_margin_percent,
        }
    }

    /// Whether selling the target volume covers the fixed costs.
    #[must_use]
    pub fn target_is_profitable(&self) -> bool {
        self.profit_at_target > 0.0
    }
}

/// A what-if re-evaluation with perturbed material prices and labor rate.
///
/// Overhead and markup percentages are held fixed. Nothing is persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioAnalysis {
    /// Material price change, in percent (e.g. `10.0` for +10%)
    pub material_change_percent: f64,
    /// Labor rate change, in percent
    pub labor_change_percent: f64,
    /// Costs at current prices
    pub original: CostBreakdown,
    /// Costs with the changes applied
    pub projected: CostBreakdown,
    /// Projected minus original prime cost
    pub prime_cost_delta: f64,
    /// Projected minus original total cost
    pub total_cost_delta: f64,
    /// Projected minus original final price
    pub final_price_delta: f64,
    /// Projected minus original net profit
    pub profit_delta: f64,
    /// Change in profit relative to the original profit; 0 when the original profit is not positive
    pub profit_change_percent: f64,
}

impl ScenarioAnalysis {
    /// Re-prices the product with material costs and the labor rate scaled by the given percentages.
    #[must_use]
    pub fn compute(
        snapshot: &ProductSnapshot,
        material_change_percent: f64,
        labor_change_percent: f64,
        hourly_rate: f64,
    ) -> Self {
        let original = CostBreakdown::compute(snapshot, hourly_rate);

        let projected_rate = apply_percentage(hourly_rate, labor_change_percent);
        let projected = CostBreakdown::from_parts(
            apply_percentage(original.material_cost, material_change_percent),
            labor_cost(&snapshot.product, projected_rate),
            snapshot.product.overhead_percentage,
            snapshot.product.markup_percentage,
        );

        let profit_delta = projected.net_profit - original.net_profit;
        let profit_change_percent = if original.net_profit > 0.0 {
            profit_delta / original.net_profit * 100.0
        } else {
            0.0
        };

        Self {
            material_change_percent,
            labor_change_percent,
            original,
            projected,
            prime_cost_delta: projected.prime_cost - original.prime_cost,
            total_cost_delta: projected.total_cost - original.total_cost,
            final_price_delta: projected.final_price - original.final_price,
            profit_delta,
            profit_change_percent,
        }
    }
}

/// Costs every snapshot and orders them by profit margin, highest first.
///
/// Ties keep the input order.
#[must_use]
pub fn rank_by_margin(
    snapshots: &[ProductSnapshot],
    hourly_rate: f64,
) -> Vec<(&ProductSnapshot, CostBreakdown)> {
    let mut ranked: Vec<(&ProductSnapshot, CostBreakdown)> = snapshots
        .iter()
        .map(|s| (s, CostBreakdown::compute(s, hourly_rate)))
        .collect();
    ranked.sort_by(|a, b| b.1.profit_margin.total_cmp(&a.1.profit_margin));
    ranked
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{material_model, product_model, snapshot_with};

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// 150 for 10 kg, 2 kg per unit, 2 hours, 15% overhead, 30% markup.
    fn reference_snapshot() -> ProductSnapshot {
        let material = material_model(150.0, 10.0);
        let product = product_model(30.0, 15.0, 2.0);
        snapshot_with(product, vec![(2.0, Some(material))])
    }

    #[test]
    fn test_reference_pyramid() {
        let snapshot = reference_snapshot();
        let cost = CostBreakdown::compute(&snapshot, 15.0);

        assert_eq!(cost.material_cost, 30.0);
        assert_eq!(cost.labor_cost, 30.0);
        assert_eq!(cost.prime_cost, 60.0);
        assert!(close(cost.total_cost, 69.0));
        assert!(close(cost.final_price, 89.7));
        assert!(close(cost.net_profit, 20.7));
        assert!((cost.profit_margin - 23.08).abs() < 0.01);
    }

    #[test]
    fn test_empty_recipe() {
        let snapshot = snapshot_with(product_model(30.0, 15.0, 1.0), vec![]);
        let cost = CostBreakdown::compute(&snapshot, 15.0);

        assert_eq!(cost.material_cost, 0.0);
        assert!(cost.total_cost.is_finite() && cost.total_cost >= 0.0);
        assert!(cost.final_price.is_finite() && cost.final_price >= 0.0);
    }

    #[test]
    fn test_zero_price_margin_is_zero() {
        let snapshot = snapshot_with(product_model(30.0, 15.0, 0.0), vec![]);
        let cost = CostBreakdown::compute(&snapshot, 15.0);

        assert_eq!(cost.final_price, 0.0);
        assert_eq!(cost.profit_margin, 0.0);
    }

    #[test]
    fn test_dangling_material_costs_nothing() {
        let material = material_model(150.0, 10.0);
        let snapshot = snapshot_with(
            product_model(0.0, 0.0, 0.0),
            vec![(2.0, Some(material)), (5.0, None)],
        );

        assert_eq!(material_cost(&snapshot), 30.0);
        assert_eq!(snapshot.ingredient_count(), 2);
    }

    #[test]
    fn test_pyramid_is_idempotent() {
        let snapshot = reference_snapshot();
        let first = CostBreakdown::compute(&snapshot, 15.0);
        let second = CostBreakdown::compute(&snapshot, 15.0);

        assert_eq!(first.final_price.to_bits(), second.final_price.to_bits());
        assert_eq!(first.profit_margin.to_bits(), second.profit_margin.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_scale_discount_boundaries() {
        assert_eq!(scale_discount(0), 0.0);
        assert_eq!(scale_discount(9), 0.0);
        assert_eq!(scale_discount(10), 0.05);
        assert_eq!(scale_discount(99), 0.05);
        assert_eq!(scale_discount(100), 0.10);
        assert_eq!(scale_discount(999), 0.10);
        assert_eq!(scale_discount(1000), 0.15);
        assert_eq!(scale_discount(u32::MAX), 0.15);
    }

    #[test]
    fn test_batch_cost_discount_applies_to_material_only() {
        let snapshot = reference_snapshot();
        let batch = BatchCost::compute(&snapshot, 100, 15.0);

        assert_eq!(batch.scale_discount, 0.10);
        assert!(close(batch.material_cost, 30.0 * 100.0 * 0.9));
        assert!(close(batch.labor_cost, 30.0 * 100.0));
        assert!(close(batch.prime_cost, 2700.0 + 3000.0));
        assert!(close(batch.total_cost, batch.prime_cost * 1.15));
        assert!(close(batch.final_price, batch.total_cost * 1.3));
        assert!(close(batch.unit_prime_cost, 57.0));
        assert!(close(batch.savings_per_unit, 3.0));
        assert!(close(batch.total_savings, 300.0));
    }

    #[test]
    fn test_batch_below_first_tier_matches_unit_costs() {
        let snapshot = reference_snapshot();
        let unit = CostBreakdown::compute(&snapshot, 15.0);
        let batch = BatchCost::compute(&snapshot, 9, 15.0);

        assert_eq!(batch.scale_discount, 0.0);
        assert!(close(batch.unit_prime_cost, unit.prime_cost));
        assert!(close(batch.unit_final_price, unit.final_price));
        assert!(close(batch.savings_per_unit, 0.0));
    }

    #[test]
    fn test_batch_of_zero_is_empty() {
        let batch = BatchCost::compute(&reference_snapshot(), 0, 15.0);

        assert_eq!(batch.prime_cost, 0.0);
        assert_eq!(batch.unit_prime_cost, 0.0);
        assert_eq!(batch.savings_per_unit, 0.0);
        assert!(batch.unit_final_price.is_finite());
    }

    #[test]
    fn test_break_even_units() {
        assert_eq!(break_even_units(500.0, 5.0), 100);
        assert_eq!(break_even_units(501.0, 5.0), 101);
        assert_eq!(break_even_units(500.0, 0.0), 0);
        assert_eq!(break_even_units(500.0, -2.0), 0);
        assert_eq!(break_even_units(0.0, 5.0), 0);
    }

    #[test]
    fn test_break_even_analysis() {
        // 1 hour at 10/hr, no overhead, 50% markup: total 10, price 15, margin 5
        let mut product = product_model(50.0, 0.0, 1.0);
        product.fixed_costs = 500.0;
        product.target_units_per_month = 150;
        let snapshot = snapshot_with(product, vec![]);

        let analysis = BreakEvenAnalysis::compute(&snapshot, 10.0);
        assert!(close(analysis.contribution_margin, 5.0));
        assert_eq!(analysis.break_even_units, 100);
        assert!(close(analysis.break_even_revenue, 1500.0));
        assert!(close(analysis.profit_at_target, 250.0));
        assert!(close(analysis.safety_margin_percent, 100.0 / 3.0));
        assert!(analysis.target_is_profitable());
    }

    #[test]
    fn test_break_even_target_below_break_even() {
        let mut product = product_model(50.0, 0.0, 1.0);
        product.fixed_costs = 500.0;
        product.target_units_per_month = 40;
        let snapshot = snapshot_with(product, vec![]);

        let analysis = BreakEvenAnalysis::compute(&snapshot, 10.0);
        assert_eq!(analysis.safety_margin_percent, 0.0);
        assert!(close(analysis.profit_at_target, -300.0));
        assert!(!analysis.target_is_profitable());
    }

    #[test]
    fn test_break_even_no_margin() {
        let mut product = product_model(0.0, 15.0, 1.0);
        product.fixed_costs = 500.0;
        product.target_units_per_month = 0;
        let snapshot = snapshot_with(product, vec![]);

        let analysis = BreakEvenAnalysis::compute(&snapshot, 10.0);
        assert_eq!(analysis.contribution_margin, 0.0);
        assert_eq!(analysis.break_even_units, 0);
        assert_eq!(analysis.break_even_revenue, 0.0);
        assert_eq!(analysis.safety_margin_percent, 0.0);
    }

    #[test]
    fn test_scenario_unchanged_inputs() {
        let scenario = ScenarioAnalysis::compute(&reference_snapshot(), 0.0, 0.0, 15.0);

        assert_eq!(scenario.original, scenario.projected);
        assert_eq!(scenario.profit_delta, 0.0);
        assert_eq!(scenario.profit_change_percent, 0.0);
    }

    #[test]
    fn test_scenario_material_and_labor_changes() {
        let scenario = ScenarioAnalysis::compute(&reference_snapshot(), 50.0, -20.0, 15.0);

        // Material 30 -> 45, labor 2h * 12 = 24
        assert!(close(scenario.projected.material_cost, 45.0));
        assert!(close(scenario.projected.labor_cost, 24.0));
        assert!(close(scenario.prime_cost_delta, 9.0));
        assert!(close(scenario.total_cost_delta, 9.0 * 1.15));
        assert!(close(scenario.final_price_delta, 9.0 * 1.15 * 1.3));

        let expected_pct = scenario.profit_delta / scenario.original.net_profit * 100.0;
        assert!(close(scenario.profit_change_percent, expected_pct));
        assert!(scenario.profit_change_percent > 0.0);
    }

    #[test]
    fn test_scenario_zero_original_profit() {
        // No markup means no profit to compare against
        let snapshot = snapshot_with(
            product_model(0.0, 15.0, 2.0),
            vec![(2.0, Some(material_model(150.0, 10.0)))],
        );
        let scenario = ScenarioAnalysis::compute(&snapshot, 25.0, 10.0, 15.0);

        assert_eq!(scenario.original.net_profit, 0.0);
        assert_eq!(scenario.profit_change_percent, 0.0);
        assert!(scenario.profit_change_percent.is_finite());
    }

    #[test]
    fn test_rank_by_margin() {
        let low = snapshot_with(product_model(10.0, 0.0, 1.0), vec![]);
        let high = snapshot_with(product_model(80.0, 0.0, 1.0), vec![]);
        let mid = snapshot_with(product_model(40.0, 0.0, 1.0), vec![]);
        let snapshots = vec![low, high, mid];

        let ranked = rank_by_margin(&snapshots, 15.0);
        let markups: Vec<f64> = ranked
            .iter()
            .map(|(s, _)| s.product.markup_percentage)
            .collect();
        assert_eq!(markups, vec![80.0, 40.0, 10.0]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn expected_discount(quantity: u32) -> f64 {
            if quantity >= 1000 {
                0.15
            } else if quantity >= 100 {
                0.10
            } else if quantity >= 10 {
                0.05
            } else {
                0.0
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn scale_discount_matches_tiers(quantity in 0u32..5000) {
                prop_assert_eq!(scale_discount(quantity), expected_discount(quantity));
            }

            #[test]
            fn pyramid_is_consistent(
                bulk_price in 0.0f64..10_000.0,
                bulk_amount in 0.01f64..1_000.0,
                amount in 0.0f64..100.0,
                hours in 0.0f64..40.0,
                rate in 0.0f64..200.0,
                overhead in 0.0f64..100.0,
                markup in 0.0f64..300.0,
            ) {
                let mut product = product_model(markup, overhead, hours);
                product.fixed_costs = 0.0;
                let snapshot = snapshot_with(
                    product,
                    vec![(amount, Some(material_model(bulk_price, bulk_amount)))],
                );
                let cost = CostBreakdown::compute(&snapshot, rate);

                let tol = 1e-9 * (1.0 + cost.final_price.abs());
                prop_assert!((cost.prime_cost - (cost.material_cost + cost.labor_cost)).abs() <= tol);
                prop_assert!((cost.total_cost - cost.prime_cost * (1.0 + overhead / 100.0)).abs() <= tol);
                prop_assert!((cost.final_price - cost.total_cost * (1.0 + markup / 100.0)).abs() <= tol);
                prop_assert!(cost.profit_margin >= 0.0 && cost.profit_margin < 100.0);
                prop_assert_eq!(cost, CostBreakdown::compute(&snapshot, rate));
            }

            #[test]
            fn engine_is_total(
                bulk_price in -1_000.0f64..1_000.0,
                bulk_amount in -10.0f64..10.0,
                hours in -5.0f64..5.0,
                rate in -50.0f64..50.0,
                overhead in -100.0f64..100.0,
                markup in -100.0f64..100.0,
                fixed in -1_000.0f64..1_000.0,
                target in -100i64..1_000,
                quantity in 0u32..2_000,
                material_change in -100.0f64..200.0,
                labor_change in -100.0f64..200.0,
            ) {
                let mut product = product_model(markup, overhead, hours);
                product.fixed_costs = fixed;
                product.target_units_per_month = target;
                let snapshot = snapshot_with(
                    product,
                    vec![(1.0, Some(material_model(bulk_price, bulk_amount))), (1.0, None)],
                );

                let cost = CostBreakdown::compute(&snapshot, rate);
                prop_assert!(cost.profit_margin.is_finite());

                let batch = BatchCost::compute(&snapshot, quantity, rate);
                prop_assert!(batch.savings_per_unit.is_finite());
                prop_assert!(batch.unit_final_price.is_finite());

                let analysis = BreakEvenAnalysis::compute(&snapshot, rate);
                prop_assert!(analysis.safety_margin_percent.is_finite());
                prop_assert!(analysis.break_even_revenue.is_finite());

                let scenario = ScenarioAnalysis::compute(&snapshot, material_change, labor_change, rate);
                prop_assert!(scenario.profit_change_percent.is_finite());
            }
        }
    }
}
