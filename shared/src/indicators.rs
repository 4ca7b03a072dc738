//! Financial and agronomic indicators per crop cycle
//!
//! Everything in this module is a pure function over snapshots of the record
//! collections. Degenerate inputs (no crop cycle, zero area, unparseable
//! dates, empty collections) yield zeros and empty lists, never errors, so a
//! results dashboard can always render something.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Cost, FieldOperation, Harvest, Safra};
use crate::types::{
    add_or_zero, div_or_zero, mul_or_zero, parse_record_date, sub_or_zero, sum_or_zero,
};

/// Distribution label for the prorated share of fixed costs
pub const FIXED_COSTS_LABEL: &str = "Custos Fixos (Rateado)";

/// One slice of the cost breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostDistributionEntry {
    pub label: String,
    pub value: Decimal,
}

/// Indicators derived for one crop cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SafraIndicators {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub gross_profit: Decimal,
    /// Gross profit over total cost, in percent
    pub roi: Decimal,
    /// Gross profit over total revenue, in percent (rentabilidade)
    pub profitability: Decimal,
    /// Standard sacks per hectare
    pub productivity: Decimal,
    pub cost_per_sack: Decimal,
    pub profit_per_hectare: Decimal,
    pub cost_distribution: Vec<CostDistributionEntry>,
    pub total_harvest_sacks: Decimal,
}

/// Snapshot of every collection the calculator reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationInputs {
    #[serde(default)]
    pub safras: Vec<Safra>,
    #[serde(default)]
    pub operations: Vec<FieldOperation>,
    #[serde(default)]
    pub costs: Vec<Cost>,
    #[serde(default)]
    pub harvests: Vec<Harvest>,
}

impl CalculationInputs {
    pub fn indicators_for(&self, safra: Option<&Safra>) -> SafraIndicators {
        calculate_indicators(
            safra,
            &self.operations,
            &self.costs,
            &self.harvests,
            &self.safras,
        )
    }
}

/// Whether a crop cycle was running on `date`.
///
/// A cycle is running from its start date onward while flagged active, or
/// until its end date once finished. An unparseable start date never runs;
/// an unparseable end date counts as unset.
pub fn is_active_on(safra: &Safra, date: NaiveDateTime) -> bool {
    let Some(start) = safra.parsed_start_date() else {
        return false;
    };
    if start > date {
        return false;
    }
    safra.is_active || safra.parsed_end_date().is_some_and(|end| date <= end)
}

/// Number of crop cycles running on `date`
pub fn count_active_on(safras: &[Safra], date: NaiveDateTime) -> usize {
    safras.iter().filter(|s| is_active_on(s, date)).count()
}

/// Share of one fixed cost that lands on `safra`.
///
/// The cost is split evenly among every cycle running on the cost's date.
/// Variable costs, unparseable dates and cycles not running that day get 0.
pub fn fixed_cost_share(safra: &Safra, cost: &Cost, all_safras: &[Safra]) -> Decimal {
    if !cost.is_fixed() {
        return Decimal::ZERO;
    }
    let Some(date) = parse_record_date(&cost.date) else {
        return Decimal::ZERO;
    };
    if !is_active_on(safra, date) {
        return Decimal::ZERO;
    }

    let running = count_active_on(all_safras, date).max(1);
    div_or_zero(cost.value, Decimal::from(running))
}

/// Sum of the prorated fixed-cost shares for `safra`
pub fn prorated_fixed_costs(safra: &Safra, costs: &[Cost], all_safras: &[Safra]) -> Decimal {
    sum_or_zero(
        costs
            .iter()
            .map(|cost| fixed_cost_share(safra, cost, all_safras)),
    )
}

/// Drop non-positive entries and merge entries sharing a label.
///
/// Distinct labels keep the order in which they were first seen.
pub fn merge_cost_entries<I>(entries: I) -> Vec<CostDistributionEntry>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    let mut merged: Vec<CostDistributionEntry> = Vec::new();
    for (label, value) in entries {
        if value <= Decimal::ZERO {
            continue;
        }
        match merged.iter_mut().find(|entry| entry.label == label) {
            Some(existing) => existing.value = add_or_zero(existing.value, value),
            None => merged.push(CostDistributionEntry { label, value }),
        }
    }
    merged
}

/// `part / whole * 100`
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    mul_or_zero(div_or_zero(part, whole), Decimal::ONE_HUNDRED)
}

/// Compute every indicator for `safra`.
///
/// `all_safras` must hold the whole crop-cycle collection, not only the
/// target: fixed costs are split by how many cycles were running on each
/// cost's date. Passing `None` yields all zeros. Intermediate amounts too
/// large for a `Decimal` count as 0, so any stored data yields a result.
pub fn calculate_indicators(
    safra: Option<&Safra>,
    operations: &[FieldOperation],
    costs: &[Cost],
    harvests: &[Harvest],
    all_safras: &[Safra],
) -> SafraIndicators {
    let Some(safra) = safra else {
        return SafraIndicators::default();
    };

    let safra_operations: Vec<&FieldOperation> = operations
        .iter()
        .filter(|op| op.safra_id == safra.id)
        .collect();
    let variable_costs: Vec<&Cost> = costs
        .iter()
        .filter(|cost| cost.is_variable_for(&safra.id))
        .collect();
    let safra_harvests: Vec<&Harvest> = harvests
        .iter()
        .filter(|h| h.safra_id == safra.id)
        .collect();

    let operations_cost = sum_or_zero(safra_operations.iter().map(|op| op.cost));
    let variable_costs_total = sum_or_zero(variable_costs.iter().map(|c| c.value));
    let fixed_costs = prorated_fixed_costs(safra, costs, all_safras);

    let total_revenue = sum_or_zero(safra_harvests.iter().map(|h| h.revenue()));
    let total_cost = sum_or_zero([operations_cost, variable_costs_total, fixed_costs]);
    let gross_profit = sub_or_zero(total_revenue, total_cost);

    let roi = if total_cost > Decimal::ZERO {
        percent_of(gross_profit, total_cost)
    } else {
        Decimal::ZERO
    };
    let profitability = if total_revenue > Decimal::ZERO {
        percent_of(gross_profit, total_revenue)
    } else {
        Decimal::ZERO
    };

    let total_harvest_sacks = sum_or_zero(safra_harvests.iter().map(|h| h.sacks()));

    let (productivity, profit_per_hectare) = if safra.area > Decimal::ZERO {
        (
            div_or_zero(total_harvest_sacks, safra.area),
            div_or_zero(gross_profit, safra.area),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    let cost_per_sack = if total_harvest_sacks > Decimal::ZERO {
        div_or_zero(total_cost, total_harvest_sacks)
    } else {
        Decimal::ZERO
    };

    let raw_entries = safra_operations
        .iter()
        .map(|op| (op.operation_type.label().to_string(), op.cost))
        .chain(variable_costs.iter().map(|c| (c.category.clone(), c.value)))
        .chain(std::iter::once((FIXED_COSTS_LABEL.to_string(), fixed_costs)));

    SafraIndicators {
        total_revenue,
        total_cost,
        gross_profit,
        roi,
        profitability,
        productivity,
        cost_per_sack,
        profit_per_hectare,
        cost_distribution: merge_cost_entries(raw_entries),
        total_harvest_sacks,
    }
}
