//! Dashboard aggregation

use rust_decimal::Decimal;

use super::fees::transaction_fees;
use super::inventory::{project_inventory, remaining_of};
use super::policy::CalcPolicy;
use super::product_cost::product_cost_per_unit;
use super::usage::state_usage;
use crate::models::{ingredient_ids, DashboardStats, LedgerState, Product, Sale};
use crate::types::safe_div;

/// Headline revenue, cost and break-even figures.
///
/// Only sales whose product still exists are counted, in gross revenue as well
/// as everywhere else. The variable cost charged against revenue is what was
/// spent on ingredient purchases, not the recipe cost of units sold; the
/// latter is reported separately as `cost_of_goods_sold`.
///
/// Both the configured global POS fee and the per-checkout automatic fee are
/// deducted from gross revenue.
pub fn dashboard_stats(state: &LedgerState, policy: &CalcPolicy) -> DashboardStats {
    let usage = state_usage(state, policy);
    let inventory = project_inventory(state, &usage);
    let total_var_cost: Decimal = inventory.iter().map(|r| r.total_cost).sum();

    let counted: Vec<(&Sale, &Product)> = state
        .sales
        .iter()
        .filter_map(|s| state.product(&s.product_id).map(|p| (s, p)))
        .collect();

    let mut gross_revenue = Decimal::ZERO;
    let mut tips_revenue = Decimal::ZERO;
    let mut specialty_deduction = Decimal::ZERO;
    let mut non_specialty_revenue = Decimal::ZERO;
    let mut cost_of_goods_sold = Decimal::ZERO;
    let mut total_units: u64 = 0;

    for (sale, product) in &counted {
        let revenue = sale.revenue();
        let qty = Decimal::from(sale.qty);
        gross_revenue += revenue;
        total_units += u64::from(sale.qty);

        if sale.product_id == policy.tips_product_id {
            tips_revenue += revenue;
        }
        if sale.product_id == policy.specialty_product_id {
            specialty_deduction += policy.specialty_deduction_per_unit * qty;
        } else {
            non_specialty_revenue += revenue;
        }
        cost_of_goods_sold += qty * product_cost_per_unit(state, product, Some(sale.date));
    }

    let auto = transaction_fees(counted.iter().map(|(s, _)| *s), &policy.auto_pos_fee);
    let pos_fees = state.settings.global_fee(gross_revenue);
    let net_revenue = gross_revenue - pos_fees - auto.total - specialty_deduction;

    let non_specialty_share = safe_div(non_specialty_revenue, gross_revenue);
    let revenue_excluding_specialty = non_specialty_revenue - pos_fees * non_specialty_share;

    let profit_before_fixed = net_revenue - total_var_cost;
    let fixed_total = state.fixed_total();
    let net_after_fixed = profit_before_fixed - fixed_total;
    let is_break_even = net_after_fixed >= Decimal::ZERO;
    let remaining_to_break_even = if is_break_even {
        Decimal::ZERO
    } else {
        -net_after_fixed
    };

    let total_waste_cost = state.waste_entries.iter().map(|w| w.estimated_cost).sum();

    DashboardStats {
        gross_revenue,
        net_revenue,
        revenue_excluding_specialty,
        tips_revenue,
        specialty_deduction,
        pos_fees,
        auto_pos_fees: auto.total,
        total_var_cost,
        cost_of_goods_sold,
        profit_before_fixed,
        fixed_total,
        net_after_fixed,
        remaining_to_break_even,
        is_break_even,
        total_units,
        strawberry_remaining_g: remaining_of(&inventory, ingredient_ids::STRAWBERRY),
        chocolate_remaining_g: remaining_of(&inventory, ingredient_ids::CHOCOLATE),
        kunafa_remaining_g: remaining_of(&inventory, ingredient_ids::KUNAFA),
        cups_remaining: remaining_of(&inventory, ingredient_ids::CUP),
        sticks_remaining: remaining_of(&inventory, ingredient_ids::STICKS),
        usage,
        total_waste_cost,
    }
}
