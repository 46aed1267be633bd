//! Per-sale ledger with running totals

use rust_decimal::Decimal;

use super::cost::strawberry_batch_for_date;
use super::fees::transaction_fees;
use super::policy::CalcPolicy;
use super::product_cost::product_cost_per_unit;
use crate::models::{LedgerRow, LedgerState, Sale, StrawberryBatch};

const DEFAULT_BATCH_LABEL: &str = "Default";

/// Every sale in date order (ties keep insertion order), numbered from 1, with
/// cumulative revenue and profit and the break-even position after each row.
///
/// Each row is costed as of its own date. A sale whose product was deleted
/// still appears with its revenue but zero cost and no automatic fee.
pub fn sales_ledger(state: &LedgerState, policy: &CalcPolicy) -> Vec<LedgerRow> {
    let mut sorted: Vec<&Sale> = state.sales.iter().collect();
    sorted.sort_by_key(|s| s.date);

    let fees = transaction_fees(
        sorted
            .iter()
            .copied()
            .filter(|s| state.products.contains_key(&s.product_id)),
        &policy.auto_pos_fee,
    );
    let fixed_total = state.fixed_total();

    let mut cumulative_revenue = Decimal::ZERO;
    let mut cumulative_profit = Decimal::ZERO;
    let mut rows = Vec::with_capacity(sorted.len());

    for (i, sale) in sorted.into_iter().enumerate() {
        let product = state.product(&sale.product_id);
        let qty = Decimal::from(sale.qty);
        let revenue = sale.revenue();
        let cost_per_unit = product
            .map(|p| product_cost_per_unit(state, p, Some(sale.date)))
            .unwrap_or(Decimal::ZERO);
        let var_cost = qty * cost_per_unit;
        let profit_before_fixed = revenue - var_cost;

        cumulative_revenue += revenue;
        cumulative_profit += profit_before_fixed;
        let net_after_fixed = cumulative_profit - fixed_total;
        let is_break_even = net_after_fixed >= Decimal::ZERO;

        let batch = strawberry_batch_for_date(&state.strawberry_batches, Some(sale.date));
        let piece_weight = batch
            .map(StrawberryBatch::avg_weight_per_piece)
            .unwrap_or(policy.default_piece_weight_g);

        let (strawberry_g, chocolate_g, kunafa_g) = match product {
            Some(p) if !p.use_manual_cost => (
                qty * p.recipe.strawberries_per_unit * piece_weight,
                qty * p.recipe.chocolate_g_per_unit,
                qty * p.recipe.kunafa_g_per_unit,
            ),
            _ => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        };

        rows.push(LedgerRow {
            index: i + 1,
            sale_id: sale.id.clone(),
            date: sale.date,
            product_id: sale.product_id.clone(),
            product_name: product
                .map(|p| p.name.clone())
                .unwrap_or_else(|| sale.product_id.clone()),
            qty: sale.qty,
            unit_price: sale.unit_price,
            origin: sale.origin,
            revenue,
            cost_per_unit,
            var_cost,
            profit_before_fixed,
            cumulative_revenue,
            cumulative_profit,
            net_after_fixed,
            is_break_even,
            remaining_to_break_even: if is_break_even {
                Decimal::ZERO
            } else {
                -net_after_fixed
            },
            strawberry_g,
            chocolate_g,
            kunafa_g,
            batch_used: batch
                .map(|b| b.name().to_string())
                .unwrap_or_else(|| DEFAULT_BATCH_LABEL.to_string()),
            pos_fee: fees.fee_for_line(&sale.id),
        });
    }

    rows
}
