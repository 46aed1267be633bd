//! Automatic POS fees grouped by card transaction

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::policy::AutoPosFee;
use crate::models::{Sale, TransactionFee, TransactionFees};

/// Automatic POS fees, one per checkout.
///
/// POS lines are grouped by transaction id; a line without one is its own
/// group. Each group pays `fixed_charge + rate * group_revenue` exactly once,
/// and the fee is attributed to the first line seen. Manual sales pay nothing.
pub fn transaction_fees<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    fee: &AutoPosFee,
) -> TransactionFees {
    let mut groups: Vec<TransactionFee> = Vec::new();
    let mut by_key: HashMap<&'a str, usize> = HashMap::new();

    for sale in sales.into_iter().filter(|s| s.is_pos()) {
        let key = sale.transaction_key();
        match by_key.get(key) {
            Some(&idx) => {
                let group = &mut groups[idx];
                group.revenue += sale.revenue();
                group.line_count += 1;
            }
            None => {
                by_key.insert(key, groups.len());
                groups.push(TransactionFee {
                    key: key.to_string(),
                    revenue: sale.revenue(),
                    fee: Decimal::ZERO,
                    line_count: 1,
                    first_sale_id: sale.id.clone(),
                });
            }
        }
    }

    let mut total = Decimal::ZERO;
    for group in &mut groups {
        group.fee = fee.fee_for(group.revenue);
        total += group.fee;
    }

    TransactionFees {
        transactions: groups,
        total,
    }
}
