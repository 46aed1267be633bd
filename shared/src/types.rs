//! Common types used across the ledger

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Generate a fresh record identifier with a short type prefix (`s-…`, `ib-…`)
pub fn new_record_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Divide, yielding zero instead of panicking on a zero denominator or a
/// quotient too large to represent
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Round a money amount for display (2 dp, half away from zero)
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a per-unit cost for display (4 dp)
pub fn round_unit_cost(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount the way the dashboard shows it, e.g. `1,234.50 AED`
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!(
        "{}{}.{} {}",
        if negative { "-" } else { "" },
        grouped,
        frac,
        currency
    )
}

/// Inclusive date range used to narrow reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(dec!(40), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(dec!(40), dec!(1000)), dec!(0.04));
    }

    #[test]
    fn test_safe_div_overflow_is_zero() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(safe_div(Decimal::MAX, tiny), Decimal::ZERO);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.5), "AED"), "1,234.50 AED");
        assert_eq!(format_currency(dec!(-10350), "AED"), "-10,350.00 AED");
        assert_eq!(format_currency(dec!(0.005), "AED"), "0.01 AED");
        assert_eq!(format_currency(Decimal::ZERO, "AED"), "0.00 AED");
    }

    #[test]
    fn test_new_record_id_prefix() {
        let id = new_record_id("sb");
        assert!(id.starts_with("sb-"));
        assert_ne!(id, new_record_id("sb"));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };
        assert!(range.contains(range.start));
        assert!(range.contains(range.end));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }
}
