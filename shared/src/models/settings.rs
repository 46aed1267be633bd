//! Operator-configurable fee settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Keys under which settings are persisted
pub mod setting_keys {
    pub const POS_FEE_PERCENT: &str = "pos_fee_percent";
    pub const POS_FEE_MANUAL: &str = "pos_fee_manual";
    pub const USE_MANUAL_POS_FEE: &str = "use_manual_pos_fee";
    pub const MANUAL_INVENTORY_ADJUSTMENTS: &str = "manual_inventory_adjustments";
}

/// The global POS fee: either a flat manual amount or a percentage of gross
/// revenue. It applies to every sale regardless of origin and is charged in
/// addition to the automatic per-transaction fee on POS sales.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeeSettings {
    #[serde(default)]
    pub pos_fee_percent: Decimal,
    #[serde(default)]
    pub pos_fee_manual: Decimal,
    #[serde(default)]
    pub use_manual_pos_fee: bool,
}

impl FeeSettings {
    pub fn global_fee(&self, gross_revenue: Decimal) -> Decimal {
        if self.use_manual_pos_fee {
            self.pos_fee_manual
        } else {
            self.pos_fee_percent / Decimal::ONE_HUNDRED * gross_revenue
        }
    }

    pub fn apply(&mut self, patch: FeeSettingsPatch) {
        if let Some(percent) = patch.pos_fee_percent {
            self.pos_fee_percent = percent;
        }
        if let Some(manual) = patch.pos_fee_manual {
            self.pos_fee_manual = manual;
        }
        if let Some(use_manual) = patch.use_manual_pos_fee {
            self.use_manual_pos_fee = use_manual;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeeSettingsPatch {
    pub pos_fee_percent: Option<Decimal>,
    pub pos_fee_manual: Option<Decimal>,
    pub use_manual_pos_fee: Option<bool>,
}
