//! Cost, inventory, fee and break-even calculators
//!
//! Every function here is pure: it borrows a [`LedgerState`](crate::LedgerState)
//! snapshot and a [`CalcPolicy`], and returns plain data. Recomputing from
//! scratch on each call is cheap at kiosk scale, so nothing is cached.
//!
//! Sales that point at a deleted product are skipped by every aggregation.
//! Products may be deleted without touching historical sales, so such gaps
//! are expected and are not errors.

mod as_of;
mod classifier;
mod cost;
mod fees;
mod inventory;
mod ledger;
mod policy;
mod product_cost;
mod stats;
mod usage;

pub use as_of::*;
pub use classifier::*;
pub use cost::*;
pub use fees::*;
pub use inventory::*;
pub use ledger::*;
pub use policy::*;
pub use product_cost::*;
pub use stats::*;
pub use usage::*;
