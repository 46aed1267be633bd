//! Shared types, models and the calculation engine for the Kiosk Ledger
//!
//! This crate contains the record types shared between the backend, the
//! browser front-end (via WASM) and the tests, plus the pure cost, inventory,
//! fee and break-even calculators. Nothing in here performs I/O.

pub mod calc;
pub mod models;
pub mod types;
pub mod validation;

pub use calc::*;
pub use models::*;
pub use types::*;
pub use validation::*;
