//! Domain models for the Kiosk Ledger

mod fixed_cost;
mod ingredient;
mod product;
mod report;
mod sale;
mod settings;
mod state;
mod strawberry;
mod waste;

pub use fixed_cost::*;
pub use ingredient::*;
pub use product::*;
pub use report::*;
pub use sale::*;
pub use settings::*;
pub use state::*;
pub use strawberry::*;
pub use waste::*;
