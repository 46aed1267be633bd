//! HTTP request handlers

pub mod fixed_costs;
pub mod health;
pub mod ingredients;
pub mod products;
pub mod reporting;
pub mod sales;
pub mod settings;

pub use fixed_costs::*;
pub use health::*;
pub use ingredients::*;
pub use products::*;
pub use reporting::*;
pub use sales::*;
pub use settings::*;
