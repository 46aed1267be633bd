//! Services for the Kiosk Ledger server

pub mod ledger;
pub mod reporting;

pub use ledger::LedgerService;
pub use reporting::ReportingService;
