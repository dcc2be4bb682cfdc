//! Concurrent ledger components for the async replay path

pub mod batch;
pub mod ledger;

pub use batch::{CommandOutcome, ReplayProcessor};
pub use ledger::SharedLedger;
