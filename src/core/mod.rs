//! Core ledger logic: split calculation, per-house balance state, and the
//! single-threaded and concurrent ledger frontends

pub mod house;
pub mod ledger;
pub mod shared;
pub mod split;

pub use house::{HouseLedger, UnknownParticipants};
pub use ledger::Ledger;
pub use shared::{CommandOutcome, ReplayProcessor, SharedLedger};
pub use split::{compute_split, Split};
