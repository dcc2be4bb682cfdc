//! Types module
//!
//! Core data structures used throughout the ledger:
//! - `money`: integer-cent monetary amounts
//! - `balance`: per-member running balances
//! - `expense`: expense/settlement inputs and persisted records
//! - `command`: replay commands
//! - `error`: the ledger error taxonomy

pub mod balance;
pub mod command;
pub mod error;
pub mod expense;
pub mod money;

pub use balance::MemberBalance;
pub use command::LedgerCommand;
pub use error::LedgerError;
pub use expense::{
    ExpenseId, ExpenseInput, ExpenseRecord, HouseId, MemberId, SettlementInput, SettlementRecord,
};
pub use money::Money;
