//! House Ledger Library
//! # Overview
//!
//! This library provides the shared-expense ledger core of a roommate
//! coordination service: equal-split expense booking, direct member-to-member
//! settlements, and a streaming CSV journal replayer with both a sync and an
//! async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Money, ExpenseRecord, SettlementRecord, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::split`] - Equal-share split calculation with remainder handling
//!   - [`core::house`] - Per-house balance state with atomic delta application
//!   - [`core::ledger`] - Single-threaded ledger frontend
//!   - [`core::shared`] - Thread-safe ledger and house-partitioned batch replay
//! - [`io`] - CSV journal parsing and balance sheet output
//! - [`strategy`] - Pluggable replay strategies (sync streaming, async batch)
//!
//! # Balance Semantics
//!
//! Every house is an independent zero-sum system:
//!
//! - **Expense**: the cost is divided equally among the participants; the
//!   payer is credited with what the others owe and each non-payer
//!   participant is debited one share
//! - **Settlement**: a direct transfer that moves balance from the paying
//!   member to the recipient, with no expense involved
//!
//! A positive balance means the house owes the member money; a negative
//! balance means the member owes the house. The sum of all balances in a
//! house is zero after every successfully applied command.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{compute_split, Ledger, SharedLedger, UnknownParticipants};
pub use io::write_balances_csv;
pub use types::{
    ExpenseId, ExpenseInput, ExpenseRecord, HouseId, LedgerCommand, LedgerError, MemberBalance,
    MemberId, Money, SettlementInput, SettlementRecord,
};
