//! Error types for the shared-expense ledger
//!
//! This module defines all errors that can occur while validating and
//! applying ledger operations.
//!
//! # Error Categories
//!
//! - **Validation errors**: rejected before any store write (invalid amount,
//!   empty split, self settlement, unknown identities)
//! - **Transaction errors**: a ledger write could not complete; balances are
//!   left exactly as they were and the caller may retry
//! - **Ingestion errors**: malformed CSV rows, I/O failures

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the ledger core
///
/// Validation variants are rejected synchronously before any balance write.
/// `StoreUnavailable` is transient and retryable. `PartialWriteDetected` is
/// never expected from a correct ledger: it is returned by the zero-sum
/// audit and indicates a ledger bug, not a user error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Expense or settlement amount is zero or negative
    #[error("amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount as a decimal string
        amount: String,
    },

    /// An expense was submitted with no participants
    #[error("split_between must contain at least one member")]
    EmptySplit,

    /// A split participant has no balance record in the house
    ///
    /// Only returned under the `Reject` unknown-participant policy; the
    /// default policy auto-provisions a zero balance instead.
    #[error("participant '{member}' has no balance record in house '{house}'")]
    UnknownParticipant {
        /// House the expense was scoped to
        house: String,
        /// The unresolvable member identity
        member: String,
    },

    /// A settlement recipient does not resolve to an existing member
    #[error("recipient '{member}' has no balance record in house '{house}'")]
    UnknownRecipient {
        /// House the settlement was scoped to
        house: String,
        /// The unresolvable recipient identity
        member: String,
    },

    /// A member attempted to settle a balance with themselves
    #[error("member '{member}' cannot settle with themselves")]
    SelfSettlement {
        /// The offending member identity
        member: String,
    },

    /// No expense with the given id exists in the house
    #[error("expense {id} not found in house '{house}'")]
    ExpenseNotFound {
        /// House that was searched
        house: String,
        /// The missing expense id
        id: Uuid,
    },

    /// A balance delta would overflow; the whole transaction is rejected
    #[error("arithmetic overflow in {operation} for member '{member}'")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Member whose balance was being updated
        member: String,
    },

    /// The backing store could not be reached (transient, retryable)
    #[error("store unavailable: {message}")]
    StoreUnavailable {
        /// Description of the underlying failure
        message: String,
    },

    /// The zero-sum audit found balances that do not sum to zero
    ///
    /// Every debit has a matching credit, so a non-zero house sum means a
    /// transaction was partially applied. This must never be user-visible
    /// in a correctly functioning ledger.
    #[error("partial write detected in house '{house}': balances sum to {sum}, expected 0.00")]
    PartialWriteDetected {
        /// House that failed the audit
        house: String,
        /// The observed (non-zero) sum as a decimal string
        sum: String,
    },

    /// A CSV row or amount string could not be parsed
    #[error("parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// I/O failures surface as the transient store error so callers treat them
// as retryable.
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::StoreUnavailable {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors keep call sites in the engine short.

impl LedgerError {
    /// Create an InvalidAmount error from a display-able amount
    pub fn invalid_amount(amount: impl std::fmt::Display) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an UnknownParticipant error
    pub fn unknown_participant(house: &str, member: &str) -> Self {
        LedgerError::UnknownParticipant {
            house: house.to_string(),
            member: member.to_string(),
        }
    }

    /// Create an UnknownRecipient error
    pub fn unknown_recipient(house: &str, member: &str) -> Self {
        LedgerError::UnknownRecipient {
            house: house.to_string(),
            member: member.to_string(),
        }
    }

    /// Create a SelfSettlement error
    pub fn self_settlement(member: &str) -> Self {
        LedgerError::SelfSettlement {
            member: member.to_string(),
        }
    }

    /// Create an ExpenseNotFound error
    pub fn expense_not_found(house: &str, id: Uuid) -> Self {
        LedgerError::ExpenseNotFound {
            house: house.to_string(),
            id,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, member: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            member: member.to_string(),
        }
    }

    /// Create a PartialWriteDetected error
    pub fn partial_write(house: &str, sum: impl std::fmt::Display) -> Self {
        LedgerError::PartialWriteDetected {
            house: house.to_string(),
            sum: sum.to_string(),
        }
    }

    /// Create a ParseError without line context
    pub fn parse(message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line: None,
            message: message.into(),
        }
    }
}
