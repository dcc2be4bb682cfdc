//! Expense and settlement records
//!
//! This module defines the inputs accepted by the ledger engine and the
//! persisted records it produces. Expense records are immutable after
//! creation except for the informational `settled` flag; settlement records
//! are immutable outright. Both are append-only — no deletion path exists.

use crate::types::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// House identifier
///
/// Houses group the members who share expenses; every balance and record is
/// scoped to exactly one house.
pub type HouseId = String;

/// Member identifier
///
/// A stable identity value supplied by the external identity collaborator,
/// typically an email address.
pub type MemberId = String;

/// Expense identifier
pub type ExpenseId = Uuid;

/// A shared expense submitted by a request handler
///
/// `split_between` may or may not include the payer and may contain
/// duplicates; the split calculator deduplicates before any math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    /// House the expense belongs to
    pub house: HouseId,

    /// Member who paid the full amount up front
    pub paid_by: MemberId,

    /// Total amount paid (must be positive)
    pub amount: Money,

    /// Human-readable description ("groceries", "internet bill")
    pub description: String,

    /// Members sharing the expense equally
    pub split_between: Vec<MemberId>,
}

/// A persisted expense record
///
/// Created exactly once by `create_expense`; never updated afterwards apart
/// from the `settled` flag, and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique expense id
    pub id: ExpenseId,

    /// House the expense belongs to
    pub house_id: HouseId,

    /// Member who paid
    pub paid_by: MemberId,

    /// Total amount of the expense
    pub amount: Money,

    /// Human-readable description
    pub description: String,

    /// Deduplicated participant identities, in submission order
    ///
    /// Denormalized by value: the backing store has no referential
    /// integrity, so participants are copied into the record.
    pub split_between: Vec<MemberId>,

    /// Base equal share per participant
    ///
    /// When the amount does not divide evenly, the leftover cents are
    /// charged one each to the earliest participants; this field records
    /// the base (floor) share.
    pub amount_per_person: Money,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Informational flag; not load-bearing for any balance math
    pub settled: bool,
}

impl ExpenseRecord {
    /// Build a new record from a validated input and its computed split
    ///
    /// `split_between` is taken from the calculator's deduplicated share
    /// list, not from the raw input.
    pub fn new(
        input: &ExpenseInput,
        split_between: Vec<MemberId>,
        amount_per_person: Money,
    ) -> Self {
        ExpenseRecord {
            id: Uuid::new_v4(),
            house_id: input.house.clone(),
            paid_by: input.paid_by.clone(),
            amount: input.amount,
            description: input.description.clone(),
            split_between,
            amount_per_person,
            created_at: Utc::now(),
            settled: false,
        }
    }
}

/// A direct balance transfer between two members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementInput {
    /// House both members belong to
    pub house: HouseId,

    /// Member paying down what they owe
    pub from: MemberId,

    /// Member receiving the payment
    pub to: MemberId,

    /// Amount transferred (must be positive)
    pub amount: Money,

    /// Optional free-form note
    pub note: Option<String>,
}

/// A persisted settlement record
///
/// The audit trail for direct transfers: together with the expense log it
/// makes every balance reconstructible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Unique settlement id
    pub id: Uuid,

    /// House the settlement belongs to
    pub house_id: HouseId,

    /// Member who paid
    pub from: MemberId,

    /// Member who received
    pub to: MemberId,

    /// Amount transferred
    pub amount: Money,

    /// Optional free-form note
    pub note: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl SettlementRecord {
    /// Build a new record from a validated settlement input
    pub fn new(input: &SettlementInput) -> Self {
        SettlementRecord {
            id: Uuid::new_v4(),
            house_id: input.house.clone(),
            from: input.from.clone(),
            to: input.to.clone(),
            amount: input.amount,
            note: input.note.clone(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ExpenseInput {
        ExpenseInput {
            house: "house-1".to_string(),
            paid_by: "alice".to_string(),
            amount: Money::from_cents(9000),
            description: "dinner".to_string(),
            split_between: vec![
                "alice".to_string(),
                "bob".to_string(),
                "carol".to_string(),
            ],
        }
    }

    #[test]
    fn test_expense_record_copies_input_fields() {
        let input = sample_input();
        let record = ExpenseRecord::new(
            &input,
            input.split_between.clone(),
            Money::from_cents(3000),
        );

        assert_eq!(record.house_id, "house-1");
        assert_eq!(record.paid_by, "alice");
        assert_eq!(record.amount, Money::from_cents(9000));
        assert_eq!(record.amount_per_person, Money::from_cents(3000));
        assert_eq!(record.split_between.len(), 3);
        assert!(!record.settled);
    }

    #[test]
    fn test_expense_records_get_unique_ids() {
        let input = sample_input();
        let a = ExpenseRecord::new(&input, input.split_between.clone(), Money::ZERO);
        let b = ExpenseRecord::new(&input, input.split_between.clone(), Money::ZERO);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_settlement_record_copies_input_fields() {
        let input = SettlementInput {
            house: "house-1".to_string(),
            from: "bob".to_string(),
            to: "alice".to_string(),
            amount: Money::from_cents(3000),
            note: Some("rent".to_string()),
        };

        let record = SettlementRecord::new(&input);
        assert_eq!(record.from, "bob");
        assert_eq!(record.to, "alice");
        assert_eq!(record.amount, Money::from_cents(3000));
        assert_eq!(record.note.as_deref(), Some("rent"));
    }
}
