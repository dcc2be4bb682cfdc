//! Member balance state
//!
//! One balance record exists per (house, member) pair. Records are created
//! at zero the first time a member is observed, mutated only through the
//! ledger's atomic transactions, and never deleted while the member remains
//! in the house.

use crate::types::expense::MemberId;
use crate::types::money::Money;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Running balance for one member within a house
///
/// Positive means the house owes the member money; negative means the
/// member owes the house. The zero-sum invariant — balances of a house sum
/// to zero after every completed ledger operation — is a derived property
/// verified by the audit operation and the test suite, never enforced here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberBalance {
    /// The member this balance belongs to
    pub member: MemberId,

    /// Signed running balance in cents
    pub balance: Money,

    /// Timestamp of the last mutation
    pub last_updated: DateTime<Utc>,
}

impl MemberBalance {
    /// Create a zero balance for a newly observed member
    pub fn new(member: MemberId) -> Self {
        MemberBalance {
            member,
            balance: Money::ZERO,
            last_updated: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_balance_starts_at_zero() {
        let balance = MemberBalance::new("alice".to_string());
        assert_eq!(balance.member, "alice");
        assert_eq!(balance.balance, Money::ZERO);
    }
}
