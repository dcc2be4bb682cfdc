//! Per-house ledger state
//!
//! This module provides `HouseLedger`, the unit of atomicity for all balance
//! mutations: member balances plus the append-only expense and settlement
//! logs of one house.
//!
//! # Atomicity
//!
//! `apply_deltas` is the only write path for balances. It runs in two
//! phases: every delta is first staged (member resolved, new balance
//! computed with checked arithmetic) and only if the whole set stages
//! cleanly are the balances written. A failure in the staging phase returns
//! an error with no state touched, so a transaction can never be partially
//! applied. Deltas are relative amounts — the engine never performs a
//! read-compute-absolute-write cycle that could race across requests.

use crate::types::{
    ExpenseId, ExpenseRecord, HouseId, LedgerError, MemberBalance, MemberId, Money,
    SettlementRecord,
};
use chrono::Utc;
use std::collections::HashMap;

/// Policy for split participants with no existing balance record
///
/// Silently skipping an unknown participant would break the zero-sum
/// invariant, so the ledger either provisions the member or rejects the
/// whole expense. Provisioning is the default because it always preserves
/// the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownParticipants {
    /// Create a zero-balance record for the member, then apply the delta
    #[default]
    Provision,

    /// Reject the whole operation with `UnknownParticipant`
    Reject,
}

/// Balances and transaction logs for a single house
///
/// All mutations of a house's balances go through one `HouseLedger` value;
/// whoever holds it exclusively (a `&mut` borrow in the sync engine, a
/// DashMap entry guard in the shared engine) holds the house's transaction
/// boundary.
#[derive(Debug, Default)]
pub struct HouseLedger {
    /// One balance record per member, created on first observation
    balances: HashMap<MemberId, MemberBalance>,

    /// Append-only expense log, oldest first
    expenses: Vec<ExpenseRecord>,

    /// Append-only settlement log, oldest first
    settlements: Vec<SettlementRecord>,
}

impl HouseLedger {
    /// Create an empty house ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the member has a balance record
    pub fn has_member(&self, member: &MemberId) -> bool {
        self.balances.contains_key(member)
    }

    /// Create a zero-balance record for the member if none exists
    pub fn register_member(&mut self, member: &MemberId) {
        self.balances
            .entry(member.clone())
            .or_insert_with_key(|m| MemberBalance::new(m.clone()));
    }

    /// The member's current balance; zero if no record exists
    pub fn balance(&self, member: &MemberId) -> Money {
        self.balances
            .get(member)
            .map(|record| record.balance)
            .unwrap_or(Money::ZERO)
    }

    /// All balance records sorted by member identity
    pub fn balances(&self) -> Vec<MemberBalance> {
        let mut records: Vec<MemberBalance> = self.balances.values().cloned().collect();
        records.sort_by(|a, b| a.member.cmp(&b.member));
        records
    }

    /// Apply a set of balance deltas as one atomic unit
    ///
    /// Callers must pass each member at most once per call (the split
    /// calculator and the settlement path both guarantee this).
    ///
    /// # Arguments
    ///
    /// * `house` - House id, for error context only
    /// * `deltas` - Relative balance changes, one per distinct member
    /// * `policy` - What to do when a member has no balance record
    ///
    /// # Errors
    ///
    /// * `UnknownParticipant` under the `Reject` policy
    /// * `ArithmeticOverflow` if any new balance is unrepresentable
    ///
    /// On any error, no balance has been modified.
    pub fn apply_deltas(
        &mut self,
        house: &HouseId,
        deltas: &[(MemberId, Money)],
        policy: UnknownParticipants,
    ) -> Result<(), LedgerError> {
        // Phase 1: stage every write, failing before anything is touched
        let mut staged: Vec<(MemberId, Money)> = Vec::with_capacity(deltas.len());
        for (member, delta) in deltas {
            let current = match self.balances.get(member) {
                Some(record) => record.balance,
                None => match policy {
                    UnknownParticipants::Provision => Money::ZERO,
                    UnknownParticipants::Reject => {
                        return Err(LedgerError::unknown_participant(house, member));
                    }
                },
            };

            let updated = current
                .checked_add(*delta)
                .ok_or_else(|| LedgerError::arithmetic_overflow("apply_deltas", member))?;

            staged.push((member.clone(), updated));
        }

        // Phase 2: commit all staged balances
        let now = Utc::now();
        for (member, updated) in staged {
            let record = self
                .balances
                .entry(member)
                .or_insert_with_key(|m| MemberBalance::new(m.clone()));
            record.balance = updated;
            record.last_updated = now;
        }

        Ok(())
    }

    /// Append an expense record to the house log
    pub fn record_expense(&mut self, record: ExpenseRecord) {
        self.expenses.push(record);
    }

    /// Append a settlement record to the house log
    pub fn record_settlement(&mut self, record: SettlementRecord) {
        self.settlements.push(record);
    }

    /// Expense records, newest first
    pub fn expenses_newest_first(&self) -> Vec<ExpenseRecord> {
        self.expenses.iter().rev().cloned().collect()
    }

    /// Settlement records, newest first
    pub fn settlements_newest_first(&self) -> Vec<SettlementRecord> {
        self.settlements.iter().rev().cloned().collect()
    }

    /// Flip the informational `settled` flag on an expense
    pub fn mark_settled(&mut self, house: &HouseId, id: ExpenseId) -> Result<(), LedgerError> {
        let record = self
            .expenses
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| LedgerError::expense_not_found(house, id))?;
        record.settled = true;
        Ok(())
    }

    /// Verify the zero-sum invariant for this house
    ///
    /// A non-zero sum means some transaction was partially applied — a
    /// ledger bug, reported as `PartialWriteDetected`.
    pub fn audit_zero_sum(&self, house: &HouseId) -> Result<(), LedgerError> {
        let mut sum = Money::ZERO;
        for record in self.balances.values() {
            sum = sum
                .checked_add(record.balance)
                .ok_or_else(|| LedgerError::arithmetic_overflow("audit_zero_sum", &record.member))?;
        }

        if sum.is_zero() {
            Ok(())
        } else {
            Err(LedgerError::partial_write(house, sum))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house_id() -> HouseId {
        "house-1".to_string()
    }

    fn deltas(pairs: &[(&str, i64)]) -> Vec<(MemberId, Money)> {
        pairs
            .iter()
            .map(|(member, cents)| (member.to_string(), Money::from_cents(*cents)))
            .collect()
    }

    #[test]
    fn test_balance_defaults_to_zero() {
        let house = HouseLedger::new();
        assert_eq!(house.balance(&"alice".to_string()), Money::ZERO);
    }

    #[test]
    fn test_apply_deltas_provisions_unknown_members() {
        let mut house = HouseLedger::new();

        house
            .apply_deltas(
                &house_id(),
                &deltas(&[("alice", 6000), ("bob", -3000), ("carol", -3000)]),
                UnknownParticipants::Provision,
            )
            .unwrap();

        assert_eq!(house.balance(&"alice".to_string()), Money::from_cents(6000));
        assert_eq!(house.balance(&"bob".to_string()), Money::from_cents(-3000));
        assert_eq!(house.balance(&"carol".to_string()), Money::from_cents(-3000));
        assert!(house.audit_zero_sum(&house_id()).is_ok());
    }

    #[test]
    fn test_apply_deltas_rejects_unknown_members_under_reject_policy() {
        let mut house = HouseLedger::new();
        house.register_member(&"alice".to_string());

        let result = house.apply_deltas(
            &house_id(),
            &deltas(&[("alice", 3000), ("bob", -3000)]),
            UnknownParticipants::Reject,
        );

        assert!(matches!(
            result,
            Err(LedgerError::UnknownParticipant { .. })
        ));
        // the known member's balance was not touched either
        assert_eq!(house.balance(&"alice".to_string()), Money::ZERO);
    }

    #[test]
    fn test_apply_deltas_accumulates_across_calls() {
        let mut house = HouseLedger::new();
        let policy = UnknownParticipants::Provision;

        house
            .apply_deltas(&house_id(), &deltas(&[("alice", 6000), ("bob", -6000)]), policy)
            .unwrap();
        house
            .apply_deltas(&house_id(), &deltas(&[("alice", -2500), ("bob", 2500)]), policy)
            .unwrap();

        assert_eq!(house.balance(&"alice".to_string()), Money::from_cents(3500));
        assert_eq!(house.balance(&"bob".to_string()), Money::from_cents(-3500));
    }

    #[test]
    fn test_overflow_rolls_back_whole_transaction() {
        let mut house = HouseLedger::new();
        let policy = UnknownParticipants::Provision;

        // Push bob's balance to the representable maximum
        house
            .apply_deltas(
                &house_id(),
                &[("bob".to_string(), Money::MAX)],
                policy,
            )
            .unwrap();

        // alice's delta stages fine; bob's overflows — nothing may change
        let result = house.apply_deltas(
            &house_id(),
            &deltas(&[("alice", 100), ("bob", 100)]),
            policy,
        );

        assert!(matches!(
            result,
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
        assert_eq!(house.balance(&"alice".to_string()), Money::ZERO);
        assert_eq!(house.balance(&"bob".to_string()), Money::MAX);
    }

    #[test]
    fn test_audit_detects_non_zero_sum() {
        let mut house = HouseLedger::new();
        house
            .apply_deltas(
                &house_id(),
                &deltas(&[("alice", 30)]),
                UnknownParticipants::Provision,
            )
            .unwrap();

        let result = house.audit_zero_sum(&house_id());
        assert_eq!(result, Err(LedgerError::partial_write(&house_id(), "0.30")));
    }

    #[test]
    fn test_balances_sorted_by_member() {
        let mut house = HouseLedger::new();
        house.register_member(&"carol".to_string());
        house.register_member(&"alice".to_string());
        house.register_member(&"bob".to_string());

        let members: Vec<_> = house.balances().into_iter().map(|b| b.member).collect();
        assert_eq!(members, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_register_member_is_idempotent() {
        let mut house = HouseLedger::new();
        let alice = "alice".to_string();

        house.register_member(&alice);
        house
            .apply_deltas(
                &house_id(),
                &deltas(&[("alice", 500)]),
                UnknownParticipants::Reject,
            )
            .unwrap();
        house.register_member(&alice);

        // re-registering must not reset the balance
        assert_eq!(house.balance(&alice), Money::from_cents(500));
    }
}
