//! Thread-safe ledger for concurrent request handling
//!
//! `SharedLedger` provides the same operations as [`crate::core::Ledger`]
//! with `&self` receivers, backed by a `DashMap` keyed by house id.
//!
//! # Transaction boundary
//!
//! The DashMap entry guard for a house is held for the whole of every write
//! operation, so all balance deltas of one expense or settlement — and the
//! record append that belongs with them — commit as a single unit. A
//! concurrently issued read never observes a partially applied expense, and
//! two writes touching the same house are serialized. Operations on
//! different houses proceed in parallel without any global lock.

use crate::core::house::{HouseLedger, UnknownParticipants};
use crate::core::split::compute_split;
use crate::types::{
    ExpenseId, ExpenseInput, ExpenseRecord, HouseId, LedgerError, MemberBalance, MemberId, Money,
    SettlementInput, SettlementRecord,
};
use dashmap::DashMap;

/// Concurrent shared-expense ledger
///
/// Safe to share across threads and async tasks behind an `Arc`. Per-house
/// writes are serialized by the map's entry locking; there is no coordination
/// across houses because none is needed — the zero-sum invariant is scoped
/// to a single house.
#[derive(Debug, Default)]
pub struct SharedLedger {
    houses: DashMap<HouseId, HouseLedger>,
    policy: UnknownParticipants,
}

impl SharedLedger {
    /// Create a shared ledger with the default (provisioning) policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared ledger with an explicit unknown-participant policy
    pub fn with_policy(policy: UnknownParticipants) -> Self {
        SharedLedger {
            houses: DashMap::new(),
            policy,
        }
    }

    /// Create a shared expense and apply its balance deltas atomically
    ///
    /// Same contract as [`crate::core::Ledger::create_expense`]; the house
    /// entry lock makes the deltas plus the record append one atomic unit.
    pub fn create_expense(&self, input: ExpenseInput) -> Result<ExpenseRecord, LedgerError> {
        let split = compute_split(input.amount, &input.split_between, &input.paid_by)?;
        let deltas = split.deltas(&input.paid_by);

        let mut house = self.houses.entry(input.house.clone()).or_default();
        house.apply_deltas(&input.house, &deltas, self.policy)?;

        let record = ExpenseRecord::new(&input, split.participants(), split.per_person_share);
        house.record_expense(record.clone());

        debug_assert!(house.audit_zero_sum(&input.house).is_ok());
        Ok(record)
    }

    /// Transfer a balance amount directly between two members
    ///
    /// Same contract as [`crate::core::Ledger::settle`].
    pub fn settle(&self, input: SettlementInput) -> Result<SettlementRecord, LedgerError> {
        if !input.amount.is_positive() {
            return Err(LedgerError::invalid_amount(input.amount));
        }
        if input.from == input.to {
            return Err(LedgerError::self_settlement(&input.from));
        }

        let mut house = self
            .houses
            .get_mut(&input.house)
            .ok_or_else(|| LedgerError::unknown_recipient(&input.house, &input.to))?;
        if !house.has_member(&input.to) {
            return Err(LedgerError::unknown_recipient(&input.house, &input.to));
        }

        let deltas = [
            (input.from.clone(), input.amount),
            (input.to.clone(), -input.amount),
        ];
        house.apply_deltas(&input.house, &deltas, UnknownParticipants::Provision)?;

        let record = SettlementRecord::new(&input);
        house.record_settlement(record.clone());

        debug_assert!(house.audit_zero_sum(&input.house).is_ok());
        Ok(record)
    }

    /// Create a zero-balance record for a member joining a house
    pub fn register_member(&self, house: &HouseId, member: &MemberId) {
        self.houses
            .entry(house.clone())
            .or_default()
            .register_member(member);
    }

    /// A member's current balance; zero if the house or member is unknown
    pub fn balance_of(&self, house: &HouseId, member: &MemberId) -> Money {
        self.houses
            .get(house)
            .map(|h| h.balance(member))
            .unwrap_or(Money::ZERO)
    }

    /// All balance records of a house, sorted by member identity
    pub fn house_balances(&self, house: &HouseId) -> Vec<MemberBalance> {
        self.houses
            .get(house)
            .map(|h| h.balances())
            .unwrap_or_default()
    }

    /// Expense records of a house, newest first
    pub fn expenses(&self, house: &HouseId) -> Vec<ExpenseRecord> {
        self.houses
            .get(house)
            .map(|h| h.expenses_newest_first())
            .unwrap_or_default()
    }

    /// Settlement records of a house, newest first
    pub fn settlements(&self, house: &HouseId) -> Vec<SettlementRecord> {
        self.houses
            .get(house)
            .map(|h| h.settlements_newest_first())
            .unwrap_or_default()
    }

    /// Flip the informational `settled` flag on an expense
    pub fn mark_settled(&self, house: &HouseId, id: ExpenseId) -> Result<(), LedgerError> {
        let mut house_ledger = self
            .houses
            .get_mut(house)
            .ok_or_else(|| LedgerError::expense_not_found(house, id))?;
        house_ledger.mark_settled(house, id)
    }

    /// Verify the zero-sum invariant for one house
    pub fn audit(&self, house: &HouseId) -> Result<(), LedgerError> {
        match self.houses.get(house) {
            Some(house_ledger) => house_ledger.audit_zero_sum(house),
            None => Ok(()),
        }
    }

    /// Every balance record across all houses, sorted by house then member
    pub fn all_balances(&self) -> Vec<(HouseId, MemberBalance)> {
        let mut all: Vec<(HouseId, MemberBalance)> = self
            .houses
            .iter()
            .flat_map(|entry| {
                let house = entry.key().clone();
                entry
                    .value()
                    .balances()
                    .into_iter()
                    .map(move |balance| (house.clone(), balance))
                    .collect::<Vec<_>>()
            })
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.member.cmp(&b.1.member)));
        all
    }
}
