//! Single-threaded ledger engine
//!
//! `Ledger` orchestrates the split calculator and the per-house state: it
//! validates an operation, applies its balance deltas atomically, and only
//! then appends the persisted record. An error at any point leaves both the
//! balances and the logs untouched.
//!
//! For concurrent request handling see [`crate::core::shared::SharedLedger`],
//! which exposes the same operations over thread-safe state.

use crate::core::house::{HouseLedger, UnknownParticipants};
use crate::core::split::compute_split;
use crate::types::{
    ExpenseId, ExpenseInput, ExpenseRecord, HouseId, LedgerError, MemberBalance, MemberId, Money,
    SettlementInput, SettlementRecord,
};
use std::collections::HashMap;

/// In-memory shared-expense ledger for any number of houses
pub struct Ledger {
    houses: HashMap<HouseId, HouseLedger>,
    policy: UnknownParticipants,
}

impl Ledger {
    /// Create a ledger with the default (provisioning) participant policy
    pub fn new() -> Self {
        Self::with_policy(UnknownParticipants::default())
    }

    /// Create a ledger with an explicit unknown-participant policy
    pub fn with_policy(policy: UnknownParticipants) -> Self {
        Ledger {
            houses: HashMap::new(),
            policy,
        }
    }

    /// Create a shared expense and apply its balance deltas atomically
    ///
    /// The payer is credited their net (`amount` minus their own share) and
    /// every other participant is debited their share, all inside one
    /// transaction together with the expense record itself.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` if the amount is not positive
    /// * `EmptySplit` if no participants remain after deduplication
    /// * `UnknownParticipant` under the `Reject` policy
    /// * `ArithmeticOverflow` if any balance would overflow
    ///
    /// On error no balance is changed and no record is stored.
    pub fn create_expense(&mut self, input: ExpenseInput) -> Result<ExpenseRecord, LedgerError> {
        let split = compute_split(input.amount, &input.split_between, &input.paid_by)?;
        let deltas = split.deltas(&input.paid_by);

        let house = self.houses.entry(input.house.clone()).or_default();
        house.apply_deltas(&input.house, &deltas, self.policy)?;

        let record = ExpenseRecord::new(&input, split.participants(), split.per_person_share);
        house.record_expense(record.clone());

        debug_assert!(house.audit_zero_sum(&input.house).is_ok());
        Ok(record)
    }

    /// Transfer a balance amount directly between two members
    ///
    /// Sign convention: paying down what you owe moves your balance toward
    /// zero/positive (`balance[from] += amount`), and receiving payment
    /// reduces what the house owes you (`balance[to] -= amount`).
    ///
    /// The payer is provisioned on first contact (they are the
    /// authenticated caller); the recipient must already have a balance
    /// record in the house.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` if the amount is not positive
    /// * `SelfSettlement` if `from == to`
    /// * `UnknownRecipient` if the recipient (or the house) does not resolve
    /// * `ArithmeticOverflow` if either balance would overflow
    pub fn settle(&mut self, input: SettlementInput) -> Result<SettlementRecord, LedgerError> {
        if !input.amount.is_positive() {
            return Err(LedgerError::invalid_amount(input.amount));
        }
        if input.from == input.to {
            return Err(LedgerError::self_settlement(&input.from));
        }

        let house = self
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
    pub fn register_member(&mut self, house: &HouseId, member: &MemberId) {
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
    pub fn mark_settled(&mut self, house: &HouseId, id: ExpenseId) -> Result<(), LedgerError> {
        let house_ledger = self
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
    ///
    /// This is the deterministic snapshot the replay CLI writes out.
    pub fn all_balances(&self) -> Vec<(HouseId, MemberBalance)> {
        let mut all: Vec<(HouseId, MemberBalance)> = self
            .houses
            .iter()
            .flat_map(|(house, ledger)| {
                ledger
                    .balances()
                    .into_iter()
                    .map(move |balance| (house.clone(), balance))
            })
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.member.cmp(&b.1.member)));
        all
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
