//! Replay commands
//!
//! A `LedgerCommand` is one row of the replay journal: either a shared
//! expense or a direct settlement. Commands are what the CSV readers yield
//! and what the batch processor partitions by house.

use crate::types::expense::{ExpenseInput, HouseId, SettlementInput};

/// One ledger operation to replay
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    /// Create a shared expense and apply its balance deltas
    Expense(ExpenseInput),

    /// Transfer a balance amount directly between two members
    Settle(SettlementInput),
}

impl LedgerCommand {
    /// The house this command is scoped to
    ///
    /// Used for partitioning: commands for the same house must stay in
    /// submission order, commands for different houses may run in parallel.
    pub fn house(&self) -> &HouseId {
        match self {
            LedgerCommand::Expense(input) => &input.house,
            LedgerCommand::Settle(input) => &input.house,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::money::Money;

    #[test]
    fn test_house_of_expense_command() {
        let command = LedgerCommand::Expense(ExpenseInput {
            house: "house-1".to_string(),
            paid_by: "alice".to_string(),
            amount: Money::from_cents(1000),
            description: "snacks".to_string(),
            split_between: vec!["alice".to_string()],
        });
        assert_eq!(command.house(), "house-1");
    }

    #[test]
    fn test_house_of_settle_command() {
        let command = LedgerCommand::Settle(SettlementInput {
            house: "house-2".to_string(),
            from: "bob".to_string(),
            to: "alice".to_string(),
            amount: Money::from_cents(500),
            note: None,
        });
        assert_eq!(command.house(), "house-2");
    }
}
