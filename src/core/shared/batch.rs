//! Batch replay over the shared ledger
//!
//! Commands are partitioned by house id so each house replays in order on
//! its own task while distinct houses proceed concurrently. Ordering within
//! a house is what the balance semantics depend on; ordering across houses
//! does not matter because houses share no state.

use crate::core::shared::ledger::SharedLedger;
use crate::types::{HouseId, LedgerCommand, LedgerError};
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of replaying one command
#[derive(Debug)]
pub struct CommandOutcome {
    pub command: LedgerCommand,
    pub result: Result<(), LedgerError>,
}

/// Replays batches of ledger commands concurrently, partitioned by house
pub struct ReplayProcessor {
    ledger: Arc<SharedLedger>,
}

impl ReplayProcessor {
    pub fn new(ledger: Arc<SharedLedger>) -> Self {
        ReplayProcessor { ledger }
    }

    /// Group commands by house, preserving each house's arrival order
    fn partition_by_house(commands: Vec<LedgerCommand>) -> HashMap<HouseId, Vec<LedgerCommand>> {
        let mut partitions: HashMap<HouseId, Vec<LedgerCommand>> = HashMap::new();
        for command in commands {
            partitions
                .entry(command.house().clone())
                .or_default()
                .push(command);
        }
        partitions
    }

    /// Replay one house's commands in order
    fn process_house(ledger: &SharedLedger, commands: Vec<LedgerCommand>) -> Vec<CommandOutcome> {
        commands
            .into_iter()
            .map(|command| {
                let result = match &command {
                    LedgerCommand::Expense(input) => {
                        ledger.create_expense(input.clone()).map(|_| ())
                    }
                    LedgerCommand::Settle(input) => ledger.settle(input.clone()).map(|_| ()),
                };
                CommandOutcome { command, result }
            })
            .collect()
    }

    /// Replay a batch, one spawned task per house
    ///
    /// Rejected commands are reported in the outcomes, not surfaced as an
    /// error; callers decide whether to log or count them.
    pub async fn process_batch(&self, commands: Vec<LedgerCommand>) -> Vec<CommandOutcome> {
        let partitions = Self::partition_by_house(commands);

        let handles: Vec<_> = partitions
            .into_values()
            .map(|house_commands| {
                let ledger = Arc::clone(&self.ledger);
                tokio::spawn(async move { Self::process_house(&ledger, house_commands) })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(house_outcomes) => outcomes.extend(house_outcomes),
                Err(e) => eprintln!("house replay task failed: {}", e),
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExpenseInput, Money, SettlementInput};

    fn expense(house: &str, payer: &str, cents: i64, participants: &[&str]) -> LedgerCommand {
        LedgerCommand::Expense(ExpenseInput {
            house: house.to_string(),
            paid_by: payer.to_string(),
            amount: Money::from_cents(cents),
            description: "test".to_string(),
            split_between: participants.iter().map(|p| p.to_string()).collect(),
        })
    }

    fn settle(house: &str, from: &str, to: &str, cents: i64) -> LedgerCommand {
        LedgerCommand::Settle(SettlementInput {
            house: house.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            amount: Money::from_cents(cents),
            note: None,
        })
    }

    #[test]
    fn test_partition_preserves_per_house_order() {
        let commands = vec![
            expense("house-a", "alice", 100, &["alice", "bob"]),
            expense("house-b", "zoe", 200, &["zoe"]),
            expense("house-a", "bob", 300, &["alice", "bob"]),
        ];

        let partitions = ReplayProcessor::partition_by_house(commands);

        assert_eq!(partitions.len(), 2);
        let house_a = &partitions[&"house-a".to_string()];
        assert_eq!(house_a.len(), 2);
        match (&house_a[0], &house_a[1]) {
            (LedgerCommand::Expense(first), LedgerCommand::Expense(second)) => {
                assert_eq!(first.paid_by, "alice");
                assert_eq!(second.paid_by, "bob");
            }
            _ => panic!("expected expense commands"),
        }
    }

    #[tokio::test]
    async fn test_batch_replays_expense_then_settlement_in_order() {
        let ledger = Arc::new(SharedLedger::new());
        let processor = ReplayProcessor::new(Arc::clone(&ledger));

        let outcomes = processor
            .process_batch(vec![
                expense("house-1", "alice", 9000, &["alice", "bob", "carol"]),
                settle("house-1", "bob", "alice", 3000),
            ])
            .await;

        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        let house = "house-1".to_string();
        assert_eq!(
            ledger.balance_of(&house, &"alice".to_string()),
            Money::from_cents(3000)
        );
        assert_eq!(ledger.balance_of(&house, &"bob".to_string()), Money::ZERO);
    }

    #[tokio::test]
    async fn test_rejected_commands_reported_without_aborting_batch() {
        let ledger = Arc::new(SharedLedger::new());
        let processor = ReplayProcessor::new(Arc::clone(&ledger));

        let outcomes = processor
            .process_batch(vec![
                expense("house-1", "alice", -100, &["alice", "bob"]),
                expense("house-1", "alice", 6000, &["alice", "bob"]),
            ])
            .await;

        let failures: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            ledger.balance_of(&"house-1".to_string(), &"alice".to_string()),
            Money::from_cents(3000)
        );
    }

    #[tokio::test]
    async fn test_batch_processes_houses_independently() {
        let ledger = Arc::new(SharedLedger::new());
        let processor = ReplayProcessor::new(Arc::clone(&ledger));

        let commands: Vec<_> = (0..10)
            .flat_map(|i| {
                vec![
                    expense(&format!("house-{}", i % 3), "alice", 900, &["alice", "bob"]),
                ]
            })
            .collect();

        let outcomes = processor.process_batch(commands).await;

        assert_eq!(outcomes.len(), 10);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        for i in 0..3 {
            assert!(ledger.audit(&format!("house-{}", i)).is_ok());
        }
    }
}
