//! Synchronous replay strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the replay by coordinating between the SyncReader (for CSV
//! input) and the Ledger (for balance semantics).
//!
//! # Memory Efficiency
//!
//! Commands are streamed one at a time through the iterator interface, so
//! memory usage is O(houses + records), not O(journal_size).

use crate::core::{Ledger, UnknownParticipants};
use crate::io::csv_format::write_balances_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::LedgerCommand;
use std::io::Write;
use std::path::Path;

/// Synchronous replay strategy
///
/// Implements the ProcessingStrategy trait using single-threaded, streaming
/// replay. The strategy is Send + Sync so it can be handed around as a trait
/// object even though replay itself runs on one thread.
#[derive(Debug, Clone, Copy)]
pub struct SyncReplayStrategy {
    policy: UnknownParticipants,
}

impl SyncReplayStrategy {
    pub fn new(policy: UnknownParticipants) -> Self {
        SyncReplayStrategy { policy }
    }
}

impl ProcessingStrategy for SyncReplayStrategy {
    /// Replay the journal and write the final balance sheet
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Individual command errors are logged to stderr and replay continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let mut ledger = Ledger::with_policy(self.policy);

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(LedgerCommand::Expense(input)) => {
                    if let Err(e) = ledger.create_expense(input) {
                        eprintln!("Expense rejected: {}", e);
                    }
                }
                Ok(LedgerCommand::Settle(input)) => {
                    if let Err(e) = ledger.settle(input) {
                        eprintln!("Settlement rejected: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("CSV parsing error: {}", e);
                }
            }
        }

        write_balances_csv(&ledger.all_balances(), output)?;

        Ok(())
    }
}
