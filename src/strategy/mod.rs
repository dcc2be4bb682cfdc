//! Processing strategy module for journal replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! encompassing CSV journal parsing and ledger command processing. This allows
//! different replay implementations (synchronous, asynchronous batch) to be
//! selected at runtime.

use crate::cli::StrategyType;
use crate::core::UnknownParticipants;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncReplayStrategy, BatchConfig};
pub use sync::SyncReplayStrategy;

/// Processing strategy trait for complete replay pipelines
///
/// Each strategy reads ledger commands from a CSV journal, replays them
/// through a ledger, and writes the resulting balance sheet to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Replay commands from the input journal and write the balance sheet
    ///
    /// # Returns
    ///
    /// * `Ok(())` if replay completed (possibly with recoverable errors)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error)
    ///
    /// Individual command errors are logged to stderr and replay continues
    /// with the next command.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory function selecting the replay implementation at runtime. The
/// unknown-participant policy is passed through to the underlying ledger;
/// the batch configuration applies to the async strategy only.
pub fn create_strategy(
    strategy_type: StrategyType,
    policy: UnknownParticipants,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReplayStrategy::new(policy)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncReplayStrategy::new(policy, config))
        }
    }
}
