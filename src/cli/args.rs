use crate::core::UnknownParticipants;
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay a shared-expense journal and print the resulting balance sheet
#[derive(Parser, Debug)]
#[command(name = "house-ledger")]
#[command(about = "Replay a shared-expense journal and print member balances", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing the command journal
    #[arg(value_name = "INPUT", help = "Path to the input CSV journal")]
    pub input_file: PathBuf,

    /// Replay strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Replay strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// How to treat expense participants without a balance record
    #[arg(
        long = "unknown-participants",
        value_name = "POLICY",
        default_value = "provision",
        help = "Unknown participant policy: 'provision' to auto-create members, 'reject' to refuse the expense"
    )]
    pub unknown_participants: UnknownParticipantsArg,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent batches (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of batches processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available replay strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// CLI-facing mirror of [`UnknownParticipants`]
#[derive(Clone, Debug, ValueEnum)]
pub enum UnknownParticipantsArg {
    Provision,
    Reject,
}

impl From<UnknownParticipantsArg> for UnknownParticipants {
    fn from(arg: UnknownParticipantsArg) -> Self {
        match arg {
            UnknownParticipantsArg::Provision => UnknownParticipants::Provision,
            UnknownParticipantsArg::Reject => UnknownParticipants::Reject,
        }
    }
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Uses the CLI values if provided, falling back to defaults. Zero
    /// values are reported to stderr and replaced with defaults by
    /// [`BatchConfig::new`].
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Unknown-participant policy as the core type
    pub fn policy(&self) -> UnknownParticipants {
        self.unknown_participants.clone().into()
    }
}
