//! House Ledger CLI
//!
//! Command-line interface for replaying shared-expense journals from CSV
//! files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- journal.csv > balances.csv
//! cargo run -- --strategy sync journal.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 journal.csv > balances.csv
//! cargo run -- --unknown-participants reject journal.csv > balances.csv
//! ```
//!
//! The program reads expense and settlement commands from the input CSV
//! journal, replays them through the ledger using the selected strategy, and
//! writes the final per-house member balances to stdout.
//!
//! # Replay Strategies
//!
//! - **sync**: Streaming single-threaded replay
//! - **async**: Batch replay with per-house parallelism (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use house_ledger::cli;
use house_ledger::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        let policy = args.policy();
        strategy::create_strategy(args.strategy, policy, config)
    };

    // Rejected commands go to stderr inside the strategy; only fatal errors
    // land here.
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
