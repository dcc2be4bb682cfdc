//! Asynchronous batch replay strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. Commands
//! are read in batches and replayed with house-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncReplayStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── ReplayProcessor (house partitioning + task spawning)
//!     └── SharedLedger (thread-safe balance state)
//! ```
//!
//! # Ordering
//!
//! Batches are processed sequentially so a house whose commands span
//! multiple batches still replays in journal order. Within a batch, houses
//! are replayed in parallel; commands of one house stay in order.

use crate::core::{ReplayProcessor, SharedLedger, UnknownParticipants};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_balances_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch replay
///
/// Controls how commands are batched and the number of worker threads for
/// parallel replay within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of commands per batch
    pub batch_size: usize,
    /// Maximum number of batches processing concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to defaults for zero values
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch replay strategy
///
/// Uses a tokio multi-threaded runtime, an Arc-wrapped SharedLedger and a
/// ReplayProcessor that partitions each batch by house id.
#[derive(Debug, Clone)]
pub struct AsyncReplayStrategy {
    policy: UnknownParticipants,
    config: BatchConfig,
}

impl AsyncReplayStrategy {
    pub fn new(policy: UnknownParticipants, config: BatchConfig) -> Self {
        Self { policy, config }
    }
}

impl ProcessingStrategy for AsyncReplayStrategy {
    /// Replay the journal in batches and write the final balance sheet
    ///
    /// Fatal errors (file not found, runtime construction failure) are
    /// returned immediately. Rejected commands are logged to stderr and
    /// replay continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let balances = runtime.block_on(async {
            let ledger = Arc::new(SharedLedger::with_policy(self.policy));
            let processor = ReplayProcessor::new(Arc::clone(&ledger));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async works with futures::io readers, so wrap the tokio file
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            // Batches run one after another so per-house ordering holds
            // across the whole journal.
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for outcome in processor.process_batch(batch).await {
                    if let Err(e) = outcome.result {
                        eprintln!("Command rejected: {}", e);
                    }
                }
            }

            Ok::<_, String>(ledger.all_balances())
        })?;

        write_balances_csv(&balances, output)?;

        Ok(())
    }
}
