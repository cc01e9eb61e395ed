//! Asynchronous batch replay strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Operation records are read in batches and dealt
//! to worker tasks that all drive the same shared account at once.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, workers)
//!     ├── AsyncReader (batch CSV reading)
//!     └── ReplayEngine (cloned into every worker)
//!         └── Arc<Account> (one mutex-guarded balance)
//! ```
//!
//! # Ordering
//!
//! - Batches run one after another; a batch finishes before the next is read.
//! - Within a batch, records are dealt round-robin to `workers` blocking tasks
//!   and the account lock serializes them in whatever order they arrive.
//! - The final balance matches a sequential replay whenever no rejection
//!   depends on that order (for example, a withdrawal racing the deposit
//!   that would have covered it).

use crate::core::ReplayEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_summary_csv;
use crate::strategy::{apply_record, open_engine, ProcessingStrategy};
use crate::types::{Amount, OperationRecord, ReplaySummary};
use std::io::Write;
use std::path::Path;

/// Largest accepted batch size
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Largest accepted worker count
pub const MAX_WORKERS: usize = 256;

/// Configuration for batch replay
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Number of workers applying a batch concurrently
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            workers: num_cpus::get().min(MAX_WORKERS),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are replaced by the defaults. Values above
    /// [`MAX_BATCH_SIZE`] or [`MAX_WORKERS`] are lowered to those limits.
    pub fn new(batch_size: usize, workers: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else if batch_size > MAX_BATCH_SIZE {
            tracing::warn!(batch_size, max = MAX_BATCH_SIZE, "batch size too large, clamping");
            MAX_BATCH_SIZE
        } else {
            batch_size
        };

        let workers = if workers == 0 {
            tracing::warn!(
                workers,
                default = default.workers,
                "invalid worker count, using default"
            );
            default.workers
        } else if workers > MAX_WORKERS {
            tracing::warn!(workers, max = MAX_WORKERS, "worker count too large, clamping");
            MAX_WORKERS
        } else {
            workers
        };

        Self {
            batch_size,
            workers,
        }
    }
}

/// Asynchronous batch replay strategy
///
/// # Configuration
///
/// - `batch_size`: Number of operations per batch (default: 1000)
/// - `workers`: Runtime worker threads and tasks per batch (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy<A: Amount = f64> {
    initial_balance: A,
    config: BatchConfig,
}

impl<A: Amount> AsyncProcessingStrategy<A> {
    /// Create a new AsyncProcessingStrategy
    pub fn new(initial_balance: A, config: BatchConfig) -> Self {
        Self {
            initial_balance,
            config,
        }
    }
}

impl<A: Amount> ProcessingStrategy for AsyncProcessingStrategy<A> {
    /// Replay operations with concurrent workers
    ///
    /// 1. Creates a tokio multi-threaded runtime with `workers` threads
    /// 2. Opens the account and reads the CSV in batches
    /// 3. Applies each batch across worker tasks, waiting for all of them
    /// 4. Writes the final balance and merged tallies to output
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        // The fields are public, so a config built without `new` is re-checked here
        let BatchConfig {
            batch_size,
            workers,
        } = BatchConfig::new(self.config.batch_size, self.config.workers);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let engine = open_engine(self.initial_balance)?;

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::<_, A>::new(compat_file);

            tracing::info!(
                path = %input_path.display(),
                initial = %self.initial_balance,
                batch_size,
                workers,
                "async replay started"
            );

            let mut summary = ReplaySummary::new();
            loop {
                let batch = reader.read_batch(batch_size).await;
                if batch.is_empty() {
                    break;
                }
                summary.merge(replay_batch(&engine, batch, workers).await?);
            }

            let balance = engine.account().balance();
            tracing::info!(
                %balance,
                deposits = summary.deposits,
                withdrawals = summary.withdrawals,
                rejected = summary.total_rejected(),
                "async replay finished"
            );

            write_summary_csv(balance, &summary, output)
        })
    }
}

/// Apply one batch across `workers` blocking tasks and merge their tallies
async fn replay_batch<A: Amount>(
    engine: &ReplayEngine<A>,
    batch: Vec<OperationRecord<A>>,
    workers: usize,
) -> Result<ReplaySummary, String> {
    let mut lanes: Vec<Vec<OperationRecord<A>>> = (0..workers).map(|_| Vec::new()).collect();
    for (index, record) in batch.into_iter().enumerate() {
        lanes[index % workers].push(record);
    }

    let handles = lanes
        .into_iter()
        .filter(|lane| !lane.is_empty())
        .map(|lane| {
            let engine = engine.clone();
            tokio::task::spawn_blocking(move || {
                let mut summary = ReplaySummary::new();
                for record in &lane {
                    apply_record(&engine, record, &mut summary);
                }
                summary
            })
        });

    let mut summary = ReplaySummary::new();
    for result in futures::future::join_all(handles).await {
        summary.merge(result.map_err(|e| format!("Replay worker failed: {}", e))?);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run<A: Amount>(strategy: &AsyncProcessingStrategy<A>, csv_content: &str) -> String {
        let file = create_temp_csv(csv_content);
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_async_strategy_concurrent_deposits_lose_no_updates() {
        let mut csv_content = String::from("op,amount\n");
        for _ in 0..100 {
            csv_content.push_str("deposit,1.0\n");
        }

        let strategy = AsyncProcessingStrategy::new(10.0, BatchConfig::new(1000, 8));
        let output = run(&strategy, &csv_content);

        assert_eq!(
            output,
            "balance,deposits,withdrawals,reads,rejected\n110,100,0,0,0\n"
        );
    }

    #[test]
    fn test_async_strategy_spans_batches() {
        let mut csv_content = String::from("op,amount\n");
        for _ in 0..25 {
            csv_content.push_str("deposit,4\nwithdrawal,1\nbalance,\n");
        }

        // Small batches force many rounds; 25 withdrawals of 1 are always
        // covered by the 100 opening balance whatever the order
        let strategy = AsyncProcessingStrategy::new(100.0, BatchConfig::new(4, 3));
        let output = run(&strategy, &csv_content);

        assert_eq!(
            output,
            "balance,deposits,withdrawals,reads,rejected\n175,25,25,25,0\n"
        );
    }

    #[test]
    fn test_async_strategy_never_overdraws() {
        let mut csv_content = String::from("op,amount\n");
        for _ in 0..40 {
            csv_content.push_str("withdrawal,1\n");
        }

        let strategy = AsyncProcessingStrategy::new(25.0, BatchConfig::new(1000, 4));
        let output = run(&strategy, &csv_content);

        assert_eq!(
            output,
            "balance,deposits,withdrawals,reads,rejected\n0,0,25,0,15\n"
        );
    }

    #[test]
    fn test_async_strategy_decimal() {
        let mut csv_content = String::from("op,amount\n");
        for _ in 0..10 {
            csv_content.push_str("deposit,0.1\n");
        }

        let strategy = AsyncProcessingStrategy::new(Decimal::ZERO, BatchConfig::new(3, 2));
        let output = run(&strategy, &csv_content);

        assert_eq!(
            output,
            "balance,deposits,withdrawals,reads,rejected\n1.0,10,0,0,0\n"
        );
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(0.0, BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_async_strategy_rejects_invalid_initial_balance() {
        let file = create_temp_csv("op,amount\n");
        let strategy = AsyncProcessingStrategy::new(f64::INFINITY, BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(file.path(), &mut output);
        assert!(result.unwrap_err().contains("must be a finite number"));
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.workers, num_cpus::get().min(MAX_WORKERS));
    }

    #[rstest]
    #[case::in_range(500, 4, 500, 4)]
    #[case::at_limits(MAX_BATCH_SIZE, MAX_WORKERS, MAX_BATCH_SIZE, MAX_WORKERS)]
    #[case::batch_too_large(MAX_BATCH_SIZE + 1, 2, MAX_BATCH_SIZE, 2)]
    #[case::workers_too_large(10, MAX_WORKERS + 1, 10, MAX_WORKERS)]
    #[case::huge(usize::MAX / 2, usize::MAX, MAX_BATCH_SIZE, MAX_WORKERS)]
    fn test_batch_config_clamps_large_values(
        #[case] batch_size: usize,
        #[case] workers: usize,
        #[case] expected_batch_size: usize,
        #[case] expected_workers: usize,
    ) {
        let config = BatchConfig::new(batch_size, workers);
        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.workers, expected_workers);
    }

    #[rstest]
    #[case::through_new(BatchConfig::new(usize::MAX / 2, 2))]
    #[case::built_directly(BatchConfig { batch_size: usize::MAX, workers: usize::MAX })]
    #[case::zero_built_directly(BatchConfig { batch_size: 0, workers: 0 })]
    fn test_async_strategy_survives_extreme_config(#[case] config: BatchConfig) {
        let strategy = AsyncProcessingStrategy::new(0.0, config);
        let output = run(&strategy, "op,amount\ndeposit,5\nbalance,\n");

        assert_eq!(
            output,
            "balance,deposits,withdrawals,reads,rejected\n5,1,0,1,0\n"
        );
    }
}
