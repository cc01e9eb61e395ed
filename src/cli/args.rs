use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay deposit, withdrawal and balance operations against one account
#[derive(Parser, Debug)]
#[command(name = "bank-account")]
#[command(about = "Replay account operations from a CSV file", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Opening balance of the account
    #[arg(
        long = "initial-balance",
        value_name = "AMOUNT",
        default_value = "0",
        allow_hyphen_values = true,
        help = "Opening balance (must be a finite, non-negative number)"
    )]
    pub initial_balance: String,

    /// Replay strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Replay strategy: 'sync' for file order or 'async' for concurrent workers"
    )]
    pub strategy: StrategyType,

    /// Numeric representation of amounts
    #[arg(
        long = "numeric",
        value_name = "NUMERIC",
        default_value = "float",
        help = "Amount representation: 'float' (binary floating point) or 'decimal' (exact)"
    )]
    pub numeric: NumericType,

    /// Number of operations per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operations per batch (default: 1000, max: 10000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of concurrent workers (async mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of workers applying operations concurrently (default: CPU cores, max: 256)"
    )]
    pub workers: Option<usize>,
}

/// Available replay strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available amount representations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NumericType {
    Float,
    Decimal,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults inside `BatchConfig::new`.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.workers.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.workers.unwrap_or(default.workers),
            )
        } else {
            BatchConfig::default()
        }
    }
}
