//! Bank Account replay CLI
//!
//! Replays deposit, withdrawal and balance operations from a CSV file against
//! one account and prints the outcome as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > summary.csv
//! cargo run -- --initial-balance 100 operations.csv
//! cargo run -- --numeric decimal --initial-balance 0.10 operations.csv
//! cargo run -- --strategy async --batch-size 500 --workers 8 operations.csv
//! RUST_LOG=bank_account=debug cargo run -- operations.csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success (rejected operations included)
//! - 1: Error (invalid opening balance, file not found, output failure, etc.)

use bank_account::{cli, logging, strategy};
use std::process;

fn main() {
    logging::init_tracing();

    let args = cli::parse_args();

    let config = if matches!(args.strategy, cli::StrategyType::Async) {
        Some(args.to_batch_config())
    } else {
        None
    };

    let strategy = match strategy::create_strategy(
        args.strategy.clone(),
        args.numeric,
        &args.initial_balance,
        config,
    ) {
        Ok(strategy) => strategy,
        Err(e) => {
            tracing::error!(error = %e, "cannot start replay");
            process::exit(1);
        }
    };

    // Summary goes to stdout, logs to stderr
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        tracing::error!(error = %e, "replay failed");
        process::exit(1);
    }
}
