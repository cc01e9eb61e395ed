//! Replay strategy module
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! covering CSV parsing, applying operations to the account, and writing the
//! summary. Strategies (sequential, concurrent batch) are selected at runtime.

use crate::cli::{NumericType, StrategyType};
use crate::core::ReplayEngine;
use crate::types::{Amount, OperationRecord, ReplaySummary};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig, MAX_BATCH_SIZE, MAX_WORKERS};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
///
/// Each strategy opens a fresh account, reads operation records from a CSV
/// file, applies them, and writes the final balance and tallies to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Replay operations from input file and write the summary to output
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the replay completed (rejected operations included)
    /// * `Err(String)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The opening balance is rejected by the account
    /// - The input file cannot be opened
    /// - Output cannot be written
    ///
    /// Rejected operations and unreadable rows are logged and counted (or
    /// skipped); they never abort the replay.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy
///
/// Parses `initial_balance` with the selected numeric representation and
/// builds the selected strategy around it.
///
/// # Arguments
///
/// * `strategy_type` - Sync or Async
/// * `numeric` - Float (`f64`) or Decimal amounts
/// * `initial_balance` - Opening balance as text
/// * `config` - Batch configuration (ignored for sync)
///
/// # Errors
///
/// Returns an error if `initial_balance` is not a number. Range checks
/// (negative, non-finite) happen when the account is opened.
pub fn create_strategy(
    strategy_type: StrategyType,
    numeric: NumericType,
    initial_balance: &str,
    config: Option<BatchConfig>,
) -> Result<Box<dyn ProcessingStrategy>, String> {
    match numeric {
        NumericType::Float => build_strategy::<f64>(strategy_type, initial_balance, config),
        NumericType::Decimal => build_strategy::<Decimal>(strategy_type, initial_balance, config),
    }
}

fn build_strategy<A: Amount>(
    strategy_type: StrategyType,
    initial_balance: &str,
    config: Option<BatchConfig>,
) -> Result<Box<dyn ProcessingStrategy>, String> {
    let initial_balance = A::parse_amount(initial_balance)
        .map_err(|e| format!("Invalid initial balance: {}", e))?;

    Ok(match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(initial_balance)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(
            initial_balance,
            config.unwrap_or_default(),
        )),
    })
}

/// Open the account a replay runs against
fn open_engine<A: Amount>(initial_balance: A) -> Result<ReplayEngine<A>, String> {
    ReplayEngine::open(initial_balance).map_err(|e| format!("Failed to open account: {}", e))
}

/// Apply one record and tally the outcome
fn apply_record<A: Amount>(
    engine: &ReplayEngine<A>,
    record: &OperationRecord<A>,
    summary: &mut ReplaySummary,
) {
    let outcome = engine.process(record);
    if let Err(e) = &outcome {
        tracing::warn!(op = %record.op(), kind = e.kind().as_str(), error = %e, "operation rejected");
    }
    summary.record(record, &outcome);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_strategy_rejects_unparsable_initial_balance() {
        let result = create_strategy(StrategyType::Sync, NumericType::Float, "lots", None);
        assert!(matches!(result, Err(e) if e.contains("Invalid initial balance")));
    }

    #[test]
    fn test_create_strategy_decimal_rejects_nan_text() {
        let result = create_strategy(StrategyType::Async, NumericType::Decimal, "NaN", None);
        assert!(matches!(result, Err(e) if e.contains("Invalid initial balance")));
    }

    #[test]
    fn test_create_strategy_accepts_every_combination() {
        for strategy_type in [StrategyType::Sync, StrategyType::Async] {
            for numeric in [NumericType::Float, NumericType::Decimal] {
                assert!(create_strategy(strategy_type.clone(), numeric, "10.5", None).is_ok());
            }
        }
    }
}
