//! CSV format handling for operation records and replay output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to operation records
//! - Summary output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Amount, OperationRecord, OperationType, ReplaySummary};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: op, amount
/// The amount field is optional because balance reads carry no amount.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub amount: Option<String>,
}

/// Output row written after a replay
#[derive(Debug, Serialize)]
struct SummaryRow {
    balance: String,
    deposits: u64,
    withdrawals: u64,
    reads: u64,
    rejected: u64,
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the op string (case-insensitive)
/// - Parses the amount string with the account's amount type
/// - Requires an amount for deposit/withdrawal; a balance read ignores it
///
/// Only syntax is checked here. Whether the amount is acceptable (finite,
/// positive, covered by the balance) is for the account to decide.
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record<A: Amount>(csv_record: CsvRecord) -> Result<OperationRecord<A>, String> {
    match csv_record.op.to_lowercase().as_str() {
        "deposit" => Ok(OperationRecord::Deposit(required_amount(
            OperationType::Deposit,
            csv_record.amount,
        )?)),
        "withdrawal" => Ok(OperationRecord::Withdrawal(required_amount(
            OperationType::Withdrawal,
            csv_record.amount,
        )?)),
        "balance" => Ok(OperationRecord::Balance),
        _ => Err(format!("Invalid operation: '{}'", csv_record.op)),
    }
}

fn required_amount<A: Amount>(op: OperationType, amount: Option<String>) -> Result<A, String> {
    match amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            A::parse_amount(&amount_str).map_err(|e| format!("Invalid amount for {}: {}", op, e))
        }
        _ => Err(format!("{} requires an amount", op)),
    }
}

/// Write the replay result in CSV format
///
/// Writes one row with columns: balance, deposits, withdrawals, reads, rejected
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_summary_csv<A: Amount>(
    balance: A,
    summary: &ReplaySummary,
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .serialize(SummaryRow {
            balance: balance.to_string(),
            deposits: summary.deposits,
            withdrawals: summary.withdrawals,
            reads: summary.reads,
            rejected: summary.total_rejected(),
        })
        .map_err(|e| format!("Failed to write summary record: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
