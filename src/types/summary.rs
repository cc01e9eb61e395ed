//! Replay tally
//!
//! `ReplaySummary` counts what happened while replaying operation records
//! against an account. Summaries produced by concurrent workers are combined
//! with [`ReplaySummary::merge`].

use super::error::{AccountError, ErrorKind};
use super::operation::OperationRecord;
use std::collections::BTreeMap;

/// Counts of applied and rejected operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Deposits applied
    pub deposits: u64,

    /// Withdrawals applied
    pub withdrawals: u64,

    /// Balance reads served
    pub reads: u64,

    /// Rejected operations, by kind
    pub rejected: BTreeMap<ErrorKind, u64>,
}

impl ReplaySummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one operation
    pub fn record<A>(&mut self, record: &OperationRecord<A>, outcome: &Result<(), AccountError>) {
        match outcome {
            Ok(()) => match record {
                OperationRecord::Deposit(_) => self.deposits += 1,
                OperationRecord::Withdrawal(_) => self.withdrawals += 1,
                OperationRecord::Balance => self.reads += 1,
            },
            Err(e) => *self.rejected.entry(e.kind()).or_insert(0) += 1,
        }
    }

    /// Fold another summary into this one
    pub fn merge(&mut self, other: ReplaySummary) {
        self.deposits += other.deposits;
        self.withdrawals += other.withdrawals;
        self.reads += other.reads;
        for (kind, count) in other.rejected {
            *self.rejected.entry(kind).or_insert(0) += count;
        }
    }

    /// Total number of rejected operations
    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }

    /// Rejections of one kind
    pub fn rejected_of(&self, kind: ErrorKind) -> u64 {
        self.rejected.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;

    const DEPOSIT: OperationRecord<f64> = OperationRecord::Deposit(1.0);
    const WITHDRAWAL: OperationRecord<f64> = OperationRecord::Withdrawal(1.0);
    const BALANCE: OperationRecord<f64> = OperationRecord::Balance;

    #[test]
    fn test_record_counts_applied_operations() {
        let mut summary = ReplaySummary::new();
        summary.record(&DEPOSIT, &Ok(()));
        summary.record(&DEPOSIT, &Ok(()));
        summary.record(&WITHDRAWAL, &Ok(()));
        summary.record(&BALANCE, &Ok(()));

        assert_eq!(summary.deposits, 2);
        assert_eq!(summary.withdrawals, 1);
        assert_eq!(summary.reads, 1);
        assert_eq!(summary.total_rejected(), 0);
    }

    #[test]
    fn test_record_counts_rejections_by_kind() {
        let mut summary = ReplaySummary::new();
        summary.record(
            &WITHDRAWAL,
            &Err(AccountError::insufficient_funds(1.0, 2.0)),
        );
        summary.record(
            &DEPOSIT,
            &Err(AccountError::invalid_amount(OperationType::Deposit, f64::NAN)),
        );
        summary.record(
            &WITHDRAWAL,
            &Err(AccountError::insufficient_funds(1.0, 3.0)),
        );

        assert_eq!(summary.withdrawals, 0);
        assert_eq!(summary.deposits, 0);
        assert_eq!(summary.rejected_of(ErrorKind::InsufficientFunds), 2);
        assert_eq!(summary.rejected_of(ErrorKind::InvalidAmount), 1);
        assert_eq!(summary.rejected_of(ErrorKind::NonPositiveAmount), 0);
        assert_eq!(summary.total_rejected(), 3);
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut left = ReplaySummary::new();
        left.record(&DEPOSIT, &Ok(()));
        left.record(
            &DEPOSIT,
            &Err(AccountError::non_positive_amount(OperationType::Deposit, 0.0)),
        );

        let mut right = ReplaySummary::new();
        right.record(&DEPOSIT, &Ok(()));
        right.record(&BALANCE, &Ok(()));
        right.record(
            &WITHDRAWAL,
            &Err(AccountError::non_positive_amount(OperationType::Withdrawal, -1.0)),
        );

        left.merge(right);

        assert_eq!(left.deposits, 2);
        assert_eq!(left.reads, 1);
        assert_eq!(left.rejected_of(ErrorKind::NonPositiveAmount), 2);
    }
}
