//! Operation types for the bank account
//!
//! `OperationType` names the account operations in error messages and logs.
//! `OperationRecord` is a replayable request; it carries its amount inside
//! the variants that need one, so a deposit without an amount (or a record
//! that opens an account) cannot be built.

use std::fmt;

/// Operations an account performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// Open an account with an initial balance
    Open,

    /// Credit funds to the account
    Deposit,

    /// Debit funds from the account (requires sufficient balance)
    Withdrawal,

    /// Read the current balance
    Balance,
}

impl OperationType {
    /// Lowercase name used in CSV input and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Open => "open",
            OperationType::Deposit => "deposit",
            OperationType::Withdrawal => "withdrawal",
            OperationType::Balance => "balance",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation to apply to an already open account
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRecord<A> {
    /// Credit `A` to the account
    Deposit(A),

    /// Debit `A` from the account
    Withdrawal(A),

    /// Read the current balance
    Balance,
}

impl<A: Copy> OperationRecord<A> {
    /// The operation this record performs
    pub fn op(&self) -> OperationType {
        match self {
            OperationRecord::Deposit(_) => OperationType::Deposit,
            OperationRecord::Withdrawal(_) => OperationType::Withdrawal,
            OperationRecord::Balance => OperationType::Balance,
        }
    }

    /// The amount moved, if any
    pub fn amount(&self) -> Option<A> {
        match self {
            OperationRecord::Deposit(amount) | OperationRecord::Withdrawal(amount) => Some(*amount),
            OperationRecord::Balance => None,
        }
    }
}
