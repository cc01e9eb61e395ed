//! Error types for the bank account
//!
//! Every error here is a rejected caller input, never an internal fault.
//! A rejected operation leaves the account balance untouched.
//!
//! # Error Categories
//!
//! - **Invalid numbers**: NaN or infinite amounts
//! - **Sign errors**: negative opening balance, non-positive deposit/withdrawal
//! - **Funds errors**: withdrawal larger than the balance
//! - **Arithmetic errors**: a result that would leave the representable range

use super::operation::OperationType;
use std::fmt::Display;
use thiserror::Error;

/// Error kind without context
///
/// Lets callers branch or tally on the kind of rejection alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    InvalidAmount,
    NegativeAmount,
    NonPositiveAmount,
    InsufficientFunds,
    ArithmeticOverflow,
}

impl ErrorKind {
    /// Snake-case name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidAmount => "invalid_amount",
            ErrorKind::NegativeAmount => "negative_amount",
            ErrorKind::NonPositiveAmount => "non_positive_amount",
            ErrorKind::InsufficientFunds => "insufficient_funds",
            ErrorKind::ArithmeticOverflow => "arithmetic_overflow",
        }
    }
}

/// Main error type for account operations
///
/// Amounts are carried as their rendered text so the error type does not
/// depend on the account's numeric representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    /// Amount is not a finite number (NaN or infinite)
    ///
    /// Applies to the opening balance and to deposit/withdrawal amounts.
    #[error("Invalid {operation} amount '{amount}': must be a finite number")]
    InvalidAmount {
        /// Operation that received the amount
        operation: OperationType,
        /// The rejected amount
        amount: String,
    },

    /// Opening balance is negative
    #[error("Initial balance cannot be negative, got {amount}")]
    NegativeAmount {
        /// The rejected opening balance
        amount: String,
    },

    /// Deposit or withdrawal amount is zero or negative
    #[error("{operation} amount must be greater than zero, got {amount}")]
    NonPositiveAmount {
        /// Operation that received the amount
        operation: OperationType,
        /// The rejected amount
        amount: String,
    },

    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the withdrawal
        balance: String,
        /// Requested withdrawal amount
        requested: String,
    },

    /// The resulting balance would not be a valid amount
    ///
    /// For `f64` this is a sum that overflows to infinity; for `Decimal` a sum
    /// beyond its 96-bit mantissa.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: OperationType,
    },
}

impl AccountError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: OperationType, amount: impl Display) -> Self {
        AccountError::InvalidAmount {
            operation,
            amount: amount.to_string(),
        }
    }

    /// Create a NegativeAmount error
    pub fn negative_amount(amount: impl Display) -> Self {
        AccountError::NegativeAmount {
            amount: amount.to_string(),
        }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(operation: OperationType, amount: impl Display) -> Self {
        AccountError::NonPositiveAmount {
            operation,
            amount: amount.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(balance: impl Display, requested: impl Display) -> Self {
        AccountError::InsufficientFunds {
            balance: balance.to_string(),
            requested: requested.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: OperationType) -> Self {
        AccountError::ArithmeticOverflow { operation }
    }

    /// The kind of this error, without context
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            AccountError::NegativeAmount { .. } => ErrorKind::NegativeAmount,
            AccountError::NonPositiveAmount { .. } => ErrorKind::NonPositiveAmount,
            AccountError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            AccountError::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
        }
    }
}
