//! Thread-safe bank account
//!
//! This module provides the `Account` struct, a single balance guarded by a
//! mutex so one instance can be shared across threads.
//!
//! # Invariants
//!
//! - The balance is always a valid amount (finite for `f64`) and never negative.
//! - The balance only changes through `deposit` (increases by the amount) and
//!   `withdraw` (decreases by the amount, never below zero).
//! - A rejected operation leaves the balance untouched.
//!
//! # Thread Safety
//!
//! `deposit`, `withdraw` and `balance` each take the instance lock for their
//! whole body (validation included) and release it when the guard goes out of
//! scope, on success and on error alike. Calls on one instance are therefore
//! serialized; different instances never block each other.

use crate::types::{AccountError, Amount, OperationType};
use parking_lot::Mutex;
use std::fmt;

/// A single account balance with synchronized mutation
///
/// The type parameter selects the numeric representation. The default, `f64`,
/// keeps binary floating-point semantics; use `Account<rust_decimal::Decimal>`
/// for exact decimal arithmetic.
///
/// # Examples
///
/// ```
/// use bank_account::Account;
///
/// let account = Account::open(100.0).unwrap();
/// account.deposit(50.0).unwrap();
/// account.withdraw(30.0).unwrap();
/// assert_eq!(account.balance(), 120.0);
/// ```
pub struct Account<A: Amount = f64> {
    balance: Mutex<A>,
}

impl<A: Amount> Account<A> {
    /// Open an account with an initial balance
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `InvalidAmount` if `initial` is NaN or infinite
    /// - `NegativeAmount` if `initial` is below zero
    pub fn open(initial: A) -> Result<Self, AccountError> {
        if !initial.is_valid() {
            return Err(AccountError::invalid_amount(OperationType::Open, initial));
        }
        if initial < A::ZERO {
            return Err(AccountError::negative_amount(initial));
        }

        Ok(Self {
            balance: Mutex::new(initial),
        })
    }

    /// Deposit funds into the account
    ///
    /// # Errors
    ///
    /// Checked in this order, leaving the balance unchanged on failure:
    /// - `InvalidAmount` if `amount` is NaN or infinite
    /// - `NonPositiveAmount` if `amount` is zero or negative
    /// - `ArithmeticOverflow` if the new balance would not be a valid amount
    pub fn deposit(&self, amount: A) -> Result<(), AccountError> {
        let mut balance = self.balance.lock();

        validate(OperationType::Deposit, amount)?;

        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| AccountError::arithmetic_overflow(OperationType::Deposit))?;
        *balance = new_balance;
        drop(balance);

        tracing::debug!(%amount, balance = %new_balance, "deposit applied");
        Ok(())
    }

    /// Withdraw funds from the account
    ///
    /// The funds check runs under the same lock as the update, so a concurrent
    /// withdrawal can never drive the balance below zero.
    ///
    /// # Errors
    ///
    /// Checked in this order, leaving the balance unchanged on failure:
    /// - `InvalidAmount` if `amount` is NaN or infinite
    /// - `NonPositiveAmount` if `amount` is zero or negative
    /// - `InsufficientFunds` if `amount` exceeds the current balance
    pub fn withdraw(&self, amount: A) -> Result<(), AccountError> {
        let mut balance = self.balance.lock();

        validate(OperationType::Withdrawal, amount)?;

        if amount > *balance {
            return Err(AccountError::insufficient_funds(*balance, amount));
        }

        let new_balance = balance
            .checked_sub(amount)
            .ok_or_else(|| AccountError::arithmetic_overflow(OperationType::Withdrawal))?;
        *balance = new_balance;
        drop(balance);

        tracing::debug!(%amount, balance = %new_balance, "withdrawal applied");
        Ok(())
    }

    /// Current balance
    ///
    /// Never observes a partially applied deposit or withdrawal.
    pub fn balance(&self) -> A {
        *self.balance.lock()
    }
}

/// Shared amount checks for deposit and withdrawal
fn validate<A: Amount>(operation: OperationType, amount: A) -> Result<(), AccountError> {
    if !amount.is_valid() {
        return Err(AccountError::invalid_amount(operation, amount));
    }
    if amount <= A::ZERO {
        return Err(AccountError::non_positive_amount(operation, amount));
    }
    Ok(())
}

impl<A: Amount> fmt::Debug for Account<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("balance", &self.balance())
            .finish()
    }
}
