//! Replay engine
//!
//! Routes operation records into a shared `Account`. The engine plays the
//! part of an application embedding the account: it turns each request into
//! a `deposit`, `withdraw` or balance read and hands the outcome back
//! unchanged, leaving the caller to decide what to do with a rejection.
//!
//! Cloning an engine is cheap and every clone drives the same account, so
//! worker threads can each hold their own handle.

use crate::core::Account;
use crate::types::{AccountError, Amount, OperationRecord};
use std::sync::Arc;

/// Applies operation records to one account
#[derive(Debug)]
pub struct ReplayEngine<A: Amount = f64> {
    account: Arc<Account<A>>,
}

impl<A: Amount> Clone for ReplayEngine<A> {
    fn clone(&self) -> Self {
        Self {
            account: Arc::clone(&self.account),
        }
    }
}

impl<A: Amount> ReplayEngine<A> {
    /// Create an engine driving `account`
    pub fn new(account: Arc<Account<A>>) -> Self {
        Self { account }
    }

    /// Open a fresh account and create an engine driving it
    ///
    /// # Errors
    ///
    /// Returns the account's opening error if `initial` is rejected.
    pub fn open(initial: A) -> Result<Self, AccountError> {
        Ok(Self::new(Arc::new(Account::open(initial)?)))
    }

    /// The account this engine drives
    pub fn account(&self) -> &Arc<Account<A>> {
        &self.account
    }

    /// Apply one operation record
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The operation was applied (or the balance was read)
    /// * `Err(AccountError)` - The account rejected the operation
    pub fn process(&self, record: &OperationRecord<A>) -> Result<(), AccountError> {
        match *record {
            OperationRecord::Deposit(amount) => self.account.deposit(amount),
            OperationRecord::Withdrawal(amount) => self.account.withdraw(amount),
            OperationRecord::Balance => {
                let balance = self.account.balance();
                tracing::info!(%balance, "balance read");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use rust_decimal::Decimal;
    use std::thread;

    #[test]
    fn test_process_applies_operations_in_order() {
        let engine = ReplayEngine::open(100.0).unwrap();

        engine.process(&OperationRecord::Deposit(50.0)).unwrap();
        engine.process(&OperationRecord::Withdrawal(30.0)).unwrap();
        engine.process(&OperationRecord::Balance).unwrap();

        assert_eq!(engine.account().balance(), 120.0);
    }

    #[test]
    fn test_process_returns_account_errors() {
        let engine = ReplayEngine::open(100.0).unwrap();

        let error = engine
            .process(&OperationRecord::Withdrawal(150.0))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(engine.account().balance(), 100.0);
    }

    #[test]
    fn test_process_passes_amount_through_unchanged() {
        let engine = ReplayEngine::open(10.0).unwrap();

        let error = engine.process(&OperationRecord::Deposit(0.0)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NonPositiveAmount);

        let error = engine
            .process(&OperationRecord::Withdrawal(f64::NAN))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidAmount);

        assert_eq!(engine.account().balance(), 10.0);
    }

    #[test]
    fn test_open_rejects_negative_initial_balance() {
        let error = ReplayEngine::open(-1.0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NegativeAmount);
    }

    #[test]
    fn test_decimal_engine() {
        let engine = ReplayEngine::open(Decimal::new(1000, 2)).unwrap();

        engine
            .process(&OperationRecord::Deposit(Decimal::new(5, 2)))
            .unwrap();

        assert_eq!(engine.account().balance(), Decimal::new(1005, 2));
    }

    #[test]
    fn test_clones_share_account() {
        let engine = ReplayEngine::open(0.0).unwrap();
        let mut handles = vec![];

        for _ in 0..8 {
            let engine_clone = engine.clone();
            let handle = thread::spawn(move || {
                for _ in 0..250 {
                    engine_clone
                        .process(&OperationRecord::Deposit(1.0))
                        .unwrap();
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.account().balance(), 2000.0);
    }
}
