//! Bank Account Library
//!
//! # Overview
//!
//! A single account balance with validated, thread-safe deposit, withdrawal
//! and balance reads, plus a CSV replay driver that feeds recorded operations
//! into one shared account.
//!
//! # Architecture
//!
//! - [`types`] - Value types (amounts, operations, errors, replay summary)
//! - [`core`] - Business logic:
//!   - [`core::account`] - The mutex-guarded account
//!   - [`core::engine`] - Routes operation records into an account
//! - [`io`] - CSV input (sync and async readers) and summary output
//! - [`strategy`] - Sequential and concurrent replay pipelines
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - `tracing` subscriber setup
//!
//! # Account Rules
//!
//! - The opening balance must be a finite number and not negative
//! - Deposits and withdrawals must be finite and strictly positive
//! - A withdrawal may not exceed the current balance
//! - A rejected operation leaves the balance unchanged
//!
//! # Numeric Representation
//!
//! `Account` defaults to `f64` and keeps binary floating-point rounding
//! (ten deposits of `0.1` sum to `0.9999999999999999`). `Account<Decimal>`
//! gives exact decimal arithmetic instead.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use self::core::{Account, ReplayEngine};
pub use io::write_summary_csv;
pub use types::{AccountError, Amount, ErrorKind, OperationRecord, OperationType, ReplaySummary};
