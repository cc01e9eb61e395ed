//! Core business logic module
//!
//! This module contains the account and the engine that drives it:
//! - `account` - Thread-safe single-balance account
//! - `engine` - Routes operation records into a shared account

pub mod account;
pub mod engine;

pub use account::Account;
pub use engine::ReplayEngine;
