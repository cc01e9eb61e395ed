//! Numeric representation of account balances
//!
//! The `Amount` trait abstracts over the number type an account stores.
//! Two implementations are provided:
//!
//! - `f64` (the default): binary floating-point, subject to standard rounding.
//!   NaN and infinities are representable and therefore rejected as invalid.
//! - `rust_decimal::Decimal`: exact decimal arithmetic. Every `Decimal` is
//!   finite, so validity only fails through overflow.

use rust_decimal::Decimal;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A quantity of money an account can hold
///
/// Implementations must keep `checked_add`/`checked_sub` total: they return
/// `None` instead of producing a value for which `is_valid` is false.
pub trait Amount: Copy + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// The additive identity
    const ZERO: Self;

    /// Whether the value is a usable number (finite, not NaN)
    fn is_valid(&self) -> bool;

    /// Add two amounts, returning `None` if the result is not a valid amount
    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// Subtract two amounts, returning `None` if the result is not a valid amount
    fn checked_sub(self, rhs: Self) -> Option<Self>;

    /// Parse an amount from text
    ///
    /// Parsing is purely syntactic: `"NaN"` parses to a NaN `f64` and is left
    /// for the account to reject.
    fn parse_amount(text: &str) -> Result<Self, String>;
}

impl Amount for f64 {
    const ZERO: Self = 0.0;

    fn is_valid(&self) -> bool {
        self.is_finite()
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self + rhs;
        sum.is_finite().then_some(sum)
    }

    fn checked_sub(self, rhs: Self) -> Option<Self> {
        let difference = self - rhs;
        difference.is_finite().then_some(difference)
    }

    fn parse_amount(text: &str) -> Result<Self, String> {
        f64::from_str(text.trim()).map_err(|e| format!("'{}' is not a number: {}", text, e))
    }
}

impl Amount for Decimal {
    const ZERO: Self = Decimal::ZERO;

    fn is_valid(&self) -> bool {
        true
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Decimal::checked_add(self, rhs)
    }

    fn checked_sub(self, rhs: Self) -> Option<Self> {
        Decimal::checked_sub(self, rhs)
    }

    fn parse_amount(text: &str) -> Result<Self, String> {
        Decimal::from_str(text.trim()).map_err(|e| format!("'{}' is not a decimal: {}", text, e))
    }
}
