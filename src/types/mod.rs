//! Types module
//!
//! Contains the value types used throughout the crate:
//! - `amount`: Numeric representation of balances (`f64` or `Decimal`)
//! - `operation`: Operation types and replayable operation records
//! - `error`: Error taxonomy for rejected account operations
//! - `summary`: Tally of a replay run

pub mod amount;
pub mod error;
pub mod operation;
pub mod summary;

pub use amount::Amount;
pub use error::{AccountError, ErrorKind};
pub use operation::{OperationRecord, OperationType};
pub use summary::ReplaySummary;
