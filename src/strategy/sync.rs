//! Synchronous replay strategy
//!
//! Applies operation records one at a time, in file order, on the calling
//! thread. It coordinates the `SyncReader` (CSV input), the `ReplayEngine`
//! (account) and `csv_format::write_summary_csv` (output).

use crate::io::csv_format::write_summary_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{apply_record, open_engine, ProcessingStrategy};
use crate::types::{Amount, ReplaySummary};
use std::io::Write;
use std::path::Path;

/// Synchronous replay strategy
///
/// # Examples
///
/// ```no_run
/// use bank_account::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(100.0);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("operations.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy<A: Amount = f64> {
    initial_balance: A,
}

impl<A: Amount> SyncProcessingStrategy<A> {
    /// Create a strategy that opens each replay's account with `initial_balance`
    pub fn new(initial_balance: A) -> Self {
        Self { initial_balance }
    }
}

impl<A: Amount> ProcessingStrategy for SyncProcessingStrategy<A> {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = open_engine(self.initial_balance)?;
        let reader = SyncReader::<A>::new(input_path)?;

        tracing::info!(path = %input_path.display(), initial = %self.initial_balance, "sync replay started");

        let mut summary = ReplaySummary::new();
        for result in reader {
            match result {
                Ok(record) => apply_record(&engine, &record, &mut summary),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable record"),
            }
        }

        let balance = engine.account().balance();
        tracing::info!(
            %balance,
            deposits = summary.deposits,
            withdrawals = summary.withdrawals,
            rejected = summary.total_rejected(),
            "sync replay finished"
        );

        write_summary_csv(balance, &summary, output)
    }
}
