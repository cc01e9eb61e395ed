//! Asynchronous CSV reader with batch interface
//!
//! Reads operation records from any `futures::io::AsyncRead` source using
//! csv-async, handing them out in batches for the async replay strategy.
//!
//! ```text
//! CSV source → AsyncReader → Batches of OperationRecords
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{Amount, OperationRecord};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use std::marker::PhantomData;

/// Upper bound on the up-front allocation for one batch
const PREALLOCATE_LIMIT: usize = 1024;

/// Asynchronous CSV reader
///
/// Keeps streaming behavior: at most one batch is held in memory.
pub struct AsyncReader<R: AsyncRead + Unpin, A> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    _amount: PhantomData<A>,
}

impl<R: AsyncRead + Unpin + Send + 'static, A: Amount> AsyncReader<R, A> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            _amount: PhantomData,
        }
    }

    /// Read a batch of operation records
    ///
    /// Reads up to `batch_size` rows. Rows that fail to parse or convert are
    /// logged and skipped, so a batch may be shorter than `batch_size` even
    /// before the end of input.
    ///
    /// # Returns
    ///
    /// The converted records, or an empty vector at end of input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<OperationRecord<A>> {
        let mut batch = Vec::with_capacity(batch_size.min(PREALLOCATE_LIMIT));
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(record) => batch.push(record),
                    Err(e) => tracing::warn!(error = %e, "skipping unconvertible record"),
                },
                Some(Err(e)) => tracing::warn!(error = %e, "skipping malformed CSV row"),
                None => break,
            }
        }

        batch
    }
}
