use crate::errors::StorageError;
use crate::model::QueryRecord;
use crate::storage::Store;
use std::io::{Read, Write};
use std::path::Path;

pub const HEADER: [&str; 4] = ["id", "timestamp", "symptoms", "response_text"];

/// What one export wrote. Both figures come from the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub bytes: u64,
}

impl Store {
    /// Writes the history (newest first, optionally bounded) as CSV and
    /// returns the number of bytes written.
    pub fn export_all(&self, destination: &Path, limit: Option<u32>) -> Result<u64, StorageError> {
        Ok(self.export_records(destination, limit)?.bytes)
    }

    pub fn export_records(
        &self,
        destination: &Path,
        limit: Option<u32>,
    ) -> Result<ExportSummary, StorageError> {
        let records = self.list_recent(limit.unwrap_or(u32::MAX))?;
        let bytes = write_records(Vec::new(), &records)?;
        std::fs::write(destination, &bytes)?;

        let summary = ExportSummary {
            rows: records.len(),
            bytes: bytes.len() as u64,
        };
        tracing::info!(
            event = "symcheck.history.export",
            path = %destination.display(),
            rows = summary.rows,
            bytes = summary.bytes,
        );
        Ok(summary)
    }
}

/// The header row is always written, even for an empty history.
pub fn write_records<W: Write>(writer: W, records: &[QueryRecord]) -> Result<W, StorageError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))
}

/// Reads an export back. The store never imports; this exists to check
/// exported files.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<QueryRecord>, StorageError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        out.push(rec?);
    }
    Ok(out)
}
