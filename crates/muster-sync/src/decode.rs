//! Decoding the raw payload into sheet rows.
//!
//! The published sheet arrives as headered CSV. Each record becomes a
//! `header → cell` map keyed by whatever column names the sheet's editors
//! used; the alias table in `muster-core` sorts those out later.

use muster_core::extract::Row;
use tracing::warn;

use crate::error::DecodeError;

/// Decode `payload` into rows, preserving sheet order.
///
/// A record that cannot be decoded (bad UTF-8, broken quoting) is logged
/// and skipped; only a structurally unreadable sheet — no parseable header
/// line — fails the whole decode.
pub fn decode_rows(payload: &[u8]) -> Result<Vec<Row>, DecodeError> {
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .from_reader(payload);

  let headers = reader.headers()?.clone();

  let mut rows = Vec::new();
  for (index, record) in reader.records().enumerate() {
    match record {
      Ok(record) => {
        let row: Row = headers
          .iter()
          .zip(record.iter())
          .filter(|(_, value)| !value.trim().is_empty())
          .map(|(header, value)| (header.trim().to_string(), value.to_string()))
          .collect();
        rows.push(row);
      }
      Err(e) => warn!(index, error = %e, "skipping undecodable record"),
    }
  }

  Ok(rows)
}
