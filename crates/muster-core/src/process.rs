//! Batch processing of decoded sheet rows.

use tracing::debug;

use crate::{
  contact::Contact,
  extract::{Row, extract_contact},
};

/// Extract contacts from `rows`, preserving source order.
///
/// A row that fails extraction is logged and skipped; one malformed row
/// never aborts the batch. An empty input yields an empty Vec.
pub fn process_rows(rows: &[Row]) -> Vec<Contact> {
  let mut contacts = Vec::with_capacity(rows.len());
  for (index, row) in rows.iter().enumerate() {
    match extract_contact(row) {
      Ok(contact) => contacts.push(contact),
      Err(e) => debug!(index, error = %e, "skipping row"),
    }
  }
  contacts
}
