//! Error types for `muster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A source row carried no name and no contactable field; it yields no
  /// contact record.
  #[error("row has no identifying field (name, phone, whatsapp, telegram)")]
  NoIdentifyingField,

  #[error("unknown sort key: {0:?}")]
  UnknownSortKey(String),

  #[error("unknown channel filter: {0:?}")]
  UnknownChannelFilter(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
