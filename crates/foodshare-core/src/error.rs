//! Error types for `foodshare-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("unknown report: {0:?}")]
  UnknownReport(String),

  /// A report query returned columns other than the ones its catalog entry
  /// declares.
  #[error("report {key} returned columns {actual:?}, expected {expected:?}")]
  ShapeMismatch {
    key:      &'static str,
    expected: Vec<String>,
    actual:   Vec<String>,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
