//! Error type for `foodshare-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("statement is not read-only: {0:?}")]
  NotReadOnly(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
