//! Error type for `texume-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] texume_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("username {0:?} is already taken")]
  DuplicateUsername(String),

  /// Content was saved for a profile id that does not exist.
  #[error("profile not found: {0}")]
  ProfileNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
