//! Error types for `prospects-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("prospect not found: {0}")]
  ProspectNotFound(Uuid),

  #[error("notifier error: {0}")]
  Notifier(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
