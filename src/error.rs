use thiserror::Error;

/// Everything that can terminate an invocation early.
///
/// `DuplicateTitle` is the one benign member: the publish flow converts it
/// into a reported skip rather than a nonzero exit.
#[derive(Debug, Error)]
pub(crate) enum Error {
  #[error("missing argument: {0}")]
  MissingArgument(&'static str),
  #[error("invalid publish date {0:?}, expected YYYY-MM-DD")]
  InvalidDate(String),
  #[error("document store unavailable: {0}")]
  StorageUnavailable(#[source] mongodb::error::Error),
  #[error("a post with that title already exists")]
  DuplicateTitle,
  #[error("insert rejected by the document store: {0}")]
  StorageWriteFailed(#[source] mongodb::error::Error),
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Anyhow(#[from] anyhow::Error),
}
