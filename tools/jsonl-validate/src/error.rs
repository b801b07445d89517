//! Structured error types for the validator.
//!
//! Everything here is fatal to one validation run. Per-line defects are not
//! errors; they are tallied in `ValidationSummary`.

use thiserror::Error;

use crate::report::Message;

#[derive(Debug, Error)]
pub enum ValidateError {
  #[error("Fatal error, Check the input-url parameter: {0}")]
  LocatorTooShort(String),

  #[error("Fatal error parsing input-url: {url}: {reason}")]
  LocatorParse { url: String, reason: String },

  #[error("Fatal error, unable to handle '{0}' input URLs.")]
  UnsupportedScheme(String),

  #[error("Fatal error, unable to determine the format of file: {0}")]
  UnknownFileFormat(String),

  #[error("Fatal error, unable to determine the format of resource: {0}")]
  UnknownResourceFormat(String),

  #[error("Fatal error retrieving input-url: {url}: {reason}")]
  Fetch { url: String, reason: String },

  #[error("Fatal error opening input file: {path}: {source}")]
  OpenFile {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Fatal error reading gzipped input: {location}: {source}")]
  GzipRead {
    location: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Fatal error stdin not piped.")]
  StdinNotPiped,

  #[error("Fatal error reading input after line {line}: {source}")]
  Read {
    line: u64,
    #[source]
    source: std::io::Error,
  },
}

impl ValidateError {
  pub fn fetch(url: &str, reason: impl ToString) -> Self {
    Self::Fetch {
      url: url.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Stable message id for the fatal report line.
  pub fn id(&self) -> u32 {
    match self {
      Self::LocatorTooShort(_) => 5000,
      Self::LocatorParse { .. } => 5001,
      Self::UnsupportedScheme(_) => 5002,
      Self::Fetch { .. } => 5003,
      Self::OpenFile { .. } => 5004,
      Self::StdinNotPiped => 5006,
      Self::GzipRead { .. } => 5008,
      Self::UnknownFileFormat(_) => 5011,
      Self::UnknownResourceFormat(_) => 5012,
      Self::Read { .. } => 5013,
    }
  }

  /// True for failures that happen before any line reaches the engine.
  pub fn is_acquisition(&self) -> bool {
    !matches!(self, Self::Read { .. })
  }

  pub fn message(&self) -> Message {
    Message::Failure {
      id: self.id(),
      text: self.to_string(),
    }
  }

  /// Follow-up advice reported after the failure, when there is any.
  pub fn hint(&self) -> Option<Message> {
    match self {
      Self::UnknownFileFormat(_) => Some(Message::RenameFileHint),
      Self::UnknownResourceFormat(_) => Some(Message::RenameResourceHint),
      _ => None,
    }
  }
}
