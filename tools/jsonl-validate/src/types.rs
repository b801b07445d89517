//! Core types for the validator (outcome taxonomy + per-stream summary).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Per-line classification
// ---------------------------------------------------------------------------

/// Why a single record failed the check.
///
/// Variants are declared in classification precedence order: when a line
/// could be described by more than one reason, the earliest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
  MissingRecordId,
  MissingDataSource,
  MalformedJson,
  Other,
}

/// Classification result for one non-blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
  Valid,
  MissingRecordId,
  MissingDataSource,
  MalformedJson,
  UnknownInvalid,
}

impl From<Result<(), FailureReason>> for ValidationOutcome {
  fn from(check: Result<(), FailureReason>) -> Self {
    match check {
      Ok(()) => Self::Valid,
      Err(FailureReason::MissingRecordId) => Self::MissingRecordId,
      Err(FailureReason::MissingDataSource) => Self::MissingDataSource,
      Err(FailureReason::MalformedJson) => Self::MalformedJson,
      Err(FailureReason::Other) => Self::UnknownInvalid,
    }
  }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregate result of scanning one stream.
///
/// `total_lines` counts every physical line, blank ones included. Blank lines
/// are never classified, so they only ever show up in `good_lines()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
  pub total_lines: u64,
  pub no_record_id: u64,
  pub no_data_source: u64,
  pub malformed: u64,
  pub unknown_invalid: u64,
}

impl ValidationSummary {
  pub fn bad_total(&self) -> u64 {
    self.no_record_id + self.no_data_source + self.malformed + self.unknown_invalid
  }

  pub fn good_lines(&self) -> u64 {
    self.total_lines.saturating_sub(self.bad_total())
  }

  /// Tally one outcome. `Valid` leaves every counter untouched.
  pub(crate) fn record(&mut self, outcome: ValidationOutcome) {
    match outcome {
      ValidationOutcome::Valid => {}
      ValidationOutcome::MissingRecordId => self.no_record_id += 1,
      ValidationOutcome::MissingDataSource => self.no_data_source += 1,
      ValidationOutcome::MalformedJson => self.malformed += 1,
      ValidationOutcome::UnknownInvalid => self.unknown_invalid += 1,
    }
  }
}

// ---------------------------------------------------------------------------
// Input format hint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFileType {
  Jsonl,
  Gz,
}

impl FromStr for InputFileType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "jsonl" => Ok(Self::Jsonl),
      "gz" => Ok(Self::Gz),
      other => Err(format!("unknown file type '{}', expected jsonl|gz", other)),
    }
  }
}

impl fmt::Display for InputFileType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Jsonl => f.write_str("JSONL"),
      Self::Gz => f.write_str("GZ"),
    }
  }
}
