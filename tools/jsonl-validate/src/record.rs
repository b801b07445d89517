//! Single-record checker: well-formed JSON object with RECORD_ID + DATA_SOURCE.

use serde_json::{Map, Value};

use crate::types::FailureReason;

pub const DEFAULT_RECORD_ID_FIELD: &str = "RECORD_ID";
pub const DEFAULT_DATA_SOURCE_FIELD: &str = "DATA_SOURCE";

/// Checks one trimmed, non-blank line of text.
///
/// Implementations must be deterministic and free of side effects; the engine
/// may call `check` any number of times on the same input.
pub trait RecordChecker {
  fn check(&self, line: &str) -> Result<(), FailureReason>;
}

impl<F> RecordChecker for F
where
  F: Fn(&str) -> Result<(), FailureReason>,
{
  fn check(&self, line: &str) -> Result<(), FailureReason> {
    self(line)
  }
}

/// Default checker backed by `serde_json`.
#[derive(Debug, Clone)]
pub struct JsonRecordChecker {
  record_id_field: String,
  data_source_field: String,
}

impl Default for JsonRecordChecker {
  fn default() -> Self {
    Self::with_fields(DEFAULT_RECORD_ID_FIELD, DEFAULT_DATA_SOURCE_FIELD)
  }
}

impl JsonRecordChecker {
  pub fn with_fields(record_id: impl Into<String>, data_source: impl Into<String>) -> Self {
    Self {
      record_id_field: record_id.into(),
      data_source_field: data_source.into(),
    }
  }
}

impl RecordChecker for JsonRecordChecker {
  fn check(&self, line: &str) -> Result<(), FailureReason> {
    let value: Value = serde_json::from_str(line).map_err(|_| FailureReason::MalformedJson)?;
    let object = match value {
      Value::Object(map) => map,
      _ => return Err(FailureReason::Other),
    };

    let record_id = field_state(&object, &self.record_id_field);
    let data_source = field_state(&object, &self.data_source_field);

    // Missing fields outrank wrongly-typed ones.
    if record_id == FieldState::Missing {
      return Err(FailureReason::MissingRecordId);
    }
    if data_source == FieldState::Missing {
      return Err(FailureReason::MissingDataSource);
    }
    if record_id == FieldState::Invalid || data_source == FieldState::Invalid {
      return Err(FailureReason::Other);
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
  Present,
  Missing,
  Invalid,
}

/// Null and blank strings count as missing. Scalars are accepted as their
/// textual form; arrays and objects cannot identify a record.
fn field_state(object: &Map<String, Value>, name: &str) -> FieldState {
  match object.get(name) {
    None | Some(Value::Null) => FieldState::Missing,
    Some(Value::String(s)) if s.trim().is_empty() => FieldState::Missing,
    Some(Value::String(_)) | Some(Value::Number(_)) | Some(Value::Bool(_)) => FieldState::Present,
    Some(Value::Array(_)) | Some(Value::Object(_)) => FieldState::Invalid,
  }
}
