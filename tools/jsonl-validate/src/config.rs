//! Run configuration with sane defaults.

use std::time::Duration;

use crate::types::InputFileType;

#[derive(Debug, Clone)]
pub struct Config {
  /// `file://`, `http://` or `https://` URL; empty means piped stdin.
  pub input_url: String,
  /// Format override for inputs whose name does not end in `jsonl` or `gz`.
  pub input_file_type: Option<InputFileType>,
  /// Emit JSON log entries instead of plain text lines.
  pub json_output: bool,
  /// TRACE, DEBUG, INFO, WARN, ERROR, FATAL or PANIC. Invalid names fall back to INFO.
  pub log_level: String,
  /// Whole-request timeout for HTTP(S) inputs. `None` waits for the full body.
  pub http_timeout_secs: Option<u64>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_url: String::new(),
      input_file_type: None,
      json_output: false,
      log_level: "INFO".into(),
      http_timeout_secs: None,
    }
  }
}

impl Config {
  pub fn http_timeout(&self) -> Option<Duration> {
    self.http_timeout_secs.map(Duration::from_secs)
  }
}
