//! Command-line surface: clap flags, each backed by a `JSONL_VALIDATE_*` env var.

use clap::Parser;

use crate::config::Config;
use crate::types::InputFileType;

const LONG_ABOUT: &str = "Validate that each line of a JSON-lines (JSONL) file is a well formed
record carrying RECORD_ID and DATA_SOURCE.

Usage example:

  jsonl-validate --input-url \"file:///path/to/json/lines/file.jsonl\"
  jsonl-validate --input-url \"https://example.com/truth-set.jsonl.gz\"
  zcat records.jsonl.gz | jsonl-validate";

#[derive(Parser, Debug)]
#[command(
  name = "jsonl-validate",
  version,
  about = "Validates a JSON-lines file.",
  long_about = LONG_ABOUT
)]
pub struct Cli {
  #[arg(
    long,
    env = "JSONL_VALIDATE_INPUT_URL",
    default_value = "",
    hide_default_value = true,
    help = "Input location (file://, http://, https://); reads piped stdin when empty"
  )]
  pub input_url: String,
  #[arg(
    long = "file-type",
    env = "JSONL_VALIDATE_INPUT_FILE_TYPE",
    help = "Treat the input as this type regardless of its name (jsonl|gz)"
  )]
  pub file_type: Option<InputFileType>,
  #[arg(long, env = "JSONL_VALIDATE_JSON_OUTPUT", help = "Output machine-readable JSON log entries")]
  pub json_output: bool,
  #[arg(
    long,
    env = "JSONL_VALIDATE_LOG_LEVEL",
    default_value = "INFO",
    help = "TRACE, DEBUG, INFO, WARN, ERROR, FATAL or PANIC"
  )]
  pub log_level: String,
  #[arg(
    long = "http-timeout",
    env = "JSONL_VALIDATE_HTTP_TIMEOUT",
    value_name = "SECONDS",
    help = "Give up on HTTP(S) inputs that take longer than this"
  )]
  pub http_timeout: Option<u64>,
}

impl Cli {
  pub fn into_config(self) -> Config {
    Config {
      input_url: self.input_url,
      input_file_type: self.file_type,
      json_output: self.json_output,
      log_level: self.log_level,
      http_timeout_secs: self.http_timeout,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_read_stdin_as_plain_text() {
    let config = Cli::try_parse_from(["jsonl-validate"]).unwrap().into_config();
    assert!(config.input_url.is_empty());
    assert_eq!(config.input_file_type, None);
    assert!(!config.json_output);
    assert_eq!(config.log_level, "INFO");
    assert_eq!(config.http_timeout(), None);
  }

  #[test]
  fn all_flags() {
    let config = Cli::try_parse_from([
      "jsonl-validate",
      "--input-url",
      "file:///tmp/a.txt",
      "--file-type",
      "JSONL",
      "--json-output",
      "--log-level",
      "warn",
      "--http-timeout",
      "5",
    ])
    .unwrap()
    .into_config();
    assert_eq!(config.input_url, "file:///tmp/a.txt");
    assert_eq!(config.input_file_type, Some(InputFileType::Jsonl));
    assert!(config.json_output);
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.http_timeout_secs, Some(5));
  }

  #[test]
  fn bad_file_type_is_a_usage_error() {
    assert!(Cli::try_parse_from(["jsonl-validate", "--file-type", "csv"]).is_err());
  }
}
