//! Integration tests for the validator: files, gzip, HTTP resources.

mod common;

use common::*;
use jsonl_validate::{validate, Config, InputFileType, Message, StructuredReporter, ValidateError};

fn config_for(url: String) -> Config {
  Config {
    input_url: url,
    ..Config::default()
  }
}

fn texts(messages: &[Message]) -> Vec<String> {
  messages.iter().map(Message::text).collect()
}

#[test]
fn good_jsonl_file() {
  let file = write_temp(GOOD_DATA.as_bytes(), ".jsonl");
  let mut messages: Vec<Message> = Vec::new();
  let summary = validate(&config_for(file_url(&file)), &mut messages).unwrap();

  assert_eq!(summary.total_lines, 12);
  assert_eq!(summary.bad_total(), 0);
  let texts = texts(&messages);
  assert!(texts.contains(&"Validating as a JSONL file.".to_string()));
  assert_eq!(texts.last().unwrap(), "Validated 12 lines, 0 were bad.");
}

#[test]
fn jsonl_file_with_bad_records() {
  let file = write_temp(BAD_DATA.as_bytes(), ".jsonl");
  let mut messages: Vec<Message> = Vec::new();
  let summary = validate(&config_for(file_url(&file)), &mut messages).unwrap();

  assert_eq!(summary.total_lines, 16);
  assert_eq!(summary.no_record_id, 1);
  assert_eq!(summary.no_data_source, 1);
  assert_eq!(summary.malformed, 2);
  assert_eq!(summary.unknown_invalid, 0);

  let texts = texts(&messages);
  assert!(texts.contains(&"Line 2 is missing the RECORD_ID field.".to_string()));
  assert!(texts.contains(&"Line 3 is missing the DATA_SOURCE field.".to_string()));
  assert!(texts.contains(&"Line 8 is not well formed JSON.".to_string()));
  assert!(texts.contains(&"Line 14 is not well formed JSON.".to_string()));
  assert_eq!(
    &texts[texts.len() - 4..],
    &[
      "1 line(s) had no RECORD_ID field.",
      "1 line(s) had no DATA_SOURCE field.",
      "2 line(s) are not well formed JSON-lines.",
      "Validated 16 lines, 4 were bad.",
    ]
  );
}

#[test]
fn missing_file() {
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for("file:///badfile.jsonl".into()), &mut messages).unwrap_err();
  assert!(matches!(err, ValidateError::OpenFile { .. }));
  assert!(texts(&messages)
    .last()
    .unwrap()
    .starts_with("Fatal error opening input file: /badfile.jsonl"));
}

#[test]
fn unknown_extension_without_override() {
  let file = write_temp(GOOD_DATA.as_bytes(), ".txt");
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for(file_url(&file)), &mut messages).unwrap_err();
  assert!(matches!(err, ValidateError::UnknownFileFormat(_)));
  assert_eq!(
    texts(&messages).last().unwrap(),
    "If this is a valid JSONL file, please rename with the .jsonl extension or use the file type override (--file-type)."
  );
}

#[test]
fn file_type_override() {
  let file = write_temp(GOOD_DATA.as_bytes(), ".txt");
  let config = Config {
    input_file_type: Some(InputFileType::Jsonl),
    ..config_for(file_url(&file))
  };
  let mut messages: Vec<Message> = Vec::new();
  let summary = validate(&config, &mut messages).unwrap();
  assert_eq!(summary.total_lines, 12);
}

#[test]
fn gzip_file() {
  let file = write_temp(&gzip(BAD_DATA.as_bytes()), ".jsonl.gz");
  let mut messages: Vec<Message> = Vec::new();
  let summary = validate(&config_for(file_url(&file)), &mut messages).unwrap();
  assert_eq!(summary.total_lines, 16);
  assert_eq!(summary.bad_total(), 4);
  assert!(texts(&messages).contains(&"Validating a GZ file.".to_string()));
}

#[test]
fn gzip_file_that_is_not_gzipped() {
  let file = write_temp(GOOD_DATA.as_bytes(), ".gz");
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for(file_url(&file)), &mut messages).unwrap_err();
  assert!(matches!(err, ValidateError::GzipRead { .. }));
  assert!(messages.iter().all(|m| !matches!(m, Message::Summary { .. })));
}

#[test]
fn jsonl_resource() {
  let server = OneShotServer::start("200 OK", GOOD_DATA.as_bytes().to_vec(), None);
  let mut messages: Vec<Message> = Vec::new();
  let summary = validate(&config_for(server.url("records.jsonl")), &mut messages).unwrap();
  server.join();

  assert_eq!(summary.total_lines, 12);
  assert!(texts(&messages).contains(&"Validating as a JSONL resource.".to_string()));
}

#[test]
fn gzip_resource() {
  let server = OneShotServer::start("200 OK", gzip(BAD_DATA.as_bytes()), None);
  let mut messages: Vec<Message> = Vec::new();
  let summary = validate(&config_for(server.url("records.jsonl.gz")), &mut messages).unwrap();
  server.join();

  assert_eq!(summary.total_lines, 16);
  assert_eq!(summary.bad_total(), 4);
  assert!(texts(&messages).contains(&"Validating a GZ resource.".to_string()));
}

#[test]
fn gzip_resource_that_is_not_gzipped() {
  let server = OneShotServer::start("200 OK", GOOD_DATA.as_bytes().to_vec(), None);
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for(server.url("records.gz")), &mut messages).unwrap_err();
  server.join();
  assert!(matches!(err, ValidateError::GzipRead { .. }));
}

#[test]
fn resource_with_unknown_extension() {
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for("http://127.0.0.1:9/records.txt".into()), &mut messages).unwrap_err();
  assert!(matches!(err, ValidateError::UnknownResourceFormat(_)));
  assert!(texts(&messages)
    .last()
    .unwrap()
    .starts_with("If this is a valid JSONL resource"));
}

#[test]
fn unreachable_resource() {
  let url = format!("http://127.0.0.1:{}/bad.jsonl", closed_port());
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for(url), &mut messages).unwrap_err();
  assert!(matches!(err, ValidateError::Fetch { .. }));
  assert!(err.to_string().starts_with("Fatal error retrieving input-url"));
}

#[test]
fn resource_not_found() {
  let server = OneShotServer::start("404 Not Found", b"missing".to_vec(), None);
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for(server.url("records.jsonl")), &mut messages).unwrap_err();
  server.join();
  assert!(matches!(err, ValidateError::Fetch { .. }));
}

#[test]
fn connection_dropped_mid_stream() {
  let five_lines: String = GOOD_DATA.lines().take(5).map(|l| format!("{}\n", l)).collect();
  // Promise more bytes than are sent, then hang up.
  let declared = five_lines.len() + 4096;
  let server = OneShotServer::start("200 OK", five_lines.into_bytes(), Some(declared));
  let mut messages: Vec<Message> = Vec::new();
  let err = validate(&config_for(server.url("records.jsonl")), &mut messages).unwrap_err();
  server.join();

  assert!(matches!(err, ValidateError::Read { .. }));
  assert!(!err.is_acquisition());
  assert!(messages.iter().all(|m| !matches!(m, Message::Summary { .. })));
}

#[test]
fn structured_output() {
  let file = write_temp(BAD_DATA.as_bytes(), ".jsonl");
  let mut reporter = StructuredReporter::new(Vec::new());
  validate(&config_for(file_url(&file)), &mut reporter).unwrap();

  let out = String::from_utf8(reporter.into_inner()).unwrap();
  let entries: Vec<serde_json::Value> = out
    .lines()
    .map(|l| serde_json::from_str(l).unwrap())
    .collect();
  let last = entries.last().unwrap();
  assert_eq!(last["id"], "validate-2210");
  assert_eq!(last["details"]["total_lines"], 16);
  assert_eq!(last["details"]["bad_lines"], 4);
  assert!(entries.iter().any(|e| e["id"] == "validate-3003" && e["level"] == "WARN"));
}

#[test]
fn structured_output_respects_log_level() {
  let file = write_temp(BAD_DATA.as_bytes(), ".jsonl");
  let config = Config {
    log_level: "WARN".into(),
    ..config_for(file_url(&file))
  };
  let mut reporter = StructuredReporter::new(Vec::new());
  validate(&config, &mut reporter).unwrap();

  let out = String::from_utf8(reporter.into_inner()).unwrap();
  assert!(!out.contains("validate-2210"));
  assert!(out.contains("validate-3001"));
}
