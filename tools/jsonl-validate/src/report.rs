//! Reporting capability: user-visible messages and the two output formats.
//!
//! Every message has a stable numeric id. The id range also fixes the level:
//! 2xxx info, 3xxx warn, 5xxx fatal.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::types::{FailureReason, InputFileType, ValidationSummary};

/// Prefix for structured message ids ("validate-2210").
pub const MESSAGE_PREFIX: &str = "validate";

// ---------------------------------------------------------------------------
// Log level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
  Trace,
  Debug,
  #[default]
  Info,
  Warn,
  Error,
  Fatal,
  Panic,
}

impl LogLevel {
  fn from_id(id: u32) -> Self {
    match id {
      0..=999 => Self::Trace,
      1000..=1999 => Self::Debug,
      2000..=2999 => Self::Info,
      3000..=3999 => Self::Warn,
      4000..=4999 => Self::Error,
      5000..=5999 => Self::Fatal,
      _ => Self::Panic,
    }
  }
}

impl FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "TRACE" => Ok(Self::Trace),
      "DEBUG" => Ok(Self::Debug),
      "INFO" => Ok(Self::Info),
      "WARN" | "WARNING" => Ok(Self::Warn),
      "ERROR" => Ok(Self::Error),
      "FATAL" => Ok(Self::Fatal),
      "PANIC" => Ok(Self::Panic),
      _ => Err(format!("invalid log level: {}", s)),
    }
  }
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Trace => "TRACE",
      Self::Debug => "DEBUG",
      Self::Info => "INFO",
      Self::Warn => "WARN",
      Self::Error => "ERROR",
      Self::Fatal => "FATAL",
      Self::Panic => "PANIC",
    };
    f.write_str(name)
  }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
  ValidatingUrl(String),
  ValidatingFile(InputFileType),
  ValidatingResource(InputFileType),
  ValidatingStdin,
  RenameFileHint,
  RenameResourceHint,
  /// Counters are emitted only when non-zero, in declaration order.
  DefectCount { reason: FailureReason, count: u64 },
  LineDefect { reason: FailureReason, line: u64 },
  BadLogLevel(String),
  Summary { total_lines: u64, bad_lines: u64 },
  /// Acquisition or read failure; `text` is the error's display form.
  Failure { id: u32, text: String },
}

impl Message {
  pub fn summary(summary: &ValidationSummary) -> Self {
    Self::Summary {
      total_lines: summary.total_lines,
      bad_lines: summary.bad_total(),
    }
  }

  pub fn id(&self) -> u32 {
    match self {
      Self::ValidatingUrl(_) => 2200,
      Self::ValidatingFile(InputFileType::Jsonl) => 2201,
      Self::ValidatingFile(InputFileType::Gz) => 2203,
      Self::ValidatingResource(InputFileType::Jsonl) => 2204,
      Self::ValidatingResource(InputFileType::Gz) => 2205,
      Self::ValidatingStdin => 2206,
      Self::RenameFileHint => 2003,
      Self::RenameResourceHint => 2004,
      Self::Summary { .. } => 2210,
      Self::DefectCount { reason, .. } => 3001 + reason_offset(*reason),
      Self::LineDefect { reason, .. } => 3005 + reason_offset(*reason),
      Self::BadLogLevel(_) => 3009,
      Self::Failure { id, .. } => *id,
    }
  }

  pub fn level(&self) -> LogLevel {
    LogLevel::from_id(self.id())
  }

  pub fn text(&self) -> String {
    match self {
      Self::ValidatingUrl(url) => format!("Validating URL string: {}", url),
      Self::ValidatingFile(InputFileType::Jsonl) => "Validating as a JSONL file.".into(),
      Self::ValidatingFile(InputFileType::Gz) => "Validating a GZ file.".into(),
      Self::ValidatingResource(InputFileType::Jsonl) => "Validating as a JSONL resource.".into(),
      Self::ValidatingResource(InputFileType::Gz) => "Validating a GZ resource.".into(),
      Self::ValidatingStdin => "Validating JSONL piped on stdin.".into(),
      Self::RenameFileHint => "If this is a valid JSONL file, please rename with the .jsonl extension or use the file type override (--file-type).".into(),
      Self::RenameResourceHint => "If this is a valid JSONL resource, please rename with the .jsonl extension or use the file type override (--file-type).".into(),
      Self::DefectCount { reason, count } => match reason {
        FailureReason::MissingRecordId => format!("{} line(s) had no RECORD_ID field.", count),
        FailureReason::MissingDataSource => format!("{} line(s) had no DATA_SOURCE field.", count),
        FailureReason::MalformedJson => format!("{} line(s) are not well formed JSON-lines.", count),
        FailureReason::Other => format!("{} line(s) did not validate for an unknown reason.", count),
      },
      Self::LineDefect { reason, line } => match reason {
        FailureReason::MissingRecordId => format!("Line {} is missing the RECORD_ID field.", line),
        FailureReason::MissingDataSource => format!("Line {} is missing the DATA_SOURCE field.", line),
        FailureReason::MalformedJson => format!("Line {} is not well formed JSON.", line),
        FailureReason::Other => format!("Line {} did not validate for an unknown reason.", line),
      },
      Self::BadLogLevel(name) => format!("Unable to set log level to {}, falling back to INFO.", name),
      Self::Summary { total_lines, bad_lines } => {
        format!("Validated {} lines, {} were bad.", total_lines, bad_lines)
      }
      Self::Failure { text, .. } => text.clone(),
    }
  }

  fn details(&self) -> Value {
    match self {
      Self::ValidatingUrl(url) => json!({ "input_url": url }),
      Self::DefectCount { reason, count } => json!({ "reason": reason, "count": count }),
      Self::LineDefect { reason, line } => json!({ "reason": reason, "line": line }),
      Self::BadLogLevel(name) => json!({ "log_level": name }),
      Self::Summary { total_lines, bad_lines } => {
        json!({ "total_lines": total_lines, "bad_lines": bad_lines })
      }
      _ => Value::Null,
    }
  }
}

fn reason_offset(reason: FailureReason) -> u32 {
  match reason {
    FailureReason::MissingRecordId => 0,
    FailureReason::MissingDataSource => 1,
    FailureReason::MalformedJson => 2,
    FailureReason::Other => 3,
  }
}

// ---------------------------------------------------------------------------
// Reporter capability
// ---------------------------------------------------------------------------

/// Sink for user-visible messages.
pub trait Reporter {
  fn emit(&mut self, message: &Message);

  /// Reporters that filter by level override this; the default ignores it.
  fn set_level(&mut self, _level: LogLevel) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
  fn emit(&mut self, message: &Message) {
    (**self).emit(message)
  }

  fn set_level(&mut self, level: LogLevel) {
    (**self).set_level(level)
  }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
  fn emit(&mut self, message: &Message) {
    (**self).emit(message)
  }

  fn set_level(&mut self, level: LogLevel) {
    (**self).set_level(level)
  }
}

/// Captures messages in memory.
impl Reporter for Vec<Message> {
  fn emit(&mut self, message: &Message) {
    self.push(message.clone());
  }
}

/// One line of text per message. Every message is written, whatever the level.
pub struct PlainTextReporter<W: Write> {
  out: W,
}

impl<W: Write> PlainTextReporter<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> Reporter for PlainTextReporter<W> {
  fn emit(&mut self, message: &Message) {
    let _ = writeln!(self.out, "{}", message.text());
    let _ = self.out.flush();
  }
}

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
  time: String,
  level: LogLevel,
  id: String,
  text: &'a str,
  #[serde(skip_serializing_if = "Value::is_null")]
  details: Value,
}

/// One JSON object per message; messages below the threshold are dropped.
pub struct StructuredReporter<W: Write> {
  out: W,
  threshold: LogLevel,
}

impl<W: Write> StructuredReporter<W> {
  pub fn new(out: W) -> Self {
    Self {
      out,
      threshold: LogLevel::default(),
    }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> Reporter for StructuredReporter<W> {
  fn emit(&mut self, message: &Message) {
    let level = message.level();
    if level < self.threshold {
      return;
    }
    let text = message.text();
    let entry = LogEntry {
      time: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
      level,
      id: format!("{}-{}", MESSAGE_PREFIX, message.id()),
      text: &text,
      details: message.details(),
    };
    let _ = serde_json::to_writer(&mut self.out, &entry);
    let _ = writeln!(self.out);
    let _ = self.out.flush();
  }

  fn set_level(&mut self, level: LogLevel) {
    self.threshold = level;
  }
}
