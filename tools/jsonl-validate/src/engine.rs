//! Line classification engine: stream lines in, `ValidationSummary` out.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::error::ValidateError;
use crate::record::{JsonRecordChecker, RecordChecker};
use crate::report::{Message, Reporter};
use crate::types::{FailureReason, ValidationOutcome, ValidationSummary};

/// Order in which non-zero defect counters are reported.
const REPORT_ORDER: [FailureReason; 4] = [
  FailureReason::MissingRecordId,
  FailureReason::MissingDataSource,
  FailureReason::MalformedJson,
  FailureReason::Other,
];

/// Scans JSONL streams with a fixed record checker. Holds no per-scan state,
/// so one engine can serve any number of independent scans.
pub struct Engine<C = JsonRecordChecker> {
  checker: C,
}

impl Engine<JsonRecordChecker> {
  pub fn with_defaults() -> Self {
    Self::new(JsonRecordChecker::default())
  }
}

impl<C: RecordChecker> Engine<C> {
  pub fn new(checker: C) -> Self {
    Self { checker }
  }

  /// Read `reader` to exhaustion and classify every line.
  ///
  /// Each defective line is reported as it is found; the defect counts and the
  /// "Validated N lines, M were bad." summary follow at end of stream. A read
  /// error aborts the scan: nothing further is reported and the partial
  /// counts are dropped.
  pub fn scan<R, P>(&self, mut reader: R, reporter: &mut P) -> Result<ValidationSummary, ValidateError>
  where
    R: BufRead,
    P: Reporter + ?Sized,
  {
    let mut summary = ValidationSummary::default();
    let mut buf = Vec::new();

    debug!("scan started");
    loop {
      buf.clear();
      let read = reader
        .read_until(b'\n', &mut buf)
        .map_err(|source| ValidateError::Read {
          line: summary.total_lines,
          source,
        })?;
      if read == 0 {
        break;
      }

      summary.total_lines += 1;
      let line = summary.total_lines;

      // Blank lines count toward the total but are never classified.
      let Some(check) = self.classify(&buf) else {
        continue;
      };
      let outcome = ValidationOutcome::from(check);
      trace!(line, ?outcome, "classified");
      summary.record(outcome);
      if let Err(reason) = check {
        reporter.emit(&Message::LineDefect { reason, line });
      }
    }
    debug!(
      total_lines = summary.total_lines,
      bad_lines = summary.bad_total(),
      "scan finished"
    );

    report_summary(&summary, reporter);
    Ok(summary)
  }

  /// `None` for blank lines. Invalid UTF-8 sequences become U+FFFD, so a
  /// legacy-encoded byte inside a string value still parses while one in a
  /// structural position does not.
  fn classify(&self, raw: &[u8]) -> Option<Result<(), FailureReason>> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(self.checker.check(trimmed))
    }
  }
}

/// Emit one message per non-zero defect counter, then the summary line.
pub fn report_summary<P: Reporter + ?Sized>(summary: &ValidationSummary, reporter: &mut P) {
  for reason in REPORT_ORDER {
    let count = match reason {
      FailureReason::MissingRecordId => summary.no_record_id,
      FailureReason::MissingDataSource => summary.no_data_source,
      FailureReason::MalformedJson => summary.malformed,
      FailureReason::Other => summary.unknown_invalid,
    };
    if count > 0 {
      reporter.emit(&Message::DefectCount { reason, count });
    }
  }
  reporter.emit(&Message::summary(summary));
}
