//! JSON-lines record validator.
//!
//! Streams a JSONL input (file, HTTP(S) resource or piped stdin, optionally
//! gzipped), checks every non-blank line for well-formed JSON with RECORD_ID
//! and DATA_SOURCE, and reports per-defect counts plus a final
//! "Validated N lines, M were bad." line.
//!
//! Read-only: records are never corrected or re-emitted.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod record;
pub mod report;
pub mod source;
pub mod types;
pub mod validator;

pub use config::Config;
pub use engine::Engine;
pub use error::ValidateError;
pub use record::{JsonRecordChecker, RecordChecker};
pub use report::{LogLevel, Message, PlainTextReporter, Reporter, StructuredReporter};
pub use types::{FailureReason, InputFileType, ValidationOutcome, ValidationSummary};
pub use validator::validate;
