//! Top-level operation: resolve the input, scan it, report the outcome.

use tracing::debug;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::ValidateError;
use crate::report::{LogLevel, Message, Reporter};
use crate::source::{self, Source};
use crate::types::ValidationSummary;

/// Validate the input named by `config`, reporting through `reporter`.
///
/// `Ok` means the whole stream was read, however many lines were bad. On
/// `Err` the failure (plus any hint) has already been reported and no summary
/// was produced.
pub fn validate<P: Reporter + ?Sized>(
  config: &Config,
  reporter: &mut P,
) -> Result<ValidationSummary, ValidateError> {
  let level = match config.log_level.parse::<LogLevel>() {
    Ok(level) => level,
    Err(_) => {
      reporter.emit(&Message::BadLogLevel(config.log_level.clone()));
      LogLevel::Info
    }
  };
  reporter.set_level(level);

  let result = run(config, reporter);
  if let Err(err) = &result {
    debug!(error = %err, "validation aborted");
    reporter.emit(&err.message());
    if let Some(hint) = err.hint() {
      reporter.emit(&hint);
    }
  }
  result
}

fn run<P: Reporter + ?Sized>(
  config: &Config,
  reporter: &mut P,
) -> Result<ValidationSummary, ValidateError> {
  if !config.input_url.is_empty() {
    source::check_len(&config.input_url)?;
    reporter.emit(&Message::ValidatingUrl(config.input_url.clone()));
  }
  let source = Source::resolve(&config.input_url, config.input_file_type)?;
  reporter.emit(&source.progress_message());

  let reader = source.open(config.http_timeout())?;
  Engine::with_defaults().scan(reader, reporter)
}
