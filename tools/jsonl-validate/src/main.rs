//! Binary entrypoint: validate one JSONL input, report to stdout.
//!
//! Exit status is 0 when the input was fully read (even if lines were bad)
//! and 1 when it could not be opened or read.

use clap::Parser;
use jsonl_validate::cli::Cli;
use jsonl_validate::logging;
use jsonl_validate::{validate, PlainTextReporter, Reporter, StructuredReporter};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
  logging::init_tracing();
  let config = Cli::parse().into_config();

  let stdout = io::stdout();
  let mut reporter: Box<dyn Reporter> = if config.json_output {
    Box::new(StructuredReporter::new(stdout.lock()))
  } else {
    Box::new(PlainTextReporter::new(stdout.lock()))
  };

  match validate(&config, &mut reporter) {
    Ok(_) => ExitCode::SUCCESS,
    Err(e) => {
      let _ = writeln!(io::stderr(), "jsonl-validate: {}", e);
      ExitCode::FAILURE
    }
  }
}
