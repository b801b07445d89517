//! Diagnostic tracing for the binary. Report messages do not go through here.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the tracing filter, e.g. `jsonl_validate=debug`.
pub const LOG_ENV: &str = "JSONL_VALIDATE_LOG";

static INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `JSONL_VALIDATE_LOG` (default `warn`).
/// Safe to call more than once.
pub fn init_tracing() {
  INIT.call_once(|| {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
      .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
      .with(filter)
      .try_init();
  });
}
