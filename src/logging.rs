use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "FIXBOARD_LOG";

/// `FIXBOARD_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the report, so logs go to stderr. A subscriber may
    // already be installed when embedded in tests; keep the existing one.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
