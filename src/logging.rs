use crate::config::LogFormat;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
/// - Respects `RUST_LOG` if set, defaults to `info`
/// - Also receives `log` records emitted by the service crates
/// - Returns `false` if a subscriber was already installed
pub fn init_logging(format: LogFormat) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(env_filter).with_writer(io::stderr);

    match format {
        LogFormat::Compact => builder.with_target(false).compact().try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
