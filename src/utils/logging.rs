use tracing_subscriber::{fmt, EnvFilter};

/// Log level used when `RUST_LOG` is unset
pub const LOG_LEVEL: &str = "info";

/// Install the global compact stdout subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(LOG_LEVEL));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stdout)
        .try_init();
}
