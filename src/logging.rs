use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "playlyzer=info,tower_http=info";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to info level for this
/// crate and the HTTP trace layer. Diagnostic output goes to stderr so it does
/// not interleave with tables printed on stdout. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
