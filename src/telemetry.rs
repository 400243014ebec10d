use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, falling back to `info`. Logs go to stderr so
/// the fare output stream on stdout stays machine-readable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
