use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging() {
    init_logging_with_default("info");
}

/// Same as [`init_logging`] but with a caller-chosen fallback filter when
/// `RUST_LOG` is unset, e.g. `"randtree=debug"` for `--verbose` runs.
pub fn init_logging_with_default(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
