use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install a stdout `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Only the first call
/// does anything; it returns false if another global subscriber was already
/// set by the host application.
pub fn init(default_filter: &str) -> bool {
    *INSTALLED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .is_ok()
    })
}
