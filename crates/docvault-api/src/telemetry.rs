//! Tracing subscriber initialization.

use docvault_core::Config;
use tracing_subscriber::EnvFilter;

/// Initialize tracing. Production gets JSON lines; development gets the
/// human-readable formatter. `RUST_LOG` overrides the default filter.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn"));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
