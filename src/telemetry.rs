//! Tracing bootstrap for binaries and tests embedding the builder core.
//!
//! The filter comes from `FLOWLOOM_LOG` (falling back to `info`); a `.env`
//! file is loaded first so the variable can live there during development.

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable controlling the log filter.
pub const LOG_ENV_VAR: &str = "FLOWLOOM_LOG";

/// Installs the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    dotenvy::dotenv().ok();
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(ErrorLayer::default())
        .try_init();
}
