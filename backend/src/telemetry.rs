//! Tracing subscriber setup.

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install a JSON formatter filtered by `RUST_LOG`.
///
/// A subscriber that is already installed is left in place and the failure is
/// logged through it.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init();
    if let Err(error) = result {
        warn!(error = %error, "tracing subscriber already initialised");
    }
}
