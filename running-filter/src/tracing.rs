//! Logging setup shared by the library and its binaries.
//!
//! Library code logs through the `tracing` macros re-exported from
//! [`prelude`]; binaries call [`init`] once to install a subscriber.

use tracing_subscriber::EnvFilter;

pub mod prelude {
    pub use ::tracing::{debug, error, info, trace, warn};
}

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs a stderr subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`. Stdout stays free for filter output.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
