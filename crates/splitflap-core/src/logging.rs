//! Logging shim.
//!
//! With the `tracing` feature enabled this re-exports the `tracing` macros.
//! Without it, the crate-root `debug!`, `trace!` and `warn!` macros expand to
//! nothing so call sites compile identically in both configurations:
//!
//! ```ignore
//! #[cfg(feature = "tracing")]
//! use crate::logging::debug;
//! #[cfg(not(feature = "tracing"))]
//! use crate::debug;
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}

/// Install a JSON `tracing` subscriber on stderr.
///
/// `RUST_LOG` takes precedence over `default_directive`. Returns `false` if
/// a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(default_directive: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
