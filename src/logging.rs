//! Log output for hosts embedding the framework.
//!
//! The library crates only emit `tracing` events. A host that has no
//! subscriber of its own can call [`init`] once at startup; the filter is
//! read from `RUST_LOG` and falls back to [`DEFAULT_FILTER`].

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "decl=info,decl_registry=warn,decl_components=warn";

/// Install a compact formatter with the `RUST_LOG` filter.
///
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), TryInitError> {
    init_with_default(DEFAULT_FILTER)
}

/// Like [`init`], with a caller-chosen fallback filter.
pub fn init_with_default(default_filter: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        let _ = init_with_default("trace");
        assert!(init().is_err());
    }
}
