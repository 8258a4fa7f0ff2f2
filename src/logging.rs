//! Logging setup for the `lineplan` binary.
//!
//! Events go to stderr so stdout only carries the plan report. `RUST_LOG`
//! overrides the default filter, e.g. `RUST_LOG=lineplan::schedule=debug`.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "lineplan=debug"
    } else {
        "lineplan=info"
    }
}

/// Install the global subscriber. Calling it twice keeps the first one.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Subscriber for tests, captured by the test harness.
#[cfg(test)]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("lineplan=debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_level() {
        assert_eq!(default_filter(false), "lineplan=info");
        assert_eq!(default_filter(true), "lineplan=debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_test();
        init(true);
        init(false);
        tracing::debug!("still logging after repeated init");
    }
}
