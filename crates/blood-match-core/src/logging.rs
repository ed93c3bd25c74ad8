//! Tracing subscriber setup for binaries embedding the engine.
//!
//! The library itself only emits events; installing a subscriber is left to
//! the host process.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "blood_match_core=info";
const VERBOSE_FILTER: &str = "blood_match_core=debug,info";

fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Human-readable compact output on stderr. `RUST_LOG` overrides the default filter.
pub fn init_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for log shippers.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .json(),
        )
        .init();
}
