//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the process-wide subscriber
//! - Stamp every line with a local timestamp at microsecond precision
//! - Configure log level via RUST_LOG
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Plain text without ANSI colors; lines go to stderr
//! - The formatting layer is reusable with any writer so output can be captured

use tracing::Subscriber;
use tracing_subscriber::fmt::{self, time::ChronoLocal, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Timestamp layout, e.g. `2026/10/16 09:41:07.123456`.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// Filter used when RUST_LOG is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Formatting layer writing to `writer`.
pub fn fmt_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_ansi(false)
        .with_writer(writer)
}

/// Filter from RUST_LOG, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(std::io::stderr))
        .try_init();
}
