//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap, runtime, lifecycle
//!     → tracing events (structured fields: app_id, path, state)
//!     → logging.rs (fmt layer, microsecond local timestamps)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Installed once, before the command line is parsed
//! - Filter overridable through RUST_LOG

pub mod logging;
