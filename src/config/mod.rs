//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (--property <path>)
//!     → schema.rs (clap parse → AppConfig, immutable)
//!     → TutorApp (configure callback)
//!     → loader.rs (read property file bytes)
//!     → host property store
//! ```
//!
//! # Design Decisions
//! - No path validation at parse time; the read happens in the configure callback
//! - An empty path means "use host defaults"
//! - Property contents are opaque here; the host parses them

pub mod loader;
pub mod schema;

pub use schema::{AppConfig, Cli};
