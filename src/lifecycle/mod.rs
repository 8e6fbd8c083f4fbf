//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Parse CLI → Create app → Run (configure, init) → Wait → Cleanup
//!
//! State (state.rs):
//!     NotConfigured → Configuring → Configured → Running → Stopped → CleanedUp
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Worker leaves serve loop → Deinit → Stopped
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Cleanup runs only after the app has stopped

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use shutdown::Shutdown;
pub use startup::{start_app_blocking, BootstrapError};
pub use state::{AppState, Lifecycle, LifecycleError};
