//! Host runtime boundary.
//!
//! # Data Flow
//! ```text
//! bootstrap
//!     → Host::create_app(Box<dyn AppBehavior>)
//!     → HostedApp::run
//!         → AppBehavior::on_configure(&mut dyn AppEnv)   (property bytes handed off)
//!         → AppBehavior::on_init
//!         → serve until shutdown
//!         → AppBehavior::on_deinit
//!     → HostedApp::wait
//!     → Host::ensure_cleanup
//! ```
//!
//! # Design Decisions
//! - The host drives every transition; apps only answer callbacks
//! - Every callback must be implemented explicitly (no default bodies)
//! - Completion is signalled through the env, and the host checks it
//!   happened exactly once

pub mod error;
pub mod local;
pub mod property;

use serde_json::Value;

pub use error::{AppError, RuntimeError};
pub use local::{LocalApp, LocalRuntime, RuntimeConfig};
pub use property::{PropertyError, PropertyStore};

/// Host capabilities exposed to application callbacks.
pub trait AppEnv {
    /// Hand raw JSON bytes to the host's property store.
    ///
    /// Parsing and validation belong to the host; failures are not reported
    /// back to the caller.
    fn init_property_from_json_bytes(&mut self, bytes: Vec<u8>);

    /// Read a property by dot-separated path.
    fn get_property(&self, path: &str) -> Option<Value>;

    /// Top-level property keys.
    fn property_keys(&self) -> Vec<String>;

    fn on_configure_done(&mut self);

    fn on_init_done(&mut self);

    fn on_deinit_done(&mut self);
}

/// Callback contract an application supplies to the host.
pub trait AppBehavior: Send {
    /// Load configuration. Must call [`AppEnv::on_configure_done`] once.
    fn on_configure(&mut self, env: &mut dyn AppEnv) -> Result<(), AppError>;

    /// Prepare to run. Must call [`AppEnv::on_init_done`] once.
    fn on_init(&mut self, env: &mut dyn AppEnv) -> Result<(), AppError>;

    /// Release app resources after shutdown was requested.
    fn on_deinit(&mut self, env: &mut dyn AppEnv);
}

/// How [`HostedApp::run`] schedules the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run to completion on the calling thread.
    Foreground,
    /// Run on a worker thread; `run` returns once the app is running.
    Background,
}

/// An application object owned by the host.
pub trait HostedApp {
    fn run(&mut self, mode: RunMode) -> Result<(), RuntimeError>;

    /// Block until the app has fully stopped.
    fn wait(&mut self) -> Result<(), RuntimeError>;
}

/// The host runtime itself.
pub trait Host {
    type App: HostedApp;

    fn create_app(&self, behavior: Box<dyn AppBehavior>) -> Result<Self::App, RuntimeError>;

    /// Release process-wide resources once apps have stopped.
    fn ensure_cleanup(&self);
}
