//! Startup orchestration.
//!
//! # Responsibilities
//! - Wrap the startup configuration in the tutor app behavior
//! - Create the app on the host and run it in the background
//! - Block until the app stops, then run host cleanup exactly once
//!
//! # Design Decisions
//! - Fail fast: creation and run errors are returned before any wait
//! - No logging or exiting here; `main` decides how to report

use thiserror::Error;

use crate::app::TutorApp;
use crate::config::AppConfig;
use crate::runtime::{Host, HostedApp, RunMode, RuntimeError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to create the app: {0}")]
    CreateApp(#[source] RuntimeError),

    #[error("failed to run the app: {0}")]
    Run(#[source] RuntimeError),

    #[error("app terminated abnormally: {0}")]
    Wait(#[source] RuntimeError),
}

/// Create, run and wait for the tutor app, then clean up the host.
pub fn start_app_blocking<H: Host>(host: &H, config: AppConfig) -> Result<(), BootstrapError> {
    let mut app = host
        .create_app(Box::new(TutorApp::new(config)))
        .map_err(BootstrapError::CreateApp)?;

    app.run(RunMode::Background).map_err(BootstrapError::Run)?;
    let waited = app.wait().map_err(BootstrapError::Wait);

    host.ensure_cleanup();
    waited
}
