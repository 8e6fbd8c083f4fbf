//! Language tutor app (voice assistant with memory).
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ config::Cli ──▶ AppConfig
//!                              │
//!                              ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ lifecycle::start_app_blocking                             │
//!   │   Host::create_app(TutorApp)                              │
//!   │   HostedApp::run ──▶ on_configure ──▶ property store      │
//!   │                  ──▶ on_init ──▶ Running                  │
//!   │   HostedApp::wait ◀── SIGINT / SIGTERM ◀── on_deinit      │
//!   │   Host::ensure_cleanup                                    │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit status is 0 after a normal shutdown and 1 when the property file
//! cannot be read or the app cannot be created or started.

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use language_tutor::config::{AppConfig, Cli};
use language_tutor::lifecycle::start_app_blocking;
use language_tutor::observability::logging;
use language_tutor::runtime::{LocalRuntime, RuntimeConfig};

fn main() -> ExitCode {
    // Set up logging first so every later line carries a timestamp.
    logging::init_logging();

    let config = AppConfig::from(Cli::parse());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        property_file = ?config.property_file_path,
        "language-tutor starting"
    );

    let runtime = LocalRuntime::new(RuntimeConfig {
        default_properties: json!({ "ten": { "uri": "localhost" } }),
    });

    match start_app_blocking(&runtime, config) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
