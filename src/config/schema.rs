//! Startup configuration schema.

use std::path::PathBuf;

use clap::Parser;

/// Command line of the tutor app.
#[derive(Debug, Parser)]
#[command(name = "language-tutor")]
#[command(about = "Voice assistant language tutor app", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The absolute path of property.json
    #[arg(long, value_name = "PATH", default_value = "")]
    pub property: String,
}

/// Startup configuration handed to the app behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Property file to load; `None` keeps the host defaults.
    pub property_file_path: Option<PathBuf>,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let property_file_path = if cli.property.is_empty() {
            None
        } else {
            Some(PathBuf::from(cli.property))
        };
        Self { property_file_path }
    }
}
