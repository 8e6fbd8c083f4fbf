//! Error types shared across the host runtime boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::lifecycle::LifecycleError;

/// Errors an application callback hands back to the host.
#[derive(Debug, Error)]
pub enum AppError {
    /// The property file named on the command line could not be read.
    #[error("failed to read property file {}: {source}", path.display())]
    PropertyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the host runtime while creating or driving an app.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("configure callback failed: {0}")]
    Configure(#[source] AppError),

    #[error("init callback failed: {0}")]
    Init(#[source] AppError),

    #[error("configure callback returned without signalling completion")]
    ConfigureNotDone,

    #[error("configure completion signalled more than once")]
    ConfigureDoneTwice,

    #[error("init callback returned without signalling completion")]
    InitNotDone,

    #[error("init completion signalled more than once")]
    InitDoneTwice,

    #[error("app has already been started")]
    AlreadyStarted,

    #[error("default properties must be a JSON object")]
    InvalidDefaults,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("app worker thread panicked")]
    WorkerPanicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::PropertyFile {
            path: PathBuf::from("/etc/tutor/property.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read property file /etc/tutor/property.json: No such file or directory"
        );

        let err = RuntimeError::Configure(err);
        assert!(err.to_string().starts_with("configure callback failed: "));
        assert!(err.to_string().contains("/etc/tutor/property.json"));
    }
}
