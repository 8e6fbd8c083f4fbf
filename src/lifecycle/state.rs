//! Hosted application lifecycle state machine.
//!
//! # States
//! - NotConfigured: app object exists, no callback has run
//! - Configuring: configure callback in progress
//! - Configured: properties loaded, init pending
//! - Running: app serving until shutdown
//! - Stopped: deinit finished, worker exited
//! - CleanedUp: host released process-wide resources
//!
//! # State Transitions
//! ```text
//! NotConfigured → Configuring → Configured → Running → Stopped → CleanedUp
//! ```
//!
//! # Design Decisions
//! - Strictly forward: each state has exactly one successor
//! - Transitions are compare-and-swap so a racing caller cannot skip a state
//! - State changes logged for observability

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use thiserror::Error;

/// Lifecycle state of a hosted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AppState {
    NotConfigured = 0,
    Configuring = 1,
    Configured = 2,
    Running = 3,
    Stopped = 4,
    CleanedUp = 5,
}

impl AppState {
    /// The only state this one may move to, if any.
    pub fn next(self) -> Option<AppState> {
        match self {
            AppState::NotConfigured => Some(AppState::Configuring),
            AppState::Configuring => Some(AppState::Configured),
            AppState::Configured => Some(AppState::Running),
            AppState::Running => Some(AppState::Stopped),
            AppState::Stopped => Some(AppState::CleanedUp),
            AppState::CleanedUp => None,
        }
    }

    fn from_u8(value: u8) -> AppState {
        match value {
            0 => AppState::NotConfigured,
            1 => AppState::Configuring,
            2 => AppState::Configured,
            3 => AppState::Running,
            4 => AppState::Stopped,
            _ => AppState::CleanedUp,
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppState::NotConfigured => "not_configured",
            AppState::Configuring => "configuring",
            AppState::Configured => "configured",
            AppState::Running => "running",
            AppState::Stopped => "stopped",
            AppState::CleanedUp => "cleaned_up",
        };
        f.write_str(name)
    }
}

/// Errors raised by illegal lifecycle moves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("invalid lifecycle transition {from} -> {to} (current state: {current})")]
    InvalidTransition {
        from: AppState,
        to: AppState,
        current: AppState,
    },
}

/// Atomic holder of an [`AppState`].
#[derive(Debug)]
pub struct Lifecycle {
    state: AtomicU8,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(AppState::NotConfigured as u8),
        }
    }

    /// Current state.
    pub fn current(&self) -> AppState {
        AppState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Move from `from` to `to`.
    ///
    /// Fails unless `to` is the direct successor of `from` and the current
    /// state is still `from`.
    pub fn transition(&self, from: AppState, to: AppState) -> Result<(), LifecycleError> {
        let invalid = |current| LifecycleError::InvalidTransition { from, to, current };

        if from.next() != Some(to) {
            return Err(invalid(self.current()));
        }

        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|actual| invalid(AppState::from_u8(actual)))?;

        tracing::debug!(from = %from, to = %to, "Lifecycle transition");
        Ok(())
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
