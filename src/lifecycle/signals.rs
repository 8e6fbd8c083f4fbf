//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT)
//! - Merge them with programmatic shutdown requests
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers are registered eagerly, before the app reports `Running`;
//!   a signal arriving between registration and the wait is not lost
//! - A failed handler registration disables that source only

use tokio::sync::broadcast;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// What ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Ctrl-C / SIGINT.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// [`Shutdown::trigger`](super::Shutdown::trigger) was called, or every
    /// handle was dropped.
    Requested,
}

/// Registered termination handlers.
pub struct TerminationSignals {
    #[cfg(unix)]
    interrupt: Option<Signal>,
    #[cfg(unix)]
    terminate: Option<Signal>,
    #[cfg(windows)]
    interrupt: Option<tokio::signal::windows::CtrlC>,
}

impl TerminationSignals {
    /// Install the handlers.
    ///
    /// Must be called within a Tokio runtime context with the signal driver
    /// enabled.
    #[cfg(unix)]
    pub fn register() -> Self {
        Self {
            interrupt: install("SIGINT", || signal(SignalKind::interrupt())),
            terminate: install("SIGTERM", || signal(SignalKind::terminate())),
        }
    }

    #[cfg(windows)]
    pub fn register() -> Self {
        Self {
            interrupt: install("Ctrl+C", tokio::signal::windows::ctrl_c),
        }
    }

    #[cfg(not(any(unix, windows)))]
    pub fn register() -> Self {
        Self {}
    }

    /// Wait for the first of SIGINT, SIGTERM or a shutdown broadcast.
    pub async fn wait(mut self, mut shutdown_rx: broadcast::Receiver<()>) -> Termination {
        #[cfg(unix)]
        let (interrupt, terminate) = (
            recv_or_pending(self.interrupt.as_mut()),
            recv_or_pending(self.terminate.as_mut()),
        );

        #[cfg(windows)]
        let (interrupt, terminate) = (
            async {
                match self.interrupt.as_mut() {
                    Some(ctrl_c) => {
                        ctrl_c.recv().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            },
            std::future::pending::<()>(),
        );

        #[cfg(not(any(unix, windows)))]
        let (interrupt, terminate) = (std::future::pending::<()>(), std::future::pending::<()>());

        let termination = tokio::select! {
            _ = interrupt => Termination::Interrupt,
            _ = terminate => Termination::Terminate,
            _ = shutdown_rx.recv() => Termination::Requested,
        };

        tracing::info!(?termination, "Shutdown signal received");
        termination
    }
}

fn install<T>(name: &str, f: impl FnOnce() -> std::io::Result<T>) -> Option<T> {
    match f() {
        Ok(handler) => Some(handler),
        Err(e) => {
            tracing::warn!("Failed to install {} handler: {}", name, e);
            None
        }
    }
}

#[cfg(unix)]
async fn recv_or_pending(signal: Option<&mut Signal>) {
    match signal {
        Some(signal) => {
            signal.recv().await;
        }
        None => std::future::pending::<()>().await,
    }
}
