//! In-process host runtime.
//!
//! # Responsibilities
//! - Create app objects with a property store seeded from runtime defaults
//! - Drive the configure → init → run → deinit callback sequence
//! - Check each completion signal arrives exactly once
//! - Serve until a termination signal or programmatic shutdown
//! - Mark stopped apps cleaned up
//!
//! # Design Decisions
//! - Callbacks before `Running` execute on the caller's thread so failures
//!   surface synchronously from `run`
//! - Each app owns a private current-thread Tokio runtime, used only to wait
//!   for termination
//! - Signal handlers are installed before the app turns `Running`, so a
//!   SIGTERM right after startup still goes through deinit and cleanup
//! - The runtime tracks apps weakly; an app dropped before it stopped is
//!   forgotten

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::thread::JoinHandle;

use tokio::runtime::Runtime;
use tokio::sync::broadcast;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::lifecycle::signals::TerminationSignals;
use crate::lifecycle::{AppState, Lifecycle, Shutdown};
use crate::runtime::{
    AppBehavior, AppEnv, Host, HostedApp, PropertyStore, RunMode, RuntimeError,
};

/// Settings for a [`LocalRuntime`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Property document every new app starts from. Must be a JSON object.
    pub default_properties: Value,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_properties: Value::Object(Map::new()),
        }
    }
}

/// Host runtime running apps inside the current process.
pub struct LocalRuntime {
    config: RuntimeConfig,
    apps: Mutex<Vec<Weak<Lifecycle>>>,
}

impl LocalRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            apps: Mutex::new(Vec::new()),
        }
    }

    /// Number of live apps not yet cleaned up.
    pub fn active_apps(&self) -> usize {
        self.apps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|lifecycle| lifecycle.current() != AppState::CleanedUp)
            .count()
    }
}

impl Host for LocalRuntime {
    type App = LocalApp;

    fn create_app(&self, behavior: Box<dyn AppBehavior>) -> Result<LocalApp, RuntimeError> {
        let properties = PropertyStore::with_defaults(self.config.default_properties.clone())
            .map_err(|_| RuntimeError::InvalidDefaults)?;

        let id = Uuid::new_v4();
        let lifecycle = Arc::new(Lifecycle::new());
        let properties = Arc::new(properties);

        {
            let mut apps = self.apps.lock().unwrap_or_else(PoisonError::into_inner);
            apps.retain(|app| app.strong_count() > 0);
            apps.push(Arc::downgrade(&lifecycle));
        }

        tracing::debug!(app_id = %id, "App created");

        Ok(LocalApp {
            id,
            core: Some(AppCore {
                id,
                behavior,
                env: LocalEnv::new(id, properties.clone()),
                lifecycle: lifecycle.clone(),
            }),
            properties,
            lifecycle,
            shutdown: Shutdown::new(),
            worker: None,
        })
    }

    fn ensure_cleanup(&self) {
        let mut apps = self.apps.lock().unwrap_or_else(PoisonError::into_inner);
        let mut cleaned = 0usize;

        apps.retain(|app| {
            // Dropped before it stopped; nothing left to clean.
            let Some(lifecycle) = app.upgrade() else {
                return false;
            };

            match lifecycle.current() {
                AppState::Stopped => {
                    match lifecycle.transition(AppState::Stopped, AppState::CleanedUp) {
                        Ok(()) => {
                            cleaned += 1;
                            false
                        }
                        Err(e) => {
                            tracing::warn!("Cleanup skipped: {}", e);
                            true
                        }
                    }
                }
                AppState::CleanedUp => false,
                state => {
                    tracing::warn!(state = %state, "App still active during cleanup");
                    true
                }
            }
        });

        tracing::info!(cleaned, remaining = apps.len(), "Runtime cleanup complete");
    }
}

/// App object created by [`LocalRuntime`].
pub struct LocalApp {
    id: Uuid,
    core: Option<AppCore>,
    properties: Arc<PropertyStore>,
    lifecycle: Arc<Lifecycle>,
    shutdown: Shutdown,
    worker: Option<JoinHandle<Result<(), RuntimeError>>>,
}

impl LocalApp {
    pub fn state(&self) -> AppState {
        self.lifecycle.current()
    }

    pub fn properties(&self) -> Arc<PropertyStore> {
        self.properties.clone()
    }

    /// Handle that stops the app when triggered.
    ///
    /// Effective once `run` has returned (background) or been entered
    /// (foreground, from another thread).
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }
}

impl HostedApp for LocalApp {
    fn run(&mut self, mode: RunMode) -> Result<(), RuntimeError> {
        let mut core = self.core.take().ok_or(RuntimeError::AlreadyStarted)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let signals = {
            let _enter = runtime.enter();
            TerminationSignals::register()
        };
        let shutdown_rx = self.shutdown.subscribe();

        core.start()?;

        match mode {
            RunMode::Foreground => core.serve(runtime, signals, shutdown_rx),
            RunMode::Background => {
                let handle = std::thread::Builder::new()
                    .name(format!("app-{}", self.id))
                    .spawn(move || core.serve(runtime, signals, shutdown_rx))?;
                self.worker = Some(handle);
                Ok(())
            }
        }
    }

    fn wait(&mut self) -> Result<(), RuntimeError> {
        match self.worker.take() {
            Some(handle) => handle.join().map_err(|_| RuntimeError::WorkerPanicked)?,
            None => Ok(()),
        }
    }
}

impl Drop for LocalApp {
    fn drop(&mut self) {
        if let Some(handle) = self.worker.take() {
            self.shutdown.trigger();
            let _ = handle.join();
        }
    }
}

/// Everything the app worker owns.
struct AppCore {
    id: Uuid,
    behavior: Box<dyn AppBehavior>,
    env: LocalEnv,
    lifecycle: Arc<Lifecycle>,
}

impl AppCore {
    /// Configure and init, ending in `Running`.
    fn start(&mut self) -> Result<(), RuntimeError> {
        self.lifecycle
            .transition(AppState::NotConfigured, AppState::Configuring)?;
        self.behavior
            .on_configure(&mut self.env)
            .map_err(RuntimeError::Configure)?;
        expect_once(
            self.env.configure_done,
            RuntimeError::ConfigureNotDone,
            RuntimeError::ConfigureDoneTwice,
        )?;
        self.lifecycle
            .transition(AppState::Configuring, AppState::Configured)?;

        self.behavior
            .on_init(&mut self.env)
            .map_err(RuntimeError::Init)?;
        expect_once(
            self.env.init_done,
            RuntimeError::InitNotDone,
            RuntimeError::InitDoneTwice,
        )?;
        self.lifecycle
            .transition(AppState::Configured, AppState::Running)?;

        tracing::info!(app_id = %self.id, "App running");
        Ok(())
    }

    /// Block until termination, then deinit and stop.
    fn serve(
        mut self,
        runtime: Runtime,
        signals: TerminationSignals,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), RuntimeError> {
        runtime.block_on(signals.wait(shutdown_rx));

        self.behavior.on_deinit(&mut self.env);
        if self.env.deinit_done != 1 {
            tracing::warn!(
                app_id = %self.id,
                signalled = self.env.deinit_done,
                "Deinit completion not signalled exactly once"
            );
        }

        self.lifecycle
            .transition(AppState::Running, AppState::Stopped)?;
        tracing::info!(app_id = %self.id, "App stopped");
        Ok(())
    }
}

fn expect_once(count: u32, not_done: RuntimeError, twice: RuntimeError) -> Result<(), RuntimeError> {
    match count {
        0 => Err(not_done),
        1 => Ok(()),
        _ => Err(twice),
    }
}

/// [`AppEnv`] handed to callbacks by the local runtime.
struct LocalEnv {
    app_id: Uuid,
    properties: Arc<PropertyStore>,
    configure_done: u32,
    init_done: u32,
    deinit_done: u32,
}

impl LocalEnv {
    fn new(app_id: Uuid, properties: Arc<PropertyStore>) -> Self {
        Self {
            app_id,
            properties,
            configure_done: 0,
            init_done: 0,
            deinit_done: 0,
        }
    }
}

impl AppEnv for LocalEnv {
    fn init_property_from_json_bytes(&mut self, bytes: Vec<u8>) {
        match self.properties.init_from_json_bytes(&bytes) {
            Ok(()) => tracing::debug!(app_id = %self.app_id, bytes = bytes.len(), "Properties loaded"),
            Err(e) => tracing::error!(app_id = %self.app_id, "Failed to init properties: {}", e),
        }
    }

    fn get_property(&self, path: &str) -> Option<Value> {
        self.properties.get(path)
    }

    fn property_keys(&self) -> Vec<String> {
        self.properties.keys()
    }

    fn on_configure_done(&mut self) {
        self.configure_done += 1;
    }

    fn on_init_done(&mut self) {
        self.init_done += 1;
    }

    fn on_deinit_done(&mut self) {
        self.deinit_done += 1;
    }
}
