//! Shared utilities for integration testing.

use std::io::Write;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

use language_tutor::runtime::{
    AppBehavior, AppEnv, Host, HostedApp, LocalApp, LocalRuntime, RunMode, RuntimeError,
};

/// Ordered record of everything a host observed.
pub type Events = Arc<Mutex<Vec<Event>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CreateApp,
    PropertyBytes(Vec<u8>),
    ConfigureDone,
    InitDone,
    Run,
    Wait,
    DeinitDone,
    Cleanup,
}

/// Host that records callbacks instead of running anything.
pub struct RecordingHost {
    pub events: Events,
    pub fail_create: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            fail_create: false,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }
}

impl Host for RecordingHost {
    type App = RecordingApp;

    fn create_app(&self, behavior: Box<dyn AppBehavior>) -> Result<RecordingApp, RuntimeError> {
        if self.fail_create {
            return Err(RuntimeError::InvalidDefaults);
        }
        self.events.lock().unwrap().push(Event::CreateApp);
        Ok(RecordingApp {
            behavior,
            env: RecordingEnv {
                events: self.events.clone(),
            },
        })
    }

    fn ensure_cleanup(&self) {
        self.events.lock().unwrap().push(Event::Cleanup);
    }
}

pub struct RecordingApp {
    behavior: Box<dyn AppBehavior>,
    env: RecordingEnv,
}

impl HostedApp for RecordingApp {
    fn run(&mut self, _mode: RunMode) -> Result<(), RuntimeError> {
        self.behavior
            .on_configure(&mut self.env)
            .map_err(RuntimeError::Configure)?;
        self.behavior
            .on_init(&mut self.env)
            .map_err(RuntimeError::Init)?;
        self.env.push(Event::Run);
        Ok(())
    }

    fn wait(&mut self) -> Result<(), RuntimeError> {
        self.behavior.on_deinit(&mut self.env);
        self.env.push(Event::Wait);
        Ok(())
    }
}

pub struct RecordingEnv {
    events: Events,
}

impl RecordingEnv {
    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl AppEnv for RecordingEnv {
    fn init_property_from_json_bytes(&mut self, bytes: Vec<u8>) {
        self.push(Event::PropertyBytes(bytes));
    }

    fn get_property(&self, _path: &str) -> Option<Value> {
        None
    }

    fn property_keys(&self) -> Vec<String> {
        Vec::new()
    }

    fn on_configure_done(&mut self) {
        self.push(Event::ConfigureDone);
    }

    fn on_init_done(&mut self) {
        self.push(Event::InitDone);
    }

    fn on_deinit_done(&mut self) {
        self.push(Event::DeinitDone);
    }
}

/// Local runtime whose apps stop as soon as they are running.
pub struct ImmediateStopHost(pub LocalRuntime);

pub struct ImmediateStopApp(pub LocalApp);

impl Host for ImmediateStopHost {
    type App = ImmediateStopApp;

    fn create_app(&self, behavior: Box<dyn AppBehavior>) -> Result<ImmediateStopApp, RuntimeError> {
        self.0.create_app(behavior).map(ImmediateStopApp)
    }

    fn ensure_cleanup(&self) {
        self.0.ensure_cleanup();
    }
}

impl HostedApp for ImmediateStopApp {
    fn run(&mut self, mode: RunMode) -> Result<(), RuntimeError> {
        self.0.run(mode)?;
        self.0.shutdown_handle().trigger();
        Ok(())
    }

    fn wait(&mut self) -> Result<(), RuntimeError> {
        self.0.wait()
    }
}

/// In-memory log sink.
#[derive(Clone, Default)]
pub struct Capture(pub Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
