//! Language tutor app bootstrap library.

pub mod app;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod runtime;

pub use app::TutorApp;
pub use config::AppConfig;
pub use lifecycle::start_app_blocking;
pub use runtime::LocalRuntime;
