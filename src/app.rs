//! Tutor app behavior.
//!
//! Adapts the startup configuration into the callbacks the host runtime
//! drives. All tutoring logic (voice, dialogue, memory) lives in extensions
//! loaded by the host according to the property file.

use crate::config::loader::read_property_file;
use crate::config::AppConfig;
use crate::runtime::{AppBehavior, AppEnv, AppError};

/// Application wrapper handed to the host.
#[derive(Debug)]
pub struct TutorApp {
    config: AppConfig,
}

impl TutorApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl AppBehavior for TutorApp {
    fn on_configure(&mut self, env: &mut dyn AppEnv) -> Result<(), AppError> {
        // Host defaults stay in place when no file was given.
        if let Some(path) = &self.config.property_file_path {
            let bytes = read_property_file(path)?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "Loading property file");
            env.init_property_from_json_bytes(bytes);
        }

        env.on_configure_done();
        Ok(())
    }

    fn on_init(&mut self, env: &mut dyn AppEnv) -> Result<(), AppError> {
        let uri = env
            .get_property("ten.uri")
            .and_then(|v| v.as_str().map(str::to_owned));
        let keys = env.property_keys();
        tracing::info!(uri = ?uri, top_level_keys = keys.len(), "Tutor app initialized");

        env.on_init_done();
        Ok(())
    }

    fn on_deinit(&mut self, env: &mut dyn AppEnv) {
        tracing::info!("Tutor app shutting down");
        env.on_deinit_done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingEnv {
        payloads: Vec<Vec<u8>>,
        configure_done: u32,
        init_done: u32,
        deinit_done: u32,
    }

    impl AppEnv for RecordingEnv {
        fn init_property_from_json_bytes(&mut self, bytes: Vec<u8>) {
            self.payloads.push(bytes);
        }

        fn get_property(&self, path: &str) -> Option<Value> {
            match path {
                "ten.uri" => Some(json!("localhost")),
                _ => None,
            }
        }

        fn property_keys(&self) -> Vec<String> {
            vec!["ten".to_string()]
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

    #[test]
    fn test_configure_without_path() {
        let mut app = TutorApp::new(AppConfig::default());
        let mut env = RecordingEnv::default();

        app.on_configure(&mut env).unwrap();
        assert!(env.payloads.is_empty());
        assert_eq!(env.configure_done, 1);
    }

    #[test]
    fn test_configure_forwards_file_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let content = br#"{"ten": {"predefined_graphs": [{"name": "tutor"}]}}"#;
        file.write_all(content).unwrap();

        let mut app = TutorApp::new(AppConfig {
            property_file_path: Some(file.path().to_path_buf()),
        });
        let mut env = RecordingEnv::default();

        app.on_configure(&mut env).unwrap();
        assert_eq!(env.payloads, vec![content.to_vec()]);
        assert_eq!(env.configure_done, 1);
    }

    #[test]
    fn test_configure_missing_file_fails_without_signal() {
        let mut app = TutorApp::new(AppConfig {
            property_file_path: Some(PathBuf::from("/nonexistent/tutor/property.json")),
        });
        let mut env = RecordingEnv::default();

        let err = app.on_configure(&mut env).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tutor/property.json"));
        assert!(env.payloads.is_empty());
        assert_eq!(env.configure_done, 0);
    }

    #[test]
    fn test_init_and_deinit_signal_once() {
        let mut app = TutorApp::new(AppConfig::default());
        let mut env = RecordingEnv::default();

        app.on_init(&mut env).unwrap();
        app.on_deinit(&mut env);
        assert_eq!(env.init_done, 1);
        assert_eq!(env.deinit_done, 1);
    }
}
