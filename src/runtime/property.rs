//! Host-owned property store.
//!
//! # Data Flow
//! ```text
//! runtime defaults (JSON object)
//!     → PropertyStore::with_defaults
//!     → init_from_json_bytes (deep merge of the app's property file)
//!     → get (dot-separated paths) / keys / snapshot
//! ```
//!
//! # Design Decisions
//! - Root is always a JSON object
//! - A rejected document leaves the store untouched
//! - Readers load an `Arc` snapshot and never block writers

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::Value;
use thiserror::Error;

/// Errors produced by property operations.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("invalid property JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("property document must be a JSON object")]
    NotAnObject,
}

/// Key-value property namespace backed by a JSON object.
#[derive(Debug)]
pub struct PropertyStore {
    root: ArcSwap<Value>,
}

impl PropertyStore {
    /// Create a store seeded with `defaults`, which must be an object.
    pub fn with_defaults(defaults: Value) -> Result<Self, PropertyError> {
        if !defaults.is_object() {
            return Err(PropertyError::NotAnObject);
        }
        Ok(Self {
            root: ArcSwap::from_pointee(defaults),
        })
    }

    /// Parse `bytes` as a JSON object and merge it over the current contents.
    pub fn init_from_json_bytes(&self, bytes: &[u8]) -> Result<(), PropertyError> {
        let incoming: Value = serde_json::from_slice(bytes)?;
        if !incoming.is_object() {
            return Err(PropertyError::NotAnObject);
        }

        self.root.rcu(|current| {
            let mut merged = Value::clone(current);
            merge(&mut merged, incoming.clone());
            merged
        });
        Ok(())
    }

    /// Look up a dot-separated path such as `ten.log.level`.
    pub fn get(&self, path: &str) -> Option<Value> {
        let root = self.root.load();
        let mut node: &Value = &root;
        for segment in path.split('.') {
            node = node.as_object()?.get(segment)?;
        }
        Some(node.clone())
    }

    /// Top-level keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let root = self.root.load();
        let mut keys: Vec<String> = root
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Current contents.
    pub fn snapshot(&self) -> Arc<Value> {
        self.root.load_full()
    }
}

/// Objects merge key by key; anything else replaces.
fn merge(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(base), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, incoming) => *base = incoming,
    }
}
