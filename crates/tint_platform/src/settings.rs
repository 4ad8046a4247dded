//! Settings persistence

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use indexmap::IndexMap;

/// Key/value settings storage (secure settings on a device)
pub trait SettingsStore: Send + Sync {
    /// Write a value; `false` if the store rejected it
    fn write_string(&self, key: &str, value: &str) -> bool;

    fn read_string(&self, key: &str) -> Option<String>;
}

/// In-process settings store
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<IndexMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> IndexMap<String, String> {
        self.values.read().unwrap().clone()
    }
}

impl SettingsStore for MemorySettings {
    fn write_string(&self, key: &str, value: &str) -> bool {
        if self.reject_writes.load(Ordering::SeqCst) {
            tracing::warn!("settings write rejected for {key}");
            return false;
        }
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn read_string(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }
}
