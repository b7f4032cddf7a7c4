use async_trait::async_trait;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::warn;

use crate::error::StudyMateError;

pub const STORE_FILE: &str = "preferences.json";

/// Durable string-keyed storage. Each logical key (session, selected group)
/// is owned by exactly one store; values are JSON-encoded by the owner.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StudyMateError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StudyMateError>;
    async fn remove(&self, key: &str) -> Result<(), StudyMateError>;
}

/// Production implementation over tauri-plugin-store's `preferences.json`.
#[derive(Clone)]
pub struct PreferencesStore {
    app: AppHandle,
}

impl PreferencesStore {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn open(&self) -> Result<std::sync::Arc<tauri_plugin_store::Store<tauri::Wry>>, StudyMateError> {
        self.app.store(STORE_FILE).map_err(|e| {
            warn!("Failed to open store: {}", e);
            StudyMateError::Storage(e.to_string())
        })
    }
}

#[async_trait]
impl KeyValueStore for PreferencesStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StudyMateError> {
        let store = self.open()?;
        Ok(store.get(key).and_then(|v| v.as_str().map(|s| s.to_string())))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StudyMateError> {
        let store = self.open()?;
        store.set(key, serde_json::Value::String(value));
        store.save().map_err(|e| {
            warn!("Failed to save store: {}", e);
            StudyMateError::Storage(e.to_string())
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StudyMateError> {
        let store = self.open()?;
        store.delete(key);
        store.save().map_err(|e| {
            warn!("Failed to save store: {}", e);
            StudyMateError::Storage(e.to_string())
        })
    }
}
