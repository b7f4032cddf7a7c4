use std::sync::Mutex as StdMutex;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use super::storage::KeyValueStore;
use crate::error::StudyMateError;

pub const GROUP_KEY: &str = "selected_group";

/// A class group as listed by the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupState {
    Loading,
    Selected(Group),
    None,
}

/// Owns the `selected_group` key. The durable write and the in-memory commit
/// happen under one FIFO lock, so two in-flight `select` calls can never
/// leave storage and memory holding different values: whichever call writes
/// last also commits last.
pub struct GroupStore<S> {
    storage: S,
    state: StdMutex<GroupState>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> GroupStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: StdMutex::new(GroupState::Loading),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the persisted selection. Same swallow-failure-as-absent policy
    /// as the session store.
    pub async fn initialize(&self) -> GroupState {
        if *self.state.lock().unwrap() != GroupState::Loading {
            return self.state.lock().unwrap().clone();
        }
        let loaded = match self.storage.get(GROUP_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Group>(&raw) {
                Ok(group) => GroupState::Selected(group),
                Err(e) => {
                    warn!("Discarding corrupt persisted group selection: {}", e);
                    GroupState::None
                }
            },
            Ok(None) => GroupState::None,
            Err(e) => {
                warn!("Failed to read persisted group selection: {}", e);
                GroupState::None
            }
        };
        let mut state = self.state.lock().unwrap();
        if *state == GroupState::Loading {
            *state = loaded;
        }
        state.clone()
    }

    /// Persist the selection (`None` removes the key), then commit it to
    /// memory. On a failed write the prior state stays and the error goes
    /// back to the caller.
    pub async fn select(&self, group: Option<Group>) -> Result<(), StudyMateError> {
        let _write = self.write_lock.lock().await;
        let result = match &group {
            Some(g) => {
                let raw = serde_json::to_string(g)
                    .map_err(|e| StudyMateError::Storage(e.to_string()))?;
                self.storage.set(GROUP_KEY, raw).await
            }
            None => self.storage.remove(GROUP_KEY).await,
        };
        match result {
            Ok(()) => {
                *self.state.lock().unwrap() = match group {
                    Some(g) => GroupState::Selected(g),
                    None => GroupState::None,
                };
                Ok(())
            }
            Err(e) => {
                warn!("Failed to persist group selection: {}", e);
                Err(e)
            }
        }
    }

    pub fn state(&self) -> GroupState {
        self.state.lock().unwrap().clone()
    }

    pub fn selected(&self) -> Option<Group> {
        match self.state() {
            GroupState::Selected(group) => Some(group),
            _ => None,
        }
    }
}
