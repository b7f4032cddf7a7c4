use std::sync::Mutex as StdMutex;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::storage::KeyValueStore;
use crate::error::StudyMateError;

pub const SESSION_KEY: &str = "user_data";

/// The authenticated user's identity as returned by the `user_data` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub login: String,
}

/// Tri-state so consumers can tell "not yet read from disk" apart from
/// "known unauthenticated".
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

/// Owns the `user_data` key. In-memory state commits only after the durable
/// write settles; a failed write leaves the previous state in place. Write
/// and commit share one FIFO lock, so a slower earlier `login` can never
/// land after a newer `login` or `logout`.
pub struct SessionStore<S> {
    storage: S,
    state: StdMutex<SessionState>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: StdMutex::new(SessionState::Loading),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the persisted session. Only the first call touches storage; a
    /// missing, unreadable or corrupt value yields Unauthenticated, never a
    /// startup failure.
    pub async fn initialize(&self) -> SessionState {
        if *self.state.lock().unwrap() != SessionState::Loading {
            return self.state.lock().unwrap().clone();
        }
        let loaded = match self.storage.get(SESSION_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => SessionState::Authenticated(session),
                Err(e) => {
                    warn!("Discarding corrupt persisted session: {}", e);
                    SessionState::Unauthenticated
                }
            },
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                warn!("Failed to read persisted session: {}", e);
                SessionState::Unauthenticated
            }
        };
        let mut state = self.state.lock().unwrap();
        // A login may have landed while the read was in flight.
        if *state == SessionState::Loading {
            *state = loaded;
        }
        state.clone()
    }

    /// Persist the session, then commit it to memory.
    pub async fn login(&self, session: Session) -> Result<(), StudyMateError> {
        let raw = serde_json::to_string(&session)
            .map_err(|e| StudyMateError::Storage(e.to_string()))?;
        let _write = self.write_lock.lock().await;
        self.storage.set(SESSION_KEY, raw).await?;
        info!("Authenticated as user {}", session.id);
        *self.state.lock().unwrap() = SessionState::Authenticated(session);
        Ok(())
    }

    /// Remove the persisted session and clear memory. A no-op when already
    /// unauthenticated. Memory clears even if the durable remove fails:
    /// unauthenticated is the safe side to land on.
    pub async fn logout(&self) -> Result<(), StudyMateError> {
        // Queue behind any in-flight login; the no-op check must see its
        // committed state, not the state from before it.
        let _write = self.write_lock.lock().await;
        if *self.state.lock().unwrap() == SessionState::Unauthenticated {
            return Ok(());
        }
        let result = self.storage.remove(SESSION_KEY).await;
        *self.state.lock().unwrap() = SessionState::Unauthenticated;
        if let Err(e) = &result {
            warn!("Failed to remove persisted session: {}", e);
        }
        result
    }

    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    pub fn current(&self) -> Option<Session> {
        match self.state() {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
