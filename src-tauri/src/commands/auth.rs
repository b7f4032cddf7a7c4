use tauri::State;
use tracing::info;

use crate::error::StudyMateError;
use crate::stores::session::{Session, SessionState};
use crate::AppState;

/// Authenticate against the portal and persist the session. In-memory state
/// flips to authenticated only after the durable write succeeds.
#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    login: String,
    password: String,
) -> Result<Session, StudyMateError> {
    info!("Authenticating user: {}", login);
    let session = state.portal.authenticate(&login, &password).await?;
    state.session.login(session.clone()).await?;
    Ok(session)
}

/// Clear the session and the group selection. Safe to call repeatedly; both
/// removals are attempted even if the first fails.
#[tauri::command]
pub async fn logout(state: State<'_, AppState>) -> Result<(), StudyMateError> {
    info!("Logging out");
    let session = state.session.logout().await;
    let group = state.groups.select(None).await;
    session.and(group)
}

/// Load the persisted session on startup. Returns None for the
/// unauthenticated state; never fails.
#[tauri::command]
pub async fn restore_session(
    state: State<'_, AppState>,
) -> Result<Option<Session>, StudyMateError> {
    match state.session.initialize().await {
        SessionState::Authenticated(session) => Ok(Some(session)),
        _ => Ok(None),
    }
}
