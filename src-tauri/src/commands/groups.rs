use tauri::State;

use crate::error::StudyMateError;
use crate::stores::group::{Group, GroupState};
use crate::AppState;

#[tauri::command]
pub async fn list_groups(state: State<'_, AppState>) -> Result<Vec<Group>, StudyMateError> {
    state.portal.list_groups().await
}

/// Select a group, or clear the selection with None. The in-memory selection
/// commits only after the durable write settles.
#[tauri::command]
pub async fn select_group(
    state: State<'_, AppState>,
    group: Option<Group>,
) -> Result<(), StudyMateError> {
    state.groups.select(group).await
}

/// Load the persisted selection on startup. Never fails.
#[tauri::command]
pub async fn restore_group(state: State<'_, AppState>) -> Result<Option<Group>, StudyMateError> {
    match state.groups.initialize().await {
        GroupState::Selected(group) => Ok(Some(group)),
        _ => Ok(None),
    }
}
