use tauri::State;

use crate::api::types::ThesisTopic;
use crate::error::StudyMateError;
use crate::AppState;

#[tauri::command]
pub async fn get_themes(
    state: State<'_, AppState>,
    user_id: i64,
) -> Result<Vec<ThesisTopic>, StudyMateError> {
    state.portal.themes(user_id).await
}
