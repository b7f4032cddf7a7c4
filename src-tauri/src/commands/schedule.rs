use tauri::State;

use crate::api::types::ScheduleDay;
use crate::error::StudyMateError;
use crate::AppState;

#[tauri::command]
pub async fn get_schedule(
    state: State<'_, AppState>,
    user_id: i64,
    group_id: i64,
) -> Result<Vec<ScheduleDay>, StudyMateError> {
    state.portal.schedule(user_id, group_id).await
}
