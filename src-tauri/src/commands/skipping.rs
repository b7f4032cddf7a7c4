use tauri::State;

use crate::api::types::SkippingRecord;
use crate::error::StudyMateError;
use crate::AppState;

#[tauri::command]
pub async fn get_skipping(
    state: State<'_, AppState>,
    user_id: i64,
) -> Result<Vec<SkippingRecord>, StudyMateError> {
    state.portal.skipping(user_id).await
}
