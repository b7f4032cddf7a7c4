pub mod api;
mod commands;
mod error;
pub mod stores;

pub use api::client::{PortalClient, DEFAULT_BASE_URL};
pub use api::types::{Lesson, ScheduleDay, SkippingRecord, ThesisTopic};
pub use error::StudyMateError;
pub use stores::group::{Group, GroupState, GroupStore};
pub use stores::session::{Session, SessionState, SessionStore};
pub use stores::storage::{KeyValueStore, PreferencesStore};

/// Shared handles behind every command: the two durable stores and the
/// portal client. The stores are the only writers of their keys.
pub struct AppState {
    pub session: SessionStore<PreferencesStore>,
    pub groups: GroupStore<PreferencesStore>,
    pub portal: PortalClient,
}

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::auth::login,
            commands::auth::logout,
            commands::auth::restore_session,
            commands::groups::list_groups,
            commands::groups::select_group,
            commands::groups::restore_group,
            commands::schedule::get_schedule,
            commands::skipping::get_skipping,
            commands::themes::get_themes,
        ])
        .setup(|app| {
            use tauri::Manager;
            use tauri_plugin_store::StoreExt;

            // The portal host lives in preferences so a deployment can point
            // the client elsewhere without a rebuild.
            let base_url = app
                .store(stores::storage::STORE_FILE)
                .ok()
                .and_then(|store| {
                    store
                        .get("portal_base_url")
                        .and_then(|v| v.as_str().map(|s| s.to_string()))
                })
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

            let storage = PreferencesStore::new(app.handle().clone());
            app.manage(AppState {
                session: SessionStore::new(storage.clone()),
                groups: GroupStore::new(storage),
                portal: PortalClient::new(base_url),
            });
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
