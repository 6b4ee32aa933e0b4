pub mod commands;
pub mod models;
pub mod analysis;
pub mod forms;
pub mod error;

#[cfg(feature = "desktop")]
use commands::{
    analytics::{analytics_view, chart_export_name, open_analytics},
    auth::{get_session, login, logout, register_citizen, validate_registration_form},
    dashboard::{dashboard_view, open_dashboard, set_dashboard_status},
    issues::{delete_issue, get_feed, get_issues, submit_issue, update_issue_status, upvote_issue},
    map::{add_nearby_issues, map_issue_detail, map_view, open_map, set_map_status},
    reports::{export_report_csv, generate_report, open_reports},
    settings::{get_settings, save_settings},
};
#[cfg(feature = "desktop")]
use models::page::PageCache;
#[cfg(feature = "desktop")]
use std::sync::{Arc, Mutex};

/// Directory the web view passes back as `data_dir` on every command.
#[cfg(feature = "desktop")]
#[tauri::command]
fn app_data_dir(app: tauri::AppHandle) -> Result<String, String> {
    use tauri::Manager;

    let dir = app
        .path()
        .app_data_dir()
        .map_err(|e| format!("Could not resolve app data directory: {e}"))?;
    std::fs::create_dir_all(&dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
    Ok(dir.to_string_lossy().into_owned())
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(Arc::new(Mutex::new(PageCache::default())))
        .invoke_handler(tauri::generate_handler![
            app_data_dir,
            get_issues,
            get_feed,
            submit_issue,
            upvote_issue,
            delete_issue,
            update_issue_status,
            open_dashboard,
            dashboard_view,
            set_dashboard_status,
            open_analytics,
            analytics_view,
            chart_export_name,
            open_map,
            map_view,
            add_nearby_issues,
            map_issue_detail,
            set_map_status,
            open_reports,
            generate_report,
            export_report_csv,
            validate_registration_form,
            register_citizen,
            login,
            logout,
            get_session,
            get_settings,
            save_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
