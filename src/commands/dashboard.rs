use crate::analysis::filter::apply_filter;
use crate::analysis::mock::{generate_issues, MockProfile};
use crate::analysis::{aggregate, mutate, paginate};
use crate::commands::lock_cache;
use crate::commands::settings::load_effective_settings;
use crate::models::filter::IssueFilter;
use crate::models::issue::{Issue, IssueId, IssueStatus};
use crate::models::page::SharedPageCache;
use crate::models::view::DashboardView;
use chrono::{DateTime, Utc};

const EMPTY_TABLE_MESSAGE: &str = "No complaints match the current filters.";

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn open_dashboard(
    data_dir: String,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<DashboardView, String> {
    open_dashboard_internal(&data_dir, cache.inner())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn dashboard_view(
    data_dir: String,
    filter: IssueFilter,
    page: usize,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<DashboardView, String> {
    dashboard_view_internal(&data_dir, cache.inner(), &filter, page)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_dashboard_status(
    data_dir: String,
    id: IssueId,
    status: IssueStatus,
    filter: IssueFilter,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<DashboardView, String> {
    set_dashboard_status_internal(&data_dir, cache.inner(), &id, status, &filter)
}

/// Regenerates the dashboard's mock complaints and renders the first page.
pub fn open_dashboard_internal(data_dir: &str, cache: &SharedPageCache) -> Result<DashboardView, String> {
    let settings = load_effective_settings(data_dir)?;
    let now = Utc::now();
    let issues = generate_issues(
        &mut rand::rng(),
        &MockProfile::dashboard(settings.dashboard_sample_size),
        now,
    );
    log::info!("dashboard opened with {} mock complaints", issues.len());

    let view = build_dashboard_view(&issues, &IssueFilter::default(), 1, settings.rows_per_page, now);
    lock_cache(cache)?.dashboard = issues;
    Ok(view)
}

pub fn dashboard_view_internal(
    data_dir: &str,
    cache: &SharedPageCache,
    filter: &IssueFilter,
    page: usize,
) -> Result<DashboardView, String> {
    let settings = load_effective_settings(data_dir)?;
    let lock = lock_cache(cache)?;
    Ok(build_dashboard_view(
        &lock.dashboard,
        filter,
        page,
        settings.rows_per_page,
        Utc::now(),
    ))
}

/// Applies a status dropdown change, then re-renders from page 1.
pub fn set_dashboard_status_internal(
    data_dir: &str,
    cache: &SharedPageCache,
    id: &IssueId,
    status: IssueStatus,
    filter: &IssueFilter,
) -> Result<DashboardView, String> {
    let settings = load_effective_settings(data_dir)?;
    let mut lock = lock_cache(cache)?;
    mutate::set_status(&mut lock.dashboard, id, status).map_err(|e| e.to_string())?;

    Ok(build_dashboard_view(
        &lock.dashboard,
        filter,
        1,
        settings.rows_per_page,
        Utc::now(),
    ))
}

pub fn build_dashboard_view(
    issues: &[Issue],
    filter: &IssueFilter,
    page: usize,
    rows_per_page: usize,
    now: DateTime<Utc>,
) -> DashboardView {
    let filtered = apply_filter(issues, filter, now);
    let table = paginate::paginate(&filtered, page, rows_per_page);

    DashboardView {
        filter: filter.clone(),
        summary: aggregate::status_summary(&filtered),
        empty_message: table.rows.is_empty().then(|| EMPTY_TABLE_MESSAGE.to_string()),
        table,
    }
}
