use crate::analysis::cluster::cluster_issues;
use crate::analysis::filter::apply_filter;
use crate::analysis::mock::{generate_issues, MockProfile};
use crate::analysis::mutate;
use crate::commands::settings::{load_effective_settings, EffectiveSettings};
use crate::commands::{display_timestamp, lock_cache};
use crate::error::FixityError;
use crate::models::filter::IssueFilter;
use crate::models::issue::{GeoPoint, Issue, IssueId, IssueStatus};
use crate::models::page::SharedPageCache;
use crate::models::view::{IssueDetail, MapListItem, MapMarker, MapView, MarkerPopup};
use chrono::{DateTime, Local, Utc};

const MARKER_RADIUS: u32 = 8;
const NEARBY_ZOOM: u8 = 13;
const EMPTY_LIST_MESSAGE: &str = "No issues found.";

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn open_map(
    data_dir: String,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<MapView, String> {
    open_map_internal(&data_dir, cache.inner())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn map_view(
    data_dir: String,
    filter: IssueFilter,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<MapView, String> {
    map_view_internal(&data_dir, cache.inner(), &filter)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn add_nearby_issues(
    data_dir: String,
    position: Option<GeoPoint>,
    filter: IssueFilter,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<MapView, String> {
    add_nearby_issues_internal(&data_dir, cache.inner(), position, &filter)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn map_issue_detail(
    id: IssueId,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<IssueDetail, String> {
    map_issue_detail_internal(cache.inner(), &id)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_map_status(
    data_dir: String,
    id: IssueId,
    status: IssueStatus,
    filter: IssueFilter,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<MapView, String> {
    set_map_status_internal(&data_dir, cache.inner(), &id, status, &filter)
}

/// Scatters fresh mock issues across the district and clears any "near me" focus.
pub fn open_map_internal(data_dir: &str, cache: &SharedPageCache) -> Result<MapView, String> {
    let settings = load_effective_settings(data_dir)?;
    let issues = generate_issues(
        &mut rand::rng(),
        &MockProfile::map(settings.map_sample_size),
        Utc::now(),
    );
    log::info!("map opened with {} mock issues", issues.len());

    let view = build_map_view(&issues, &IssueFilter::default(), &settings, None, Utc::now());
    let mut lock = lock_cache(cache)?;
    lock.map = issues;
    lock.map_focus = None;
    Ok(view)
}

pub fn map_view_internal(
    data_dir: &str,
    cache: &SharedPageCache,
    filter: &IssueFilter,
) -> Result<MapView, String> {
    let settings = load_effective_settings(data_dir)?;
    let lock = lock_cache(cache)?;
    Ok(build_map_view(&lock.map, filter, &settings, lock.map_focus, Utc::now()))
}

/// Appends mock issues around the user's position. `None` means the position
/// could not be obtained.
pub fn add_nearby_issues_internal(
    data_dir: &str,
    cache: &SharedPageCache,
    position: Option<GeoPoint>,
    filter: &IssueFilter,
) -> Result<MapView, String> {
    let position = position.ok_or_else(|| FixityError::GeolocationUnavailable.to_string())?;
    let settings = load_effective_settings(data_dir)?;
    let mut lock = lock_cache(cache)?;

    let profile = MockProfile::nearby(settings.nearby_sample_size, position, lock.map.len());
    let nearby = generate_issues(&mut rand::rng(), &profile, Utc::now());
    log::info!(
        "added {} issues near {}",
        nearby.len(),
        format_coordinates(position)
    );

    lock.map.extend(nearby);
    lock.map_focus = Some(position);
    Ok(build_map_view(&lock.map, filter, &settings, lock.map_focus, Utc::now()))
}

pub fn map_issue_detail_internal(cache: &SharedPageCache, id: &IssueId) -> Result<IssueDetail, String> {
    let lock = lock_cache(cache)?;
    lock.map
        .iter()
        .find(|issue| &issue.id == id)
        .map(issue_detail)
        .ok_or_else(|| FixityError::IssueNotFound(id.to_string()).to_string())
}

pub fn set_map_status_internal(
    data_dir: &str,
    cache: &SharedPageCache,
    id: &IssueId,
    status: IssueStatus,
    filter: &IssueFilter,
) -> Result<MapView, String> {
    let settings = load_effective_settings(data_dir)?;
    let mut lock = lock_cache(cache)?;
    mutate::set_status(&mut lock.map, id, status).map_err(|e| e.to_string())?;
    Ok(build_map_view(&lock.map, filter, &settings, lock.map_focus, Utc::now()))
}

pub fn build_map_view(
    issues: &[Issue],
    filter: &IssueFilter,
    settings: &EffectiveSettings,
    focus: Option<GeoPoint>,
    now: DateTime<Utc>,
) -> MapView {
    let filtered = apply_filter(issues, filter, now);
    let (center, zoom) = match focus {
        Some(point) => (point, NEARBY_ZOOM),
        None => (settings.map_center, settings.map_zoom),
    };

    let clustering = cluster_issues(&filtered, zoom, settings.cluster_radius_px);
    let markers = clustering.singles.into_iter().filter_map(marker).collect();
    let list: Vec<MapListItem> = filtered.iter().map(list_item).collect();

    MapView {
        filter: filter.clone(),
        zoom,
        center,
        total: filtered.len(),
        markers,
        clusters: clustering.clusters,
        empty_message: list.is_empty().then(|| EMPTY_LIST_MESSAGE.to_string()),
        list,
    }
}

/// `Lat: 20.27360, Lng: 85.84360`
pub fn format_coordinates(point: GeoPoint) -> String {
    format!("Lat: {:.5}, Lng: {:.5}", point.lat, point.lng)
}

fn marker(issue: &Issue) -> Option<MapMarker> {
    let position = issue.coordinates?;
    Some(MapMarker {
        id: issue.id.clone(),
        position,
        color: issue.status.color().to_string(),
        radius: MARKER_RADIUS,
        popup: MarkerPopup {
            id: issue.id.to_string(),
            description: issue.description.clone(),
            status: issue.status,
            votes: issue.votes,
            timestamp: display_timestamp(&issue.created_at, &Local),
        },
    })
}

fn list_item(issue: &Issue) -> MapListItem {
    MapListItem {
        id: issue.id.clone(),
        description: issue.description.clone(),
        status: issue.status,
        status_class: issue.status.css_class(),
        ward: issue.location.clone(),
        votes: issue.votes,
    }
}

fn issue_detail(issue: &Issue) -> IssueDetail {
    let location = match issue.coordinates {
        Some(point) => format!(
            "{} (Lat: {:.4}, Lng: {:.4})",
            issue.location, point.lat, point.lng
        ),
        None => issue.location.clone(),
    };

    IssueDetail {
        id: issue.id.clone(),
        description: issue.description.clone(),
        location,
        reported_on: display_timestamp(&issue.created_at, &Local),
        status: issue.status,
        votes: issue.votes,
    }
}
