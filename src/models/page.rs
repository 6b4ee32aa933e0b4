use crate::models::issue::{GeoPoint, Issue};
use crate::models::view::ReportResult;
use std::sync::{Arc, Mutex};

/// Ephemeral mock records per page. Reopening a page regenerates its list.
#[derive(Debug, Default)]
pub struct PageCache {
    pub dashboard: Vec<Issue>,
    pub analytics: Vec<Issue>,
    pub map: Vec<Issue>,
    pub reports: Vec<Issue>,
    pub last_report: Option<ReportResult>,
    /// Set once "issues near me" has located the user.
    pub map_focus: Option<GeoPoint>,
}

pub type SharedPageCache = Arc<Mutex<PageCache>>;
