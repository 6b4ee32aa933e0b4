use crate::models::filter::IssueFilter;
use crate::models::issue::{GeoPoint, Issue, IssueId, IssueStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablePage<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> TablePage<T> {
    /// Pager caption; `None` when everything fits on one page.
    pub fn caption(&self) -> Option<String> {
        (self.page_count > 1).then(|| format!("Page {} of {}", self.page, self.page_count))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub filter: IssueFilter,
    pub summary: StatusSummary,
    pub table: TablePage<Issue>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Doughnut,
    Bar,
    Line,
    PolarArea,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub colors: Vec<String>,
}

/// Declarative chart description handed to the web view's charting library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: String,
    pub chart_type: ChartType,
    pub horizontal: bool,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub export_file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub filter: IssueFilter,
    pub range_days: u32,
    pub summary: StatusSummary,
    pub charts: Vec<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPopup {
    pub id: String,
    pub description: String,
    pub status: IssueStatus,
    pub votes: u32,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: IssueId,
    pub position: GeoPoint,
    pub color: String,
    pub radius: u32,
    pub popup: MarkerPopup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerCluster {
    pub center: GeoPoint,
    pub count: usize,
    pub issue_ids: Vec<IssueId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapListItem {
    pub id: IssueId,
    pub description: String,
    pub status: IssueStatus,
    pub status_class: String,
    pub ward: String,
    pub votes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
    pub filter: IssueFilter,
    pub zoom: u8,
    pub center: GeoPoint,
    pub total: usize,
    pub markers: Vec<MapMarker>,
    pub clusters: Vec<MarkerCluster>,
    pub list: Vec<MapListItem>,
    pub empty_message: Option<String>,
}

/// Sidebar detail panel for one selected map issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub id: IssueId,
    pub description: String,
    pub location: String,
    pub reported_on: String,
    pub status: IssueStatus,
    pub votes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub date_time: String,
    pub status: IssueStatus,
    pub votes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult {
    pub criteria: IssueFilter,
    pub summary: StatusSummary,
    pub rows: Vec<ReportRow>,
    pub generated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedAuthor {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedCard {
    pub issue: Issue,
    pub author: FeedAuthor,
    pub status_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedView {
    pub cards: Vec<FeedCard>,
    pub empty_message: Option<String>,
}
