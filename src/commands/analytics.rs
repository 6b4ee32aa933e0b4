use crate::analysis::aggregate::{self, DailyTrend, MAX_TREND_DAYS};
use crate::analysis::filter::apply_filter;
use crate::analysis::mock::{generate_issues, MockProfile};
use crate::analysis::sort::top_voted;
use crate::commands::lock_cache;
use crate::commands::settings::load_effective_settings;
use crate::models::filter::IssueFilter;
use crate::models::issue::{Issue, CATEGORIES, WARDS};
use crate::models::page::SharedPageCache;
use crate::models::view::{AnalyticsView, ChartDataset, ChartSpec, ChartType};
use chrono::{DateTime, Local, TimeZone, Utc};

const TOP_VOTED_LIMIT: usize = 5;

const CATEGORY_COLORS: [&str; 5] = ["#1976d2", "#43a047", "#ffa000", "#e53935", "#673ab7"];
const STATUS_COLORS: [&str; 3] = ["#e53935", "#ffa000", "#43a047"];
const WARD_COLORS: [&str; 4] = ["#26a69a", "#8d6e63", "#29b6f6", "#ec407a"];
const HOUR_COLORS: [&str; 7] = [
    "rgba(255, 99, 132, 0.7)",
    "rgba(255, 159, 64, 0.7)",
    "rgba(255, 205, 86, 0.7)",
    "rgba(75, 192, 192, 0.7)",
    "rgba(54, 162, 235, 0.7)",
    "rgba(153, 102, 255, 0.7)",
    "rgba(201, 203, 207, 0.7)",
];

/// Chart id → download name used by the per-chart export button.
pub const CHART_EXPORT_NAMES: [(&str, &str); 7] = [
    ("category-chart", "complaints_by_category.png"),
    ("status-trend-chart", "complaint_status_trend.png"),
    ("ward-chart", "issues_by_ward.png"),
    ("issues-time-chart", "issues_over_time.png"),
    ("top-voted-chart", "top_voted_issues.png"),
    ("resolution-time-chart", "avg_resolution_time.png"),
    ("peak-hours-chart", "peak_reporting_hours.png"),
];

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn open_analytics(
    data_dir: String,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<AnalyticsView, String> {
    open_analytics_internal(&data_dir, cache.inner())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn analytics_view(
    filter: IssueFilter,
    range_days: u32,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<AnalyticsView, String> {
    analytics_view_internal(cache.inner(), &filter, range_days)
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub fn chart_export_name(chart_id: String) -> String {
    export_file_name(&chart_id)
}

pub fn open_analytics_internal(data_dir: &str, cache: &SharedPageCache) -> Result<AnalyticsView, String> {
    let settings = load_effective_settings(data_dir)?;
    let now = Utc::now();
    let issues = generate_issues(
        &mut rand::rng(),
        &MockProfile::analytics(settings.analytics_sample_size),
        now,
    );
    log::info!("analytics opened with {} mock complaints", issues.len());

    let view = build_analytics_view(
        &issues,
        &IssueFilter::default(),
        settings.trend_range_days,
        &now.with_timezone(&Local),
    );
    lock_cache(cache)?.analytics = issues;
    Ok(view)
}

pub fn analytics_view_internal(
    cache: &SharedPageCache,
    filter: &IssueFilter,
    range_days: u32,
) -> Result<AnalyticsView, String> {
    let lock = lock_cache(cache)?;
    Ok(build_analytics_view(
        &lock.analytics,
        filter,
        range_days,
        &Local::now(),
    ))
}

/// Every chart is rebuilt from the filtered list. `range_days` only shapes the
/// reported/resolved trend and is clamped to `1..=MAX_TREND_DAYS`; day and hour
/// buckets use the zone of `now`.
pub fn build_analytics_view<Tz: TimeZone>(
    issues: &[Issue],
    filter: &IssueFilter,
    range_days: u32,
    now: &DateTime<Tz>,
) -> AnalyticsView {
    let range_days = range_days.clamp(1, MAX_TREND_DAYS);
    let filtered = apply_filter(issues, filter, now.with_timezone(&Utc));
    let trend = aggregate::daily_trend(&filtered, now, range_days);
    let hours = aggregate::hourly_distribution(&filtered, &now.timezone());

    AnalyticsView {
        filter: filter.clone(),
        range_days,
        summary: aggregate::status_summary(&filtered),
        charts: vec![
            category_chart(&filtered),
            status_chart(&filtered),
            ward_chart(&filtered),
            trend_chart(&trend),
            top_voted_chart(&filtered),
            resolution_chart(&filtered),
            peak_hours_chart(&hours),
        ],
    }
}

pub fn export_file_name(chart_id: &str) -> String {
    CHART_EXPORT_NAMES
        .iter()
        .find(|(id, _)| *id == chart_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("{chart_id}.png"))
}

fn chart(id: &str, chart_type: ChartType, labels: Vec<String>, datasets: Vec<ChartDataset>) -> ChartSpec {
    ChartSpec {
        id: id.to_string(),
        chart_type,
        horizontal: false,
        labels,
        datasets,
        export_file_name: export_file_name(id),
    }
}

fn dataset(label: &str, data: Vec<f64>, colors: &[&str]) -> ChartDataset {
    ChartDataset {
        label: label.to_string(),
        data,
        colors: colors.iter().map(|c| c.to_string()).collect(),
    }
}

fn split_counts(counts: Vec<(String, usize)>) -> (Vec<String>, Vec<f64>) {
    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .unzip()
}

fn category_chart(issues: &[Issue]) -> ChartSpec {
    let (labels, data) = split_counts(aggregate::count_by_category(issues, &CATEGORIES));
    chart(
        "category-chart",
        ChartType::Doughnut,
        labels,
        vec![dataset("Complaints by Category", data, &CATEGORY_COLORS)],
    )
}

fn status_chart(issues: &[Issue]) -> ChartSpec {
    let (labels, data) = split_counts(aggregate::count_by_status(issues));
    chart(
        "status-trend-chart",
        ChartType::Bar,
        labels,
        vec![dataset("Complaint Status Overview", data, &STATUS_COLORS)],
    )
}

fn ward_chart(issues: &[Issue]) -> ChartSpec {
    let (labels, data) = split_counts(aggregate::count_by_ward(issues, &WARDS));
    ChartSpec {
        horizontal: true,
        ..chart(
            "ward-chart",
            ChartType::Bar,
            labels,
            vec![dataset("Issues by Ward", data, &WARD_COLORS)],
        )
    }
}

fn trend_chart(trend: &DailyTrend) -> ChartSpec {
    let as_f64 = |counts: &[usize]| counts.iter().map(|&c| c as f64).collect::<Vec<_>>();
    chart(
        "issues-time-chart",
        ChartType::Line,
        trend.labels(),
        vec![
            dataset("Issues Reported", as_f64(&trend.reported), &["#1976d2"]),
            dataset("Issues Resolved", as_f64(&trend.resolved), &["#43a047"]),
        ],
    )
}

fn top_voted_chart(issues: &[Issue]) -> ChartSpec {
    let top = top_voted(issues, TOP_VOTED_LIMIT);
    let labels = top.iter().map(|issue| issue.id.to_string()).collect();
    let data = top.iter().map(|issue| issue.votes as f64).collect();

    ChartSpec {
        horizontal: true,
        ..chart(
            "top-voted-chart",
            ChartType::Bar,
            labels,
            vec![dataset("Votes", data, &["#ff7043"])],
        )
    }
}

fn resolution_chart(issues: &[Issue]) -> ChartSpec {
    let (labels, data) = aggregate::average_resolution_days(issues, &CATEGORIES)
        .into_iter()
        .unzip();
    chart(
        "resolution-time-chart",
        ChartType::Bar,
        labels,
        vec![dataset("Avg. Resolution Time (Days)", data, &["#673ab7"])],
    )
}

fn peak_hours_chart(hours: &[usize; 24]) -> ChartSpec {
    chart(
        "peak-hours-chart",
        ChartType::PolarArea,
        aggregate::hour_labels(),
        vec![dataset(
            "Issues by Hour",
            hours.iter().map(|&c| c as f64).collect(),
            &HOUR_COLORS,
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn view_for(filter: &IssueFilter) -> (Vec<Issue>, AnalyticsView) {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(3);
        let issues = generate_issues(&mut rng, &MockProfile::analytics(120), now);
        let view = build_analytics_view(&issues, filter, 7, &now);
        (issues, view)
    }

    fn chart_by_id<'a>(view: &'a AnalyticsView, id: &str) -> &'a ChartSpec {
        view.charts
            .iter()
            .find(|chart| chart.id == id)
            .unwrap_or_else(|| panic!("missing chart {id}"))
    }

    #[test]
    fn builds_all_seven_charts_with_export_names() {
        let (_, view) = view_for(&IssueFilter::default());
        assert_eq!(view.charts.len(), 7);
        for (id, file) in CHART_EXPORT_NAMES {
            assert_eq!(chart_by_id(&view, id).export_file_name, file);
        }
    }

    #[test]
    fn category_counts_sum_to_the_filtered_total() {
        let (issues, view) = view_for(&IssueFilter::default().with_location("Ward 3"));
        let expected = issues.iter().filter(|i| i.location == "Ward 3").count();

        let category = chart_by_id(&view, "category-chart");
        let total: f64 = category.datasets[0].data.iter().sum();
        assert_eq!(total as usize, expected);
        assert_eq!(view.summary.total, expected);

        let hours: f64 = chart_by_id(&view, "peak-hours-chart").datasets[0].data.iter().sum();
        assert_eq!(hours as usize, expected);
    }

    #[test]
    fn trend_spans_the_requested_range() {
        let (_, view) = view_for(&IssueFilter::default());
        let trend = chart_by_id(&view, "issues-time-chart");
        assert_eq!(trend.chart_type, ChartType::Line);
        assert_eq!(trend.labels.len(), 7);
        assert_eq!(trend.datasets.len(), 2);
    }

    #[test]
    fn oversized_and_zero_ranges_are_clamped() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(9);
        let issues = generate_issues(&mut rng, &MockProfile::analytics(20), now);

        let wide = build_analytics_view(&issues, &IssueFilter::default(), 100_000_000, &now);
        assert_eq!(wide.range_days, MAX_TREND_DAYS);
        assert_eq!(
            chart_by_id(&wide, "issues-time-chart").labels.len(),
            MAX_TREND_DAYS as usize
        );

        let empty = build_analytics_view(&issues, &IssueFilter::default(), 0, &now);
        assert_eq!(empty.range_days, 1);
        assert_eq!(chart_by_id(&empty, "issues-time-chart").labels.len(), 1);
    }

    #[test]
    fn top_voted_is_horizontal_and_capped() {
        let (_, view) = view_for(&IssueFilter::default());
        let top = chart_by_id(&view, "top-voted-chart");
        assert!(top.horizontal);
        assert_eq!(top.labels.len(), TOP_VOTED_LIMIT);
        assert!(top.datasets[0].data.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn unknown_chart_ids_fall_back_to_their_own_name() {
        assert_eq!(export_file_name("ward-chart"), "issues_by_ward.png");
        assert_eq!(export_file_name("custom"), "custom.png");
    }
}
