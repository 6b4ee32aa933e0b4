use crate::analysis::aggregate::status_summary;
use crate::analysis::filter::apply_filter;
use crate::analysis::mock::{generate_issues, MockProfile};
use crate::commands::settings::load_effective_settings;
use crate::commands::{display_timestamp, lock_cache};
use crate::error::{FixityError, Result as FixityResult};
use crate::models::filter::IssueFilter;
use crate::models::issue::Issue;
use crate::models::page::SharedPageCache;
use crate::models::view::{ReportResult, ReportRow};
use chrono::{DateTime, Local, Utc};
use std::path::Path;
use std::time::Duration;

pub const REPORT_FILE_NAME: &str = "fixity_report.csv";
const CSV_HEADER: &str = "ID,Description,Category,Location,Date/Time,Status,Votes";

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn open_reports(
    data_dir: String,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<usize, String> {
    open_reports_internal(&data_dir, cache.inner())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn generate_report(
    data_dir: String,
    criteria: IssueFilter,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<ReportResult, String> {
    generate_report_internal(&data_dir, cache.inner(), criteria).await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn export_report_csv(
    path: String,
    cache: tauri::State<'_, SharedPageCache>,
) -> Result<String, String> {
    export_report_csv_internal(cache.inner(), &path)
}

/// Regenerates the report source records; returns how many there are.
pub fn open_reports_internal(data_dir: &str, cache: &SharedPageCache) -> Result<usize, String> {
    let settings = load_effective_settings(data_dir)?;
    let issues = generate_issues(
        &mut rand::rng(),
        &MockProfile::reports(settings.report_sample_size),
        Utc::now(),
    );
    let count = issues.len();

    let mut lock = lock_cache(cache)?;
    lock.reports = issues;
    lock.last_report = None;
    log::info!("reports opened with {count} mock complaints");
    Ok(count)
}

/// Waits out the configured delay, then filters the cached records and keeps
/// the result for export.
pub async fn generate_report_internal(
    data_dir: &str,
    cache: &SharedPageCache,
    criteria: IssueFilter,
) -> Result<ReportResult, String> {
    let settings = load_effective_settings(data_dir)?;
    tokio::time::sleep(Duration::from_millis(settings.report_delay_ms)).await;

    let mut lock = lock_cache(cache)?;
    let report = build_report(&lock.reports, criteria, Utc::now());
    log::info!("report generated with {} rows", report.rows.len());
    lock.last_report = Some(report.clone());
    Ok(report)
}

pub fn export_report_csv_internal(cache: &SharedPageCache, path: &str) -> Result<String, String> {
    let lock = lock_cache(cache)?;
    let report = lock
        .last_report
        .as_ref()
        .ok_or_else(|| FixityError::NothingToExport.to_string())?;

    write_report_csv(report, Path::new(path)).map_err(|e| e.to_string())?;
    log::info!("report exported to {path}");
    Ok(path.to_string())
}

pub fn build_report(issues: &[Issue], criteria: IssueFilter, now: DateTime<Utc>) -> ReportResult {
    let filtered = apply_filter(issues, &criteria, now);

    ReportResult {
        summary: status_summary(&filtered),
        rows: filtered.iter().map(report_row).collect(),
        criteria,
        generated_at: now.timestamp_millis(),
    }
}

fn report_row(issue: &Issue) -> ReportRow {
    ReportRow {
        id: issue.id.to_string(),
        description: issue.description.clone(),
        category: issue.category.clone(),
        location: issue.location.clone(),
        date_time: display_timestamp(&issue.created_at, &Local),
        status: issue.status,
        votes: issue.votes,
    }
}

/// Header plus one line per row, every field double-quoted.
pub fn report_to_csv(report: &ReportResult) -> FixityResult<String> {
    if report.rows.is_empty() {
        return Err(FixityError::NothingToExport);
    }

    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for row in &report.rows {
        let votes = row.votes.to_string();
        let fields = [
            row.id.as_str(),
            row.description.as_str(),
            row.category.as_str(),
            row.location.as_str(),
            row.date_time.as_str(),
            row.status.label(),
            votes.as_str(),
        ];
        let line: Vec<String> = fields.iter().map(|field| quote(field)).collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }

    Ok(csv)
}

pub fn write_report_csv(report: &ReportResult, path: &Path) -> FixityResult<()> {
    let csv = report_to_csv(report)?;
    std::fs::write(path, csv)?;
    Ok(())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::{IssueId, IssueStatus};
    use chrono::Duration as ChronoDuration;

    fn issue(id: &str, description: &str, status: IssueStatus, age_days: i64) -> Issue {
        Issue {
            id: IssueId::from(id),
            title: None,
            description: description.to_string(),
            category: "Roads".to_string(),
            location: "Ward 1".to_string(),
            coordinates: None,
            created_at: Utc::now() - ChronoDuration::days(age_days),
            resolved_at: None,
            status,
            votes: 7,
            image: None,
        }
    }

    #[test]
    fn criteria_filter_rows_and_summary() {
        let issues = vec![
            issue("FIX-1000", "Deep pothole", IssueStatus::Pending, 2),
            issue("FIX-1001", "Deep pothole", IssueStatus::Resolved, 40),
            issue("FIX-1002", "Streetlight out", IssueStatus::Pending, 10),
        ];

        let report = build_report(
            &issues,
            IssueFilter::default().with_status(IssueStatus::Pending).within_days(7),
            Utc::now(),
        );

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].id, "FIX-1000");
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.summary.pending, 1);
    }

    #[test]
    fn csv_quotes_every_field_and_escapes_quotes() {
        let issues = vec![issue("FIX-1000", "Sign says \"slow\", ignored", IssueStatus::InProgress, 1)];
        let report = build_report(&issues, IssueFilter::default(), Utc::now());

        let csv = report_to_csv(&report).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));

        let row = lines.next().unwrap();
        assert!(row.starts_with("\"FIX-1000\",\"Sign says \"\"slow\"\", ignored\",\"Roads\",\"Ward 1\","));
        assert!(row.ends_with(",\"In Progress\",\"7\""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_reports_cannot_be_exported() {
        let report = build_report(&[], IssueFilter::default(), Utc::now());
        let err = report_to_csv(&report).unwrap_err();
        assert_eq!(err.to_string(), "No data to export!");
    }
}
