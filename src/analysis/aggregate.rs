use crate::models::issue::{Issue, IssueStatus};
use crate::models::view::StatusSummary;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike};
use std::collections::HashMap;

/// Reported and resolved counts for each of the last N calendar days, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTrend {
    pub days: Vec<NaiveDate>,
    pub reported: Vec<usize>,
    pub resolved: Vec<usize>,
}

impl DailyTrend {
    /// Axis labels such as `Jan 5`.
    pub fn labels(&self) -> Vec<String> {
        self.days
            .iter()
            .map(|day| day.format("%b %-d").to_string())
            .collect()
    }
}

pub fn status_summary(issues: &[Issue]) -> StatusSummary {
    let mut summary = StatusSummary {
        total: issues.len(),
        ..StatusSummary::default()
    };

    for issue in issues {
        match issue.status {
            IssueStatus::Pending => summary.pending += 1,
            IssueStatus::InProgress => summary.in_progress += 1,
            IssueStatus::Resolved => summary.resolved += 1,
        }
    }

    summary
}

/// Count per label in the order of `labels`; values outside the list are ignored.
pub fn count_by<F>(issues: &[Issue], labels: &[&str], key: F) -> Vec<(String, usize)>
where
    F: Fn(&Issue) -> &str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for issue in issues {
        *counts.entry(key(issue)).or_insert(0) += 1;
    }

    labels
        .iter()
        .map(|label| (label.to_string(), counts.get(label).copied().unwrap_or(0)))
        .collect()
}

pub fn count_by_category(issues: &[Issue], categories: &[&str]) -> Vec<(String, usize)> {
    count_by(issues, categories, |issue| issue.category.as_str())
}

pub fn count_by_ward(issues: &[Issue], wards: &[&str]) -> Vec<(String, usize)> {
    count_by(issues, wards, |issue| issue.location.as_str())
}

pub fn count_by_status(issues: &[Issue]) -> Vec<(String, usize)> {
    let summary = status_summary(issues);
    vec![
        (IssueStatus::Pending.label().to_string(), summary.pending),
        (IssueStatus::InProgress.label().to_string(), summary.in_progress),
        (IssueStatus::Resolved.label().to_string(), summary.resolved),
    ]
}

/// Longest trend window the analytics page offers.
pub const MAX_TREND_DAYS: u32 = 90;

/// Buckets creation and resolution dates into the `range_days` days ending today,
/// in the time zone of `now`. `range_days` is clamped to `1..=MAX_TREND_DAYS`.
pub fn daily_trend<Tz: TimeZone>(issues: &[Issue], now: &DateTime<Tz>, range_days: u32) -> DailyTrend {
    let today = now.date_naive();
    let range_days = range_days.clamp(1, MAX_TREND_DAYS);
    let days: Vec<NaiveDate> = (0..range_days as i64)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect();

    let index: HashMap<NaiveDate, usize> = days.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    let mut reported = vec![0; days.len()];
    let mut resolved = vec![0; days.len()];
    let zone = now.timezone();

    for issue in issues {
        let reported_on = issue.created_at.with_timezone(&zone).date_naive();
        if let Some(&slot) = index.get(&reported_on) {
            reported[slot] += 1;
        }

        if let Some(resolved_at) = issue.resolved_at {
            let resolved_on = resolved_at.with_timezone(&zone).date_naive();
            if let Some(&slot) = index.get(&resolved_on) {
                resolved[slot] += 1;
            }
        }
    }

    DailyTrend {
        days,
        reported,
        resolved,
    }
}

/// Mean days from report to resolution per category. Categories without a
/// resolved, timestamped issue are left out.
pub fn average_resolution_days(issues: &[Issue], categories: &[&str]) -> Vec<(String, f64)> {
    categories
        .iter()
        .filter_map(|category| {
            let durations: Vec<f64> = issues
                .iter()
                .filter(|issue| issue.category == *category && issue.status == IssueStatus::Resolved)
                .filter_map(|issue| {
                    issue
                        .resolved_at
                        .map(|resolved| (resolved - issue.created_at).num_seconds() as f64 / 86_400.0)
                })
                .collect();

            if durations.is_empty() {
                return None;
            }

            let average = durations.iter().sum::<f64>() / durations.len() as f64;
            Some((category.to_string(), average))
        })
        .collect()
}

/// Issues reported in each hour of the day (0–23) in the given zone.
pub fn hourly_distribution<Tz: TimeZone>(issues: &[Issue], zone: &Tz) -> [usize; 24] {
    let mut hours = [0usize; 24];
    for issue in issues {
        let hour = issue.created_at.with_timezone(zone).hour() as usize;
        hours[hour] += 1;
    }
    hours
}

/// `12-1AM`, `1-2AM`, … `11-12AM`.
pub fn hour_labels() -> Vec<String> {
    (0..24u32)
        .map(|hour| {
            let start = if hour % 12 == 0 { 12 } else { hour % 12 };
            let end = if (hour + 1) % 12 == 0 { 12 } else { (hour + 1) % 12 };
            let suffix = if (11..23).contains(&hour) { "PM" } else { "AM" };
            format!("{start}-{end}{suffix}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::{IssueId, CATEGORIES, WARDS};
    use chrono::Utc;

    fn issue(category: &str, ward: &str, status: IssueStatus, created: DateTime<Utc>) -> Issue {
        Issue {
            id: IssueId::from("FIX-1000"),
            title: None,
            description: "Overflowing garbage bin on main street".to_string(),
            category: category.to_string(),
            location: ward.to_string(),
            coordinates: None,
            created_at: created,
            resolved_at: None,
            status,
            votes: 0,
            image: None,
        }
    }

    #[test]
    fn summary_counts_each_status() {
        let now = Utc::now();
        let issues = vec![
            issue("Roads", "Ward 1", IssueStatus::Pending, now),
            issue("Roads", "Ward 1", IssueStatus::Pending, now),
            issue("Roads", "Ward 2", IssueStatus::Resolved, now),
        ];

        let summary = status_summary(&issues);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.in_progress, 0);
        assert_eq!(summary.resolved, 1);
    }

    #[test]
    fn category_counts_follow_lookup_order_and_include_zeroes() {
        let now = Utc::now();
        let issues = vec![
            issue("Utilities", "Ward 1", IssueStatus::Pending, now),
            issue("Sanitation", "Ward 4", IssueStatus::Pending, now),
            issue("Utilities", "Ward 4", IssueStatus::Pending, now),
        ];

        let counts = count_by_category(&issues, &CATEGORIES);
        assert_eq!(counts.len(), CATEGORIES.len());
        assert_eq!(counts[0], ("Sanitation".to_string(), 1));
        assert_eq!(counts[1], ("Roads".to_string(), 0));
        assert_eq!(counts[4], ("Utilities".to_string(), 2));

        let wards = count_by_ward(&issues, &WARDS);
        assert_eq!(wards[3], ("Ward 4".to_string(), 2));
    }

    #[test]
    fn trend_buckets_by_calendar_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();
        let mut resolved = issue("Roads", "Ward 1", IssueStatus::Resolved, now - Duration::days(3));
        resolved.resolved_at = Some(now - Duration::hours(1));
        let issues = vec![
            issue("Roads", "Ward 1", IssueStatus::Pending, now),
            issue("Roads", "Ward 1", IssueStatus::Pending, now - Duration::days(6)),
            issue("Roads", "Ward 1", IssueStatus::Pending, now - Duration::days(7)),
            resolved,
        ];

        let trend = daily_trend(&issues, &now, 7);
        assert_eq!(trend.days.len(), 7);
        assert_eq!(trend.labels()[0], "Mar 4");
        assert_eq!(trend.labels()[6], "Mar 10");
        assert_eq!(trend.reported, vec![1, 0, 0, 1, 0, 0, 1]);
        assert_eq!(trend.resolved, vec![0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn trend_window_is_bounded() {
        let now = Utc::now();
        assert_eq!(daily_trend(&[], &now, u32::MAX).days.len(), MAX_TREND_DAYS as usize);
        assert_eq!(daily_trend(&[], &now, 0).days.len(), 1);
    }

    #[test]
    fn resolution_average_skips_categories_without_resolutions() {
        let now = Utc::now();
        let mut fast = issue("Roads", "Ward 1", IssueStatus::Resolved, now - Duration::days(4));
        fast.resolved_at = Some(now - Duration::days(2));
        let mut slow = issue("Roads", "Ward 1", IssueStatus::Resolved, now - Duration::days(10));
        slow.resolved_at = Some(now - Duration::days(6));
        let pending = issue("Utilities", "Ward 1", IssueStatus::Pending, now);

        let averages = average_resolution_days(&[fast, slow, pending], &CATEGORIES);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].0, "Roads");
        assert!((averages[0].1 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn hourly_distribution_uses_zone_hours() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
        let issues = vec![
            issue("Roads", "Ward 1", IssueStatus::Pending, base),
            issue("Roads", "Ward 1", IssueStatus::Pending, base + Duration::minutes(20)),
            issue("Roads", "Ward 1", IssueStatus::Pending, base + Duration::hours(14)),
        ];

        let hours = hourly_distribution(&issues, &Utc);
        assert_eq!(hours[9], 2);
        assert_eq!(hours[23], 1);
        assert_eq!(hours.iter().sum::<usize>(), 3);
    }

    #[test]
    fn hour_labels_cover_the_clock() {
        let labels = hour_labels();
        assert_eq!(labels.len(), 24);
        assert_eq!(labels[0], "12-1AM");
        assert_eq!(labels[11], "11-12PM");
        assert_eq!(labels[12], "12-1PM");
        assert_eq!(labels[23], "11-12AM");
    }
}
