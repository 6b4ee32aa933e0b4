use crate::models::filter::IssueFilter;
use crate::models::issue::Issue;
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// True when the issue passes every active predicate of the filter.
pub fn matches(issue: &Issue, filter: &IssueFilter, now: DateTime<Utc>) -> bool {
    let location_match = filter
        .location
        .as_deref()
        .map_or(true, |location| issue.location == location);
    let category_match = filter
        .category
        .as_deref()
        .map_or(true, |category| issue.category == category);
    let status_match = filter.status.map_or(true, |status| issue.status == status);
    let search_match = filter
        .search
        .as_deref()
        .map_or(true, |term| matches_search(issue, term));
    let date_match = filter
        .within_days
        .map_or(true, |days| age_in_days(issue, now) <= days as f64);

    location_match && category_match && status_match && search_match && date_match
}

/// Keeps the issues that pass the filter, in their original order.
pub fn apply_filter(issues: &[Issue], filter: &IssueFilter, now: DateTime<Utc>) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| matches(issue, filter, now))
        .cloned()
        .collect()
}

fn matches_search(issue: &Issue, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    issue.description.to_lowercase().contains(&needle)
        || issue
            .title
            .as_deref()
            .is_some_and(|title| title.to_lowercase().contains(&needle))
}

/// Fractional days between creation and `now`.
fn age_in_days(issue: &Issue, now: DateTime<Utc>) -> f64 {
    (now - issue.created_at).num_seconds() as f64 / SECONDS_PER_DAY
}
