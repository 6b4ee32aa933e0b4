use crate::models::filter::SortOrder;
use crate::models::issue::Issue;

/// Most votes first. Stable, so ties keep their incoming order.
pub fn sort_by_votes(issues: &mut [Issue]) {
    issues.sort_by(|a, b| b.votes.cmp(&a.votes));
}

/// Most recently created first.
pub fn sort_by_newest(issues: &mut [Issue]) {
    issues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub fn sort_issues(issues: &mut [Issue], order: SortOrder) {
    match order {
        SortOrder::Trending => sort_by_votes(issues),
        SortOrder::Newest => sort_by_newest(issues),
    }
}

/// The `limit` highest-voted issues, leaving the input untouched.
pub fn top_voted(issues: &[Issue], limit: usize) -> Vec<Issue> {
    let mut ranked = issues.to_vec();
    sort_by_votes(&mut ranked);
    ranked.truncate(limit);
    ranked
}
