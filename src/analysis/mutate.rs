//! In-place edits shared by the persisted feed and the page caches.

use crate::error::{FixityError, Result};
use crate::models::issue::{Issue, IssueId, IssueStatus};

fn position(issues: &[Issue], id: &IssueId) -> Result<usize> {
    issues
        .iter()
        .position(|issue| &issue.id == id)
        .ok_or_else(|| FixityError::IssueNotFound(id.to_string()))
}

/// Adds one vote to the first issue with `id`.
pub fn upvote(issues: &mut [Issue], id: &IssueId) -> Result<Issue> {
    let index = position(issues, id)?;
    let issue = &mut issues[index];
    issue.votes = issue.votes.saturating_add(1);
    Ok(issue.clone())
}

/// Any status may follow any other.
pub fn set_status(issues: &mut [Issue], id: &IssueId, status: IssueStatus) -> Result<Issue> {
    let index = position(issues, id)?;
    let issue = &mut issues[index];
    issue.status = status;
    Ok(issue.clone())
}

/// Removes the first issue with `id`; the rest keep their order.
pub fn remove(issues: &mut Vec<Issue>, id: &IssueId) -> Result<Issue> {
    let index = position(issues, id)?;
    Ok(issues.remove(index))
}
