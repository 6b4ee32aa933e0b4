use crate::analysis::{mutate, sort};
use crate::commands::db::IssueStore;
use crate::error::{FixityError, Result};
use crate::models::filter::SortOrder;
use crate::models::issue::{Issue, IssueDraft, IssueId, IssueStatus};
use crate::models::view::{FeedAuthor, FeedCard, FeedView};
use chrono::{DateTime, Utc};
use serde_json::json;

const DUMMY_AUTHORS: [(&str, &str); 4] = [
    ("Alex R.", "https://i.pravatar.cc/150?img=1"),
    ("Maria G.", "https://i.pravatar.cc/150?img=5"),
    ("Sam K.", "https://i.pravatar.cc/150?img=8"),
    ("Anonymous", "https://i.pravatar.cc/150?u=a042581f4e29026704d"),
];

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn get_issues(data_dir: String) -> Result<Vec<Issue>, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    Ok(store.load_issues())
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn get_feed(data_dir: String, sort: Option<String>) -> Result<FeedView, String> {
    let order = match sort.as_deref() {
        Some(raw) => SortOrder::parse(raw).ok_or(format!("Unknown sort order: {raw}"))?,
        None => crate::commands::settings::load_effective_settings(&data_dir)?.default_feed_sort,
    };

    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    Ok(build_feed(store.load_issues(), order))
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn submit_issue(data_dir: String, draft: IssueDraft) -> Result<Issue, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    submit_issue_with_store(&store, draft, Utc::now()).map_err(|e| e.to_string())
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn upvote_issue(data_dir: String, id: IssueId) -> Result<Issue, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    store
        .update_issues(|issues| mutate::upvote(issues, &id))
        .map_err(|e| e.to_string())
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn delete_issue(data_dir: String, id: IssueId) -> Result<serde_json::Value, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    let removed = store
        .update_issues(|issues| mutate::remove(issues, &id))
        .map_err(|e| e.to_string())?;
    log::info!("deleted issue {}", removed.id);
    Ok(json!({"status": "deleted", "id": removed.id}))
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn update_issue_status(
    data_dir: String,
    id: IssueId,
    status: IssueStatus,
) -> Result<Issue, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    store
        .update_issues(|issues| mutate::set_status(issues, &id, status))
        .map_err(|e| e.to_string())
}

pub fn submit_issue_with_store(store: &IssueStore, draft: IssueDraft, now: DateTime<Utc>) -> Result<Issue> {
    if draft.title.trim().is_empty() || draft.description.trim().is_empty() {
        return Err(FixityError::validation("Please provide a title and description"));
    }

    store.update_issues(|issues| {
        let issue = Issue {
            id: next_issue_id(issues, now),
            title: Some(draft.title.trim().to_string()),
            description: draft.description.trim().to_string(),
            category: draft.category,
            location: draft.location,
            coordinates: draft.coordinates,
            created_at: now,
            resolved_at: None,
            status: IssueStatus::Pending,
            votes: 0,
            image: draft.image,
        };
        issues.push(issue.clone());
        log::info!("reported issue {}", issue.id);
        Ok(issue)
    })
}

/// Millisecond timestamp, bumped past any numeric id already in the list.
fn next_issue_id(issues: &[Issue], now: DateTime<Utc>) -> IssueId {
    let highest = issues
        .iter()
        .filter_map(|issue| match issue.id {
            IssueId::Number(n) => Some(n),
            IssueId::Text(_) => None,
        })
        .max();

    let candidate = now.timestamp_millis();
    IssueId::Number(match highest {
        Some(max) if max >= candidate => max + 1,
        _ => candidate,
    })
}

pub fn build_feed(mut issues: Vec<Issue>, order: SortOrder) -> FeedView {
    sort::sort_issues(&mut issues, order);

    if issues.is_empty() {
        return FeedView {
            cards: Vec::new(),
            empty_message: Some("No issues have been reported yet.".to_string()),
        };
    }

    let cards = issues
        .into_iter()
        .enumerate()
        .map(|(index, issue)| {
            let (name, avatar) = DUMMY_AUTHORS[index % DUMMY_AUTHORS.len()];
            FeedCard {
                status_class: issue.status.css_class(),
                author: FeedAuthor {
                    name: name.to_string(),
                    avatar: avatar.to_string(),
                },
                issue,
            }
        })
        .collect();

    FeedView {
        cards,
        empty_message: None,
    }
}
