use fixity_lib::commands::auth::{get_session, login, logout, register_citizen};
use fixity_lib::commands::dashboard::{
    dashboard_view_internal, open_dashboard_internal, set_dashboard_status_internal,
};
use fixity_lib::commands::analytics::{analytics_view_internal, open_analytics_internal};
use fixity_lib::commands::issues::{
    delete_issue, get_feed, get_issues, submit_issue, update_issue_status, upvote_issue,
};
use fixity_lib::commands::map::{
    add_nearby_issues_internal, map_issue_detail_internal, map_view_internal, open_map_internal,
};
use fixity_lib::commands::reports::{
    export_report_csv_internal, generate_report_internal, open_reports_internal,
};
use fixity_lib::commands::settings::{get_settings, save_settings};
use fixity_lib::models::filter::IssueFilter;
use fixity_lib::models::issue::{GeoPoint, IssueDraft, IssueStatus};
use fixity_lib::models::page::{PageCache, SharedPageCache};
use fixity_lib::models::user::{RegistrationForm, Role};
use serde_json::json;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn create_data_dir() -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let data_dir = temp_dir.path().to_string_lossy().to_string();
    (temp_dir, data_dir)
}

fn new_cache() -> SharedPageCache {
    Arc::new(Mutex::new(PageCache::default()))
}

fn draft(title: &str, description: &str) -> IssueDraft {
    IssueDraft {
        title: title.to_string(),
        description: description.to_string(),
        category: "Roads".to_string(),
        location: "Ward 2".to_string(),
        coordinates: Some(GeoPoint { lat: 20.29, lng: 85.82 }),
        image: None,
    }
}

fn registration() -> RegistrationForm {
    RegistrationForm {
        first_name: "Ravi".to_string(),
        last_name: "Das".to_string(),
        email: "ravi.das@example.in".to_string(),
        phone: "9437012345".to_string(),
        date_of_birth: "1988-02-29".to_string(),
        address: "Lane 4, Unit 9".to_string(),
        city: "Bhubaneswar".to_string(),
        pincode: "751001".to_string(),
        username: "ravi_d".to_string(),
        password: "Odisha@88".to_string(),
        confirm_password: "Odisha@88".to_string(),
        email_notifications: true,
        sms_notifications: true,
        issue_updates: false,
        interests: vec!["Sanitation".to_string()],
        terms_accepted: true,
    }
}

#[tokio::test]
async fn feed_commands_support_submit_upvote_status_and_delete() {
    let (_tmp, data_dir) = create_data_dir();

    let empty = get_feed(data_dir.clone(), None).await.expect("empty feed");
    assert!(empty.cards.is_empty());
    assert_eq!(empty.empty_message.as_deref(), Some("No issues have been reported yet."));

    let first = submit_issue(data_dir.clone(), draft("Pothole", "Deep pothole at the junction"))
        .await
        .expect("submit first");
    let second = submit_issue(data_dir.clone(), draft("Garbage", "Bins not cleared for a week"))
        .await
        .expect("submit second");
    assert_eq!(first.status, IssueStatus::Pending);
    assert_eq!(first.votes, 0);

    let upvoted = upvote_issue(data_dir.clone(), second.id.clone())
        .await
        .expect("upvote");
    assert_eq!(upvoted.votes, 1);

    let trending = get_feed(data_dir.clone(), Some("trending".to_string()))
        .await
        .expect("trending feed");
    assert_eq!(trending.cards[0].issue.id, second.id);
    assert_eq!(trending.cards[0].author.name, "Alex R.");
    assert_eq!(trending.cards[1].author.name, "Maria G.");

    let updated = update_issue_status(data_dir.clone(), first.id.clone(), IssueStatus::InProgress)
        .await
        .expect("update status");
    assert_eq!(updated.status, IssueStatus::InProgress);

    let deleted = delete_issue(data_dir.clone(), second.id.clone())
        .await
        .expect("delete");
    assert_eq!(deleted["status"], "deleted");

    let remaining = get_issues(data_dir.clone()).await.expect("list issues");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, first.id);
    assert_eq!(remaining[0].status, IssueStatus::InProgress);

    let missing = upvote_issue(data_dir.clone(), second.id.clone()).await;
    assert_eq!(missing.unwrap_err(), format!("Issue not found: {}", second.id));
}

#[tokio::test]
async fn malformed_persisted_issues_load_as_empty() {
    let (_tmp, data_dir) = create_data_dir();
    let store = fixity_lib::commands::db::IssueStore::open(&data_dir).expect("open store");
    store.set_item("issues", "{not json").expect("write garbage");

    let issues = get_issues(data_dir.clone()).await.expect("list issues");
    assert!(issues.is_empty());

    submit_issue(data_dir.clone(), draft("Streetlight", "Light out for three days"))
        .await
        .expect("submit after garbage");
    assert_eq!(get_issues(data_dir).await.expect("list issues").len(), 1);
}

#[tokio::test]
async fn settings_commands_round_trip_and_merge_partial_updates() {
    let (_tmp, data_dir) = create_data_dir();

    let initial = get_settings(data_dir.clone()).await.expect("load settings");
    assert_eq!(initial["rowsPerPage"], 5);
    assert_eq!(initial["defaultFeedSort"], "trending");

    let saved = save_settings(
        data_dir.clone(),
        json!({
            "rowsPerPage": 10,
            "reportDelayMs": 999999,
            "defaultFeedSort": "sideways",
            "mapCenter": { "lat": 19.81 }
        }),
    )
    .await
    .expect("save settings");

    assert_eq!(saved["rowsPerPage"], 10);
    assert_eq!(saved["reportDelayMs"], 5000);
    assert_eq!(saved["defaultFeedSort"], "trending");
    assert_eq!(saved["mapCenter"]["lat"], 19.81);
    assert_eq!(saved["mapCenter"]["lng"], 85.8436);

    let reloaded = get_settings(data_dir.clone()).await.expect("reload settings");
    assert_eq!(reloaded, saved);
    assert!(std::path::Path::new(&data_dir).join(".fixity").join("settings.json").exists());
}

#[tokio::test]
async fn auth_commands_register_login_and_logout() {
    let (_tmp, data_dir) = create_data_dir();

    let user = register_citizen(data_dir.clone(), registration())
        .await
        .expect("register");
    assert_eq!(user.username, "ravi_d");

    let duplicate = register_citizen(data_dir.clone(), registration()).await;
    assert_eq!(
        duplicate.unwrap_err(),
        "Username already exists. Please choose a different username."
    );

    let outcome = login(data_dir.clone(), Role::Citizen, "ravi_d".to_string(), "x".to_string())
        .await
        .expect("login");
    assert_eq!(outcome.redirect, "Citizen.html");

    let session = get_session(data_dir.clone()).await.expect("session");
    assert!(session.citizen_logged_in);
    assert_eq!(session.citizen_username.as_deref(), Some("ravi_d"));

    let refused = login(data_dir.clone(), Role::Authority, String::new(), "x".to_string()).await;
    assert_eq!(refused.unwrap_err(), "Please fill in all fields");

    let session = logout(data_dir.clone(), Role::Citizen).await.expect("logout");
    assert!(!session.citizen_logged_in);
    assert_eq!(session.citizen_username.as_deref(), Some("ravi_d"));
}

#[tokio::test]
async fn dashboard_pages_filter_and_status_changes_use_the_page_cache() {
    let (_tmp, data_dir) = create_data_dir();
    let cache = new_cache();
    save_settings(data_dir.clone(), json!({ "dashboardSampleSize": 40, "rowsPerPage": 5 }))
        .await
        .expect("save settings");

    let opened = open_dashboard_internal(&data_dir, &cache).expect("open dashboard");
    assert_eq!(opened.summary.total, 40);
    assert_eq!(opened.table.page, 1);
    assert_eq!(opened.table.page_count, 8);
    assert_eq!(opened.table.caption().as_deref(), Some("Page 1 of 8"));

    let third = dashboard_view_internal(&data_dir, &cache, &IssueFilter::default(), 3)
        .expect("page three");
    assert_eq!(third.table.page, 3);
    assert_eq!(third.table.rows.len(), 5);

    let target = third.table.rows[0].id.clone();
    let resolved_filter = IssueFilter::default().with_status(IssueStatus::Resolved);
    let before = dashboard_view_internal(&data_dir, &cache, &resolved_filter, 1)
        .expect("resolved before")
        .summary
        .total;
    let was_resolved = third.table.rows[0].status == IssueStatus::Resolved;

    let after = set_dashboard_status_internal(
        &data_dir,
        &cache,
        &target,
        IssueStatus::Resolved,
        &resolved_filter,
    )
    .expect("set status");
    assert_eq!(after.table.page, 1);
    assert_eq!(after.summary.total, if was_resolved { before } else { before + 1 });
}

#[tokio::test]
async fn analytics_regenerates_and_filters_charts() {
    let (_tmp, data_dir) = create_data_dir();
    let cache = new_cache();
    save_settings(data_dir.clone(), json!({ "analyticsSampleSize": 60 }))
        .await
        .expect("save settings");

    let opened = open_analytics_internal(&data_dir, &cache).expect("open analytics");
    assert_eq!(opened.summary.total, 60);
    assert_eq!(opened.charts.len(), 7);

    let ward = analytics_view_internal(&cache, &IssueFilter::default().with_location("Ward 1"), 30)
        .expect("ward view");
    let in_ward = cache
        .lock()
        .expect("cache lock")
        .analytics
        .iter()
        .filter(|issue| issue.location == "Ward 1")
        .count();
    assert_eq!(ward.summary.total, in_ward);
    let trend = ward
        .charts
        .iter()
        .find(|chart| chart.id == "issues-time-chart")
        .expect("trend chart");
    assert_eq!(trend.labels.len(), 30);
}

#[tokio::test]
async fn map_nearby_requires_a_position_and_appends_issues() {
    let (_tmp, data_dir) = create_data_dir();
    let cache = new_cache();
    save_settings(data_dir.clone(), json!({ "mapSampleSize": 30, "nearbySampleSize": 10 }))
        .await
        .expect("save settings");

    let opened = open_map_internal(&data_dir, &cache).expect("open map");
    assert_eq!(opened.total, 30);
    assert_eq!(opened.list.len(), 30);

    let denied = add_nearby_issues_internal(&data_dir, &cache, None, &IssueFilter::default());
    assert_eq!(
        denied.unwrap_err(),
        "Geolocation is not supported by this browser or permission denied."
    );

    let here = GeoPoint { lat: 20.3, lng: 85.85 };
    let near = add_nearby_issues_internal(&data_dir, &cache, Some(here), &IssueFilter::default())
        .expect("nearby");
    assert_eq!(near.total, 40);
    assert_eq!(near.center, here);

    let last = near.list.last().expect("list item").id.clone();
    assert_eq!(last.to_string(), "FIX-1039");
    let detail = map_issue_detail_internal(&cache, &last).expect("detail");
    assert!(detail.location.contains("(Lat: 20."));

    let refreshed = map_view_internal(&data_dir, &cache, &IssueFilter::default()).expect("map view");
    assert_eq!(refreshed.total, 40);
    assert_eq!(refreshed.center, here);
}

#[tokio::test]
async fn reports_generate_after_delay_and_export_csv() {
    let (tmp, data_dir) = create_data_dir();
    let cache = new_cache();
    save_settings(data_dir.clone(), json!({ "reportSampleSize": 25, "reportDelayMs": 0 }))
        .await
        .expect("save settings");

    let export_path = tmp.path().join("fixity_report.csv");
    let export_str = export_path.to_string_lossy().to_string();

    assert_eq!(open_reports_internal(&data_dir, &cache).expect("open reports"), 25);
    let nothing = export_report_csv_internal(&cache, &export_str);
    assert_eq!(nothing.unwrap_err(), "No data to export!");

    let report = generate_report_internal(&data_dir, &cache, IssueFilter::default())
        .await
        .expect("generate");
    assert_eq!(report.rows.len(), 25);
    assert_eq!(report.summary.total, 25);

    export_report_csv_internal(&cache, &export_str).expect("export");
    let csv = fs::read_to_string(&export_path).expect("read csv");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Description,Category,Location,Date/Time,Status,Votes")
    );
    assert_eq!(lines.count(), 25);

    let none = generate_report_internal(
        &data_dir,
        &cache,
        IssueFilter::default().with_category("Not a category"),
    )
    .await
    .expect("generate empty");
    assert!(none.rows.is_empty());
    assert!(export_report_csv_internal(&cache, &export_str).is_err());
}
