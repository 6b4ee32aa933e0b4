use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifier. Mock data uses `FIX-1000`-style strings, the report form
/// uses millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueId {
    Number(i64),
    Text(String),
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueId::Number(n) => write!(f, "{n}"),
            IssueId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for IssueId {
    fn from(value: i64) -> Self {
        IssueId::Number(value)
    }
}

impl From<&str> for IssueId {
    fn from(value: &str) -> Self {
        IssueId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [
        IssueStatus::Pending,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
        }
    }

    /// Accepts the display label or the css-class form (`in-progress`).
    pub fn parse(raw: &str) -> Option<IssueStatus> {
        let normalized = raw.trim().to_lowercase().replace(['-', '_'], " ");
        IssueStatus::ALL
            .into_iter()
            .find(|status| status.label().to_lowercase() == normalized)
    }

    /// Marker fill colour on the map.
    pub fn color(self) -> &'static str {
        match self {
            IssueStatus::Pending => "#e53935",
            IssueStatus::InProgress => "#ffa000",
            IssueStatus::Resolved => "#43a047",
        }
    }

    /// Lowercased, hyphenated label used for badge classes.
    pub fn css_class(self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub status: IssueStatus,
    #[serde(default, alias = "upvotes")]
    pub votes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>, // data URL
}

/// Fields the citizen report form submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub image: Option<String>,
}

pub const CATEGORIES: [&str; 5] = [
    "Sanitation",
    "Roads",
    "Water & Drainage",
    "Public Safety",
    "Utilities",
];

pub const WARDS: [&str; 4] = ["Ward 1", "Ward 2", "Ward 3", "Ward 4"];
