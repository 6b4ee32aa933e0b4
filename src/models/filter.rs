use crate::models::issue::IssueStatus;
use serde::{Deserialize, Serialize};

/// Current filter state of a page. `None` means the dropdown sits on "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueFilter {
    #[serde(deserialize_with = "all_as_none")]
    pub location: Option<String>,
    #[serde(deserialize_with = "all_as_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "status_or_all")]
    pub status: Option<IssueStatus>,
    pub search: Option<String>,
    #[serde(deserialize_with = "days_or_all")]
    pub within_days: Option<u32>,
}

impl IssueFilter {
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = selection(location);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = selection(category);
        self
    }

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn within_days(mut self, days: u32) -> Self {
        self.within_days = Some(days);
        self
    }
}

/// Maps a dropdown value to a filter selection; `"all"` and blanks select everything.
pub fn selection(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn all_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(selection))
}

fn status_or_all<'de, D>(deserializer: D) -> Result<Option<IssueStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().and_then(selection) {
        None => Ok(None),
        Some(label) => IssueStatus::parse(&label)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown status `{label}`"))),
    }
}

/// Date-range dropdown values arrive as numbers, numeric strings or `"all"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DaysValue {
    Number(u32),
    Text(String),
}

fn days_or_all<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<DaysValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(DaysValue::Number(days)) => Ok(Some(days)),
        Some(DaysValue::Text(raw)) => match selection(&raw) {
            None => Ok(None),
            Some(days) => days
                .parse::<u32>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid date range `{days}`"))),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most votes first.
    #[default]
    Trending,
    /// Most recent first.
    Newest,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<SortOrder> {
        match raw.trim().to_lowercase().as_str() {
            "trending" | "votes" => Some(SortOrder::Trending),
            "newest" | "date" => Some(SortOrder::Newest),
            _ => None,
        }
    }
}
