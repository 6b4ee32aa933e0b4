//! Plausible-looking demo records for the authority pages.

use crate::models::issue::{GeoPoint, Issue, IssueId, IssueStatus, CATEGORIES, WARDS};
use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::ops::RangeInclusive;

pub const COMPLAINT_DESCRIPTIONS: [&str; 7] = [
    "Overflowing garbage bin on main street",
    "Deep pothole causing traffic issues",
    "Sewer line blocked, causing overflow",
    "Streetlight out for 3 days",
    "Illegal parking blocking fire hydrant",
    "Damaged footpath near city park",
    "Water leakage from main pipeline",
];

pub const MAP_DESCRIPTIONS: [&str; 20] = [
    "Pothole near school",
    "Garbage not collected",
    "Broken streetlight",
    "Water leakage",
    "Illegal parking",
    "Blocked road",
    "Damaged footpath",
    "Fallen tree on road",
    "Missing manhole cover",
    "Public fountain not working",
    "Damaged bus stop",
    "Graffiti on public wall",
    "Sewer overflow",
    "Stagnant water in street",
    "Park equipment broken",
    "Loud construction noise",
    "Abandoned vehicle",
    "Power outage in sector",
    "Broken traffic light",
    "Faded road markings",
];

/// Bhubaneswar city centre.
pub const CITY_CENTER: GeoPoint = GeoPoint {
    lat: 20.2736,
    lng: 85.8436,
};

/// Khordha district bounding box.
pub const DISTRICT_MIN: GeoPoint = GeoPoint {
    lat: 19.666,
    lng: 84.933,
};
pub const DISTRICT_MAX: GeoPoint = GeoPoint {
    lat: 20.416,
    lng: 86.083,
};

/// Rectangle around `center`; points are drawn uniformly within ±span/2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoArea {
    pub center: GeoPoint,
    pub lat_span: f64,
    pub lng_span: f64,
}

impl GeoArea {
    pub fn district() -> Self {
        GeoArea {
            center: GeoPoint {
                lat: (DISTRICT_MIN.lat + DISTRICT_MAX.lat) / 2.0,
                lng: (DISTRICT_MIN.lng + DISTRICT_MAX.lng) / 2.0,
            },
            lat_span: DISTRICT_MAX.lat - DISTRICT_MIN.lat,
            lng_span: DISTRICT_MAX.lng - DISTRICT_MIN.lng,
        }
    }

    pub fn around(center: GeoPoint, span: f64) -> Self {
        GeoArea {
            center,
            lat_span: span,
            lng_span: span,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (point.lat - self.center.lat).abs() <= self.lat_span / 2.0
            && (point.lng - self.center.lng).abs() <= self.lng_span / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct MockProfile {
    pub count: usize,
    pub first_id: usize,
    pub history_days: u32,
    pub descriptions: &'static [&'static str],
    pub votes: RangeInclusive<u32>,
    pub area: Option<GeoArea>,
    /// Resolved records get a `resolved_at` up to this many days after creation.
    pub resolution_window_days: Option<u32>,
}

impl MockProfile {
    pub fn dashboard(count: usize) -> Self {
        MockProfile {
            count,
            first_id: 0,
            history_days: 30,
            descriptions: &COMPLAINT_DESCRIPTIONS,
            votes: 0..=49,
            area: Some(GeoArea::around(CITY_CENTER, 0.1)),
            resolution_window_days: None,
        }
    }

    pub fn analytics(count: usize) -> Self {
        MockProfile {
            count,
            first_id: 0,
            history_days: 90,
            descriptions: &COMPLAINT_DESCRIPTIONS,
            votes: 0..=49,
            area: None,
            resolution_window_days: Some(14),
        }
    }

    pub fn reports(count: usize) -> Self {
        MockProfile {
            count,
            first_id: 0,
            history_days: 90,
            descriptions: &COMPLAINT_DESCRIPTIONS,
            votes: 0..=49,
            area: None,
            resolution_window_days: None,
        }
    }

    pub fn map(count: usize) -> Self {
        MockProfile {
            count,
            first_id: 0,
            history_days: 30,
            descriptions: &MAP_DESCRIPTIONS,
            votes: 1..=100,
            area: Some(GeoArea::district()),
            resolution_window_days: None,
        }
    }

    /// Issues scattered around the user's position, numbered after `first_id`.
    pub fn nearby(count: usize, center: GeoPoint, first_id: usize) -> Self {
        MockProfile {
            first_id,
            area: Some(GeoArea::around(center, 0.02)),
            ..MockProfile::map(count)
        }
    }
}

pub fn mock_id(index: usize) -> IssueId {
    IssueId::Text(format!("FIX-{}", 1000 + index))
}

pub fn generate_issues<R: Rng>(
    rng: &mut R,
    profile: &MockProfile,
    now: DateTime<Utc>,
) -> Vec<Issue> {
    let history_secs = profile.history_days as i64 * 86_400;

    (0..profile.count)
        .map(|offset| {
            let created_at = now - Duration::seconds(rng.random_range(0..=history_secs));
            let status = *IssueStatus::ALL.choose(rng).unwrap_or(&IssueStatus::Pending);

            let resolved_at = match (status, profile.resolution_window_days) {
                (IssueStatus::Resolved, Some(window)) => {
                    let window_secs = window as i64 * 86_400;
                    Some(created_at + Duration::seconds(rng.random_range(0..=window_secs)))
                }
                _ => None,
            };

            let coordinates = profile.area.map(|area| GeoPoint {
                lat: area.center.lat + (rng.random::<f64>() - 0.5) * area.lat_span,
                lng: area.center.lng + (rng.random::<f64>() - 0.5) * area.lng_span,
            });

            Issue {
                id: mock_id(profile.first_id + offset),
                title: None,
                description: pick(rng, profile.descriptions),
                category: pick(rng, &CATEGORIES),
                location: pick(rng, &WARDS),
                coordinates,
                created_at,
                resolved_at,
                status,
                votes: rng.random_range(profile.votes.clone()),
                image: None,
            }
        })
        .collect()
}

fn pick<R: Rng>(rng: &mut R, options: &[&str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}
