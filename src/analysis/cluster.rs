//! Grid-based marker clustering in Web-Mercator pixel space.
//!
//! Markers whose projected pixel position falls in the same
//! `radius_px`-sized cell at the requested zoom are grouped. Groups of one
//! stay plain markers.

use crate::models::issue::{GeoPoint, Issue};
use crate::models::view::MarkerCluster;
use std::collections::HashMap;
use std::f64::consts::PI;

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.051_128_78;

#[derive(Debug)]
pub struct Clustering<'a> {
    pub singles: Vec<&'a Issue>,
    pub clusters: Vec<MarkerCluster>,
}

/// Projects a point to world pixel coordinates at `zoom`.
pub fn project(point: GeoPoint, zoom: u8) -> (f64, f64) {
    let scale = TILE_SIZE * 2f64.powi(zoom as i32);
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

/// Groups the issues that carry coordinates. Output order follows the first
/// appearance of each cell in `issues`.
pub fn cluster_issues(issues: &[Issue], zoom: u8, radius_px: u32) -> Clustering<'_> {
    let cell = radius_px.max(1) as f64;
    let mut slots: HashMap<(i64, i64), usize> = HashMap::new();
    let mut groups: Vec<Vec<&Issue>> = Vec::new();

    for issue in issues {
        let Some(point) = issue.coordinates else {
            continue;
        };

        let (x, y) = project(point, zoom);
        let key = ((x / cell).floor() as i64, (y / cell).floor() as i64);
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(issue);
    }

    let mut singles = Vec::new();
    let mut clusters = Vec::new();

    for group in groups {
        if group.len() == 1 {
            singles.push(group[0]);
            continue;
        }

        let count = group.len();
        let (lat_sum, lng_sum) = group
            .iter()
            .filter_map(|issue| issue.coordinates)
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));

        clusters.push(MarkerCluster {
            center: GeoPoint {
                lat: lat_sum / count as f64,
                lng: lng_sum / count as f64,
            },
            count,
            issue_ids: group.iter().map(|issue| issue.id.clone()).collect(),
        });
    }

    Clustering { singles, clusters }
}
