pub mod db;
pub mod settings;
pub mod issues;
pub mod dashboard;
pub mod analytics;
pub mod map;
pub mod reports;
pub mod auth;

use crate::models::page::{PageCache, SharedPageCache};
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use std::sync::MutexGuard;

pub(crate) fn lock_cache(cache: &SharedPageCache) -> Result<MutexGuard<'_, PageCache>, String> {
    cache.lock().map_err(|_| "Cache lock error".to_string())
}

/// `5/1/2024, 8:00:00 AM` in the given zone.
pub(crate) fn display_timestamp<Tz>(timestamp: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(zone)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
