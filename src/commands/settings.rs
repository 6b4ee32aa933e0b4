use crate::analysis::aggregate::MAX_TREND_DAYS;
use crate::models::filter::SortOrder;
use crate::models::issue::GeoPoint;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 1;

/// Typed view of `settings.json` after migration and sanitizing.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    pub rows_per_page: usize,
    pub dashboard_sample_size: usize,
    pub analytics_sample_size: usize,
    pub report_sample_size: usize,
    pub map_sample_size: usize,
    pub nearby_sample_size: usize,
    pub report_delay_ms: u64,
    pub trend_range_days: u32,
    pub cluster_radius_px: u32,
    pub map_zoom: u8,
    pub map_center: GeoPoint,
    pub default_feed_sort: SortOrder,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        effective_from_value(&default_settings())
    }
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn get_settings(data_dir: String) -> Result<Value, String> {
    load_settings_from_disk(&data_dir)
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn save_settings(data_dir: String, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(&data_dir, settings)
}

pub fn load_effective_settings(data_dir: &str) -> Result<EffectiveSettings, String> {
    let settings = load_settings_from_disk(data_dir)?;
    Ok(effective_from_value(&settings))
}

fn effective_from_value(settings: &Value) -> EffectiveSettings {
    let number = |key: &str, default: u64| settings.get(key).and_then(Value::as_u64).unwrap_or(default);
    let center = settings.get("mapCenter");
    let coordinate = |key: &str, default: f64| {
        center
            .and_then(|c| c.get(key))
            .and_then(Value::as_f64)
            .unwrap_or(default)
    };

    EffectiveSettings {
        rows_per_page: number("rowsPerPage", 5) as usize,
        dashboard_sample_size: number("dashboardSampleSize", 150) as usize,
        analytics_sample_size: number("analyticsSampleSize", 250) as usize,
        report_sample_size: number("reportSampleSize", 250) as usize,
        map_sample_size: number("mapSampleSize", 200) as usize,
        nearby_sample_size: number("nearbySampleSize", 50) as usize,
        report_delay_ms: number("reportDelayMs", 500),
        trend_range_days: number("trendRangeDays", 7) as u32,
        cluster_radius_px: number("clusterRadiusPx", 80) as u32,
        map_zoom: number("mapZoom", 12) as u8,
        map_center: GeoPoint {
            lat: coordinate("lat", 20.2736),
            lng: coordinate("lng", 85.8436),
        },
        default_feed_sort: settings
            .get("defaultFeedSort")
            .and_then(Value::as_str)
            .and_then(SortOrder::parse)
            .unwrap_or_default(),
    }
}

pub fn load_settings_from_disk(data_dir: &str) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_fixity_dir(data_dir)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|e| {
            log::warn!("settings.json is not valid JSON, falling back to defaults: {e}");
            json!({})
        })
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(data_dir: &str, settings: Value) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_fixity_dir(data_dir)?;

    let mut merged = load_settings_from_disk(data_dir).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    log::info!("settings saved to {}", path.display());
    Ok(migrated)
}

fn settings_path(data_dir: &str) -> PathBuf {
    Path::new(data_dir).join(".fixity").join("settings.json")
}

pub(crate) fn ensure_fixity_dir(data_dir: &str) -> Result<PathBuf, String> {
    let dir = Path::new(data_dir).join(".fixity");
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create .fixity directory: {e}"))?;
    Ok(dir)
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("Failed to write settings.json: {e}"))
}

fn migrate_settings(input: Value) -> Value {
    let defaults = default_settings();
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let version = out
        .get("schema_version")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if version > SETTINGS_SCHEMA_VERSION {
        log::warn!("settings.json has newer schema version {version}; keeping it");
    }

    deep_merge_defaults(&mut out, &defaults);
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert(
            "schema_version".to_string(),
            json!(version.max(SETTINGS_SCHEMA_VERSION)),
        );
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "rowsPerPage": 5,
        "dashboardSampleSize": 150,
        "analyticsSampleSize": 250,
        "reportSampleSize": 250,
        "mapSampleSize": 200,
        "nearbySampleSize": 50,
        "reportDelayMs": 500,
        "trendRangeDays": 7,
        "clusterRadiusPx": 80,
        "mapZoom": 12,
        "mapCenter": { "lat": 20.2736, "lng": 85.8436 },
        "defaultFeedSort": "trending"
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "rowsPerPage", 1, 100, 5);
    clamp_u64(obj, "dashboardSampleSize", 1, 1000, 150);
    clamp_u64(obj, "analyticsSampleSize", 1, 1000, 250);
    clamp_u64(obj, "reportSampleSize", 1, 1000, 250);
    clamp_u64(obj, "mapSampleSize", 1, 1000, 200);
    clamp_u64(obj, "nearbySampleSize", 1, 500, 50);
    clamp_u64(obj, "reportDelayMs", 0, 5000, 500);
    clamp_u64(obj, "trendRangeDays", 1, MAX_TREND_DAYS as u64, 7);
    clamp_u64(obj, "clusterRadiusPx", 10, 200, 80);
    clamp_u64(obj, "mapZoom", 1, 18, 12);

    sanitize_enum(obj, "defaultFeedSort", &["trending", "newest"], "trending");

    let center = obj
        .entry("mapCenter".to_string())
        .or_insert_with(|| json!({}));
    if let Some(center_obj) = center.as_object_mut() {
        clamp_f64(center_obj, "lat", -85.0, 85.0, 20.2736);
        clamp_f64(center_obj, "lng", -180.0, 180.0, 85.8436);
    } else {
        *center = json!({ "lat": 20.2736, "lng": 85.8436 });
    }
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn clamp_f64(map: &mut Map<String, Value>, key: &str, min: f64, max: f64, default: f64) {
    let raw = map.get(key).and_then(Value::as_f64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn sanitize_enum(map: &mut Map<String, Value>, key: &str, allowed: &[&str], default: &str) {
    let valid = map
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| allowed.contains(value))
        .unwrap_or(default);
    map.insert(key.to_string(), json!(valid));
}
