//! WASM bindings for the geo crate.
//!
//! These bindings let the land form and dashboard resolve coordinates in the
//! browser without a round trip to the backend.

use crate::{haversine_distance, rank_by_distance, Coordinate, LocationCatalog, LocationMatcher};
use wasm_bindgen::prelude::*;

fn to_js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

/// Calculate distance between two coordinates in kilometers.
///
/// Out-of-range or NaN input is rejected rather than measured.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, JsValue> {
    let from = Coordinate::try_new(lat1, lng1).map_err(|e| to_js_error("Coordinate error", e))?;
    let to = Coordinate::try_new(lat2, lng2).map_err(|e| to_js_error("Coordinate error", e))?;
    Ok(haversine_distance(&from, &to))
}

/// Resolve a coordinate against the built-in catalog.
///
/// # Returns
/// JSON string: `{"status": "matched", "record": {...}, "distance_km": ...}`
/// or `{"status": "no_match"}`
#[wasm_bindgen]
pub fn nearest_location(lat: f64, lng: f64, max_distance_km: f64) -> Result<String, JsValue> {
    let matcher = LocationMatcher::new(LocationCatalog::builtin(), max_distance_km)
        .map_err(|e| to_js_error("Matcher error", e))?;
    let outcome = matcher
        .locate(&Coordinate::new(lat, lng))
        .map_err(|e| to_js_error("Coordinate error", e))?;

    serde_json::to_string(&outcome).map_err(|e| to_js_error("JSON serialize error", e))
}

/// Resolve a coordinate against a caller-supplied catalog.
///
/// # Arguments
/// * `catalog_json` - JSON string `{"locations": [...]}`
#[wasm_bindgen]
pub fn nearest_location_in(
    lat: f64,
    lng: f64,
    catalog_json: &str,
    max_distance_km: f64,
) -> Result<String, JsValue> {
    let catalog = LocationCatalog::from_json_str(catalog_json)
        .map_err(|e| to_js_error("Catalog error", e))?;
    let matcher = LocationMatcher::new(catalog, max_distance_km)
        .map_err(|e| to_js_error("Matcher error", e))?;
    let outcome = matcher
        .locate(&Coordinate::new(lat, lng))
        .map_err(|e| to_js_error("Coordinate error", e))?;

    serde_json::to_string(&outcome).map_err(|e| to_js_error("JSON serialize error", e))
}

/// Built-in catalog records sorted by distance.
///
/// # Arguments
/// * `max_results` - Maximum results to return (0 for all)
#[wasm_bindgen]
pub fn nearby_locations(lat: f64, lng: f64, max_results: u32) -> Result<String, JsValue> {
    let query = Coordinate::try_new(lat, lng).map_err(|e| to_js_error("Coordinate error", e))?;
    let max = if max_results == 0 { None } else { Some(max_results as usize) };
    let catalog = LocationCatalog::builtin();
    let results = rank_by_distance(&query, catalog.records(), max);

    serde_json::to_string(&results).map_err(|e| to_js_error("JSON serialize error", e))
}
