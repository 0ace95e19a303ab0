//! Coordinate parsing utilities.
//!
//! Supports parsing coordinates from:
//! - Plain text: `"lat, lng"` or `"lat lng"` (what the land form submits)
//! - GeoJSON format: `{"type": "Point", "coordinates": [lng, lat]}`
//! - WKT format: `POINT(lng lat)`
//!
//! Every successful parse is range-checked; nothing is clamped.

use crate::{Coordinate, GeoError, Result};

/// Parse a coordinate from text.
///
/// Accepts `"lat, lng"`, `"lat lng"` and WKT `"POINT(lng lat)"`.
///
/// # Example
/// ```
/// use greenbyte_geo::parse_coordinate_str;
///
/// let coord = parse_coordinate_str("17.3850, 78.4867").unwrap();
/// assert!((coord.latitude - 17.3850).abs() < 1e-9);
///
/// let coord = parse_coordinate_str("POINT(78.4867 17.3850)").unwrap();
/// assert!((coord.longitude - 78.4867).abs() < 1e-9);
///
/// assert!(parse_coordinate_str("100, 78").is_err());
/// ```
pub fn parse_coordinate_str(text: &str) -> Result<Coordinate> {
    let text = text.trim();

    if text.to_ascii_uppercase().starts_with("POINT") {
        return parse_wkt_point(text)?.validated();
    }

    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidFormat(format!(
            "Expected \"lat, lng\", got: {}",
            text
        )));
    }

    let lat = parse_number(parts[0], "latitude")?;
    let lng = parse_number(parts[1], "longitude")?;

    Coordinate::try_new(lat, lng)
}

/// Parse a coordinate from a JSON value.
///
/// Objects are read as GeoJSON points (`coordinates` is `[lng, lat]`); strings
/// go through [`parse_coordinate_str`].
///
/// # Example
/// ```
/// use greenbyte_geo::parse_geojson_point;
/// use serde_json::json;
///
/// let geojson = json!({"type": "Point", "coordinates": [77.6347, 13.1172]});
/// let coord = parse_geojson_point(&geojson).unwrap();
/// assert!((coord.latitude - 13.1172).abs() < 0.0001);
/// ```
pub fn parse_geojson_point(value: &serde_json::Value) -> Result<Coordinate> {
    if let Some(text) = value.as_str() {
        return parse_coordinate_str(text);
    }

    let coords = value
        .get("coordinates")
        .and_then(|c| c.as_array())
        .ok_or_else(|| GeoError::InvalidFormat(format!("Expected a GeoJSON point, got: {}", value)))?;

    if let Some(kind) = value.get("type").and_then(|t| t.as_str()) {
        if kind != "Point" {
            return Err(GeoError::InvalidFormat(format!("Expected Point, got: {}", kind)));
        }
    }

    if coords.len() < 2 {
        return Err(GeoError::InvalidFormat(format!(
            "Expected 2 coordinates, got {}",
            coords.len()
        )));
    }

    let lng = coords[0]
        .as_f64()
        .ok_or_else(|| GeoError::InvalidFormat(format!("Invalid longitude: {}", coords[0])))?;
    let lat = coords[1]
        .as_f64()
        .ok_or_else(|| GeoError::InvalidFormat(format!("Invalid latitude: {}", coords[1])))?;

    Coordinate::try_new(lat, lng)
}

/// Parse a WKT POINT string.
///
/// Format: `POINT(longitude latitude)`
fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let start = wkt
        .find('(')
        .ok_or_else(|| GeoError::InvalidFormat("Missing '('".into()))?;
    let end = wkt
        .find(')')
        .ok_or_else(|| GeoError::InvalidFormat("Missing ')'".into()))?;

    if start >= end || !wkt[..start].trim().eq_ignore_ascii_case("POINT") {
        return Err(GeoError::InvalidFormat(format!("Expected POINT, got: {}", wkt)));
    }

    let parts: Vec<&str> = wkt[start + 1..end].split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidFormat(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lng = parse_number(parts[0], "longitude")?;
    let lat = parse_number(parts[1], "latitude")?;

    Ok(Coordinate::new(lat, lng))
}

fn parse_number(text: &str, what: &str) -> Result<f64> {
    let value: f64 = text
        .parse()
        .map_err(|_| GeoError::InvalidFormat(format!("Invalid {}: {}", what, text)))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeoError::InvalidFormat(format!("Invalid {}: {}", what, text)))
    }
}
