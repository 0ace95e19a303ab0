//! Immutable catalog of agro-climatic reference locations.
//!
//! A catalog is built once (from the built-in table or a data file) and then
//! only read. Records keep their insertion order, which is also the tie-break
//! order used by the matcher.

use crate::{parse_geojson_point, Coordinate, GeoError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// A known location with its agro-climatic zone and typical crops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Display name
    pub name: String,
    /// Reference point
    pub coordinate: Coordinate,
    /// Agro-climatic zone label
    pub zone: String,
    /// Crops associated with the location, most significant first
    pub crops: Vec<String>,
}

impl LocationRecord {
    /// Creates a record, validating the coordinate.
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        zone: impl Into<String>,
        crops: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GeoError::InvalidCatalog("location name must not be empty".into()));
        }
        let coordinate = coordinate
            .validated()
            .map_err(|e| GeoError::InvalidCatalog(format!("{}: {}", name, e)))?;

        Ok(Self {
            name,
            coordinate,
            zone: zone.into(),
            crops,
        })
    }
}

/// An insertion-ordered, read-only sequence of [`LocationRecord`]s.
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    records: Arc<[LocationRecord]>,
}

static BUILTIN: Lazy<LocationCatalog> = Lazy::new(|| LocationCatalog {
    records: BUILTIN_LOCATIONS
        .iter()
        .map(|(name, lat, lng, zone, crops)| LocationRecord {
            name: (*name).to_string(),
            coordinate: Coordinate::new(*lat, *lng),
            zone: (*zone).to_string(),
            crops: crops.iter().map(|c| (*c).to_string()).collect(),
        })
        .collect(),
});

type BuiltinEntry = (&'static str, f64, f64, &'static str, &'static [&'static str]);

/// One reference point per agro-climatic region of India.
const BUILTIN_LOCATIONS: &[BuiltinEntry] = &[
    ("Srinagar", 34.0837, 74.7973, "Western Himalayan Region", &["Rice (Paddy)", "Maize", "Apple", "Saffron"]),
    ("Guwahati", 26.1445, 91.7362, "Eastern Himalayan Region", &["Rice (Paddy)", "Tea", "Mustard", "Jute"]),
    ("Kolkata", 22.5726, 88.3639, "Lower Gangetic Plains", &["Rice (Paddy)", "Jute", "Potato", "Mustard"]),
    ("Patna", 25.5941, 85.1376, "Middle Gangetic Plains", &["Rice (Paddy)", "Wheat", "Maize", "Lentil"]),
    ("Lucknow", 26.8467, 80.9462, "Upper Gangetic Plains", &["Wheat", "Rice (Paddy)", "Sugarcane", "Mustard"]),
    ("Ludhiana", 30.9010, 75.8573, "Trans-Gangetic Plains", &["Wheat", "Rice (Paddy)", "Cotton", "Maize"]),
    ("Ranchi", 23.3441, 85.3096, "Eastern Plateau and Hills", &["Rice (Paddy)", "Maize", "Groundnut", "Pulses"]),
    ("Bhopal", 23.2599, 77.4126, "Central Plateau and Hills", &["Soybean", "Wheat", "Gram", "Mustard"]),
    ("Nagpur", 21.1458, 79.0882, "Western Plateau and Hills", &["Cotton", "Soybean", "Jowar", "Orange"]),
    ("Hyderabad", 17.3850, 78.4867, "Southern Plateau and Hills", &["Rice (Paddy)", "Cotton", "Maize", "Groundnut"]),
    ("Bengaluru", 12.9716, 77.5946, "Southern Plateau and Hills", &["Ragi", "Maize", "Groundnut", "Rice (Paddy)"]),
    ("Chennai", 13.0827, 80.2707, "East Coast Plains and Hills", &["Rice (Paddy)", "Groundnut", "Sugarcane", "Banana"]),
    ("Kochi", 9.9312, 76.2673, "West Coast Plains and Ghats", &["Coconut", "Rice (Paddy)", "Rubber", "Pepper"]),
    ("Ahmedabad", 23.0225, 72.5714, "Gujarat Plains and Hills", &["Cotton", "Groundnut", "Wheat", "Cumin"]),
    ("Jodhpur", 26.2389, 73.0243, "Western Dry Region", &["Bajra", "Mustard", "Guar", "Cumin"]),
    ("Port Blair", 11.6234, 92.7265, "Island Region", &["Rice (Paddy)", "Coconut", "Arecanut"]),
];

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    locations: Vec<RawRecord>,
}

/// A location as written in a data file: either `latitude`/`longitude`
/// fields or a `location` (GeoJSON point, WKT or `"lat, lng"` text).
#[derive(Debug, Deserialize)]
struct RawRecord {
    name: String,
    #[serde(default)]
    zone: String,
    #[serde(default)]
    crops: Vec<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    location: Option<serde_json::Value>,
}

impl RawRecord {
    fn into_record(self) -> Result<LocationRecord> {
        let coordinate = match (self.latitude, self.longitude, &self.location) {
            (Some(lat), Some(lng), None) => Coordinate::new(lat, lng),
            (None, None, Some(location)) => parse_geojson_point(location)
                .map_err(|e| GeoError::InvalidCatalog(format!("{}: {}", self.name, e)))?,
            _ => {
                return Err(GeoError::InvalidCatalog(format!(
                    "{}: give either latitude and longitude or location",
                    self.name
                )));
            }
        };

        LocationRecord::new(self.name, coordinate, self.zone, self.crops)
    }
}

impl LocationCatalog {
    /// Builds a catalog from records, rejecting invalid coordinates and
    /// duplicate names (compared case-insensitively).
    pub fn new(records: Vec<LocationRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record
                .coordinate
                .validated()
                .map_err(|e| GeoError::InvalidCatalog(format!("{}: {}", record.name, e)))?;
            if !seen.insert(record.name.to_lowercase()) {
                return Err(GeoError::InvalidCatalog(format!(
                    "duplicate location name: {}",
                    record.name
                )));
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    /// An empty catalog. Matching against it never succeeds.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in catalog of Indian agro-climatic reference points.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parses a catalog from JSON text (`{"locations": [...]}`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Parses a catalog from TOML text (`[[locations]]` tables).
    pub fn from_toml_str(toml_text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_text)?;
        Self::from_file(file)
    }

    /// Loads a catalog file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GeoError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(path = %path.display(), records = catalog.len(), "Loaded location catalog");
        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        let records = file
            .locations
            .into_iter()
            .map(RawRecord::into_record)
            .collect::<Result<Vec<_>>>()?;

        if records.is_empty() {
            tracing::warn!("Location catalog is empty; no coordinate will match");
        }

        Self::new(records)
    }

    /// All records in insertion order.
    #[inline]
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Iterates over the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the catalog has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks a record up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&LocationRecord> {
        self.records.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Distinct zone labels in first-seen order.
    pub fn zones(&self) -> Vec<&str> {
        let mut zones: Vec<&str> = Vec::new();
        for record in self.records.iter() {
            if !zones.contains(&record.zone.as_str()) {
                zones.push(&record.zone);
            }
        }
        zones
    }
}

impl<'a> IntoIterator for &'a LocationCatalog {
    type Item = &'a LocationRecord;
    type IntoIter = std::slice::Iter<'a, LocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = LocationCatalog::builtin();
        assert_eq!(catalog.len(), 16);
        assert!(catalog.iter().all(|r| r.coordinate.is_valid()));
        // Round-trips through the validating constructor
        assert!(LocationCatalog::new(catalog.records().to_vec()).is_ok());
    }

    #[test]
    fn test_builtin_catalog_zones() {
        let catalog = LocationCatalog::builtin();
        let zones = catalog.zones();
        assert_eq!(zones.len(), 15);
        assert_eq!(zones[0], "Western Himalayan Region");
    }

    #[test]
    fn test_get_ignores_case() {
        let catalog = LocationCatalog::builtin();
        let record = catalog.get("hyderabad").unwrap();
        assert_eq!(record.zone, "Southern Plateau and Hills");
        assert!(catalog.get("Atlantis").is_none());
    }

    #[test]
    fn test_clones_share_records() {
        let a = LocationCatalog::builtin();
        let b = a.clone();
        assert!(std::ptr::eq(a.records().as_ptr(), b.records().as_ptr()));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let record = LocationRecord::new("Pune", Coordinate::new(18.52, 73.85), "Western Plateau and Hills", vec![]).unwrap();
        let mut twin = record.clone();
        twin.name = "PUNE".into();
        let err = LocationCatalog::new(vec![record, twin]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_record_rejects_invalid_coordinate() {
        let err = LocationRecord::new("Nowhere", Coordinate::new(120.0, 0.0), "", vec![]).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCatalog(_)));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "locations": [
                {"name": "Mysuru", "latitude": 12.2958, "longitude": 76.6394,
                 "zone": "Southern Plateau and Hills", "crops": ["Ragi", "Sugarcane"]},
                {"name": "Madurai", "location": {"type": "Point", "coordinates": [78.1198, 9.9252]},
                 "zone": "East Coast Plains and Hills"}
            ]
        }"#;

        let catalog = LocationCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].crops, vec!["Ragi", "Sugarcane"]);
        assert!((catalog.records()[1].coordinate.latitude - 9.9252).abs() < 1e-9);
        assert!(catalog.records()[1].crops.is_empty());
    }

    #[test]
    fn test_from_toml_str() {
        let toml_text = r#"
            [[locations]]
            name = "Raichur"
            location = "16.2076, 77.3463"
            zone = "Southern Plateau and Hills"
            crops = ["Cotton", "Rice (Paddy)"]

            [[locations]]
            name = "Belagavi"
            location = "POINT(74.4977 15.8497)"
        "#;

        let catalog = LocationCatalog::from_toml_str(toml_text).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].name, "Raichur");
        assert!((catalog.records()[1].coordinate.longitude - 74.4977).abs() < 1e-9);
    }

    #[test]
    fn test_file_rejects_out_of_range() {
        let json = r#"{"locations": [{"name": "Bad", "latitude": 91.0, "longitude": 0.0}]}"#;
        let err = LocationCatalog::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_file_rejects_ambiguous_position() {
        let json = r#"{"locations": [{"name": "Both", "latitude": 1.0, "longitude": 2.0, "location": "1, 2"}]}"#;
        assert!(LocationCatalog::from_json_str(json).is_err());

        let json = r#"{"locations": [{"name": "Half", "latitude": 1.0}]}"#;
        assert!(LocationCatalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_empty_file_gives_empty_catalog() {
        let catalog = LocationCatalog::from_json_str("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("catalog.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        writeln!(file, r#"{{"locations": [{{"name": "Pune", "latitude": 18.52, "longitude": 73.85}}]}}"#).unwrap();
        assert_eq!(LocationCatalog::load(&json_path).unwrap().len(), 1);

        let toml_path = dir.path().join("catalog.toml");
        std::fs::write(&toml_path, "[[locations]]\nname = \"Pune\"\nlatitude = 18.52\nlongitude = 73.85\n").unwrap();
        assert_eq!(LocationCatalog::load(&toml_path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LocationCatalog::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, GeoError::Io { .. }));
    }
}
