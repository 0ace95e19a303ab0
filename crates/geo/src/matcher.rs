//! Nearest-location matching.
//!
//! Resolves a query coordinate to the closest catalog record, accepting the
//! result only when it lies within a distance threshold.

use crate::{haversine_distance, Coordinate, GeoError, LocationCatalog, LocationRecord, Result};
use serde::{Deserialize, Serialize};

/// Threshold used when none is configured.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 150.0;

/// The closest catalog record and its distance from the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Copy of the winning record
    pub record: LocationRecord,
    /// Great-circle distance from the query in kilometers
    pub distance_km: f64,
}

/// Outcome of a lookup. `NoMatch` is an expected result, not a failure:
/// callers fall back to generic crop data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NearestLocation {
    /// A record lies within the threshold
    Matched(MatchResult),
    /// The catalog is empty or every record is beyond the threshold
    NoMatch,
}

impl NearestLocation {
    /// Returns true if a record was matched.
    pub fn is_match(&self) -> bool {
        matches!(self, NearestLocation::Matched(_))
    }

    /// Converts into an `Option`.
    pub fn into_option(self) -> Option<MatchResult> {
        match self {
            NearestLocation::Matched(result) => Some(result),
            NearestLocation::NoMatch => None,
        }
    }
}

impl From<Option<MatchResult>> for NearestLocation {
    fn from(result: Option<MatchResult>) -> Self {
        result.map_or(NearestLocation::NoMatch, NearestLocation::Matched)
    }
}

/// Finds the catalog record closest to `query`.
///
/// Scans the records in order and keeps the strictly smallest distance, so
/// the first record wins an exact tie. Returns `None` when `records` is empty
/// or the smallest distance exceeds `max_distance_km`.
///
/// The query is assumed to be valid; use [`LocationMatcher`] to have it checked.
///
/// # Example
/// ```
/// use greenbyte_geo::{find_nearest, Coordinate, LocationRecord};
///
/// let records = vec![
///     LocationRecord::new("Vellore", Coordinate::new(12.9165, 79.1325), "East Coast Plains and Hills", vec![]).unwrap(),
/// ];
///
/// let hit = find_nearest(&Coordinate::new(12.9165, 79.1325), &records, 0.0).unwrap();
/// assert_eq!(hit.distance_km, 0.0);
///
/// assert!(find_nearest(&Coordinate::new(20.0, 79.0), &records, 100.0).is_none());
/// ```
pub fn find_nearest(
    query: &Coordinate,
    records: &[LocationRecord],
    max_distance_km: f64,
) -> Option<MatchResult> {
    let mut best: Option<(&LocationRecord, f64)> = None;

    for record in records {
        let distance = haversine_distance(query, &record.coordinate);
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((record, distance)),
        }
    }

    let (record, distance_km) = best?;

    if distance_km <= max_distance_km {
        tracing::debug!(
            query = %query,
            location = %record.name,
            distance_km,
            "Matched nearest location"
        );
        Some(MatchResult {
            record: record.clone(),
            distance_km,
        })
    } else {
        tracing::debug!(
            query = %query,
            nearest = %record.name,
            distance_km,
            max_distance_km,
            "Nearest location is beyond threshold"
        );
        None
    }
}

/// A catalog paired with an acceptance threshold.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Clone)]
pub struct LocationMatcher {
    catalog: LocationCatalog,
    max_distance_km: f64,
}

impl LocationMatcher {
    /// Creates a matcher. The threshold must be non-negative; infinity
    /// accepts any distance.
    pub fn new(catalog: LocationCatalog, max_distance_km: f64) -> Result<Self> {
        if max_distance_km.is_nan() || max_distance_km < 0.0 {
            return Err(GeoError::InvalidThreshold(max_distance_km));
        }

        Ok(Self {
            catalog,
            max_distance_km,
        })
    }

    /// A matcher over the built-in catalog with the default threshold.
    pub fn builtin() -> Self {
        Self {
            catalog: LocationCatalog::builtin(),
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
        }
    }

    /// The catalog being searched.
    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// The acceptance threshold in kilometers.
    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Validates `query` and resolves it against the catalog.
    pub fn locate(&self, query: &Coordinate) -> Result<NearestLocation> {
        let query = query.validated()?;
        Ok(find_nearest(&query, self.catalog.records(), self.max_distance_km).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, lat: f64, lng: f64) -> LocationRecord {
        LocationRecord::new(name, Coordinate::new(lat, lng), "Test Zone", vec!["Maize".into()]).unwrap()
    }

    #[test]
    fn test_exact_hit_matches_for_any_threshold() {
        let records = vec![record("Krishnagiri", 13.0, 78.0)];
        let query = Coordinate::new(13.0, 78.0);

        for threshold in [0.0, 1.0, 100.0, f64::INFINITY] {
            let hit = find_nearest(&query, &records, threshold).unwrap();
            assert_eq!(hit.record.name, "Krishnagiri");
            assert_eq!(hit.distance_km, 0.0);
        }
    }

    #[test]
    fn test_beyond_threshold_is_no_match() {
        // 4.5 degrees of latitude is roughly 500 km
        let records = vec![record("Far", 17.5, 78.0)];
        let query = Coordinate::new(13.0, 78.0);

        let distance = haversine_distance(&query, &records[0].coordinate);
        assert!((distance - 500.0).abs() < 5.0);

        assert!(find_nearest(&query, &records, 100.0).is_none());
        assert!(find_nearest(&query, &records, 600.0).is_some());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let records = vec![record("Edge", 13.0, 79.0)];
        let query = Coordinate::new(13.0, 78.0);
        let distance = haversine_distance(&query, &records[0].coordinate);

        assert!(find_nearest(&query, &records, distance).is_some());
    }

    #[test]
    fn test_empty_catalog_is_no_match() {
        let query = Coordinate::new(13.0, 78.0);
        assert!(find_nearest(&query, &[], f64::INFINITY).is_none());
    }

    #[test]
    fn test_picks_closest() {
        let records = vec![
            record("North", 14.0, 78.0),
            record("Near", 13.1, 78.0),
            record("South", 12.0, 78.0),
        ];
        let hit = find_nearest(&Coordinate::new(13.0, 78.0), &records, 500.0).unwrap();
        assert_eq!(hit.record.name, "Near");
    }

    #[test]
    fn test_first_record_wins_tie() {
        // Two names for the same reference point
        let records = vec![record("First", 13.5, 78.0), record("Second", 13.5, 78.0)];
        let query = Coordinate::new(13.0, 78.0);

        let hit = find_nearest(&query, &records, 500.0).unwrap();
        assert_eq!(hit.record.name, "First");

        let swapped = vec![records[1].clone(), records[0].clone()];
        let hit = find_nearest(&query, &swapped, 500.0).unwrap();
        assert_eq!(hit.record.name, "Second");
    }

    #[test]
    fn test_nan_threshold_never_matches() {
        let records = vec![record("Here", 13.0, 78.0)];
        assert!(find_nearest(&Coordinate::new(13.0, 78.0), &records, f64::NAN).is_none());
    }

    #[test]
    fn test_nan_query_never_matches() {
        let records = vec![record("Only", 13.0, 78.0)];
        let unset = Coordinate::new(f64::NAN, 78.0);
        assert!(find_nearest(&unset, &records, f64::INFINITY).is_none());
        assert!(find_nearest(&unset, &records, 25_000.0).is_none());
    }

    #[test]
    fn test_matcher_rejects_bad_threshold() {
        assert!(matches!(
            LocationMatcher::new(LocationCatalog::empty(), -1.0),
            Err(GeoError::InvalidThreshold(_))
        ));
        assert!(LocationMatcher::new(LocationCatalog::empty(), f64::NAN).is_err());
        assert!(LocationMatcher::new(LocationCatalog::empty(), f64::INFINITY).is_ok());
    }

    #[test]
    fn test_matcher_rejects_invalid_query() {
        let matcher = LocationMatcher::builtin();
        let err = matcher.locate(&Coordinate::new(13.0, 200.0)).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_matcher_resolves_whitefield() {
        let matcher = LocationMatcher::builtin();
        let outcome = matcher.locate(&Coordinate::new(13.1172, 77.6347)).unwrap();
        let hit = outcome.into_option().unwrap();
        assert_eq!(hit.record.name, "Bengaluru");
        assert_eq!(hit.record.zone, "Southern Plateau and Hills");
        assert!(hit.distance_km < 20.0);
    }

    #[test]
    fn test_matcher_empty_catalog() {
        let matcher = LocationMatcher::new(LocationCatalog::empty(), 1000.0).unwrap();
        let outcome = matcher.locate(&Coordinate::new(13.0, 78.0)).unwrap();
        assert_eq!(outcome, NearestLocation::NoMatch);
        assert!(!outcome.is_match());
    }

    #[test]
    fn test_matcher_far_from_india() {
        let matcher = LocationMatcher::builtin();
        // Berlin
        let outcome = matcher.locate(&Coordinate::new(52.52, 13.405)).unwrap();
        assert_eq!(outcome, NearestLocation::NoMatch);
    }

    #[test]
    fn test_nearest_location_serialization() {
        let json = serde_json::to_value(NearestLocation::NoMatch).unwrap();
        assert_eq!(json["status"], "no_match");

        let hit = NearestLocation::Matched(MatchResult {
            record: record("Here", 13.0, 78.0),
            distance_km: 1.5,
        });
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["status"], "matched");
        assert_eq!(json["record"]["name"], "Here");
        assert_eq!(json["distance_km"], 1.5);
    }

    #[test]
    fn test_matcher_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocationMatcher>();

        let matcher = LocationMatcher::builtin();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let outcome = matcher.locate(&Coordinate::new(17.4, 78.5)).unwrap();
                    assert!(outcome.is_match());
                });
            }
        });
    }
}
