//! Batch distance ranking with optional parallelism.
//!
//! Where the matcher answers "which single record is closest", these helpers
//! list every record by distance, for "nearby regions" views.

use crate::{haversine_distance, Coordinate, LocationRecord};
use serde::{Deserialize, Serialize};

/// A catalog record with its distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLocation {
    /// Copy of the catalog record
    pub record: LocationRecord,
    /// Calculated distance in kilometers
    pub distance_km: f64,
}

/// Calculate the distance from `query` to every record, in catalog order.
pub fn calculate_distances(query: &Coordinate, records: &[LocationRecord]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        records
            .par_iter()
            .map(|record| haversine_distance(query, &record.coordinate))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        records
            .iter()
            .map(|record| haversine_distance(query, &record.coordinate))
            .collect()
    }
}

/// Rank records by distance from `query`, closest first.
///
/// The sort is stable, so records at equal distance keep catalog order.
///
/// # Arguments
/// * `query` - Point to measure from
/// * `records` - Catalog records
/// * `max_results` - Maximum number of results to return (None for all)
///
/// # Example
/// ```
/// use greenbyte_geo::{rank_by_distance, Coordinate, LocationCatalog};
///
/// let catalog = LocationCatalog::builtin();
/// let ranked = rank_by_distance(&Coordinate::new(13.1172, 77.6347), catalog.records(), Some(3));
///
/// assert_eq!(ranked.len(), 3);
/// assert_eq!(ranked[0].record.name, "Bengaluru");
/// ```
pub fn rank_by_distance(
    query: &Coordinate,
    records: &[LocationRecord],
    max_results: Option<usize>,
) -> Vec<RankedLocation> {
    let mut results = ranked(query, records);

    if let Some(max) = max_results {
        results.truncate(max);
    }

    results
}

/// Records within `radius_km` of `query` (inclusive), closest first.
pub fn within_radius(
    query: &Coordinate,
    records: &[LocationRecord],
    radius_km: f64,
) -> Vec<RankedLocation> {
    let mut results = ranked(query, records);
    results.retain(|r| r.distance_km <= radius_km);
    results
}

fn ranked(query: &Coordinate, records: &[LocationRecord]) -> Vec<RankedLocation> {
    let mut results: Vec<RankedLocation> = calculate_distances(query, records)
        .into_iter()
        .zip(records)
        .map(|(distance_km, record)| RankedLocation {
            record: record.clone(),
            distance_km,
        })
        .collect();

    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_records() -> Vec<LocationRecord> {
        [
            ("Hyderabad", 17.3850, 78.4867),
            ("Bengaluru", 12.9716, 77.5946),
            ("Chennai", 13.0827, 80.2707),
            ("Delhi", 28.6139, 77.2090),
        ]
        .into_iter()
        .map(|(name, lat, lng)| {
            LocationRecord::new(name, Coordinate::new(lat, lng), "Test Zone", vec![]).unwrap()
        })
        .collect()
    }

    #[test]
    fn test_batch_distances_keep_order() {
        let records = create_test_records();
        let distances = calculate_distances(&Coordinate::new(13.1172, 77.6347), &records);

        assert_eq!(distances.len(), 4);
        // Bengaluru is the second record and the closest one
        assert!(distances[1] < 20.0);
        assert!(distances[3] > 1500.0);
    }

    #[test]
    fn test_sorted_distances() {
        let records = create_test_records();
        let results = rank_by_distance(&Coordinate::new(13.1172, 77.6347), &records, None);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].record.name, "Bengaluru");
        assert_eq!(results[3].record.name, "Delhi");
        for window in results.windows(2) {
            assert!(window[0].distance_km <= window[1].distance_km);
        }
    }

    #[test]
    fn test_equal_distances_keep_catalog_order() {
        let records: Vec<LocationRecord> = ["A", "B", "C"]
            .into_iter()
            .map(|name| LocationRecord::new(name, Coordinate::new(10.0, 76.0), "", vec![]).unwrap())
            .collect();

        let results = rank_by_distance(&Coordinate::new(11.0, 76.0), &records, None);
        let names: Vec<&str> = results.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_radius_filter() {
        let records = create_test_records();
        // Whitefield, 400 km: Bengaluru and Chennai but not Hyderabad (~470 km) or Delhi
        let results = within_radius(&Coordinate::new(13.1172, 77.6347), &records, 400.0);

        let names: Vec<&str> = results.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["Bengaluru", "Chennai"]);
    }

    #[test]
    fn test_max_results() {
        let records = create_test_records();
        let results = rank_by_distance(&Coordinate::new(13.1172, 77.6347), &records, Some(2));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_empty_records() {
        assert!(rank_by_distance(&Coordinate::new(0.0, 0.0), &[], None).is_empty());
        assert!(within_radius(&Coordinate::new(0.0, 0.0), &[], 10.0).is_empty());
    }
}
