//! Geospatial core for GreenByte land analysis.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Coordinate parsing (plain text, GeoJSON and WKT)
//! - An immutable catalog of agro-climatic reference locations
//! - Nearest-location matching with a distance threshold
//! - Batch ranking with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use greenbyte_geo::{find_nearest, Coordinate, LocationCatalog};
//!
//! let catalog = LocationCatalog::builtin();
//! let whitefield = Coordinate::new(13.1172, 77.6347);
//!
//! let matched = find_nearest(&whitefield, catalog.records(), 150.0).unwrap();
//! assert_eq!(matched.record.name, "Bengaluru");
//! assert!(matched.distance_km < 20.0);
//! ```

mod haversine;
mod parse;
pub mod batch;
pub mod catalog;
mod error;
pub mod matcher;

#[cfg(feature = "wasm")]
mod wasm;

pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use parse::{parse_coordinate_str, parse_geojson_point};
pub use batch::{rank_by_distance, within_radius, RankedLocation};
pub use catalog::{LocationCatalog, LocationRecord};
pub use error::{GeoError, GeoErrorCode, Result};
pub use matcher::{find_nearest, LocationMatcher, MatchResult, NearestLocation};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without checking its range.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting out-of-range or NaN values.
    ///
    /// ```
    /// use greenbyte_geo::Coordinate;
    ///
    /// assert!(Coordinate::try_new(17.385, 78.4867).is_ok());
    /// assert!(Coordinate::try_new(95.0, 78.4867).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude).validated()
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns the coordinate unchanged if valid, or an `InvalidCoordinate` error.
    pub fn validated(self) -> Result<Self> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(self)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coordinate_str(s)
    }
}
