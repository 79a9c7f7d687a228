//! WGS84 coordinate value type

use crate::geometry;
use geo::Point;

/// A WGS84 position in degrees
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`, but
/// nothing enforces it: values outside these ranges are carried as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in meters
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geometry::distance_between_coordinates(*self, *other)
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    #[inline]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    #[inline]
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coordinate> for Point<f64> {
    #[inline]
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

impl From<&gpx::Waypoint> for Coordinate {
    #[inline]
    fn from(waypoint: &gpx::Waypoint) -> Self {
        Self::from(waypoint.point())
    }
}
