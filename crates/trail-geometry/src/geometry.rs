//! Great-circle distance calculations
//!
//! All functions here are pure and total over finite inputs. NaN inputs
//! produce NaN outputs instead of an error.

use crate::{Coordinate, Track, TrackSegment};

/// Mean Earth radius in meters used for all spherical distance calculations
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Calculate the Haversine distance between two coordinates in meters
///
/// Returns exactly `0.0` for equal coordinates and is symmetric in its
/// arguments. The central angle is computed as `2·atan2(√h, √(1−h))`, which
/// stays well conditioned from coincident up to antipodal points.
#[inline]
pub fn distance_between_coordinates(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points. clamp keeps NaN.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Length of a single segment in meters
#[inline]
pub fn segment_length(segment: &TrackSegment) -> f64 {
    distance_between_coordinates(segment.start, segment.end)
}

/// Total length of a track in meters
///
/// Segment lengths are summed left to right in stored order. Gaps between
/// consecutive segments are not counted (see [`Track::gaps`]).
pub fn track_length(track: &Track) -> f64 {
    #[cfg(feature = "profiling")]
    profiling::scope!("geometry::track_length");

    // fold from +0.0: f64's Sum starts at -0.0 for empty iterators
    track
        .segments
        .iter()
        .map(segment_length)
        .fold(0.0, |total, length| total + length)
}
