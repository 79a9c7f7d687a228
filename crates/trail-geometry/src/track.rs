//! Track model
//!
//! Tracks are plain records. Nothing here validates that segments chain
//! end-to-start or that sequence indices are contiguous.

use crate::{Coordinate, TrackError, geometry};
use geo::Rect;
use std::fmt;
use std::str::FromStr;

/// Category of a track
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum TrackType {
    /// Open class
    Avo,
    /// Winner class
    Voi,
    /// No strict rules
    #[default]
    Training,
}

impl TrackType {
    pub const ALL: [TrackType; 3] = [TrackType::Avo, TrackType::Voi, TrackType::Training];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackType::Avo => "AVO",
            TrackType::Voi => "VOI",
            TrackType::Training => "TRAINING",
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackType {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackType::ALL
            .into_iter()
            .find(|track_type| track_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackError::UnknownTrackType(s.to_string()))
    }
}

/// One straight geodesic leg of a track
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrackSegment {
    pub id: String,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Rank of this segment within its track
    pub sequence_index: usize,
}

impl TrackSegment {
    pub fn new(
        id: impl Into<String>,
        start: Coordinate,
        end: Coordinate,
        sequence_index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            sequence_index,
        }
    }

    /// Length of this segment in meters
    #[inline]
    pub fn length(&self) -> f64 {
        geometry::segment_length(self)
    }
}

/// A recorded path made of ordered segments
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub track_type: TrackType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub segments: Vec<TrackSegment>,
}

/// A discontinuity between two consecutive segments
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentGap {
    /// Position of the segment preceding the gap in `Track::segments`
    pub after_index: usize,
    /// End of the preceding segment
    pub from: Coordinate,
    /// Start of the following segment
    pub to: Coordinate,
    /// Great-circle distance across the gap in meters
    pub distance_meters: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Track {
    /// Create a track without segments
    pub fn new(id: impl Into<String>, name: impl Into<String>, track_type: TrackType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            track_type,
            segments: Vec::new(),
        }
    }

    /// Replace the segments of this track
    pub fn with_segments(mut self, segments: Vec<TrackSegment>) -> Self {
        self.segments = segments;
        self
    }

    /// Build a track whose segments chain through `coordinates` in order
    ///
    /// Segment ids are `"{id}-s{index}"`. Fewer than two coordinates give a
    /// track without segments.
    pub fn from_coordinates(
        id: impl Into<String>,
        name: impl Into<String>,
        track_type: TrackType,
        coordinates: &[Coordinate],
    ) -> Self {
        let mut track = Self::new(id, name, track_type);
        track.extend_with_polyline(coordinates);
        track
    }

    /// Append chained segments through `coordinates`, continuing the sequence
    pub(crate) fn extend_with_polyline(&mut self, coordinates: &[Coordinate]) {
        for pair in coordinates.windows(2) {
            let sequence_index = self.segments.len();
            self.segments.push(TrackSegment::new(
                format!("{}-s{}", self.id, sequence_index),
                pair[0],
                pair[1],
                sequence_index,
            ));
        }
    }

    /// Total length in meters
    #[inline]
    pub fn length(&self) -> f64 {
        geometry::track_length(self)
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// List every place where a segment does not start where the previous one ended
    pub fn gaps(&self) -> Vec<SegmentGap> {
        self.segments
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].end != pair[1].start)
            .map(|(after_index, pair)| SegmentGap {
                after_index,
                from: pair[0].end,
                to: pair[1].start,
                distance_meters: geometry::distance_between_coordinates(pair[0].end, pair[1].start),
            })
            .collect()
    }

    /// Bounding box of all segment endpoints in degrees (x = lon, y = lat)
    ///
    /// Returns `None` for a track without segments.
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        if self.segments.is_empty() {
            return None;
        }

        let mut min_lat = f64::INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut max_lon = f64::NEG_INFINITY;

        for coordinate in self.segments.iter().flat_map(|s| [s.start, s.end]) {
            min_lat = min_lat.min(coordinate.lat);
            min_lon = min_lon.min(coordinate.lon);
            max_lat = max_lat.max(coordinate.lat);
            max_lon = max_lon.max(coordinate.lon);
        }

        Some(Rect::new(
            geo::Coord {
                x: min_lon,
                y: min_lat,
            },
            geo::Coord {
                x: max_lon,
                y: max_lat,
            },
        ))
    }
}
