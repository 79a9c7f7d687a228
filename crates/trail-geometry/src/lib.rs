//! Trail Geometry - Distances and Lengths for Orienteering Tracks
//!
//! This library provides the track model used by Trail Tracker together with
//! great-circle distance calculations over WGS84 coordinates. Distances use a
//! spherical Earth (haversine formula) with a fixed mean radius.
//!
//! # Architecture
//!
//! - **[`Coordinate`]**: Immutable latitude/longitude pair in degrees
//! - **[`Track`]** / **[`TrackSegment`]**: Plain records describing a recorded path
//! - **[`geometry`]**: Pure distance functions over coordinates, segments and tracks
//! - **[`loader`]**: Reading tracks from JSON documents and GPX files
//! - **[`TrackCollection`]**: A set of loaded tracks with cached statistics
//!
//! Every function in [`geometry`] is total: it never fails and never touches
//! shared state, so it can be called from any number of threads.

mod collection;
mod coordinate;
pub mod geometry;
pub mod loader;
mod track;

// Public API exports
pub use collection::{CollectionInfo, TrackCollection};
pub use coordinate::Coordinate;
pub use geometry::{
    EARTH_RADIUS_METERS, distance_between_coordinates, segment_length, track_length,
};
pub use loader::{TrackFormat, load_tracks_from_path};
pub use track::{SegmentGap, Track, TrackSegment, TrackType};

use std::path::PathBuf;

/// Error types for loading and parsing tracks
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[cfg(feature = "serde")]
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported track file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Unknown track type: {0}")]
    UnknownTrackType(String),
}

pub type Result<T> = std::result::Result<T, TrackError>;
