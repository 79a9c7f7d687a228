//! TrackCollection - Top-level manager for loaded tracks
//!
//! This module keeps every loaded track together with incrementally updated
//! statistics, so totals never require a pass over all segments.

use crate::{Result, Track, TrackType, loader};

use geo::Rect;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Information about the track collection
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollectionInfo {
    /// Number of tracks loaded
    pub track_count: usize,
    /// Total number of segments
    pub total_segments: usize,
    /// Total length in meters
    pub total_length_meters: f64,
}

/// Cached statistics for the collection
///
/// These are updated incrementally when tracks are added, in insertion
/// order, so the totals are reproducible bit for bit.
#[derive(Debug, Clone, Default)]
struct CachedStats {
    total_segments: usize,
    total_length: f64,
    /// Combined bounding box in degrees (None if no track has segments)
    bounding_box: Option<Rect<f64>>,
}

/// Owner of all loaded tracks
#[derive(Debug, Clone, Default)]
pub struct TrackCollection {
    tracks: Vec<Arc<Track>>,
    cached_stats: CachedStats,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track to the collection
    pub fn add_track(&mut self, track: Track) {
        self.update_stats_for_added_track(&track);
        self.tracks.push(Arc::new(track));
    }

    /// Add several tracks, keeping their order
    pub fn add_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) {
        for track in tracks {
            self.add_track(track);
        }
    }

    /// Load tracks from files in parallel
    ///
    /// Files are parsed concurrently but added in the order of `paths`. Any
    /// failing file aborts the whole load and leaves the collection untouched.
    /// Returns the number of tracks added.
    pub fn load_from_files<P: AsRef<Path> + Sync>(
        &mut self,
        paths: &[P],
        track_type: TrackType,
    ) -> Result<usize> {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::load_from_files");

        let loaded: Result<Vec<Vec<Track>>> = paths
            .par_iter()
            .map(|path| loader::load_tracks_from_path(path.as_ref(), track_type))
            .collect();

        let mut added = 0;
        for tracks in loaded? {
            added += tracks.len();
            self.add_tracks(tracks);
        }

        tracing::info!(
            "Loaded {} track(s) from {} file(s)",
            added,
            paths.len()
        );
        Ok(added)
    }

    #[inline]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Get total number of segments across all tracks
    ///
    /// This is O(1) as the value is cached and updated incrementally.
    #[inline]
    pub fn total_segments(&self) -> usize {
        self.cached_stats.total_segments
    }

    /// Get total length across all tracks in meters
    ///
    /// This is O(1) as the value is cached and updated incrementally.
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.cached_stats.total_length
    }

    #[inline]
    pub fn info(&self) -> CollectionInfo {
        CollectionInfo {
            track_count: self.tracks.len(),
            total_segments: self.cached_stats.total_segments,
            total_length_meters: self.cached_stats.total_length,
        }
    }

    #[inline]
    pub fn get_track(&self, index: usize) -> Option<&Arc<Track>> {
        self.tracks.get(index)
    }

    #[inline]
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cached_stats = CachedStats::default();
    }

    /// Get the combined bounding box of all tracks
    ///
    /// Returns `Some((min_lat, min_lon, max_lat, max_lon))`, or `None` when
    /// no track has segments.
    pub fn bounding_box_wgs84(&self) -> Option<(f64, f64, f64, f64)> {
        let bbox = self.cached_stats.bounding_box?;
        Some((bbox.min().y, bbox.min().x, bbox.max().y, bbox.max().x))
    }

    /// Get the center of the combined bounding box as `(lat, lon)`
    #[inline]
    pub fn center_wgs84(&self) -> Option<(f64, f64)> {
        self.bounding_box_wgs84()
            .map(|(min_lat, min_lon, max_lat, max_lon)| {
                ((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0)
            })
    }

    fn update_stats_for_added_track(&mut self, track: &Track) {
        self.cached_stats.total_segments += track.segment_count();
        self.cached_stats.total_length += track.length();

        let Some(track_bbox) = track.bounding_box() else {
            return;
        };
        self.cached_stats.bounding_box = Some(match self.cached_stats.bounding_box {
            Some(bbox) => Rect::new(
                geo::Coord {
                    x: bbox.min().x.min(track_bbox.min().x),
                    y: bbox.min().y.min(track_bbox.min().y),
                },
                geo::Coord {
                    x: bbox.max().x.max(track_bbox.max().x),
                    y: bbox.max().y.max(track_bbox.max().y),
                },
            ),
            None => track_bbox,
        });
    }
}
