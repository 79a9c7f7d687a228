//! Track loading from JSON documents and GPX files
//!
//! JSON documents use the field layout of the web front end (`type`,
//! `sequenceIndex`, ...) and hold either one track or an array of tracks.
//! JSON support requires the `serde` feature.
//!
//! GPX files are converted track by track: every `<trk>` becomes a [`Track`]
//! whose segments connect consecutive points of each `<trkseg>`.

use crate::{Coordinate, Result, Track, TrackError, TrackType};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Supported track file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackFormat {
    #[cfg(feature = "serde")]
    Json,
    Gpx,
}

impl TrackFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            #[cfg(feature = "serde")]
            Some("json") => Ok(TrackFormat::Json),
            Some("gpx") => Ok(TrackFormat::Gpx),
            _ => Err(TrackError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load all tracks stored in the file at `path`
///
/// `track_type` is applied to GPX imports, which carry no category. JSON
/// documents keep the type stored in each track.
pub fn load_tracks_from_path(path: &Path, track_type: TrackType) -> Result<Vec<Track>> {
    #[cfg(feature = "profiling")]
    profiling::scope!("loader::load_tracks_from_path");

    let format = TrackFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| TrackError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let tracks = match format {
        #[cfg(feature = "serde")]
        TrackFormat::Json => read_json(reader)?,
        TrackFormat::Gpx => read_gpx(reader, &id_prefix(path), track_type)?,
    };

    tracing::debug!(
        "Loaded {} track(s) from {}",
        tracks.len(),
        path.display()
    );
    Ok(tracks)
}

/// Parse a JSON document holding one track or an array of tracks
#[cfg(feature = "serde")]
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Track>> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

/// Parse GPX data and convert every `<trk>` into a [`Track`]
///
/// Track ids are `"{id_prefix}-{n}"` with `n` the position of the track in
/// the file.
pub fn read_gpx<R: Read>(reader: R, id_prefix: &str, track_type: TrackType) -> Result<Vec<Track>> {
    let gpx = gpx::read(reader)?;
    Ok(tracks_from_gpx(&gpx, id_prefix, track_type))
}

/// Convert parsed GPX data into tracks
pub fn tracks_from_gpx(gpx: &gpx::Gpx, id_prefix: &str, track_type: TrackType) -> Vec<Track> {
    gpx.tracks
        .iter()
        .enumerate()
        .map(|(n, gpx_track)| track_from_gpx(gpx_track, format!("{id_prefix}-{n}"), n, track_type))
        .collect()
}

fn track_from_gpx(gpx_track: &gpx::Track, id: String, n: usize, track_type: TrackType) -> Track {
    let name = gpx_track
        .name
        .clone()
        .unwrap_or_else(|| format!("Track {}", n + 1));
    let mut track = Track::new(id, name, track_type);

    for (segment_index, gpx_segment) in gpx_track.segments.iter().enumerate() {
        if gpx_segment.points.len() < 2 {
            tracing::warn!(
                "Skipping segment {} of track {}: {} point(s)",
                segment_index,
                track.id,
                gpx_segment.points.len()
            );
            continue;
        }

        // Segments of one <trk> are not joined: a jump between them shows up as a gap
        let coordinates: Vec<Coordinate> =
            gpx_segment.points.iter().map(Coordinate::from).collect();
        track.extend_with_polyline(&coordinates);
    }

    if track.is_empty() {
        tracing::warn!("Track {} ({}) has no segments", track.id, track.name);
    }
    track
}

fn id_prefix(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "track".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TRACKS_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="trail-tracker-tests" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Morning loop</name>
    <trkseg>
      <trkpt lat="60.0" lon="25.0"></trkpt>
      <trkpt lat="60.1" lon="25.0"></trkpt>
      <trkpt lat="60.2" lon="25.0"></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="61.0" lon="25.0"></trkpt>
      <trkpt lat="61.1" lon="25.0"></trkpt>
    </trkseg>
  </trk>
  <trk>
    <trkseg>
      <trkpt lat="60.0" lon="25.0"></trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            TrackFormat::from_path(Path::new("runs/loop.gpx")).unwrap(),
            TrackFormat::Gpx
        );
        assert_eq!(
            TrackFormat::from_path(Path::new("runs/LOOP.GPX")).unwrap(),
            TrackFormat::Gpx
        );
        assert!(matches!(
            TrackFormat::from_path(Path::new("runs/loop.kml")),
            Err(TrackError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            TrackFormat::from_path(Path::new("runs/loop")),
            Err(TrackError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_format_fails_before_io() {
        let result = load_tracks_from_path(Path::new("does/not/exist.txt"), TrackType::Training);
        assert!(matches!(result, Err(TrackError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_tracks_from_path(Path::new("does/not/exist.gpx"), TrackType::Training);
        assert!(matches!(result, Err(TrackError::FileRead { .. })));
    }

    #[test]
    fn test_read_gpx() {
        let tracks = read_gpx(TWO_TRACKS_GPX.as_bytes(), "morning", TrackType::Avo).unwrap();

        assert_eq!(tracks.len(), 2);

        let first = &tracks[0];
        assert_eq!(first.id, "morning-0");
        assert_eq!(first.name, "Morning loop");
        assert_eq!(first.track_type, TrackType::Avo);
        // 2 legs from the first <trkseg>, 1 from the second
        assert_eq!(first.segment_count(), 3);
        let indices: Vec<usize> = first.segments.iter().map(|s| s.sequence_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(first.segments[2].id, "morning-0-s2");
        assert_eq!(first.segments[2].start, Coordinate::new(61.0, 25.0));

        // The jump between the two <trkseg> elements is a gap, not part of the length
        let gaps = first.gaps();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].after_index, 1);
        assert!(first.length() > 30_000.0);
        assert!(first.length() < 40_000.0);

        let second = &tracks[1];
        assert_eq!(second.name, "Track 2");
        assert!(second.is_empty());
        assert_eq!(second.length(), 0.0);
    }

    #[test]
    fn test_read_invalid_gpx() {
        let result = read_gpx("not xml at all".as_bytes(), "broken", TrackType::Training);
        assert!(matches!(result, Err(TrackError::GpxParse(_))));
    }

    #[cfg(feature = "serde")]
    mod json {
        use super::*;

        const SINGLE_TRACK: &str = r#"{
            "id": "t1",
            "name": "Two segments",
            "type": "TRAINING",
            "segments": [
                { "id": "s1", "start": { "lat": 60.0, "lon": 25.0 }, "end": { "lat": 60.1, "lon": 25.0 }, "sequenceIndex": 0 },
                { "id": "s2", "start": { "lat": 60.1, "lon": 25.0 }, "end": { "lat": 60.2, "lon": 25.0 }, "sequenceIndex": 1 }
            ]
        }"#;

        #[test]
        fn test_read_single_track() {
            let tracks = read_json(SINGLE_TRACK.as_bytes()).unwrap();

            assert_eq!(tracks.len(), 1);
            let track = &tracks[0];
            assert_eq!(track.id, "t1");
            assert_eq!(track.track_type, TrackType::Training);
            assert_eq!(track.segments[1].sequence_index, 1);
            assert_eq!(track.segments[1].end, Coordinate::new(60.2, 25.0));
        }

        #[test]
        fn test_read_track_array() {
            let document = r#"[
                { "id": "a", "name": "Open", "type": "AVO", "segments": [] },
                { "id": "b", "name": "Winner", "type": "VOI" }
            ]"#;

            let tracks = read_json(document.as_bytes()).unwrap();

            assert_eq!(tracks.len(), 2);
            assert_eq!(tracks[0].track_type, TrackType::Avo);
            assert_eq!(tracks[1].track_type, TrackType::Voi);
            assert!(tracks[1].is_empty());
        }

        #[test]
        fn test_unknown_track_type_is_rejected() {
            let document = r#"{ "id": "a", "name": "Sprint", "type": "SPRINT", "segments": [] }"#;

            assert!(matches!(
                read_json(document.as_bytes()),
                Err(TrackError::Json(_))
            ));
        }

        #[test]
        fn test_serialized_layout() {
            let track = Track::from_coordinates(
                "t",
                "Leg",
                TrackType::Voi,
                &[Coordinate::new(60.0, 25.0), Coordinate::new(60.1, 25.0)],
            );

            let value = serde_json::to_value(&track).unwrap();

            assert_eq!(value["type"], "VOI");
            assert_eq!(value["segments"][0]["sequenceIndex"], 0);
            assert_eq!(value["segments"][0]["start"]["lat"], 60.0);
        }
    }
}
