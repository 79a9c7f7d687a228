//! Length report over a track collection

use crate::{AppError, OutputFormat};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use trail_geometry::{TrackCollection, TrackType};

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    pub segments: usize,
    pub gaps: usize,
    pub length_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub track_count: usize,
    pub segments: usize,
    pub length_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub tracks: Vec<TrackRow>,
    pub totals: Totals,
    /// Center of all tracks as `(lat, lon)`
    pub center: Option<(f64, f64)>,
}

impl Report {
    pub fn from_collection(collection: &TrackCollection) -> Self {
        let tracks = collection
            .tracks()
            .iter()
            .map(|track| TrackRow {
                id: track.id.clone(),
                name: track.name.clone(),
                track_type: track.track_type,
                segments: track.segment_count(),
                gaps: track.gaps().len(),
                length_meters: track.length(),
            })
            .collect();

        let info = collection.info();
        Self {
            tracks,
            totals: Totals {
                track_count: info.track_count,
                segments: info.total_segments,
                length_meters: info.total_length_meters,
            },
            center: collection.center_wgs84(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{:<16} {:<24} {:<9} {:>8} {:>5} {:>14}",
            "ID", "NAME", "TYPE", "SEGMENTS", "GAPS", "LENGTH"
        );
        for row in &self.tracks {
            let _ = writeln!(
                out,
                "{:<16} {:<24} {:<9} {:>8} {:>5} {:>11.3} km",
                row.id,
                row.name,
                row.track_type.as_str(),
                row.segments,
                row.gaps,
                row.length_meters / 1000.0
            );
        }
        let _ = writeln!(
            out,
            "TOTAL: {} track(s), {} segment(s), {:.3} km",
            self.totals.track_count,
            self.totals.segments,
            self.totals.length_meters / 1000.0
        );
        if let Some((lat, lon)) = self.center {
            let _ = writeln!(out, "CENTER: {lat:.6}, {lon:.6}");
        }
        out
    }

    pub fn render_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to<W: Write>(&self, format: OutputFormat, mut writer: W) -> Result<(), AppError> {
        let rendered = match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => self.render_json()?,
        };
        writer.write_all(rendered.as_bytes())?;
        if format == OutputFormat::Json {
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}
