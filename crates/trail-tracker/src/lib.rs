//! Trail Tracker - Command-line front end
//!
//! Loads track files into a [`TrackCollection`] and prints a length report.

pub mod report;
pub mod settings;

pub use report::Report;
pub use settings::{OutputFormat, Settings};

use std::io::Write;
use trail_geometry::TrackCollection;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Track(#[from] trail_geometry::TrackError),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Install the stderr log subscriber
pub fn init_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Load every file named in `settings` and write the report to `out`
pub fn run<W: Write>(settings: &Settings, out: W) -> Result<Report, AppError> {
    let mut collection = TrackCollection::new();
    collection.load_from_files(&settings.files, settings.track_type)?;

    for track in collection.tracks() {
        let gaps = track.gaps();
        if !gaps.is_empty() {
            let gap_meters = gaps.iter().fold(0.0, |total, gap| total + gap.distance_meters);
            tracing::warn!(
                "Track {} ({}) has {} gap(s) totalling {:.1} m, not counted in its length",
                track.id,
                track.name,
                gaps.len(),
                gap_meters
            );
        }
    }

    let report = Report::from_collection(&collection);
    report.write_to(settings.format, out)?;
    Ok(report)
}
