use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use trail_geometry::TrackType;

/// Report output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable table
    Text,
    /// Pretty-printed JSON document
    Json,
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Trail Tracker - Report the lengths of orienteering and training tracks
pub struct Settings {
    /// Track files to load (.json or .gpx)
    #[clap(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Track type assigned to tracks imported from GPX files (AVO, VOI, TRAINING)
    #[clap(short = 't', long, default_value = "TRAINING", value_parser = parse_track_type)]
    pub track_type: TrackType,

    /// Report format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Maximum log level (error, warn, info, debug, trace)
    #[clap(long, default_value = "info")]
    pub log_level: tracing::Level,
}

fn parse_track_type(value: &str) -> Result<TrackType, String> {
    value.parse().map_err(|e: trail_geometry::TrackError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["trail-tracker", "loop.gpx"]).unwrap();

        assert_eq!(settings.files, vec![PathBuf::from("loop.gpx")]);
        assert_eq!(settings.track_type, TrackType::Training);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_all_options() {
        let settings = Settings::try_parse_from([
            "trail-tracker",
            "--track-type",
            "voi",
            "--format",
            "json",
            "--log-level",
            "debug",
            "a.gpx",
            "b.json",
        ])
        .unwrap();

        assert_eq!(settings.files.len(), 2);
        assert_eq!(settings.track_type, TrackType::Voi);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Settings::try_parse_from(["trail-tracker"]).is_err());
    }

    #[test]
    fn test_unknown_track_type() {
        let result = Settings::try_parse_from(["trail-tracker", "-t", "SPRINT", "a.gpx"]);
        assert!(result.is_err());
    }
}
