use clap::Parser;
use std::process::ExitCode;
use trail_tracker::{Settings, init_logging, run};

fn main() -> ExitCode {
    let settings = Settings::parse();
    init_logging(settings.log_level);

    tracing::info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    match run(&settings, std::io::stdout().lock()) {
        Ok(report) => {
            tracing::debug!("Reported {} track(s)", report.tracks.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
