//! song-timeliner CLI entry point

use clap::Parser;
use song_timeliner::config::{Cli, Settings};
use song_timeliner::pipeline;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Build settings from CLI
    let settings = Settings::from_cli(&cli);

    // Run the pipeline
    match pipeline::run(&settings) {
        Ok(result) => {
            if let Some(path) = &result.report_path {
                println!();
                println!(
                    "Summary: {} tracks from {} sources ({} without tags) -> {}",
                    result.tracks,
                    result.sources,
                    result.untagged,
                    path.display()
                );
                if result.fetch.failed > 0 {
                    println!("  {} downloads failed", result.fetch.failed);
                }
                if settings.organize {
                    println!(
                        "  Organized {} tracks ({} skipped, {} failed)",
                        result.organize.moved, result.organize.skipped, result.organize.failed
                    );
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = cli.log_level().to_string().to_lowercase();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}
