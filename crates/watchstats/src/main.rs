mod bootstrap;

use anyhow::{bail, Result};
use clap::Parser;
use watch_core::settings::Settings;
use watch_data::analysis::analyze_records;
use watch_data::reader;
use watch_report::summary::render_report;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("watchstats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Window: {} to {}, duplicate removal {}",
        settings.from,
        settings.to,
        if settings.keep_duplicates { "off" } else { "on" },
    );

    let config = settings.to_config()?;

    let input = match settings.input.clone().or_else(bootstrap::discover_input_path) {
        Some(path) => path,
        None => bail!("no watch history found; pass --input <watch_history.json>"),
    };
    tracing::info!("Reading watch history from {}", input.display());

    let records = reader::load_export(&input)?;
    tracing::info!("Loaded {} records", records.len());

    let report = analyze_records(records, &config);

    print!("{}", render_report(&report, &config, !settings.no_color));

    Ok(())
}
