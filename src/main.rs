// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use hardiness_map::cli::Cli;
use hardiness_map::config::PipelineConfig;
use hardiness_map::pipeline;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    cli.apply_overrides(&mut config);
    info!(paths = ?config.paths, "Starting hardiness map generation");

    let report = pipeline::run(&config).context("hardiness map generation failed")?;

    println!(
        "Saved {}x{} overlay to {} and map to {}",
        report.width,
        report.height,
        report.png_path.display(),
        report.html_path.display()
    );
    Ok(())
}
