//! Absentee Lookup - desktop entry point.

use absentee_lookup::config::AppConfig;
use absentee_lookup::gui::AbsenteeApp;
use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Search school districts and chart their chronic absenteeism rates"
)]
struct Args {
    /// CSV path or http(s) URL, overrides the config file
    #[arg(short, long)]
    data: Option<String>,
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config =
        AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data) = args.data {
        config.data_source = data;
    }
    info!("Using data source {}", config.data_source);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("District Absenteeism Lookup"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "District Absenteeism Lookup",
        options,
        Box::new(|cc| Ok(Box::new(AbsenteeApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
