use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use launch_dash::app::LaunchDashApp;
use launch_dash::config::Cli;
use launch_dash::data::loader::load_file;
use launch_dash::data::pipeline::refresh;
use launch_dash::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let slider = cli.slider()?;

    let dataset = match load_file(&cli.data) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load {}: {e}", cli.data.display());
            return Err(e).with_context(|| format!("loading {}", cli.data.display()));
        }
    };
    log::info!(
        "Loaded {} launches from {} sites, payload {} – {} kg",
        dataset.len(),
        dataset.distinct_sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );

    let selection = cli.initial_selection(&dataset, &slider);

    if cli.export {
        let charts = refresh(&dataset, &selection);
        println!("{}", serde_json::to_string_pretty(&charts)?);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset, slider, selection);
    eframe::run_native(
        "Launch Dash – SpaceX Launch Records",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
