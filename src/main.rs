mod app;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod report;
mod state;
mod stats;
mod ui;

use anyhow::Context;
use app::ChartApp;
use config::ReportConfig;
use eframe::egui;
use state::ChartState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ReportConfig::load().context("failed to load configuration")?;
    log::info!(
        "reading {} ({})",
        config.input_path.display(),
        config.encoding
    );

    let outcome = pipeline::run(&config)
        .with_context(|| format!("report run on {} failed", config.input_path.display()))?;

    println!("{}", report::render(&outcome.report));

    if !config.show_chart {
        return Ok(());
    }

    let state = ChartState::new(
        &outcome.engagement_ratios,
        config.histogram_bins,
        outcome.report.interaction_by_type.clone(),
        outcome.report.counts,
    );
    if !state.has_data() {
        log::warn!("no engagement ratios present, skipping chart");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    // The CSV is already on disk; a missing display must not fail the run.
    if let Err(e) = eframe::run_native(
        "Distribution of Engagement Ratio",
        options,
        Box::new(|_cc| Ok(Box::new(ChartApp::new(state)))),
    ) {
        log::warn!("could not open chart window: {e}");
    }

    Ok(())
}
