use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::state::ChartState;

const BAR_COLOR: Color32 = Color32::from_rgb(76, 114, 176);
const DENSITY_COLOR: Color32 = Color32::from_rgb(221, 132, 82);

// ---------------------------------------------------------------------------
// Engagement ratio distribution (central panel)
// ---------------------------------------------------------------------------

/// Histogram of engagement ratios with the density curve on top.
pub fn engagement_histogram(ui: &mut Ui, state: &ChartState) {
    let Some(hist) = &state.histogram else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No engagement ratios to plot");
        });
        return;
    };

    ui.heading("Distribution of Engagement Ratio");

    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .centers()
        .into_iter()
        .zip(&hist.counts)
        .map(|(center, &count)| Bar::new(center, count as f64).width(width).fill(BAR_COLOR))
        .collect();

    Plot::new("engagement_ratio_plot")
        .legend(Legend::default())
        .x_axis_label("Engagement Ratio")
        .y_axis_label("Frequency")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Posts").color(BAR_COLOR));

            if !state.density.is_empty() {
                let points: PlotPoints = state.density.clone().into();
                plot_ui.line(
                    Line::new(points)
                        .name("Density")
                        .color(DENSITY_COLOR)
                        .width(2.0),
                );
            }
        });
}
