use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::ChartState;

// ---------------------------------------------------------------------------
// Left side panel – interaction rate by post type
// ---------------------------------------------------------------------------

/// Mean interaction rate per post type, in ranking order, coloured by type.
pub fn side_panel(ui: &mut Ui, state: &ChartState) {
    ui.heading("Interaction rate by type");
    ui.separator();

    if state.groups.is_empty() {
        ui.label("No post types found.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("interaction_by_type")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Type");
                    ui.strong("Mean");
                    ui.strong("Posts");
                    ui.end_row();

                    for group in &state.groups {
                        let color = state.color_map.color_for(&group.key);
                        ui.label(RichText::new(&group.key).color(color).strong());
                        match group.mean {
                            Some(mean) => ui.label(format!("{mean:.4}")),
                            None => ui.label("NaN"),
                        };
                        ui.label(group.count.to_string());
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Row counts through the pipeline stages.
pub fn top_bar(ui: &mut Ui, state: &ChartState) {
    ui.horizontal(|ui: &mut Ui| {
        let c = state.counts;
        ui.label(format!("{} rows loaded", c.loaded));
        ui.separator();
        ui.label(format!("{} after deduplication", c.cleaned));
        ui.separator();
        ui.label(format!("{} with interactions and followers", c.engineered));
        if let Some(hist) = &state.histogram {
            ui.separator();
            ui.label(format!("{} ratios plotted", hist.total()));
        }
    });
}
