use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: site + payload selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts over the record table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            ui.columns(2, |columns| {
                plot::outcome_pie(
                    &mut columns[0],
                    &state.charts.outcome,
                    &state.outcome_colors,
                    CHART_HEIGHT,
                );
                plot::payload_scatter(
                    &mut columns[1],
                    &state.charts.correlation,
                    &state.booster_colors,
                    CHART_HEIGHT,
                );
            });
            ui.separator();
            panels::records_table(ui, state);
        });
    }
}
