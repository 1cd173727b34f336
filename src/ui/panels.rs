use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::{SiteSelector, ALL_SITES};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch site");
    let sites = state.dataset.distinct_sites().to_vec();
    let current = state.selection.site.clone();
    let mut chosen: Option<SiteSelector> = None;

    let current_text = match &current {
        SiteSelector::All => "All Sites".to_string(),
        SiteSelector::Site(s) => s.clone(),
    };
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_all(), "All Sites").clicked() {
                chosen = Some(SiteSelector::parse(ALL_SITES));
            }
            for site in &sites {
                let selected = matches!(&current, SiteSelector::Site(s) if s == site);
                if ui.selectable_label(selected, site).clicked() {
                    chosen = Some(SiteSelector::Site(site.clone()));
                }
            }
        });
    if let Some(site) = chosen {
        state.set_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let slider = state.slider;
    let mut low = state.selection.payload_range.low;
    let mut high = state.selection.payload_range.high;

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .step_by(slider.step)
                .text("low"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .step_by(slider.step)
                .text("high"),
        )
        .changed();

    // Keep the handles from crossing: the moved one pushes the other.
    if low_changed && low > high {
        high = low;
    } else if high_changed && high < low {
        low = high;
    }
    if low_changed || high_changed {
        state.set_payload_range(low, high);
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in slider.marks() {
            ui.label(RichText::new(format!("{mark:.0}")).small().weak());
        }
    });

    ui.add_space(8.0);
    if ui.button("Reset selection").clicked() {
        state.reset();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title and record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(28.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36))
                .strong(),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches loaded, {} visible",
            state.dataset.len(),
            state.visible_indices().len()
        ));
        ui.separator();
        ui.label(format!(
            "payload {:.0} – {:.0} kg",
            state.dataset.min_payload(),
            state.dataset.max_payload()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Records table
// ---------------------------------------------------------------------------

/// Render the launches behind the current selection.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = state.dataset.records();
    let indices = state.visible_indices();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in [
                "Flight",
                "Launch Site",
                "Payload Mass (kg)",
                "class",
                "Booster Category",
                "Booster Version",
            ] {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let rec = &records[indices[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.outcome.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.booster_category);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.booster_version.as_deref().unwrap_or(""));
                });
            });
        });
}
