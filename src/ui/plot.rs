use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::ColorMap;
use crate::data::chart::ChartSpec;

/// Arc resolution of a full circle.
const PIE_SEGMENTS: f64 = 96.0;

fn chart_title(ui: &mut Ui, spec: &ChartSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&spec.title).strong().size(15.0));
    });
}

fn empty_notice(ui: &mut Ui, height: f32) {
    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches to show");
        });
    });
}

// ---------------------------------------------------------------------------
// Outcome distribution (pie)
// ---------------------------------------------------------------------------

/// Render a pie spec as filled polygons on an equal-aspect plot.
///
/// Slices start at twelve o'clock and run clockwise in spec order.
pub fn outcome_pie(ui: &mut Ui, spec: &ChartSpec, colors: &ColorMap, height: f32) {
    chart_title(ui, spec);

    let total = spec.total();
    if total == 0 {
        empty_notice(ui, height);
        return;
    }

    Plot::new("outcome_pie")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for slice in spec.slices() {
                if slice.count == 0 {
                    continue;
                }
                let fraction = slice.count as f64 / total as f64;
                let sweep = fraction * TAU;
                let end = start - sweep;

                let steps = ((sweep / TAU) * PIE_SEGMENTS).ceil().max(2.0) as usize;
                let mut vertices = vec![[0.0, 0.0]];
                vertices.extend((0..=steps).map(|i| {
                    let a = start - sweep * i as f64 / steps as f64;
                    [a.cos(), a.sin()]
                }));

                let color = colors.color_for(&slice.label);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(vertices))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = start - sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        format!("{:.1}%", fraction * 100.0),
                    )
                    .color(Color32::WHITE),
                );

                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload correlation (scatter)
// ---------------------------------------------------------------------------

/// Render a scatter spec, one point series per colour category.
pub fn payload_scatter(ui: &mut Ui, spec: &ChartSpec, colors: &ColorMap, height: f32) {
    chart_title(ui, spec);

    if spec.is_empty() {
        empty_notice(ui, height);
        return;
    }

    let x_label = spec.bindings.x.unwrap_or("x");
    let y_label = spec.bindings.y.unwrap_or("y");

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, color) in colors.legend_entries() {
                let points: PlotPoints = spec
                    .points()
                    .iter()
                    .filter(|p| p.color == category)
                    .map(|p| [p.x, f64::from(p.y)])
                    .collect();

                if points.points().is_empty() {
                    continue;
                }

                plot_ui.points(
                    Points::new(points)
                        .name(&category)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
