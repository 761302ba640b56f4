use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::config::AxisDirection;
use crate::grid::GridCell;
use crate::state::AppState;

const CHART_WIDTH: f32 = 220.0;
const CHART_HEIGHT: f32 = 160.0;

// ---------------------------------------------------------------------------
// Results grid (central panel)
// ---------------------------------------------------------------------------

/// Render one chart per (attribute, curve type) in the central panel.
pub fn results_grid(ui: &mut Ui, state: &AppState) {
    if state.ranking.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to rank items  (File → Open data…)");
        });
        return;
    }

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("results_grid")
                .striped(true)
                .spacing([12.0, 12.0])
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Attribute");
                    for token in &state.config.curves {
                        ui.strong(token);
                    }
                    ui.end_row();

                    for row in &state.grid.rows {
                        let Some(first) = row.first() else {
                            continue;
                        };
                        ui.strong(&first.attribute);
                        for cell in row {
                            ui.vertical(|ui: &mut Ui| chart(ui, cell, state));
                        }
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Single chart
// ---------------------------------------------------------------------------

fn chart(ui: &mut Ui, cell: &GridCell, state: &AppState) {
    let direction = state.config.axis_direction;
    let max_rank = state.config.sample_size.max(1) as f64;

    let to_plot = |rank: f64, value: f64| [direction.to_plot_x(rank), value];

    let scatter: PlotPoints = cell
        .scatter
        .iter()
        .filter(|p| p.value.is_finite())
        .map(|p| to_plot(p.rank, p.value))
        .collect();

    let overlay = cell.fit.points();
    let overlay_points: PlotPoints = overlay
        .iter()
        .map(|p| to_plot(p.rank, p.value))
        .collect();

    let scatter_color = state.colors.scatter;
    let overlay_color = cell
        .curve_type()
        .map_or(Color32::GRAY, |c| state.colors.overlay(c));

    Plot::new(("chart", &cell.attribute, &cell.curve))
        .width(CHART_WIDTH)
        .height(CHART_HEIGHT)
        .x_axis_label("Rank")
        .y_axis_label(cell.attribute.clone())
        .include_x(direction.to_plot_x(1.0))
        .include_x(direction.to_plot_x(max_rank))
        .x_axis_formatter(move |mark, _range| format_rank(direction, mark.value))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(scatter)
                    .name(&cell.attribute)
                    .color(scatter_color)
                    .radius(3.0),
            );
            if !overlay.is_empty() {
                plot_ui.line(
                    Line::new(overlay_points)
                        .name(&cell.curve)
                        .color(overlay_color)
                        .width(2.0),
                );
            }
        });

    if let Some(reason) = cell.fit.reason() {
        ui.label(RichText::new(reason.to_string()).small().color(Color32::GRAY));
    }
}

/// Axis tick label: whole ranks only.
fn format_rank(direction: AxisDirection, x: f64) -> String {
    let rank = direction.to_rank(x);
    if (rank - rank.round()).abs() < 1e-9 {
        format!("{}", rank.round() as i64)
    } else {
        String::new()
    }
}
