use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – the ranking being edited
// ---------------------------------------------------------------------------

/// Render the ranking list with move controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Ranking");
    ui.label("Least preferred first. Reorder to refit every chart.");
    ui.separator();

    if state.ranking.is_empty() {
        ui.label("No items drawn. Open a dataset (File → …).");
        return;
    }

    let len = state.ranking.len();
    let attributes = state.config.attributes.clone();
    let mut pending_move: Option<(usize, usize)> = None;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("");
            });
            header.col(|ui| {
                ui.strong("Item");
            });
        })
        .body(|mut body| {
            for (pos, entry) in state.ranking.entries().iter().enumerate() {
                let details: Vec<String> = attributes
                    .iter()
                    .map(|a| {
                        let v = entry
                            .item
                            .get(a)
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "–".to_string());
                        format!("{a}: {v}")
                    })
                    .collect();
                let row_height = 18.0 * (details.len() + 1) as f32;

                body.row(row_height, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}", pos + 1));
                    });
                    row.col(|ui| {
                        ui.vertical(|ui| {
                            if ui.add_enabled(pos > 0, egui::Button::new("▲").small()).clicked() {
                                pending_move = Some((pos, pos - 1));
                            }
                            if ui
                                .add_enabled(pos + 1 < len, egui::Button::new("▼").small())
                                .clicked()
                            {
                                pending_move = Some((pos, pos + 1));
                            }
                        });
                    });
                    row.col(|ui| {
                        ui.vertical(|ui| {
                            ui.strong(format!("ID: {}", entry.item.id));
                            for line in &details {
                                ui.small(line);
                            }
                        });
                    });
                });
            }
        });

    if let Some((from, to)) = pending_move {
        state.move_item(from, to);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data…").clicked() {
                open_data_dialog(state);
                ui.close_menu();
            }
            ui.menu_button("Datasets", |ui: &mut Ui| {
                let names: Vec<String> = state.config.datasets.keys().cloned().collect();
                for name in names {
                    if ui.button(&name).clicked() {
                        state.load_named(&name);
                        ui.close_menu();
                    }
                }
            });
            if ui.button("Open configuration…").clicked() {
                open_config_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(state.items.is_some(), egui::Button::new("Draw new sample"))
                .clicked()
            {
                state.redraw_sample();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(items) = &state.items {
            ui.label(format!(
                "{} items loaded, {} ranked",
                items.len(),
                state.ranking.len()
            ));
        }

        ui.separator();

        for (label, color) in state.colors.legend_entries(&state.config.curves) {
            ui.label(RichText::new(format!("■ {label}")).color(color));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_data_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open item records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn open_config_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dashboard configuration")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_config(&path);
    }
}
