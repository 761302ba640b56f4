use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RankTrendsApp {
    pub state: AppState,
}

impl RankTrendsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RankTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: ranking ----
        egui::SidePanel::left("ranking_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Fits are pure; redo them from the current ranking snapshot.
        self.state.refresh_grid();

        // ---- Central panel: results grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::results_grid(ui, &self.state);
        });
    }
}
