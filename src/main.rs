mod app;
mod color;
mod config;
mod data;
mod grid;
mod regression;
mod state;
mod ui;

use app::RankTrendsApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let state = match DashboardConfig::from_env() {
        Ok(config) => AppState::new(config),
        Err(e) => {
            log::error!("{e:#}; falling back to the default configuration");
            let mut state = AppState::default();
            state.status_message = Some(format!("Error: {e:#}"));
            state
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rank Trends – Attribute Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(RankTrendsApp::new(state)))),
    )
}
