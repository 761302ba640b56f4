use std::path::Path;

use crate::color::ChartColors;
use crate::config::DashboardConfig;
use crate::data::loader;
use crate::data::model::ItemList;
use crate::data::ranking::{Ranking, draw_sample};
use crate::grid::FitGrid;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Resolved colours for `config`.
    pub colors: ChartColors,

    /// Loaded records (None until user loads a file).
    pub items: Option<ItemList>,

    /// The drawn items in their current order.
    pub ranking: Ranking,

    /// Charts for the current ranking.
    pub grid: FitGrid,

    /// Ranking revision `grid` was computed from.
    grid_revision: Option<u64>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            colors: ChartColors::from_config(&config),
            config,
            items: None,
            ranking: Ranking::default(),
            grid: FitGrid::default(),
            grid_revision: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded item list and draw a fresh ranking from it.
    pub fn set_items(&mut self, items: ItemList) {
        log::info!(
            "Loaded {} items with columns {:?}",
            items.len(),
            items.column_names
        );
        self.status_message = (items.skipped > 0).then(|| {
            let note = format!("{} records without an id skipped", items.skipped);
            log::warn!("{note}");
            note
        });
        self.items = Some(items);
        self.redraw_sample();
    }

    /// Draw a new random set of items to rank.
    pub fn redraw_sample(&mut self) {
        let Some(items) = &self.items else {
            return;
        };
        let drawn = draw_sample(&items.items, self.config.sample_size, &mut rand::rng());
        self.ranking.replace(drawn);
    }

    pub fn set_config(&mut self, config: DashboardConfig) {
        self.colors = ChartColors::from_config(&config);
        self.config = config;
        self.grid_revision = None;
        self.redraw_sample();
    }

    pub fn move_item(&mut self, from: usize, to: usize) {
        self.ranking.move_item(from, to);
    }

    /// Refit the grid if the ranking changed since the last fit.
    pub fn refresh_grid(&mut self) {
        let revision = self.ranking.revision();
        if self.grid_revision == Some(revision) {
            return;
        }
        self.grid = FitGrid::compute(&self.ranking.snapshot(), &self.config);
        self.grid_revision = Some(revision);
    }

    pub fn load_path(&mut self, path: &Path) {
        let result = loader::load_file(path);
        self.apply_load(result);
    }

    pub fn load_named(&mut self, name: &str) {
        let result = loader::load_named(name, &self.config);
        self.apply_load(result);
    }

    pub fn load_config(&mut self, path: &Path) {
        match DashboardConfig::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                self.set_config(config);
                self.status_message = None;
            }
            Err(e) => self.report(e),
        }
    }

    fn apply_load(&mut self, result: anyhow::Result<ItemList>) {
        match result {
            Ok(items) => self.set_items(items),
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, e: anyhow::Error) {
        log::error!("{e:#}");
        self.status_message = Some(format!("Error: {e:#}"));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
