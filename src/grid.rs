use crate::config::DashboardConfig;
use crate::data::model::Item;
use crate::regression::scatter::scatter_data;
use crate::regression::{CurveType, Dataset, Fit, fit_token};

// ---------------------------------------------------------------------------
// Results grid: one fitted chart per (attribute, curve type)
// ---------------------------------------------------------------------------

/// Scatter points and overlay for one chart.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub attribute: String,
    /// Curve type token exactly as configured.
    pub curve: String,
    pub scatter: Dataset,
    pub fit: Fit,
}

impl GridCell {
    pub fn curve_type(&self) -> Option<CurveType> {
        CurveType::from_token(&self.curve)
    }
}

/// All charts for one ranking snapshot. Rows are attributes, columns curves.
#[derive(Debug, Clone, Default)]
pub struct FitGrid {
    pub rows: Vec<Vec<GridCell>>,
}

impl FitGrid {
    /// Fit every cell from scratch against `ranked`.
    pub fn compute(ranked: &[Item], config: &DashboardConfig) -> Self {
        let options = config.fit_options();
        let rows = config
            .attributes
            .iter()
            .map(|attribute| {
                let scatter = scatter_data(ranked, attribute);
                config
                    .curves
                    .iter()
                    .map(|token| GridCell {
                        attribute: attribute.clone(),
                        curve: token.clone(),
                        fit: fit_token(token, &scatter, &options),
                        scatter: scatter.clone(),
                    })
                    .collect()
            })
            .collect();

        let grid = FitGrid { rows };
        log::debug!(
            "Fitted {} cells over {} ranked items ({} undetermined)",
            grid.cells().count(),
            ranked.len(),
            grid.cells().filter(|c| !c.fit.is_determined()).count()
        );
        grid
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flatten()
    }
}

#[cfg(test)]
impl FitGrid {
    pub(crate) fn cell(&self, attribute: &str, curve: &str) -> Option<&GridCell> {
        self.cells()
            .find(|c| c.attribute == attribute && c.curve == curve)
    }
}
