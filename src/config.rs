use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::regression::{CurveType, FitOptions, SAMPLE_COUNT_RANGE, SampleDomain};

/// Environment variable naming a JSON configuration file to load at start-up.
pub const CONFIG_ENV: &str = "RANK_TRENDS_CONFIG";

// ---------------------------------------------------------------------------
// Axis orientation
// ---------------------------------------------------------------------------

/// Orientation of the rank axis on every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDirection {
    /// Rank 1 on the left.
    #[default]
    Ascending,
    /// Rank 1 on the right.
    Reversed,
}

impl AxisDirection {
    /// Map a rank to its horizontal plot coordinate.
    pub fn to_plot_x(self, rank: f64) -> f64 {
        match self {
            AxisDirection::Ascending => rank,
            AxisDirection::Reversed => -rank,
        }
    }

    /// Inverse of [`to_plot_x`](Self::to_plot_x), for axis labels.
    pub fn to_rank(self, x: f64) -> f64 {
        self.to_plot_x(x)
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything that differs between dashboard variants.
///
/// Missing JSON fields fall back to the listing-dashboard defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Attribute keys charted as grid rows, in order.
    pub attributes: Vec<String>,
    /// Curve type tokens computed as grid columns, in order. Unknown tokens
    /// still get a column; its charts show the scatter without an overlay.
    pub curves: Vec<String>,
    pub axis_direction: AxisDirection,
    /// Overlay colour per curve type, `#rrggbb`.
    pub curve_colors: BTreeMap<CurveType, String>,
    /// Colour of the observation markers, `#rrggbb`.
    pub scatter_color: String,
    pub quadratic_domain: SampleDomain,
    /// How many items are drawn for ranking.
    pub sample_size: usize,
    /// Named data sources selectable from the File menu.
    pub datasets: BTreeMap<String, PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let curve_colors = CurveType::ALL
            .into_iter()
            .map(|c| {
                let hex = if c == CurveType::Linear { "#ff7300" } else { "#00b300" };
                (c, hex.to_string())
            })
            .collect();

        let datasets = [
            ("Rome", "data/rome-airbnb-data_small_noHostSince.csv"),
            ("Stuttgart", "data/stuttgart_data.csv"),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_string(), PathBuf::from(path)))
        .collect();

        DashboardConfig {
            attributes: ["bedrooms", "bathrooms", "price", "review_scores_rating"]
                .into_iter()
                .map(String::from)
                .collect(),
            curves: CurveType::ALL.iter().map(|c| c.token().to_string()).collect(),
            axis_direction: AxisDirection::Ascending,
            curve_colors,
            scatter_color: "#8884d8".to_string(),
            quadratic_domain: SampleDomain::default(),
            sample_size: 5,
            datasets,
        }
    }
}

impl DashboardConfig {
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            quadratic_domain: self.quadratic_domain,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig =
            serde_json::from_str(text).context("parsing configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load from [`CONFIG_ENV`] if set, otherwise the defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            bail!("sample_size must be at least 1");
        }
        if self.attributes.is_empty() {
            bail!("at least one attribute must be charted");
        }
        let samples = match self.quadratic_domain {
            SampleDomain::Fixed {
                start,
                end,
                samples,
            } => {
                if !(start.is_finite() && end.is_finite() && start < end) {
                    bail!("quadratic_domain needs finite start < end, got [{start}, {end}]");
                }
                samples
            }
            SampleDomain::DataSpan { samples } => samples,
        };
        if !SAMPLE_COUNT_RANGE.contains(&samples) {
            bail!(
                "quadratic_domain samples must be within {}..={}, got {samples}",
                SAMPLE_COUNT_RANGE.start(),
                SAMPLE_COUNT_RANGE.end()
            );
        }
        for token in &self.curves {
            if CurveType::from_token(token).is_none() {
                log::warn!("Unknown curve type '{token}'; its column will have no overlay");
            }
        }
        for hex in self.curve_colors.values().chain([&self.scatter_color]) {
            crate::color::parse_hex(hex).with_context(|| format!("invalid colour '{hex}'"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_listing_dashboard() {
        let cfg = DashboardConfig::default();
        assert_eq!(
            cfg.attributes,
            vec!["bedrooms", "bathrooms", "price", "review_scores_rating"]
        );
        assert_eq!(cfg.curves, vec!["Linear", "Non-linear", "Continuous", "Discontinuous"]);
        assert_eq!(cfg.curve_colors[&CurveType::Linear], "#ff7300");
        assert_eq!(cfg.curve_colors[&CurveType::Discontinuous], "#00b300");
        assert_eq!(cfg.sample_size, 5);
        assert_eq!(cfg.quadratic_domain, SampleDomain::default());
        assert!(cfg.datasets.contains_key("Rome"));
        assert!(cfg.datasets.contains_key("Stuttgart"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let cfg = DashboardConfig::from_json(
            r##"{
                "attributes": ["price", "accommodates"],
                "axis_direction": "reversed",
                "curve_colors": {"Linear": "#123456"},
                "quadratic_domain": {"kind": "data_span", "samples": 41}
            }"##,
        )
        .unwrap();
        assert_eq!(cfg.attributes, vec!["price", "accommodates"]);
        assert_eq!(cfg.axis_direction, AxisDirection::Reversed);
        assert_eq!(cfg.curve_colors.len(), 1);
        assert_eq!(cfg.quadratic_domain, SampleDomain::DataSpan { samples: 41 });
        assert_eq!(cfg.sample_size, 5);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(DashboardConfig::from_json(r#"{"sample_size": 0}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"attributes": []}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"scatter_color": "blue-ish"}"#).is_err());
        assert!(
            DashboardConfig::from_json(
                r#"{"quadratic_domain": {"kind": "fixed", "start": 5, "end": 1, "samples": 10}}"#
            )
            .is_err()
        );
    }

    #[test]
    fn sample_counts_outside_bounds_are_rejected() {
        for domain in [
            r#"{"kind": "fixed", "start": 1, "end": 5, "samples": 1}"#,
            r#"{"kind": "fixed", "start": 1, "end": 5, "samples": 10001}"#,
            r#"{"kind": "data_span", "samples": 0}"#,
            r#"{"kind": "data_span", "samples": 18446744073709551615}"#,
        ] {
            let json = format!(r#"{{"quadratic_domain": {domain}}}"#);
            let err = DashboardConfig::from_json(&json).unwrap_err();
            assert!(format!("{err:#}").contains("samples"), "{domain}: {err:#}");
        }
        for samples in [2, 10_000] {
            let json = format!(
                r#"{{"quadratic_domain": {{"kind": "data_span", "samples": {samples}}}}}"#
            );
            assert!(DashboardConfig::from_json(&json).is_ok());
        }
    }

    #[test]
    fn unknown_curve_tokens_are_kept() {
        let cfg =
            DashboardConfig::from_json(r#"{"curves": ["Linear", "Cubic"]}"#).unwrap();
        assert_eq!(cfg.curves, vec!["Linear", "Cubic"]);
    }

    #[test]
    fn reversed_axis_mirrors_ranks() {
        let dir = AxisDirection::Reversed;
        assert_eq!(dir.to_plot_x(3.0), -3.0);
        assert_eq!(dir.to_rank(dir.to_plot_x(4.0)), 4.0);
        assert_eq!(AxisDirection::Ascending.to_plot_x(2.0), 2.0);
    }
}
