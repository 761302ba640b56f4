use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::linear::fit_linear;
use super::piecewise::{fit_continuous, fit_discontinuous};
use super::quadratic::{SampleDomain, fit_quadratic};
use super::{Fit, Point, Undetermined};

// ---------------------------------------------------------------------------
// CurveType – which overlay to compute
// ---------------------------------------------------------------------------

/// Overlay kinds, identified by the tokens shown as grid column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CurveType {
    #[serde(rename = "Linear")]
    Linear,
    #[serde(rename = "Non-linear")]
    NonLinear,
    #[serde(rename = "Continuous")]
    Continuous,
    #[serde(rename = "Discontinuous")]
    Discontinuous,
}

impl CurveType {
    pub const ALL: [CurveType; 4] = [
        CurveType::Linear,
        CurveType::NonLinear,
        CurveType::Continuous,
        CurveType::Discontinuous,
    ];

    pub fn token(self) -> &'static str {
        match self {
            CurveType::Linear => "Linear",
            CurveType::NonLinear => "Non-linear",
            CurveType::Continuous => "Continuous",
            CurveType::Discontinuous => "Discontinuous",
        }
    }

    /// Exact, case-sensitive token match.
    pub fn from_token(token: &str) -> Option<Self> {
        CurveType::ALL.into_iter().find(|c| c.token() == token)
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CurveType {
    type Err = Undetermined;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveType::from_token(s).ok_or_else(|| Undetermined::UnknownCurveType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Tunables shared by all fitters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitOptions {
    pub quadratic_domain: SampleDomain,
}

/// Route a curve type to its fitter.
pub fn fit_curve(curve: CurveType, points: &[Point], options: &FitOptions) -> Fit {
    let result = match curve {
        CurveType::Linear => fit_linear(points),
        CurveType::NonLinear => fit_quadratic(points, &options.quadratic_domain),
        CurveType::Continuous => fit_continuous(points),
        CurveType::Discontinuous => fit_discontinuous(points),
    };
    if let Err(reason) = &result {
        log::debug!("{curve} fit over {} points undetermined: {reason}", points.len());
    }
    Fit::from(result)
}

/// Like [`fit_curve`], from a raw token. Unknown tokens give an empty overlay.
pub fn fit_token(token: &str, points: &[Point], options: &FitOptions) -> Fit {
    match token.parse::<CurveType>() {
        Ok(curve) => fit_curve(curve, points, options),
        Err(reason) => {
            log::debug!("{reason}; no overlay drawn");
            Fit::Undetermined(reason)
        }
    }
}
