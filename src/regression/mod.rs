//! Regression engine: turns a ranked observation sequence into a trend overlay.
//!
//! Architecture:
//! ```text
//!   ranked items + attribute
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ scatter  │  project → Dataset (rank = position + 1)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ dispatch │  curve type → linear | quadratic | piecewise
//!   └──────────┘
//!        │
//!        ▼
//!      Fit  (Determined(Segment) | Undetermined(reason))
//! ```
//!
//! Everything here is a pure function of its input. Nothing is cached and
//! nothing is mutated in place; a new ranking means a new `Dataset` and a
//! fresh call into the fitters.

pub mod dispatch;
pub mod linear;
pub mod piecewise;
pub mod quadratic;
pub mod scatter;

use std::ops::Deref;

use serde::{Deserialize, Serialize};

pub use dispatch::{CurveType, FitOptions, fit_token};
pub use quadratic::{SAMPLE_COUNT_RANGE, SampleDomain};

// ---------------------------------------------------------------------------
// Point – one (rank, value) pair
// ---------------------------------------------------------------------------

/// A single (rank, value) pair. Rank is the independent variable.
///
/// Observations always carry integral ranks; overlay samples may not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub rank: f64,
    pub value: f64,
}

impl Point {
    pub fn new(rank: f64, value: f64) -> Self {
        Point { rank, value }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the scatter points for one attribute
// ---------------------------------------------------------------------------

/// Ordered observations with contiguous ranks `1..=n`.
///
/// Only constructible from a value sequence, so the rank invariant cannot be
/// broken. Derefs to `[Point]`; the fitters take plain slices so a piecewise
/// segment can be any window of a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    /// Assign rank `index + 1` to each value in order.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Point::new((i + 1) as f64, value))
            .collect();
        Dataset { points }
    }
}

impl Deref for Dataset {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

// ---------------------------------------------------------------------------
// Segment – an overlay polyline
// ---------------------------------------------------------------------------

/// Ordered points drawn as a connected polyline.
///
/// An empty segment means "nothing to draw".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    points: Vec<Point>,
}

impl Segment {
    pub fn from_points(points: Vec<Point>) -> Self {
        Segment { points }
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl Deref for Segment {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

// ---------------------------------------------------------------------------
// Fit outcome
// ---------------------------------------------------------------------------

/// Why a fit could not produce an overlay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Undetermined {
    /// Not enough observations for the requested curve.
    #[error("need at least {required} points, got {found}")]
    InsufficientPoints { required: usize, found: usize },

    /// The normal equations have no unique solution (e.g. all ranks equal).
    #[error("singular system; ranks do not determine a unique curve")]
    SingularSystem,

    /// At least one observation is NaN or infinite.
    #[error("non-numeric values in the observations")]
    NonFiniteValues,

    /// The requested curve type token is not recognised.
    #[error("unknown curve type '{0}'")]
    UnknownCurveType(String),
}

/// Result of fitting one curve to one dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Fit {
    Determined(Segment),
    Undetermined(Undetermined),
}

impl Fit {
    pub fn is_determined(&self) -> bool {
        matches!(self, Fit::Determined(_))
    }

    /// The overlay to draw. Empty for every undetermined outcome.
    pub fn points(&self) -> &[Point] {
        match self {
            Fit::Determined(segment) => segment,
            Fit::Undetermined(_) => &[],
        }
    }

    pub fn reason(&self) -> Option<&Undetermined> {
        match self {
            Fit::Determined(_) => None,
            Fit::Undetermined(reason) => Some(reason),
        }
    }
}

impl From<Result<Segment, Undetermined>> for Fit {
    fn from(result: Result<Segment, Undetermined>) -> Self {
        match result {
            Ok(segment) => Fit::Determined(segment),
            Err(reason) => Fit::Undetermined(reason),
        }
    }
}

/// Guard shared by the fitters: every observation must be a real number.
pub(crate) fn ensure_finite(points: &[Point]) -> Result<(), Undetermined> {
    if points
        .iter()
        .all(|p| p.rank.is_finite() && p.value.is_finite())
    {
        Ok(())
    } else {
        Err(Undetermined::NonFiniteValues)
    }
}
