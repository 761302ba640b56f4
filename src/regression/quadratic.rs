use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::{Point, Segment, Undetermined, ensure_finite};

// ---------------------------------------------------------------------------
// Sampling domain for the fitted parabola
// ---------------------------------------------------------------------------

/// Accepted number of overlay samples. Counts outside are clamped.
pub const SAMPLE_COUNT_RANGE: RangeInclusive<usize> = 2..=10_000;

/// Where the fitted parabola is sampled for drawing.
///
/// The fixed `[1, 5]` default matches a five-item ranking. `DataSpan` follows
/// the observed ranks instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleDomain {
    Fixed { start: f64, end: f64, samples: usize },
    DataSpan { samples: usize },
}

impl Default for SampleDomain {
    fn default() -> Self {
        SampleDomain::Fixed {
            start: 1.0,
            end: 5.0,
            samples: 101,
        }
    }
}

impl SampleDomain {
    /// Evenly spaced ranks, first and last exactly on the bounds.
    fn ranks(&self, points: &[Point]) -> Vec<f64> {
        let (start, end, samples) = match *self {
            SampleDomain::Fixed {
                start,
                end,
                samples,
            } => (start, end, samples),
            SampleDomain::DataSpan { samples } => {
                let (lo, hi) = points
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                        (lo.min(p.rank), hi.max(p.rank))
                    });
                (lo, hi, samples)
            }
        };
        let samples = samples.clamp(*SAMPLE_COUNT_RANGE.start(), *SAMPLE_COUNT_RANGE.end());
        let step = (end - start) / (samples - 1) as f64;
        (0..samples)
            .map(|i| {
                if i == samples - 1 {
                    end
                } else {
                    start + i as f64 * step
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Least-squares parabola
// ---------------------------------------------------------------------------

/// `value = a · rank² + b · rank + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticModel {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Copy of `m` with column `col` replaced by `rhs`.
fn with_column(m: &[[f64; 3]; 3], col: usize, rhs: &[f64; 3]) -> [[f64; 3]; 3] {
    let mut out = *m;
    for (row, value) in out.iter_mut().zip(rhs) {
        row[col] = *value;
    }
    out
}

impl QuadraticModel {
    /// Solve the 3×3 normal equations by Cramer's rule.
    pub fn solve(points: &[Point]) -> Result<Self, Undetermined> {
        if points.is_empty() {
            return Err(Undetermined::InsufficientPoints {
                required: 1,
                found: 0,
            });
        }
        ensure_finite(points)?;

        let n = points.len() as f64;
        let mut s = [0.0_f64; 5]; // s[k] = Σ rank^k, k = 0..4
        let (mut sum_y, mut sum_xy, mut sum_x2y) = (0.0, 0.0, 0.0);
        for p in points {
            let x = p.rank;
            let x2 = x * x;
            s[1] += x;
            s[2] += x2;
            s[3] += x2 * x;
            s[4] += x2 * x2;
            sum_y += p.value;
            sum_xy += x * p.value;
            sum_x2y += x2 * p.value;
        }
        s[0] = n;

        let matrix = [[s[4], s[3], s[2]], [s[3], s[2], s[1]], [s[2], s[1], s[0]]];
        let rhs = [sum_x2y, sum_xy, sum_y];

        let det = det3(&matrix);
        if det == 0.0 {
            return Err(Undetermined::SingularSystem);
        }

        Ok(QuadraticModel {
            a: det3(&with_column(&matrix, 0, &rhs)) / det,
            b: det3(&with_column(&matrix, 1, &rhs)) / det,
            c: det3(&with_column(&matrix, 2, &rhs)) / det,
        })
    }

    pub fn eval(&self, rank: f64) -> f64 {
        self.a * rank * rank + self.b * rank + self.c
    }
}

/// Sampled parabola over `domain`.
pub fn fit_quadratic(points: &[Point], domain: &SampleDomain) -> Result<Segment, Undetermined> {
    let model = QuadraticModel::solve(points)?;
    Ok(Segment::from_points(
        domain
            .ranks(points)
            .into_iter()
            .map(|x| Point::new(x, model.eval(x)))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::regression::Dataset;

    #[test]
    fn collinear_data_has_no_curvature() {
        let ds = Dataset::from_values([2.0, 4.0, 6.0, 8.0, 10.0]);
        let model = QuadraticModel::solve(&ds).unwrap();
        assert_abs_diff_eq!(model.a, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(model.b, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(model.c, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn default_domain_gives_101_samples_over_one_to_five() {
        let ds = Dataset::from_values([5.0, 3.0, 4.0, 1.0, 2.0]);
        let seg = fit_quadratic(&ds, &SampleDomain::default()).unwrap();
        assert_eq!(seg.len(), 101);
        assert_eq!(seg[0].rank, 1.0);
        assert_eq!(seg[100].rank, 5.0);
        assert_abs_diff_eq!(seg[50].rank, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seg[1].rank - seg[0].rank, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn fixed_domain_ignores_data_span() {
        // observations only cover ranks 1..3, samples still reach 5
        let ds = Dataset::from_values([1.0, 4.0, 9.0]);
        let seg = fit_quadratic(&ds, &SampleDomain::default()).unwrap();
        assert_eq!(seg.last().unwrap().rank, 5.0);
        assert_abs_diff_eq!(seg.last().unwrap().value, 25.0, epsilon = 1e-6);
    }

    #[test]
    fn data_span_domain_follows_observed_ranks() {
        let ds = Dataset::from_values([1.0, 4.0, 9.0, 16.0, 25.0, 36.0, 49.0]);
        let seg = fit_quadratic(&ds, &SampleDomain::DataSpan { samples: 13 }).unwrap();
        assert_eq!(seg.len(), 13);
        assert_eq!(seg[0].rank, 1.0);
        assert_eq!(seg[12].rank, 7.0);
        assert_abs_diff_eq!(seg[6].value, 16.0, epsilon = 1e-6);
    }

    #[test]
    fn three_points_are_interpolated_exactly() {
        let ds = Dataset::from_values([3.0, -1.0, 4.0]);
        let seg = fit_quadratic(&ds, &SampleDomain::default()).unwrap();
        // step is 0.04, so ranks 1, 2, 3 sit at indices 0, 25, 50
        for (idx, expected) in [(0, 3.0), (25, -1.0), (50, 4.0)] {
            assert_abs_diff_eq!(seg[idx].value, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn fewer_than_three_distinct_ranks_is_singular() {
        let ds = Dataset::from_values([1.0, 2.0]);
        assert_eq!(
            fit_quadratic(&ds, &SampleDomain::default()),
            Err(Undetermined::SingularSystem)
        );
    }

    #[test]
    fn empty_input_is_insufficient() {
        assert!(matches!(
            fit_quadratic(&[], &SampleDomain::default()),
            Err(Undetermined::InsufficientPoints { found: 0, .. })
        ));
    }

    #[test]
    fn degenerate_sample_count_still_spans_domain() {
        let ds = Dataset::from_values([1.0, 2.0, 3.0]);
        let domain = SampleDomain::Fixed {
            start: 1.0,
            end: 3.0,
            samples: 0,
        };
        let seg = fit_quadratic(&ds, &domain).unwrap();
        assert_eq!(seg.len(), 2);
        assert_eq!(seg[1].rank, 3.0);
    }

    #[test]
    fn huge_sample_count_is_clamped() {
        let ds = Dataset::from_values([1.0, 2.0, 3.0]);
        let seg = fit_quadratic(&ds, &SampleDomain::DataSpan { samples: usize::MAX }).unwrap();
        assert_eq!(seg.len(), *SAMPLE_COUNT_RANGE.end());
        assert_eq!(seg[0].rank, 1.0);
        assert_eq!(seg[seg.len() - 1].rank, 3.0);
    }
}
