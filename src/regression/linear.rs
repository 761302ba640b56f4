use super::{Point, Segment, Undetermined, ensure_finite};

// ---------------------------------------------------------------------------
// Ordinary least squares line
// ---------------------------------------------------------------------------

/// `value = slope · rank + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Closed-form OLS over the observations.
    pub fn solve(points: &[Point]) -> Result<Self, Undetermined> {
        if points.is_empty() {
            return Err(Undetermined::InsufficientPoints {
                required: 1,
                found: 0,
            });
        }
        ensure_finite(points)?;

        let n = points.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
        for p in points {
            sum_x += p.rank;
            sum_y += p.value;
            sum_xy += p.rank * p.value;
            sum_x2 += p.rank * p.rank;
        }

        let denom = n * sum_x2 - sum_x * sum_x;
        if denom == 0.0 {
            return Err(Undetermined::SingularSystem);
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denom;
        let intercept = (sum_y - slope * sum_x) / n;
        Ok(LinearModel { slope, intercept })
    }

    pub fn eval(&self, rank: f64) -> f64 {
        self.slope * rank + self.intercept
    }
}

/// Two-point line spanning the observed rank range.
pub fn fit_linear(points: &[Point]) -> Result<Segment, Undetermined> {
    let model = LinearModel::solve(points)?;

    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.rank), hi.max(p.rank))
        });

    Ok(Segment::from_points(vec![
        Point::new(min, model.eval(min)),
        Point::new(max, model.eval(max)),
    ]))
}
