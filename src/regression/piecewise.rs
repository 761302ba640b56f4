use super::linear::fit_linear;
use super::{Point, Segment, Undetermined};

/// Minimum observations before a two-segment fit is attempted.
pub const MIN_PIECEWISE_POINTS: usize = 4;

/// Split into positions `0..3` and `2..5`, sharing the observation at index 2.
fn split(points: &[Point]) -> Result<(&[Point], &[Point]), Undetermined> {
    if points.len() < MIN_PIECEWISE_POINTS {
        return Err(Undetermined::InsufficientPoints {
            required: MIN_PIECEWISE_POINTS,
            found: points.len(),
        });
    }
    let head = &points[..3];
    let tail = &points[2..points.len().min(5)];
    Ok((head, tail))
}

/// Two lines joined at the shared rank.
///
/// The second line is shifted vertically so its start equals the first
/// line's end; that start point is then dropped, giving three points.
pub fn fit_continuous(points: &[Point]) -> Result<Segment, Undetermined> {
    let (head, tail) = split(points)?;
    let first = fit_linear(head)?;
    let second = fit_linear(tail)?;

    // fit_linear always yields exactly [start, end]
    let delta = first[1].value - second[0].value;

    let mut out = first.into_points();
    out.extend(
        second
            .iter()
            .skip(1)
            .map(|p| Point::new(p.rank, p.value + delta)),
    );
    Ok(Segment::from_points(out))
}

/// Two independently fitted lines, concatenated as-is (four points).
///
/// The lines may disagree at the shared rank; the gap is the point of the
/// overlay.
pub fn fit_discontinuous(points: &[Point]) -> Result<Segment, Undetermined> {
    let (head, tail) = split(points)?;
    let mut out = fit_linear(head)?.into_points();
    out.extend(fit_linear(tail)?.into_points());
    Ok(Segment::from_points(out))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::regression::Dataset;
    use crate::regression::linear::LinearModel;

    fn zigzag() -> Dataset {
        Dataset::from_values([1.0, 5.0, 2.0, 8.0, 3.0])
    }

    #[test]
    fn short_inputs_are_insufficient() {
        for n in 0..MIN_PIECEWISE_POINTS {
            let ds = Dataset::from_values((0..n).map(|i| i as f64));
            let expected: Result<Segment, Undetermined> = Err(Undetermined::InsufficientPoints {
                required: 4,
                found: n,
            });
            assert_eq!(fit_continuous(&ds), expected);
            assert_eq!(fit_discontinuous(&ds), expected);
        }
    }

    #[test]
    fn continuous_joins_at_rank_three() {
        let cases = [
            zigzag(),
            Dataset::from_values([-3.0, 4.5, -1.0, 0.0, -7.0]),
            Dataset::from_values([2.0; 5]),
            Dataset::from_values([1.0, 3.0, 5.0, 7.0, 9.0]),
            Dataset::from_values([0.25, -10.0, 6.0, 6.0, 6.0]),
        ];
        for ds in &cases {
            let seg = fit_continuous(ds).unwrap();
            let ranks: Vec<f64> = seg.iter().map(|p| p.rank).collect();
            assert_eq!(ranks, vec![1.0, 3.0, 5.0], "{ds:?}");

            let head = LinearModel::solve(&ds[..3]).unwrap();
            let tail = LinearModel::solve(&ds[2..5]).unwrap();
            // first line untouched, second line keeps its slope but starts where the first ends
            assert_abs_diff_eq!(seg[0].value, head.eval(1.0), epsilon = 1e-9);
            assert_abs_diff_eq!(seg[1].value, head.eval(3.0), epsilon = 1e-9);
            assert_abs_diff_eq!(
                seg[2].value - seg[1].value,
                tail.eval(5.0) - tail.eval(3.0),
                epsilon = 1e-9
            );
        }

        let flat = fit_continuous(&cases[2]).unwrap();
        for p in flat.iter() {
            assert_abs_diff_eq!(p.value, 2.0, epsilon = 1e-12);
        }

        let straight = fit_continuous(&cases[3]).unwrap();
        let values: Vec<f64> = straight.iter().map(|p| p.value).collect();
        for (got, want) in values.iter().zip([1.0, 5.0, 9.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }

        // head -3, 4.5, -1 has slope 1 through mean 1/6; tail -1, 0, -7 has slope -3
        let neg = fit_continuous(&cases[1]).unwrap();
        assert_abs_diff_eq!(neg[1].value, 7.0 / 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(neg[2].value, 7.0 / 6.0 - 6.0, epsilon = 1e-9);
    }

    #[test]
    fn discontinuous_keeps_gap_at_shared_rank() {
        let ds = zigzag();
        let seg = fit_discontinuous(&ds).unwrap();
        assert_eq!(seg.len(), 4);
        let ranks: Vec<f64> = seg.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1.0, 3.0, 3.0, 5.0]);

        // head 1,5,2 and tail 2,8,3 both have slope 0.5
        assert_abs_diff_eq!(seg[1].value, 19.0 / 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(seg[2].value, 23.0 / 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(seg[2].value - seg[1].value, 2.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn four_points_use_a_two_point_tail() {
        let ds = Dataset::from_values([1.0, 2.0, 3.0, 10.0]);
        let cont = fit_continuous(&ds).unwrap();
        assert_eq!(cont.len(), 3);
        assert_eq!(cont[2].rank, 4.0);
        // tail line passes through (3,3) and (4,10), slope 7
        assert_abs_diff_eq!(cont[2].value - cont[1].value, 7.0, epsilon = 1e-9);

        let disc = fit_discontinuous(&ds).unwrap();
        assert_eq!(disc.len(), 4);
        assert_abs_diff_eq!(disc[2].value, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(disc[3].value, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn only_the_first_five_points_are_used() {
        let base = Dataset::from_values([1.0, 5.0, 2.0, 8.0, 3.0]);
        let longer = Dataset::from_values([1.0, 5.0, 2.0, 8.0, 3.0, 100.0, -40.0]);
        assert_eq!(fit_continuous(&base), fit_continuous(&longer));
        assert_eq!(fit_discontinuous(&base), fit_discontinuous(&longer));
    }

    #[test]
    fn nan_in_either_window_is_undetermined() {
        let ds = Dataset::from_values([1.0, 2.0, 3.0, f64::NAN, 5.0]);
        assert_eq!(fit_continuous(&ds), Err(Undetermined::NonFiniteValues));
        assert_eq!(fit_discontinuous(&ds), Err(Undetermined::NonFiniteValues));
    }
}
