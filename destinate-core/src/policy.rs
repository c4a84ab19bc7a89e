//! Numeric edge-case policy shared by the distance and scoring components.
//!
//! Every division-by-zero guard and clamping rule used while ranking lives
//! here, next to the constant it relies on, so callers and tests can target
//! the behaviour directly.
//!
//! | Situation                               | Resolution                      |
//! |-----------------------------------------|---------------------------------|
//! | Haversine `a` drifts outside `[0, 1]`   | [`clamp_haversine`]             |
//! | Decision-matrix column with zero norm   | [`ZERO_NORM_EPSILON`] divisor   |
//! | Candidate equidistant to both ideals    | [`DEGENERATE_SCORE`]            |
//! | Raw weights summing to zero             | [`uniform_weights`]             |

/// Mean Earth radius in kilometres used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Divisor substituted for a decision-matrix column whose vector norm is zero.
pub const ZERO_NORM_EPSILON: f64 = 1e-12;

/// Closeness score assigned when a candidate's distances to the ideal best
/// and ideal worst solutions are both zero.
///
/// This only happens for a single-row matrix or a matrix whose rows are all
/// identical, where every candidate is equally good.
pub const DEGENERATE_SCORE: f64 = 0.5;

/// Tolerance used when checking that a weight vector sums to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Clamp the Haversine intermediate `a` into `[0, 1]`.
///
/// Rounding can push `a` marginally above one for antipodal points, which
/// would make `sqrt(1 - a)` return `NaN`.
///
/// # Examples
/// ```
/// use destinate_core::policy::clamp_haversine;
///
/// assert_eq!(clamp_haversine(1.000_000_000_000_2), 1.0);
/// assert_eq!(clamp_haversine(-0.0), 0.0);
/// assert_eq!(clamp_haversine(0.25), 0.25);
/// ```
#[must_use]
pub const fn clamp_haversine(a: f64) -> f64 {
    a.clamp(0.0, 1.0)
}

/// Turn a column's sum of squares into the divisor used for vector
/// normalisation.
///
/// Returns [`ZERO_NORM_EPSILON`] when the column is entirely zero.
///
/// # Examples
/// ```
/// use destinate_core::policy::{ZERO_NORM_EPSILON, column_denominator};
///
/// assert_eq!(column_denominator(25.0), 5.0);
/// assert_eq!(column_denominator(0.0), ZERO_NORM_EPSILON);
/// ```
#[must_use]
pub fn column_denominator(sum_of_squares: f64) -> f64 {
    let norm = sum_of_squares.sqrt();
    if norm == 0.0 { ZERO_NORM_EPSILON } else { norm }
}

/// Relative closeness to the ideal solution.
///
/// Computes `worst / (best + worst)`, falling back to [`DEGENERATE_SCORE`]
/// when both distances are zero. Results are clamped into `[0, 1]`.
///
/// # Examples
/// ```
/// use destinate_core::policy::{DEGENERATE_SCORE, closeness};
///
/// assert_eq!(closeness(0.0, 2.0), 1.0);
/// assert_eq!(closeness(1.0, 1.0), 0.5);
/// assert_eq!(closeness(0.0, 0.0), DEGENERATE_SCORE);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "closeness is a ratio of the two ideal distances"
)]
pub const fn closeness(distance_to_best: f64, distance_to_worst: f64) -> f64 {
    let total = distance_to_best + distance_to_worst;
    if total == 0.0 {
        return DEGENERATE_SCORE;
    }
    (distance_to_worst / total).clamp(0.0, 1.0)
}

/// Produce `n` equal weights summing to one.
///
/// Used when every raw weight is zero. Returns an empty vector for `n == 0`.
///
/// # Examples
/// ```
/// use destinate_core::policy::uniform_weights;
///
/// assert_eq!(uniform_weights(4), vec![0.25; 4]);
/// assert!(uniform_weights(0).is_empty());
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "each share is the reciprocal of the criterion count"
)]
pub fn uniform_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let share = 1.0 / n as f64;
    vec![share; n]
}

/// Report whether `weights` are non-negative and sum to one within
/// [`WEIGHT_SUM_TOLERANCE`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "compares the weight sum against one"
)]
pub fn is_normalised(weights: &[f64]) -> bool {
    let all_valid = weights.iter().all(|w| w.is_finite() && *w >= 0.0);
    let sum: f64 = weights.iter().sum();
    all_valid && (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn guards_evaluate_in_const_context() {
        const CLAMPED: f64 = clamp_haversine(1.5);
        const NEUTRAL: f64 = closeness(0.0, 0.0);
        assert_eq!(CLAMPED, 1.0);
        assert_eq!(NEUTRAL, DEGENERATE_SCORE);
    }

    #[rstest]
    #[case(-1e-17, 0.0)]
    #[case(0.5, 0.5)]
    #[case(1.0 + 1e-15, 1.0)]
    fn clamps_haversine_intermediate(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(clamp_haversine(input), expected);
    }

    #[rstest]
    fn zero_column_uses_epsilon() {
        let divisor = column_denominator(0.0);
        assert!(divisor > 0.0);
        assert_eq!(divisor, ZERO_NORM_EPSILON);
    }

    #[rstest]
    fn degenerate_closeness_is_deterministic() {
        assert_eq!(closeness(0.0, 0.0), DEGENERATE_SCORE);
    }

    #[rstest]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    fn uniform_weights_sum_to_one(#[case] n: usize) {
        let weights = uniform_weights(n);
        assert_eq!(weights.len(), n);
        assert!(is_normalised(&weights));
    }

    #[rstest]
    #[case(&[0.5, 0.5], true)]
    #[case(&[0.5, 0.4], false)]
    #[case(&[1.5, -0.5], false)]
    #[case(&[f64::NAN, 1.0], false)]
    fn detects_normalised_vectors(#[case] weights: &[f64], #[case] expected: bool) {
        assert_eq!(is_normalised(weights), expected);
    }
}
