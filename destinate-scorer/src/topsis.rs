//! TOPSIS ranking over a validated decision matrix.
//!
//! The Technique for Order of Preference by Similarity to Ideal Solution
//! scores each alternative by how close it sits to the best value in every
//! column and how far it sits from the worst:
//!
//! 1. Vector-normalise each column by its Euclidean norm, rescaling by the
//!    column's largest magnitude first so huge values cannot overflow.
//! 2. Multiply each column by its weight.
//! 3. Pick the ideal best and worst per column according to its
//!    [`Direction`].
//! 4. Measure each row's Euclidean distance to both ideals.
//! 5. Score `worst / (best + worst)` and assign competition ranks.
//!
//! Degenerate inputs never produce `NaN`; see
//! [`destinate_core::policy`] for the fallbacks.

use destinate_core::policy::{closeness, column_denominator};
use destinate_core::{Criterion, Direction};
use log::warn;

use crate::{TopsisError, competition_ranks};

/// A decision-matrix column: a label for diagnostics and a preference
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    label: String,
    direction: Direction,
}

impl Column {
    /// Create a column with an explicit label and direction.
    #[must_use]
    pub fn new(label: impl Into<String>, direction: Direction) -> Self {
        Self {
            label: label.into(),
            direction,
        }
    }

    /// Column for a fixed decision criterion.
    ///
    /// # Examples
    /// ```
    /// use destinate_core::{Criterion, Direction};
    /// use destinate_scorer::Column;
    ///
    /// let column = Column::for_criterion(Criterion::Distance);
    /// assert_eq!(column.label(), "distance");
    /// assert_eq!(column.direction(), Direction::Cost);
    /// ```
    #[must_use]
    pub fn for_criterion(criterion: Criterion) -> Self {
        Self::new(criterion.as_str(), criterion.direction())
    }

    /// Column label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether higher or lower values are preferred.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// A rectangular matrix of finite values: one row per alternative, one
/// column per criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    columns: Vec<Column>,
    rows: Vec<Vec<f64>>,
}

impl DecisionMatrix {
    /// Validate and build a matrix.
    ///
    /// # Errors
    /// Returns [`TopsisError`] when there are no columns or rows, a row's
    /// width differs from the column count, or a cell is not finite.
    ///
    /// # Examples
    /// ```
    /// use destinate_core::Direction;
    /// use destinate_scorer::{Column, DecisionMatrix, TopsisError};
    ///
    /// let columns = vec![Column::new("cost", Direction::Cost)];
    /// let matrix = DecisionMatrix::new(columns.clone(), vec![vec![1.0], vec![2.0]])
    ///     .expect("rectangular matrix");
    /// assert_eq!(matrix.row_count(), 2);
    ///
    /// let ragged = DecisionMatrix::new(columns, vec![vec![1.0, 2.0]]);
    /// assert!(matches!(ragged, Err(TopsisError::RaggedRow { .. })));
    /// ```
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<f64>>) -> Result<Self, TopsisError> {
        if columns.is_empty() {
            return Err(TopsisError::NoColumns);
        }
        if rows.is_empty() {
            return Err(TopsisError::NoRows);
        }
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TopsisError::RaggedRow {
                    row: row_index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            if let Some((column, value)) = columns
                .iter()
                .zip(row.iter().copied())
                .find(|(_, value)| !value.is_finite())
            {
                return Err(TopsisError::NonFiniteCell {
                    row: row_index,
                    column: column.label.clone(),
                    value,
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Column definitions in matrix order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of alternatives.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of criteria.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Scores, ranks, and intermediate values from a TOPSIS run.
///
/// Every per-row vector is aligned with the matrix rows; every per-column
/// vector with the matrix columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TopsisOutcome {
    scores: Vec<f64>,
    ranks: Vec<usize>,
    ideal_best: Vec<f64>,
    ideal_worst: Vec<f64>,
    distance_to_best: Vec<f64>,
    distance_to_worst: Vec<f64>,
}

impl TopsisOutcome {
    /// Relative closeness of each row, in `0..=1`.
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Competition rank of each row; `1` is best.
    #[must_use]
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Weighted ideal best value per column.
    #[must_use]
    pub fn ideal_best(&self) -> &[f64] {
        &self.ideal_best
    }

    /// Weighted ideal worst value per column.
    #[must_use]
    pub fn ideal_worst(&self) -> &[f64] {
        &self.ideal_worst
    }

    /// Euclidean distance of each row to the ideal best.
    #[must_use]
    pub fn distance_to_best(&self) -> &[f64] {
        &self.distance_to_best
    }

    /// Euclidean distance of each row to the ideal worst.
    #[must_use]
    pub fn distance_to_worst(&self) -> &[f64] {
        &self.distance_to_worst
    }
}

/// Score and rank every row of `matrix` with the given column weights.
///
/// Weights are used as given; normalise them first with
/// [`normalize_weights`](crate::normalize_weights) if they are on an
/// arbitrary scale.
///
/// # Errors
/// Returns [`TopsisError::WeightCountMismatch`] when `weights` does not have
/// one entry per column and [`TopsisError::InvalidWeight`] when an entry is
/// non-finite or negative.
///
/// # Examples
/// ```
/// use destinate_core::Direction;
/// use destinate_scorer::{Column, DecisionMatrix, topsis};
///
/// let matrix = DecisionMatrix::new(
///     vec![Column::new("price", Direction::Cost), Column::new("rating", Direction::Benefit)],
///     vec![vec![10.0, 5.0], vec![20.0, 3.0]],
/// )
/// .expect("valid matrix");
/// let outcome = topsis(&matrix, &[0.5, 0.5]).expect("valid weights");
/// assert_eq!(outcome.scores(), &[1.0, 0.0]);
/// assert_eq!(outcome.ranks(), &[1, 2]);
/// ```
pub fn topsis(matrix: &DecisionMatrix, weights: &[f64]) -> Result<TopsisOutcome, TopsisError> {
    validate_weights(matrix.columns(), weights)?;

    let scales = column_scales(matrix);
    let weighted = weighted_matrix(matrix.rows(), &scales, weights);
    let (ideal_best, ideal_worst) = ideal_solutions(matrix.columns(), &weighted);

    let distance_to_best: Vec<f64> = weighted
        .iter()
        .map(|row| euclidean_distance(row, &ideal_best))
        .collect();
    let distance_to_worst: Vec<f64> = weighted
        .iter()
        .map(|row| euclidean_distance(row, &ideal_worst))
        .collect();

    let scores = closeness_scores(&distance_to_best, &distance_to_worst);
    let ranks = competition_ranks(&scores);

    Ok(TopsisOutcome {
        scores,
        ranks,
        ideal_best,
        ideal_worst,
        distance_to_best,
        distance_to_worst,
    })
}

fn validate_weights(columns: &[Column], weights: &[f64]) -> Result<(), TopsisError> {
    if weights.len() != columns.len() {
        return Err(TopsisError::WeightCountMismatch {
            expected: columns.len(),
            found: weights.len(),
        });
    }
    match columns
        .iter()
        .zip(weights.iter().copied())
        .find(|(_, weight)| !weight.is_finite() || *weight < 0.0)
    {
        Some((column, value)) => Err(TopsisError::InvalidWeight {
            column: column.label.clone(),
            value,
        }),
        None => Ok(()),
    }
}

/// Per-column normalisation factors.
///
/// Cells are divided by `magnitude` (the largest absolute value) before
/// squaring, so the norm of `[1e200, 1e199]` stays finite. The normalised
/// cell is `value / magnitude / denominator`, which equals `value / norm`.
#[derive(Debug, Clone, Copy)]
struct ColumnScale {
    magnitude: f64,
    denominator: f64,
}

#[expect(
    clippy::float_arithmetic,
    reason = "vector normalisation sums squared, rescaled column values"
)]
fn column_scales(matrix: &DecisionMatrix) -> Vec<ColumnScale> {
    let mut magnitudes = vec![0.0_f64; matrix.column_count()];
    for row in matrix.rows() {
        for (magnitude, value) in magnitudes.iter_mut().zip(row) {
            *magnitude = magnitude.max(value.abs());
        }
    }
    // An all-zero column keeps unit magnitude; its cells stay zero.
    for magnitude in &mut magnitudes {
        if *magnitude == 0.0 {
            *magnitude = 1.0;
        }
    }

    let mut sums = vec![0.0_f64; matrix.column_count()];
    for row in matrix.rows() {
        for ((sum, magnitude), value) in sums.iter_mut().zip(&magnitudes).zip(row) {
            let scaled = value / magnitude;
            *sum += scaled * scaled;
        }
    }
    matrix
        .columns()
        .iter()
        .zip(magnitudes.into_iter().zip(sums))
        .map(|(column, (magnitude, sum))| {
            if sum == 0.0 {
                warn!(
                    "column '{}' is all zeros; normalising with a small epsilon",
                    column.label
                );
            }
            ColumnScale {
                magnitude,
                denominator: column_denominator(sum),
            }
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "weighted normalisation divides by the norm and scales by the weight"
)]
fn weighted_matrix(rows: &[Vec<f64>], scales: &[ColumnScale], weights: &[f64]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .zip(scales)
                .zip(weights)
                .map(|((value, scale), weight)| {
                    value / scale.magnitude / scale.denominator * weight
                })
                .collect()
        })
        .collect()
}

fn ideal_solutions(columns: &[Column], weighted: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    let mut maxima = vec![f64::NEG_INFINITY; columns.len()];
    let mut minima = vec![f64::INFINITY; columns.len()];
    for row in weighted {
        for ((max, min), value) in maxima.iter_mut().zip(minima.iter_mut()).zip(row) {
            *max = max.max(*value);
            *min = min.min(*value);
        }
    }
    columns
        .iter()
        .zip(maxima.into_iter().zip(minima))
        .map(|(column, (max, min))| match column.direction {
            Direction::Benefit => (max, min),
            Direction::Cost => (min, max),
        })
        .unzip()
}

#[expect(
    clippy::float_arithmetic,
    reason = "Euclidean distance sums squared differences"
)]
fn euclidean_distance(row: &[f64], ideal: &[f64]) -> f64 {
    row.iter()
        .zip(ideal)
        .map(|(value, target)| {
            let delta = value - target;
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}

#[expect(
    clippy::float_arithmetic,
    reason = "degenerate rows are detected by summing both distances"
)]
fn closeness_scores(distance_to_best: &[f64], distance_to_worst: &[f64]) -> Vec<f64> {
    let degenerate = distance_to_best
        .iter()
        .zip(distance_to_worst)
        .filter(|(best, worst)| *best + *worst == 0.0)
        .count();
    if degenerate > 0 {
        warn!("{degenerate} row(s) coincide with both ideals; assigning the neutral score");
    }
    distance_to_best
        .iter()
        .zip(distance_to_worst)
        .map(|(best, worst)| closeness(*best, *worst))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn columns() -> Vec<Column> {
        Criterion::ALL.into_iter().map(Column::for_criterion).collect()
    }

    #[fixture]
    fn three_destinations() -> DecisionMatrix {
        DecisionMatrix::new(
            columns(),
            vec![
                vec![50_000.0, 4.5, 1_200.0, 5.0],
                vec![30_000.0, 4.2, 800.0, 50.0],
                vec![25_000.0, 4.0, 600.0, 100.0],
            ],
        )
        .expect("valid matrix")
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[rstest]
    fn equal_weights_reproduce_reference_scores(three_destinations: DecisionMatrix) {
        let outcome = topsis(&three_destinations, &[0.25; 4]).expect("valid weights");
        assert_close(
            outcome.scores(),
            &[0.703_329_808_420_264_2, 0.536_927_839_202_613_3, 0.296_670_191_579_735_8],
        );
        assert_eq!(outcome.ranks(), &[1, 2, 3]);
    }

    #[rstest]
    fn budget_weights_favour_cheaper_destinations(three_destinations: DecisionMatrix) {
        let outcome = topsis(&three_destinations, &[0.6, 0.2, 0.1, 0.1]).expect("valid weights");
        assert_close(
            outcome.scores(),
            &[0.284_826_653_665_322_9, 0.742_309_362_415_522_8, 0.715_173_346_334_677_2],
        );
        assert_eq!(outcome.ranks(), &[3, 1, 2]);
    }

    #[rstest]
    fn ideals_follow_column_direction(three_destinations: DecisionMatrix) {
        let outcome = topsis(&three_destinations, &[0.25; 4]).expect("valid weights");
        for ((column, best), worst) in three_destinations
            .columns()
            .iter()
            .zip(outcome.ideal_best())
            .zip(outcome.ideal_worst())
        {
            match column.direction() {
                Direction::Benefit => assert!(best >= worst, "{}", column.label()),
                Direction::Cost => assert!(best <= worst, "{}", column.label()),
            }
        }
    }

    #[rstest]
    fn dominant_row_scores_one_and_dominated_row_scores_zero() {
        let matrix = DecisionMatrix::new(
            columns(),
            vec![
                vec![10.0, 5.0, 900.0, 1.0],
                vec![40.0, 3.0, 100.0, 80.0],
                vec![25.0, 4.0, 400.0, 20.0],
            ],
        )
        .expect("valid matrix");
        let outcome = topsis(&matrix, &[0.25; 4]).expect("valid weights");
        assert_eq!(outcome.distance_to_best().first(), Some(&0.0));
        assert_eq!(outcome.distance_to_worst().get(1), Some(&0.0));
        assert_eq!(outcome.scores().first(), Some(&1.0));
        assert_eq!(outcome.scores().get(1), Some(&0.0));
    }

    #[rstest]
    fn identical_rows_share_the_top_rank() {
        let matrix = DecisionMatrix::new(
            columns(),
            vec![
                vec![10.0, 4.0, 100.0, 1.0],
                vec![10.0, 4.0, 100.0, 1.0],
                vec![20.0, 3.0, 50.0, 9.0],
            ],
        )
        .expect("valid matrix");
        let outcome = topsis(&matrix, &[0.25; 4]).expect("valid weights");
        assert_eq!(outcome.scores(), &[1.0, 1.0, 0.0]);
        assert_eq!(outcome.ranks(), &[1, 1, 3]);
    }

    #[rstest]
    fn huge_magnitudes_do_not_overflow_the_column_norm() {
        let matrix = DecisionMatrix::new(
            columns(),
            vec![vec![1e200, 4.0, 100.0, 1.0], vec![1e199, 4.0, 100.0, 1.0]],
        )
        .expect("valid matrix");
        let outcome = topsis(&matrix, &[1.0, 0.0, 0.0, 0.0]).expect("valid weights");
        assert!(outcome.scores().iter().all(|score| score.is_finite()));
        assert_eq!(outcome.scores(), &[0.0, 1.0]);
        assert_eq!(outcome.ranks(), &[2, 1]);
    }

    #[rstest]
    fn all_zero_matrix_is_degenerate_not_nan() {
        let matrix =
            DecisionMatrix::new(columns(), vec![vec![0.0; 4], vec![0.0; 4]]).expect("valid matrix");
        let outcome = topsis(&matrix, &[0.25; 4]).expect("valid weights");
        assert_eq!(outcome.scores(), &[0.5, 0.5]);
        assert_eq!(outcome.ranks(), &[1, 1]);
    }

    #[rstest]
    fn single_row_is_ranked_first() {
        let matrix =
            DecisionMatrix::new(columns(), vec![vec![1.0, 4.0, 10.0, 3.0]]).expect("valid matrix");
        let outcome = topsis(&matrix, &[0.25; 4]).expect("valid weights");
        assert_eq!(outcome.scores(), &[0.5]);
        assert_eq!(outcome.ranks(), &[1]);
    }

    #[rstest]
    #[case(vec![], vec![vec![1.0]], TopsisError::NoColumns)]
    #[case(columns(), vec![], TopsisError::NoRows)]
    #[case(columns(), vec![vec![1.0, 2.0]], TopsisError::RaggedRow { row: 0, expected: 4, found: 2 })]
    fn malformed_matrices_are_rejected(
        #[case] columns: Vec<Column>,
        #[case] rows: Vec<Vec<f64>>,
        #[case] expected: TopsisError,
    ) {
        assert_eq!(DecisionMatrix::new(columns, rows), Err(expected));
    }

    #[rstest]
    fn non_finite_cells_name_their_column() {
        let err = DecisionMatrix::new(columns(), vec![vec![1.0, f64::NAN, 3.0, 4.0]])
            .expect_err("NaN cell");
        assert!(matches!(
            err,
            TopsisError::NonFiniteCell { row: 0, ref column, .. } if column == "rating"
        ));
    }

    #[rstest]
    #[case(&[0.5, 0.5], TopsisError::WeightCountMismatch { expected: 4, found: 2 })]
    #[case(
        &[0.25, -0.25, 0.5, 0.5],
        TopsisError::InvalidWeight { column: "rating".into(), value: -0.25 }
    )]
    fn invalid_weights_are_rejected(
        three_destinations: DecisionMatrix,
        #[case] weights: &[f64],
        #[case] expected: TopsisError,
    ) {
        assert_eq!(topsis(&three_destinations, weights), Err(expected));
    }
}
