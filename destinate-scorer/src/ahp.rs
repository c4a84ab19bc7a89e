//! Simplified AHP weight normalisation.
//!
//! Raw preference weights on any scale are divided by their sum so they
//! total one. A vector of all zeros carries no preference, so it falls back
//! to uniform weights instead of dividing by zero.

use destinate_core::policy::{is_normalised, uniform_weights};
use destinate_core::{CriterionWeights, WeightError, WeightVector};
use log::warn;

/// Normalise raw weights so they sum to one.
///
/// # Errors
/// Returns [`WeightError::Empty`] for an empty slice,
/// [`WeightError::NonFinite`] for `NaN` or infinite entries, and
/// [`WeightError::Negative`] for entries below zero.
///
/// # Examples
/// ```
/// use destinate_scorer::normalize_weights;
///
/// let weights = normalize_weights(&[2.0, 1.0, 1.0]).expect("valid weights");
/// assert_eq!(weights, vec![0.5, 0.25, 0.25]);
///
/// let uniform = normalize_weights(&[0.0, 0.0]).expect("zero weights fall back");
/// assert_eq!(uniform, vec![0.5, 0.5]);
/// ```
pub fn normalize_weights(raw: &[f64]) -> Result<Vec<f64>, WeightError> {
    let mut weights = raw.to_vec();
    normalise_in_place(&mut weights)?;
    Ok(weights)
}

/// Normalise per-criterion weights into a [`WeightVector`].
///
/// The fixed four-entry array is normalised where it stands, so every
/// failure is one of the validation errors below.
///
/// # Errors
/// Returns [`WeightError`] under the same conditions as
/// [`normalize_weights`].
///
/// # Examples
/// ```
/// use destinate_core::{Criterion, WeightPreset};
/// use destinate_scorer::normalize_criterion_weights;
///
/// let vector = normalize_criterion_weights(&WeightPreset::Budget.weights())
///     .expect("preset weights are valid");
/// assert!((vector.get(Criterion::Price) - 0.6).abs() < 1e-12);
/// ```
pub fn normalize_criterion_weights(weights: &CriterionWeights) -> Result<WeightVector, WeightError> {
    let mut values = weights.as_array();
    normalise_in_place(&mut values)?;
    WeightVector::try_new(values)
}

fn normalise_in_place(weights: &mut [f64]) -> Result<(), WeightError> {
    if weights.is_empty() {
        return Err(WeightError::Empty);
    }
    validate_entries(weights)?;
    if is_normalised(weights) {
        return Ok(());
    }
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        warn!(
            "all {} weights are zero; falling back to uniform weights",
            weights.len()
        );
        let len = weights.len();
        for (weight, share) in weights.iter_mut().zip(uniform_weights(len)) {
            *weight = share;
        }
        return Ok(());
    }
    divide_by(weights, total);
    Ok(())
}

fn validate_entries(raw: &[f64]) -> Result<(), WeightError> {
    for (index, value) in raw.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(WeightError::NonFinite { index });
        }
        if value < 0.0 {
            return Err(WeightError::Negative { index, value });
        }
    }
    Ok(())
}

#[expect(
    clippy::float_arithmetic,
    reason = "normalisation divides each weight by the total"
)]
fn divide_by(weights: &mut [f64], total: f64) {
    for weight in weights {
        *weight /= total;
    }
}
