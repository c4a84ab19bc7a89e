//! Preference weights: raw user input, presets, and normalised vectors.
//!
//! Raw weights ([`CriterionWeights`]) are whatever the weight input source
//! provides: four non-negative numbers on any scale. A [`WeightVector`] is
//! the normalised form consumed by the ranker and always sums to one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Criterion;
use crate::policy::is_normalised;

/// Raw weight given to each criterion when none is supplied.
pub const DEFAULT_RAW_WEIGHT: f64 = 25.0;

/// Raw, unnormalised preference weights keyed by criterion.
///
/// # Examples
/// ```
/// use destinate_core::{Criterion, CriterionWeights};
///
/// let weights = CriterionWeights::default().with(Criterion::Distance, 60.0);
/// assert_eq!(weights.as_array(), [25.0, 25.0, 25.0, 60.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CriterionWeights {
    /// Importance of a low price.
    pub price: f64,
    /// Importance of a high rating.
    pub rating: f64,
    /// Importance of many reviews.
    pub rating_count: f64,
    /// Importance of a short distance.
    pub distance: f64,
}

impl CriterionWeights {
    /// Construct weights from explicit values.
    #[must_use]
    pub const fn new(price: f64, rating: f64, rating_count: f64, distance: f64) -> Self {
        Self {
            price,
            rating,
            rating_count,
            distance,
        }
    }

    /// Weights in [`Criterion::ALL`] order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.price, self.rating, self.rating_count, self.distance]
    }

    /// Return the weight for a single criterion.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Price => self.price,
            Criterion::Rating => self.rating,
            Criterion::RatingCount => self.rating_count,
            Criterion::Distance => self.distance,
        }
    }

    /// Set the weight for a single criterion.
    pub const fn set(&mut self, criterion: Criterion, weight: f64) {
        match criterion {
            Criterion::Price => self.price = weight,
            Criterion::Rating => self.rating = weight,
            Criterion::RatingCount => self.rating_count = weight,
            Criterion::Distance => self.distance = weight,
        }
    }

    /// Set a weight while returning `self` for chaining.
    #[must_use]
    pub const fn with(mut self, criterion: Criterion, weight: f64) -> Self {
        self.set(criterion, weight);
        self
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        WeightPreset::Balanced.weights()
    }
}

impl From<[f64; 4]> for CriterionWeights {
    fn from([price, rating, rating_count, distance]: [f64; 4]) -> Self {
        Self::new(price, rating, rating_count, distance)
    }
}

/// Errors raised while normalising or validating weights.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightError {
    /// No weights were supplied.
    #[error("at least one weight is required")]
    Empty,
    /// A weight was `NaN` or infinite.
    #[error("weight at position {index} must be finite")]
    NonFinite {
        /// Position of the offending weight.
        index: usize,
    },
    /// A weight was negative.
    #[error("weight at position {index} is negative ({value})")]
    Negative {
        /// Position of the offending weight.
        index: usize,
        /// Rejected value.
        value: f64,
    },
    /// The vector did not sum to one.
    #[error("weights must sum to 1.0, got {sum}")]
    NotNormalised {
        /// Actual sum.
        sum: f64,
    },
}

/// Normalised criterion weights summing to one.
///
/// Only constructed from values that already satisfy the invariant; use the
/// scorer's weight normaliser to derive one from raw weights.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(into = "CriterionWeights")
)]
pub struct WeightVector {
    values: [f64; 4],
}

impl WeightVector {
    /// Wrap values that are non-negative and sum to one.
    ///
    /// # Errors
    /// Returns [`WeightError`] when a value is non-finite or negative, or the
    /// sum differs from one by more than
    /// [`WEIGHT_SUM_TOLERANCE`](crate::policy::WEIGHT_SUM_TOLERANCE).
    ///
    /// # Examples
    /// ```
    /// use destinate_core::{Criterion, WeightVector};
    ///
    /// let vector = WeightVector::try_new([0.4, 0.3, 0.2, 0.1]).expect("normalised");
    /// assert_eq!(vector.get(Criterion::Rating), 0.3);
    /// assert!(WeightVector::try_new([0.5, 0.5, 0.5, 0.5]).is_err());
    /// ```
    pub fn try_new(values: [f64; 4]) -> Result<Self, WeightError> {
        for (index, value) in values.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(WeightError::NonFinite { index });
            }
            if value < 0.0 {
                return Err(WeightError::Negative { index, value });
            }
        }
        if !is_normalised(&values) {
            return Err(WeightError::NotNormalised {
                sum: values.iter().sum(),
            });
        }
        Ok(Self { values })
    }

    /// Weight for a single criterion.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Price => self.values[0],
            Criterion::Rating => self.values[1],
            Criterion::RatingCount => self.values[2],
            Criterion::Distance => self.values[3],
        }
    }

    /// Weights in [`Criterion::ALL`] order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        self.values
    }

    /// Weights as a slice in [`Criterion::ALL`] order.
    #[must_use]
    pub const fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl From<WeightVector> for CriterionWeights {
    fn from(vector: WeightVector) -> Self {
        Self::from(vector.values)
    }
}

/// Named starting points for the weight input.
///
/// Explicit per-criterion weights may still override individual entries.
///
/// # Examples
/// ```
/// use destinate_core::WeightPreset;
///
/// let preset: WeightPreset = "nearby".parse().expect("known preset");
/// assert_eq!(preset.weights().distance, 60.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeightPreset {
    /// Every criterion matters equally.
    #[default]
    Balanced,
    /// Favour affordable destinations.
    Budget,
    /// Favour well-reviewed destinations.
    TopRated,
    /// Favour destinations close to the user.
    Nearby,
}

impl WeightPreset {
    /// Every preset, in display order.
    pub const ALL: [Self; 4] = [Self::Balanced, Self::Budget, Self::TopRated, Self::Nearby];

    /// Raw weights for the preset, on a percentage scale.
    #[must_use]
    pub const fn weights(self) -> CriterionWeights {
        match self {
            Self::Balanced => CriterionWeights::new(
                DEFAULT_RAW_WEIGHT,
                DEFAULT_RAW_WEIGHT,
                DEFAULT_RAW_WEIGHT,
                DEFAULT_RAW_WEIGHT,
            ),
            Self::Budget => CriterionWeights::new(60.0, 20.0, 10.0, 10.0),
            Self::TopRated => CriterionWeights::new(20.0, 60.0, 15.0, 5.0),
            Self::Nearby => CriterionWeights::new(15.0, 15.0, 10.0, 60.0),
        }
    }

    /// Return the preset as a kebab-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Budget => "budget",
            Self::TopRated => "top-rated",
            Self::Nearby => "nearby",
        }
    }
}

impl fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "balanced" => Ok(Self::Balanced),
            "budget" => Ok(Self::Budget),
            "top-rated" => Ok(Self::TopRated),
            "nearby" => Ok(Self::Nearby),
            _ => Err(format!("unknown weight preset '{s}'")),
        }
    }
}
