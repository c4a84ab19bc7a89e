//! Ranking requests, results, and the [`Ranker`] seam.
//!
//! A [`RankRequest`] bundles the user location, raw candidate records, and
//! raw preference weights. A [`Ranker`] turns it into a [`Ranking`] ordered
//! best-first.

use thiserror::Error;

use crate::{Candidate, CandidateError, CandidateRecord, CriterionWeights, Location, WeightError, WeightVector};

/// Input to a ranking run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankRequest {
    /// Where the user currently is. Required for a run to succeed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Option<Location>,
    /// Candidate destinations as supplied by the data source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub candidates: Vec<CandidateRecord>,
    /// Raw preference weights; balanced when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights: CriterionWeights,
}

impl RankRequest {
    /// Create a request for `candidates` around `origin` with balanced weights.
    #[must_use]
    pub fn new(origin: Location, candidates: Vec<CandidateRecord>) -> Self {
        Self {
            origin: Some(origin),
            candidates,
            weights: CriterionWeights::default(),
        }
    }

    /// Replace the raw weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: CriterionWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// A candidate annotated with its distance, score, and rank.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedCandidate {
    /// The validated candidate.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub candidate: Candidate,
    /// Great-circle distance from the user in kilometres.
    pub distance_km: f64,
    /// Relative closeness to the ideal solution in `0..=1`.
    pub topsis_score: f64,
    /// Competition rank; `1` is best and ties share the lowest rank.
    pub rank: usize,
}

/// Ordered output of a ranking run.
///
/// Entries are sorted by ascending rank. Candidates sharing a rank keep the
/// order in which they were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    weights: WeightVector,
    entries: Vec<RankedCandidate>,
}

impl Ranking {
    /// Wrap ranked entries together with the weights that produced them.
    #[must_use]
    pub const fn new(weights: WeightVector, entries: Vec<RankedCandidate>) -> Self {
        Self { weights, entries }
    }

    /// Normalised weights used for the run.
    #[must_use]
    pub const fn weights(&self) -> WeightVector {
        self.weights
    }

    /// Ranked entries, best first.
    #[must_use]
    pub const fn entries(&self) -> &[RankedCandidate] {
        self.entries.as_slice()
    }

    /// Consume the ranking and return its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<RankedCandidate> {
        self.entries
    }

    /// Number of ranked candidates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ranking holds no candidates.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best-ranked candidate, if any.
    ///
    /// Its `topsis_score`, price, rating, and `distance_km` make up the
    /// headline of a results summary.
    #[must_use]
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.entries.first()
    }

    /// At most `n` entries from the top of the ranking.
    #[must_use]
    pub fn top(&self, n: usize) -> &[RankedCandidate] {
        let end = n.min(self.entries.len());
        self.entries.get(..end).unwrap_or_default()
    }

    /// Mean distance across all ranked candidates.
    ///
    /// Returns `None` for an empty ranking.
    #[must_use]
    pub fn average_distance_km(&self) -> Option<f64> {
        self.mean_of(|entry| entry.distance_km)
    }

    /// Mean entry price across all ranked candidates.
    ///
    /// Returns `None` for an empty ranking.
    #[must_use]
    pub fn average_price(&self) -> Option<f64> {
        self.mean_of(|entry| entry.candidate.price())
    }

    /// Mean rating across all ranked candidates.
    ///
    /// Returns `None` for an empty ranking.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        self.mean_of(|entry| entry.candidate.rating())
    }

    /// Cheapest and dearest entry price, as `(min, max)`.
    ///
    /// Returns `None` for an empty ranking.
    #[must_use]
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.range_of(|entry| entry.candidate.price())
    }

    /// Lowest and highest rating, as `(min, max)`.
    ///
    /// Returns `None` for an empty ranking.
    #[must_use]
    pub fn rating_range(&self) -> Option<(f64, f64)> {
        self.range_of(|entry| entry.candidate.rating())
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "averaging divides a sum by the entry count"
    )]
    fn mean_of(&self, value: impl Fn(&RankedCandidate) -> f64) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: f64 = self.entries.iter().map(value).sum();
        Some(total / self.entries.len() as f64)
    }

    fn range_of(&self, value: impl Fn(&RankedCandidate) -> f64) -> Option<(f64, f64)> {
        self.entries.iter().map(value).fold(None, |range, current| {
            Some(range.map_or((current, current), |(min, max): (f64, f64)| {
                (min.min(current), max.max(current))
            }))
        })
    }
}

/// A candidate that failed validation, identified by input position.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateIssue {
    /// Zero-based position in the request.
    pub index: usize,
    /// Name as supplied, possibly empty.
    pub name: String,
    /// Why the candidate was rejected.
    pub error: CandidateError,
}

impl std::fmt::Display for CandidateIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "candidate #{}: {}", self.index, self.error)
        } else {
            write!(f, "candidate #{} ({}): {}", self.index, self.name, self.error)
        }
    }
}

/// Errors returned by a [`Ranker`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// The request held no candidates.
    #[error("no candidate destinations to rank")]
    NoCandidates,
    /// The request did not say where the user is.
    #[error("user location is required to compute distances")]
    MissingOrigin,
    /// One or more candidates failed validation.
    #[error("{} invalid candidate(s): {}", issues.len(), join_issues(issues))]
    InvalidCandidates {
        /// Every rejected candidate.
        issues: Vec<CandidateIssue>,
    },
    /// The preference weights could not be normalised.
    #[error("invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),
    /// The scoring step rejected its input.
    #[error("scoring failed: {reason}")]
    Scoring {
        /// Description of the failure.
        reason: String,
    },
}

fn join_issues(issues: &[CandidateIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Produce a [`Ranking`] from a [`RankRequest`].
///
/// Implementations must be deterministic: the same request yields the same
/// ranking.
///
/// # Examples
/// ```
/// use destinate_core::{
///     Candidate, RankError, RankRequest, RankedCandidate, Ranker, Ranking, WeightVector,
/// };
///
/// struct FirstWins;
///
/// impl Ranker for FirstWins {
///     fn rank(&self, request: &RankRequest) -> Result<Ranking, RankError> {
///         let origin = request.origin.ok_or(RankError::MissingOrigin)?;
///         let record = request.candidates.first().ok_or(RankError::NoCandidates)?;
///         let candidate = Candidate::try_from(record).map_err(|error| RankError::Scoring {
///             reason: error.to_string(),
///         })?;
///         let distance_km = destinate_core::haversine_km(origin, candidate.location());
///         let weights = WeightVector::try_new([0.25; 4])?;
///         Ok(Ranking::new(
///             weights,
///             vec![RankedCandidate { candidate, distance_km, topsis_score: 1.0, rank: 1 }],
///         ))
///     }
/// }
///
/// let request = RankRequest::default();
/// assert_eq!(FirstWins.rank(&request), Err(RankError::MissingOrigin));
/// ```
pub trait Ranker: Send + Sync {
    /// Rank the request's candidates.
    ///
    /// # Errors
    /// Returns [`RankError`] when the request is incomplete, a candidate or
    /// weight is invalid, or scoring fails.
    fn rank(&self, request: &RankRequest) -> Result<Ranking, RankError>;
}
