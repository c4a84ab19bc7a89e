//! Candidate ranking pipeline.
//!
//! Validates the inputs, derives each candidate's distance from the user,
//! builds the decision matrix in [`Criterion::ALL`] order, normalises the
//! weights, and runs [`topsis`]. Results come back sorted by rank; candidates
//! sharing a rank keep their input order.

use destinate_core::{
    Candidate, CandidateIssue, CandidateRecord, Criterion, CriterionWeights, Location, RankError,
    RankedCandidate, Ranking, haversine_km,
};
use log::debug;

use crate::{Column, DecisionMatrix, normalize_criterion_weights, topsis};

/// Validate a batch of raw records.
///
/// Every record is checked before returning so the error lists all
/// offending candidates, not just the first.
///
/// # Errors
/// Returns [`RankError::InvalidCandidates`] when any record fails
/// validation.
///
/// # Examples
/// ```
/// use destinate_core::{CandidateRecord, FieldValue, RankError};
/// use destinate_scorer::prepare_candidates;
///
/// let good = CandidateRecord::numeric("Ubud", 50000.0, 4.7, 1500.0, -8.5, 115.26);
/// let mut bad = good.clone();
/// bad.price = Some(FieldValue::from("free"));
///
/// assert_eq!(prepare_candidates(&[good.clone()]).map(|c| c.len()), Ok(1));
/// let Err(RankError::InvalidCandidates { issues }) = prepare_candidates(&[good, bad]) else {
///     panic!("malformed price must be reported");
/// };
/// assert_eq!(issues.first().map(|issue| issue.index), Some(1));
/// ```
pub fn prepare_candidates(records: &[CandidateRecord]) -> Result<Vec<Candidate>, RankError> {
    let mut candidates = Vec::with_capacity(records.len());
    let mut issues = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match Candidate::try_from(record) {
            Ok(candidate) => candidates.push(candidate),
            Err(error) => issues.push(CandidateIssue {
                index,
                name: record.name.clone(),
                error,
            }),
        }
    }
    if issues.is_empty() {
        Ok(candidates)
    } else {
        Err(RankError::InvalidCandidates { issues })
    }
}

/// Rank validated candidates for a user at `origin`.
///
/// # Errors
/// Returns [`RankError::NoCandidates`] for an empty slice and
/// [`RankError::MissingOrigin`] when `origin` is `None`; both are checked
/// before any computation. Weight problems surface as
/// [`RankError::InvalidWeights`].
///
/// # Examples
/// ```
/// use destinate_core::{Candidate, CriterionWeights, Location};
/// use destinate_scorer::rank_candidates;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let origin = Location::new(-6.2088, 106.8456)?;
/// let near = Candidate::new("Kota Tua", 5000.0, 4.4, 2000.0, Location::new(-6.1352, 106.8133)?)?;
/// let far = Candidate::new("Ubud", 5000.0, 4.4, 2000.0, Location::new(-8.5069, 115.2625)?)?;
///
/// let ranking = rank_candidates(&[far, near], Some(origin), &CriterionWeights::default())?;
/// assert_eq!(ranking.best().map(|entry| entry.candidate.name()), Some("Kota Tua"));
/// # Ok(())
/// # }
/// ```
pub fn rank_candidates(
    candidates: &[Candidate],
    origin: Option<Location>,
    weights: &CriterionWeights,
) -> Result<Ranking, RankError> {
    if candidates.is_empty() {
        return Err(RankError::NoCandidates);
    }
    let user = origin.ok_or(RankError::MissingOrigin)?;

    let weight_vector = normalize_criterion_weights(weights)?;
    debug!(
        "ranking {} candidate(s) with weights {:?}",
        candidates.len(),
        weight_vector.as_array()
    );

    let distances: Vec<f64> = candidates
        .iter()
        .map(|candidate| haversine_km(user, candidate.location()))
        .collect();
    let rows = candidates
        .iter()
        .zip(&distances)
        .map(|(candidate, distance_km)| decision_row(candidate, *distance_km))
        .collect();
    let columns = Criterion::ALL.into_iter().map(Column::for_criterion).collect();

    let matrix = DecisionMatrix::new(columns, rows)?;
    let outcome = topsis(&matrix, weight_vector.as_slice())?;

    let mut entries: Vec<RankedCandidate> = candidates
        .iter()
        .zip(distances)
        .zip(outcome.scores().iter().zip(outcome.ranks()))
        .map(|((candidate, distance_km), (score, rank))| RankedCandidate {
            candidate: candidate.clone(),
            distance_km,
            topsis_score: *score,
            rank: *rank,
        })
        .collect();
    entries.sort_by_key(|entry| entry.rank);

    if let Some(best) = entries.first() {
        debug!(
            "best candidate '{}' scored {:.4}",
            best.candidate.name(),
            best.topsis_score
        );
    }
    Ok(Ranking::new(weight_vector, entries))
}

fn decision_row(candidate: &Candidate, distance_km: f64) -> Vec<f64> {
    Criterion::ALL
        .into_iter()
        .map(|criterion| match criterion {
            Criterion::Price => candidate.price(),
            Criterion::Rating => candidate.rating(),
            Criterion::RatingCount => candidate.rating_count(),
            Criterion::Distance => distance_km,
        })
        .collect()
}
