//! [`Ranker`] implementation backed by AHP weights and TOPSIS.

use destinate_core::{RankError, RankRequest, Ranker, Ranking};

use crate::{prepare_candidates, rank_candidates};

/// Ranks requests with normalised weights and TOPSIS.
///
/// Stateless; a single instance can serve concurrent requests.
///
/// # Examples
/// ```
/// use destinate_core::{CandidateRecord, Location, RankRequest, Ranker, WeightPreset};
/// use destinate_scorer::TopsisRanker;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = RankRequest::new(
///     Location::new(-6.2088, 106.8456)?,
///     vec![
///         CandidateRecord::numeric("Ancol", 25000.0, 4.3, 5000.0, -6.1223, 106.8316),
///         CandidateRecord::numeric("Ubud", 50000.0, 4.7, 1500.0, -8.5069, 115.2625),
///     ],
/// )
/// .with_weights(WeightPreset::Nearby.weights());
///
/// let ranking = TopsisRanker.rank(&request)?;
/// assert_eq!(ranking.len(), 2);
/// assert_eq!(ranking.best().map(|entry| entry.candidate.name()), Some("Ancol"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TopsisRanker;

impl Ranker for TopsisRanker {
    fn rank(&self, request: &RankRequest) -> Result<Ranking, RankError> {
        if request.candidates.is_empty() {
            return Err(RankError::NoCandidates);
        }
        if request.origin.is_none() {
            return Err(RankError::MissingOrigin);
        }
        let candidates = prepare_candidates(&request.candidates)?;
        rank_candidates(&candidates, request.origin, &request.weights)
    }
}
