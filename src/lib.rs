//! Facade crate for the Destinate recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the TOPSIS scorer
//! behind the `scorer` feature flag.

#![forbid(unsafe_code)]

pub use destinate_core::{
    Candidate, CandidateError, CandidateField, CandidateIssue, CandidateRecord, Criterion,
    CriterionWeights, Direction, FieldValue, Location, LocationError, MAX_RATING, RankError,
    RankRequest, RankedCandidate, Ranker, Ranking, WeightError, WeightPreset, WeightVector,
    haversine_km, try_haversine_km,
};

#[cfg(feature = "scorer")]
pub use destinate_scorer::{
    Column, DecisionMatrix, TopsisError, TopsisOutcome, TopsisRanker, competition_ranks,
    normalize_criterion_weights, normalize_weights, prepare_candidates, rank_candidates, topsis,
};
