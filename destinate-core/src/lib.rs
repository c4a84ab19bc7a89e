//! Core domain types for the Destinate ranking engine.
//!
//! These models validate on construction so the scoring crates can assume
//! finite, in-range inputs. Constructors return `Result` to surface invalid
//! records early rather than letting a `NaN` leak into a ranking.
//!
//! The crate also owns the great-circle [`distance`] calculator and the
//! numeric edge-case [`policy`] shared by every scoring component.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod candidate;
mod criterion;
pub mod distance;
mod location;
pub mod policy;
pub mod ranking;
mod weights;

pub use candidate::{
    Candidate, CandidateError, CandidateField, CandidateRecord, FieldValue, MAX_RATING,
};
pub use criterion::{Criterion, Direction};
pub use distance::{haversine_km, try_haversine_km};
pub use location::{Location, LocationError};
pub use ranking::{CandidateIssue, RankError, RankRequest, RankedCandidate, Ranker, Ranking};
pub use weights::{CriterionWeights, WeightError, WeightPreset, WeightVector};
