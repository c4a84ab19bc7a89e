//! Multi-criteria scoring for Destinate candidate destinations.
//!
//! The crate turns raw preferences and validated candidates into a ranking:
//! - **Weight normalisation** ([`normalize_weights`]) scales raw AHP-style
//!   preferences so they sum to one, falling back to uniform weights when
//!   every preference is zero.
//! - **TOPSIS** ([`topsis()`]) scores each row of a [`DecisionMatrix`] by its
//!   relative closeness to the ideal solution and assigns competition ranks.
//! - **The pipeline** ([`rank_candidates`]) computes distances from the user,
//!   builds the matrix in fixed criterion order, and sorts the results.
//!
//! [`TopsisRanker`] wraps the pipeline behind the
//! [`Ranker`](destinate_core::Ranker) trait.
//!
//! # Examples
//!
//! ```
//! use destinate_core::{Candidate, Location, WeightPreset};
//! use destinate_scorer::rank_candidates;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let me = Location::new(-6.2088, 106.8456)?;
//! let cheap = Candidate::new("Ragunan Zoo", 4000.0, 4.4, 60000.0, Location::new(-6.3125, 106.8203)?)?;
//! let pricey = Candidate::new("Dufan", 275000.0, 4.6, 80000.0, Location::new(-6.1253, 106.8336)?)?;
//!
//! let ranking = rank_candidates(&[pricey, cheap], Some(me), &WeightPreset::Budget.weights())?;
//! assert_eq!(ranking.best().map(|entry| entry.candidate.name()), Some("Ragunan Zoo"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod ahp;
mod error;
mod pipeline;
mod ranker;
mod ranks;
mod topsis;

pub use ahp::{normalize_criterion_weights, normalize_weights};
pub use error::TopsisError;
pub use pipeline::{prepare_candidates, rank_candidates};
pub use ranker::TopsisRanker;
pub use ranks::competition_ranks;
pub use topsis::{Column, DecisionMatrix, TopsisOutcome, topsis};
