//! Matroid Engine: rank, independence, closure, bases, circuits and flats
//! over the point set of a configuration.
//!
//! Purpose
//! - Report the combinatorial structure induced by explicit line incidences,
//!   with coincident points treated as dependent pairs.
//! - Always built fresh from a snapshot (`Configuration::matroid`); there is
//!   no incremental state to invalidate.
//!
//! Cost
//! - `bases` enumerates `C(n, rank)` subsets and `circuits` is `O(n^3)` in the
//!   worst case. Callers throttle how often they ask.
//!
//! Code cross-refs: `model::{Configuration, position_groups}`

mod engine;
mod types;

pub use engine::{Matroid, MAX_RANK};
pub use types::{Circuit, Flat, LeviCode, MatroidStats};

#[cfg(test)]
mod tests;
