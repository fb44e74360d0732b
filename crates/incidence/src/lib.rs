//! Incidence geometry of points and infinite lines in the plane, and the
//! matroid it induces.
//!
//! Layers
//! - `model`: the mutable arena of points and lines (`Configuration`).
//! - `cluster`: pairwise line intersections merged into multi-line clusters.
//! - `snap`: what a cursor position attaches to.
//! - `matroid`: rank, closure, bases, circuits and flats over the points.
//!
//! Derived state (clusters, snap results, matroid data) is always recomputed
//! from the current snapshot; nothing is cached across mutations.

pub mod api;
pub mod cluster;
pub mod matroid;
pub mod model;
pub mod sample;
pub mod snap;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use model::{Configuration, IncidenceCfg};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::matroid::{Circuit, Flat, LeviCode, Matroid, MatroidStats};
    pub use crate::model::{
        CompactPrecision, CompactState, Configuration, IncidenceCfg, Intersection, Line, Point,
    };
    pub use crate::snap::{SnapCfg, SnapTarget};
    pub use nalgebra::{vector, Vector2 as Vec2};
}
