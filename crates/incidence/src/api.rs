//! Curated surface for the interaction layer and the CLI.
//!
//! Mutation, query and persistence entry points in one place; the modules
//! behind them stay free to move.

// Incidence model and persistence
pub use crate::model::{
    AddedLine, CompactPrecision, CompactState, Configuration, DecodeError, IncidenceCfg,
    Intersection, Line, MovedLine, Point, PointState, RemovedLine,
};
// Clustering
pub use crate::cluster::{compute_intersections, find_cluster_for, line_intersection};
// Snapping
pub use crate::snap::{resolve_endpoint_snap, resolve_snap, SnapCfg, SnapTarget};
// Matroid
pub use crate::matroid::{Circuit, Flat, LeviCode, Matroid, MatroidStats, MAX_RANK};
// Random configurations
pub use crate::sample::{draw_configuration, ReplayToken, SampleCfg};

use nalgebra::Vector2;

/// Matroid statistics of a compact JSON configuration.
pub fn stats_from_json(json: &str, cfg: IncidenceCfg) -> Result<MatroidStats, DecodeError> {
    Ok(Configuration::from_json(json, cfg)?.matroid_stats())
}

/// Point indices within `tol` of `(x, y)`.
pub fn points_at_position(conf: &Configuration, x: f64, y: f64, tol: f64) -> Vec<usize> {
    conf.points_at(Vector2::new(x, y), tol)
}
