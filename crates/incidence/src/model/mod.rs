//! Incidence Model: points, infinite lines and derived intersection clusters.
//!
//! Purpose
//! - Own the arena of points and lines, cross-referenced by index.
//! - Keep multi-line points pinned to the cluster where their lines meet.
//! - Renumber references atomically on removal so other indices stay valid.
//!
//! Invariants
//! - A point with `on_lines.len() >= 2` and a matching cluster sits exactly
//!   at that cluster's position.
//! - Clusters are never edited; they are recomputed from the lines after
//!   every mutation that touches lines or membership.
//!
//! Code cross-refs: `cluster::compute_intersections`, `snap`, `matroid::Matroid`

mod compact;
mod configuration;
pub mod types;

pub use compact::{CompactPrecision, CompactState, DecodeError};
pub use configuration::{
    line_points, position_groups, AddedLine, Configuration, MovedLine, PointState,
    RemovedLine,
};
pub use types::{IncidenceCfg, Intersection, Line, Point, PositionKey};
