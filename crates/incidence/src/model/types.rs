//! Basic incidence types and the tolerances they are compared with.
//!
//! - `IncidenceCfg`: centralizes the parallel test, clustering radius and the
//!   rounding precision that decides coincidence.
//! - `Point`, `Line`, `Intersection`: arena elements, cross-referenced by index.
//!
//! Code cross-refs: `model::Configuration`, `cluster::compute_intersections`

use nalgebra::Vector2;

/// Incidence tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IncidenceCfg {
    /// Two lines are parallel when `|d1 × d2| < eps_parallel` for unit directions.
    pub eps_parallel: f64,
    /// Pairwise intersections closer than this merge into one cluster.
    pub cluster_tol: f64,
    /// Decimal places kept when grouping points into multipoints.
    pub position_decimals: u32,
}

impl Default for IncidenceCfg {
    fn default() -> Self {
        Self {
            eps_parallel: 1e-4,
            cluster_tol: 0.1,
            position_decimals: 1,
        }
    }
}

impl IncidenceCfg {
    /// Rounded integer key for a position; equal keys mean coincident points.
    #[inline]
    pub fn position_key(&self, p: Vector2<f64>) -> PositionKey {
        let scale = 10f64.powi(self.position_decimals as i32);
        PositionKey((p.x * scale).round() as i64, (p.y * scale).round() as i64)
    }
}

/// Rounded position, used to group coincident points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(pub i64, pub i64);

/// A point of the configuration.
///
/// Invariants (maintained by `Configuration`):
/// - `on_lines` is sorted, deduplicated and only names existing lines.
/// - `intersection` is `Some` only when `on_lines.len() >= 2`, and then
///   `pos` equals that cluster's position.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub pos: Vector2<f64>,
    pub on_lines: Vec<usize>,
    pub intersection: Option<usize>,
}

impl Point {
    pub fn new(pos: Vector2<f64>, mut on_lines: Vec<usize>) -> Self {
        on_lines.sort_unstable();
        on_lines.dedup();
        Self {
            pos,
            on_lines,
            intersection: None,
        }
    }

    /// Declared to lie on more than one line.
    #[inline]
    pub fn is_intersection(&self) -> bool {
        self.on_lines.len() > 1
    }

    #[inline]
    pub fn lies_on(&self, line: usize) -> bool {
        self.on_lines.binary_search(&line).is_ok()
    }
}

/// Infinite line through `anchor` with direction angle `angle` (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub anchor: Vector2<f64>,
    pub angle: f64,
}

impl Line {
    #[inline]
    pub fn new(anchor: Vector2<f64>, angle: f64) -> Self {
        Self { anchor, angle }
    }

    /// Line through `a` and `b`; `None` when the two positions coincide.
    pub fn through(a: Vector2<f64>, b: Vector2<f64>) -> Option<Self> {
        let d = b - a;
        if !(d.norm() > 0.0) {
            return None;
        }
        Some(Self::new(a, d.y.atan2(d.x)))
    }

    /// Unit direction vector.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.angle.cos(), self.angle.sin())
    }

    /// Foot of the perpendicular from `p`.
    #[inline]
    pub fn project(&self, p: Vector2<f64>) -> Vector2<f64> {
        let d = self.direction();
        self.anchor + d * d.dot(&(p - self.anchor))
    }

    /// Perpendicular (unsigned) distance from `p`.
    #[inline]
    pub fn distance_to(&self, p: Vector2<f64>) -> f64 {
        cross(self.direction(), p - self.anchor).abs()
    }
}

/// Cluster of pairwise line intersections: ≥2 lines meeting near `pos`.
#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    pub pos: Vector2<f64>,
    /// Sorted, deduplicated.
    pub lines: Vec<usize>,
}

impl Intersection {
    /// True when every line in `lines` (sorted) passes through this cluster.
    pub fn contains_all(&self, lines: &[usize]) -> bool {
        lines.iter().all(|l| self.lines.binary_search(l).is_ok())
    }
}

/// z-component of the 2D cross product.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
