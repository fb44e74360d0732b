//! Intersection clustering: pairwise line intersections merged into
//! multi-line incidence points.
//!
//! Model
//! - Every unordered pair of non-parallel lines contributes exactly one
//!   pairwise intersection, tagged with the pair.
//! - Pairwise intersections closer than `cluster_tol` are joined in a
//!   union-find; each connected component becomes one `Intersection`
//!   whose line set is the union of its pairs and whose position is the
//!   centroid of its members.
//! - Output order: components by their first pairwise member (pairs enumerated
//!   as `(0,1), (0,2), .., (1,2), ..`). The result does not depend on scan order.
//!
//! Code cross-refs: `model::types::{Line, Intersection, IncidenceCfg}`

use nalgebra::Vector2;
use petgraph::unionfind::UnionFind;

use crate::model::types::{cross, IncidenceCfg, Intersection, Line};

/// Pairwise intersection tagged with the contributing line pair `(i, j)`, `i < j`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairHit {
    pub pos: Vector2<f64>,
    pub lines: (usize, usize),
}

/// Intersection of two infinite lines, or `None` when parallel
/// (`|d_a × d_b| < eps_parallel` on unit directions).
pub fn line_intersection(a: &Line, b: &Line, eps_parallel: f64) -> Option<Vector2<f64>> {
    let da = a.direction();
    let db = b.direction();
    let denom = cross(da, db);
    if !(denom.abs() >= eps_parallel) {
        return None;
    }
    let t = cross(b.anchor - a.anchor, db) / denom;
    let p = a.anchor + da * t;
    if p.x.is_finite() && p.y.is_finite() {
        Some(p)
    } else {
        None
    }
}

/// All pairwise intersections, in pair order.
pub fn pairwise_intersections(lines: &[Line], cfg: &IncidenceCfg) -> Vec<PairHit> {
    let mut hits = Vec::with_capacity(lines.len() * lines.len().saturating_sub(1) / 2);
    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            if let Some(pos) = line_intersection(&lines[i], &lines[j], cfg.eps_parallel) {
                hits.push(PairHit { pos, lines: (i, j) });
            }
        }
    }
    hits
}

/// Recompute all intersection clusters from scratch.
pub fn compute_intersections(lines: &[Line], cfg: &IncidenceCfg) -> Vec<Intersection> {
    let hits = pairwise_intersections(lines, cfg);
    if hits.is_empty() {
        return Vec::new();
    }
    let mut uf = UnionFind::<usize>::new(hits.len());
    for a in 0..hits.len() {
        for b in (a + 1)..hits.len() {
            if (hits[a].pos - hits[b].pos).norm() < cfg.cluster_tol {
                uf.union(a, b);
            }
        }
    }
    let labels = uf.into_labeling();

    // root label -> output slot, assigned in order of first appearance
    let mut slot_of_root: Vec<Option<usize>> = vec![None; hits.len()];
    let mut sums: Vec<(Vector2<f64>, usize)> = Vec::new();
    let mut out: Vec<Intersection> = Vec::new();
    for (k, hit) in hits.iter().enumerate() {
        let root = labels[k];
        let slot = match slot_of_root[root] {
            Some(s) => s,
            None => {
                let s = out.len();
                slot_of_root[root] = Some(s);
                out.push(Intersection {
                    pos: Vector2::zeros(),
                    lines: Vec::new(),
                });
                sums.push((Vector2::zeros(), 0));
                s
            }
        };
        let (i, j) = hit.lines;
        out[slot].lines.push(i);
        out[slot].lines.push(j);
        sums[slot].0 += hit.pos;
        sums[slot].1 += 1;
    }
    for (cluster, (sum, n)) in out.iter_mut().zip(sums) {
        cluster.pos = sum / n as f64;
        cluster.lines.sort_unstable();
        cluster.lines.dedup();
    }
    tracing::debug!(
        lines = lines.len(),
        pairs = hits.len(),
        clusters = out.len(),
        "intersections recomputed"
    );
    out
}

/// Cluster for a point declared on `on_lines` (sorted, ≥2 entries).
///
/// An exact line-set match wins; otherwise the first cluster whose line set
/// is a superset (the point lies on a subset of the lines crossing there).
pub fn find_cluster_for(intersections: &[Intersection], on_lines: &[usize]) -> Option<usize> {
    if on_lines.len() < 2 {
        return None;
    }
    intersections
        .iter()
        .position(|c| c.lines == on_lines)
        .or_else(|| intersections.iter().position(|c| c.contains_all(on_lines)))
}
