//! Rank, independence, closure and enumeration over one snapshot.
//!
//! Dependency comes from two sources only:
//! - coincidence: points whose rounded positions agree;
//! - explicit collinearity: points incident to one common line.
//!
//! A point is incident to a line when it is declared on it or coincides with
//! a point declared on it. Geometric collinearity without a declared line is
//! not a dependency. Rank is bounded by 3.
//!
//! Subset queries (`rank_of`, `is_independent`, `closure`, `is_flat`) take
//! subsets of the ground set: indices at or past `ground_set_len()` are
//! filtered out before evaluation, so `rank_of(&[0, 99])` on a two-point
//! ground set is `rank_of(&[0])`. Callers that need to reject such input
//! check it against `ground_set_len()` first.

use std::collections::BTreeSet;

use itertools::Itertools;

use super::types::{Circuit, Flat, LeviCode, MatroidStats};
use crate::model::types::{IncidenceCfg, Line, Point};
use crate::model::{position_groups, Configuration};

/// Rank bound of the plane.
pub const MAX_RANK: usize = 3;

/// Read-only matroid over the point indices of one configuration snapshot.
#[derive(Clone, Debug)]
pub struct Matroid<'a> {
    points: &'a [Point],
    line_count: usize,
    /// line -> incident points, coincident partners included (ascending)
    line_sets: Vec<Vec<usize>>,
    /// point -> position group id
    group_of: Vec<usize>,
    /// position groups, ascending members, ordered by first member
    groups: Vec<Vec<usize>>,
}

impl<'a> Matroid<'a> {
    pub fn new(points: &'a [Point], lines: &[Line], cfg: &IncidenceCfg) -> Self {
        let groups = position_groups(points, cfg);
        let mut group_of = vec![0; points.len()];
        for (g, members) in groups.iter().enumerate() {
            for &k in members {
                group_of[k] = g;
            }
        }
        let mut line_sets: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); lines.len()];
        for (k, p) in points.iter().enumerate() {
            for &l in &p.on_lines {
                if let Some(set) = line_sets.get_mut(l) {
                    set.extend(groups[group_of[k]].iter().copied());
                }
            }
        }
        let line_sets = line_sets
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect();
        Self {
            points,
            line_count: lines.len(),
            line_sets,
            group_of,
            groups,
        }
    }

    #[inline]
    pub fn ground_set_len(&self) -> usize {
        self.points.len()
    }

    /// Sorted, deduplicated, in-range copy of `subset`.
    fn normalize(&self, subset: &[usize]) -> Vec<usize> {
        let mut s: Vec<usize> = subset
            .iter()
            .copied()
            .filter(|&k| k < self.points.len())
            .collect();
        s.sort_unstable();
        s.dedup();
        s
    }

    fn distinct_positions(&self, s: &[usize]) -> usize {
        s.iter()
            .map(|&k| self.group_of[k])
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Some explicit line is incident to every member of `s`.
    fn on_common_line(&self, s: &[usize]) -> bool {
        !s.is_empty()
            && self
                .line_sets
                .iter()
                .any(|set| s.iter().all(|k| set.binary_search(k).is_ok()))
    }

    /// Rank of `subset`.
    pub fn rank_of(&self, subset: &[usize]) -> usize {
        let s = self.normalize(subset);
        match self.distinct_positions(&s) {
            0 => 0,
            1 => 1,
            2 => 2,
            _ if self.on_common_line(&s) => 2,
            _ => MAX_RANK,
        }
    }

    /// Rank of the whole ground set.
    pub fn rank(&self) -> usize {
        let all: Vec<usize> = (0..self.points.len()).collect();
        self.rank_of(&all)
    }

    /// No two members coincide, and no three share an explicit line.
    pub fn is_independent(&self, subset: &[usize]) -> bool {
        let s = self.normalize(subset);
        if s.len() > MAX_RANK || self.distinct_positions(&s) < s.len() {
            return false;
        }
        !(s.len() == MAX_RANK && self.on_common_line(&s))
    }

    /// Smallest flat containing `subset`, ascending.
    ///
    /// A rank-3 set is returned as is. Otherwise coincident partners are added,
    /// and every line meeting the set in ≥2 distinct positions contributes its
    /// whole point set, until nothing changes.
    pub fn closure(&self, subset: &[usize]) -> Vec<usize> {
        let s = self.normalize(subset);
        if self.rank_of(&s) == MAX_RANK {
            return s;
        }
        let mut set: BTreeSet<usize> = BTreeSet::new();
        for &k in &s {
            set.extend(self.groups[self.group_of[k]].iter().copied());
        }
        loop {
            let mut grew = false;
            for line in &self.line_sets {
                let touched: BTreeSet<usize> = line
                    .iter()
                    .filter(|&&k| set.contains(&k))
                    .map(|&k| self.group_of[k])
                    .collect();
                if touched.len() < 2 {
                    continue;
                }
                for &k in line {
                    for &m in &self.groups[self.group_of[k]] {
                        grew |= set.insert(m);
                    }
                }
            }
            if !grew {
                break;
            }
        }
        set.into_iter().collect()
    }

    /// Closed under `closure`; the only rank-3 flat is the whole ground set.
    pub fn is_flat(&self, subset: &[usize]) -> bool {
        let s = self.normalize(subset);
        if self.rank_of(&s) == MAX_RANK {
            return s.len() == self.points.len();
        }
        self.closure(&s) == s
    }

    /// All independent sets of size `rank()`, lexicographic.
    ///
    /// Brute force over `C(n, rank)` combinations; callers bound `n`.
    pub fn bases(&self) -> Vec<Vec<usize>> {
        let r = self.rank();
        if r == 0 {
            return Vec::new();
        }
        (0..self.points.len())
            .combinations(r)
            .filter(|c| self.is_independent(c))
            .collect()
    }

    /// Coincident pairs, then collinear triples of incident points per line
    /// (skipping triples that contain a coincident pair).
    pub fn circuits(&self) -> Vec<Circuit> {
        let mut out = Vec::new();
        for g in &self.groups {
            for pair in g.iter().copied().combinations(2) {
                out.push(Circuit::Coincident {
                    members: [pair[0], pair[1]],
                });
            }
        }
        let mut seen: BTreeSet<[usize; 3]> = BTreeSet::new();
        for (line, set) in self.line_sets.iter().enumerate() {
            if set.len() < 3 {
                continue;
            }
            for t in set.iter().copied().combinations(3) {
                let members = [t[0], t[1], t[2]];
                if self.distinct_positions(&members) < 3 || !seen.insert(members) {
                    continue;
                }
                out.push(Circuit::Collinear { line, members });
            }
        }
        out
    }

    /// All flats, built bottom-up by rank and sorted by size, then members.
    pub fn flats(&self) -> Vec<Flat> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let mut flats: Vec<Flat> = vec![Flat {
            rank: 0,
            members: Vec::new(),
        }];
        for g in &self.groups {
            flats.push(Flat {
                rank: 1,
                members: g.clone(),
            });
        }

        // rank 2: the closure of every pair of groups that stays below full rank
        let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
        for (a, b) in (0..self.groups.len()).tuple_combinations() {
            let members = self.closure(&[self.groups[a][0], self.groups[b][0]]);
            if self.rank_of(&members) == MAX_RANK {
                continue;
            }
            if seen.insert(members.clone()) {
                flats.push(Flat { rank: 2, members });
            }
        }

        if self.rank() == MAX_RANK {
            flats.push(Flat {
                rank: MAX_RANK,
                members: (0..self.points.len()).collect(),
            });
        }
        flats.sort_by(|x, y| {
            x.members
                .len()
                .cmp(&y.members.len())
                .then_with(|| x.members.cmp(&y.members))
        });
        flats.dedup_by(|x, y| x.members == y.members);
        flats
    }

    /// Number of lines through each point.
    pub fn point_degrees(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.on_lines.len()).collect()
    }

    /// Number of points declared on each line.
    pub fn line_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.line_count];
        for p in self.points {
            for &l in &p.on_lines {
                if let Some(d) = degrees.get_mut(l) {
                    *d += 1;
                }
            }
        }
        degrees
    }

    /// Levi code when both degree distributions are constant.
    pub fn levi_code(&self) -> LeviCode {
        let gammas = self.point_degrees();
        let pis = self.line_degrees();
        match (constant(&gammas), constant(&pis)) {
            (Some(gamma), Some(pi)) => LeviCode::Regular {
                points: gammas.len(),
                gamma,
                lines: pis.len(),
                pi,
            },
            _ => LeviCode::Irregular,
        }
    }

    pub fn stats(&self) -> MatroidStats {
        MatroidStats {
            rank: self.rank(),
            bases: self.bases(),
            circuits: self.circuits(),
            flats: self.flats(),
            point_count: self.points.len(),
            line_count: self.line_count,
            levi: self.levi_code(),
        }
    }
}

/// The shared value of a non-empty, constant slice.
fn constant(xs: &[usize]) -> Option<usize> {
    let (&first, rest) = xs.split_first()?;
    rest.iter().all(|&x| x == first).then_some(first)
}

impl Configuration {
    /// Matroid over the current snapshot.
    pub fn matroid(&self) -> Matroid<'_> {
        Matroid::new(self.points(), self.lines(), self.cfg())
    }

    /// Full statistics, recomputed on every call.
    pub fn matroid_stats(&self) -> MatroidStats {
        let stats = self.matroid().stats();
        tracing::debug!(
            rank = stats.rank,
            bases = stats.bases.len(),
            circuits = stats.circuits.len(),
            flats = stats.flats.len(),
            "matroid stats computed"
        );
        stats
    }
}
