//! The mutable incidence arena: points, lines and their derived clusters.
//!
//! Every operation that touches lines or line membership ends with
//! `refresh`, which recomputes all clusters from the current lines and
//! re-pins multi-line points. Nothing derived survives a mutation.

use nalgebra::Vector2;

use super::types::{IncidenceCfg, Intersection, Line, Point};
use crate::cluster::{compute_intersections, find_cluster_for};

/// Prior state of one point, recorded so a mutation can be reverted.
#[derive(Clone, Debug, PartialEq)]
pub struct PointState {
    pub index: usize,
    pub pos: Vector2<f64>,
    pub on_lines: Vec<usize>,
}

/// Undo record for `add_line` and `add_line_through`: the new index and the
/// prior state of every point whose membership or position changed.
#[derive(Clone, Debug, PartialEq)]
pub struct AddedLine {
    pub index: usize,
    pub moved_points: Vec<PointState>,
}

/// Undo record for `remove_line`: the line, the points that lost it and the
/// points whose cluster moved. `affected[*].on_lines` are in the numbering
/// before removal.
#[derive(Clone, Debug, PartialEq)]
pub struct RemovedLine {
    pub index: usize,
    pub line: Line,
    pub affected: Vec<PointState>,
}

/// Undo record for `move_line`: the previous line and every point it dragged
/// along, directly or through a re-pin.
#[derive(Clone, Debug, PartialEq)]
pub struct MovedLine {
    pub index: usize,
    pub prior: Line,
    pub moved_points: Vec<PointState>,
}

/// Points, lines and intersection clusters of one planar configuration.
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    cfg: IncidenceCfg,
    points: Vec<Point>,
    lines: Vec<Line>,
    intersections: Vec<Intersection>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: IncidenceCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn cfg(&self) -> &IncidenceCfg {
        &self.cfg
    }
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
    #[inline]
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }
    #[inline]
    pub fn point(&self, i: usize) -> Option<&Point> {
        self.points.get(i)
    }
    #[inline]
    pub fn line(&self, i: usize) -> Option<&Line> {
        self.lines.get(i)
    }

    fn valid_lines(&self, on_lines: &[usize]) -> bool {
        on_lines.iter().all(|&l| l < self.lines.len())
    }

    /// Add a point at `pos` declared on `on_lines`. Returns its index, or `None`
    /// if a line index is out of range. Points on ≥2 lines are pinned to the
    /// matching cluster.
    pub fn add_point(&mut self, pos: Vector2<f64>, on_lines: Vec<usize>) -> Option<usize> {
        if !self.valid_lines(&on_lines) {
            tracing::debug!(?on_lines, "add_point: unknown line");
            return None;
        }
        self.points.push(Point::new(pos, on_lines));
        self.refresh();
        Some(self.points.len() - 1)
    }

    /// Add an infinite line. Pinned points follow their cluster if the new
    /// line merges into it.
    pub fn add_line(&mut self, anchor: Vector2<f64>, angle: f64) -> AddedLine {
        let before = self.points.clone();
        self.lines.push(Line::new(anchor, angle));
        self.refresh();
        AddedLine {
            index: self.lines.len() - 1,
            moved_points: self.changed_since(&before, |_| false),
        }
    }

    /// Add the line through points `a` and `b` and put both points on it.
    /// `None` if an index is invalid or the two points coincide.
    pub fn add_line_through(&mut self, a: usize, b: usize) -> Option<AddedLine> {
        let pa = self.points.get(a)?.pos;
        let pb = self.points.get(b)?.pos;
        let line = Line::through(pa, pb)?;
        if self.cfg.position_key(pa) == self.cfg.position_key(pb) {
            return None;
        }
        let before = self.points.clone();
        let idx = self.lines.len();
        self.lines.push(line);
        for k in [a, b] {
            let p = &mut self.points[k];
            if let Err(at) = p.on_lines.binary_search(&idx) {
                p.on_lines.insert(at, idx);
            }
        }
        self.refresh();
        Some(AddedLine {
            index: idx,
            moved_points: self.changed_since(&before, |k| k == a || k == b),
        })
    }

    /// Remove point `i`; later points shift down by one. Returns the removed point.
    pub fn remove_point(&mut self, i: usize) -> Option<Point> {
        if i >= self.points.len() {
            return None;
        }
        let p = self.points.remove(i);
        tracing::debug!(index = i, "point removed");
        Some(p)
    }

    /// Remove line `i`: drop it from every point's membership and renumber
    /// references above `i`.
    pub fn remove_line(&mut self, i: usize) -> Option<RemovedLine> {
        if i >= self.lines.len() {
            return None;
        }
        let before = self.points.clone();
        let line = self.lines.remove(i);
        for p in self.points.iter_mut() {
            p.on_lines.retain(|&l| l != i);
            for l in p.on_lines.iter_mut() {
                if *l > i {
                    *l -= 1;
                }
            }
        }
        self.refresh();
        let affected = self.changed_since(&before, |k| before[k].lies_on(i));
        tracing::debug!(index = i, affected = affected.len(), "line removed");
        Some(RemovedLine {
            index: i,
            line,
            affected,
        })
    }

    /// Insert `line` at index `i`, shifting references at or above `i` up.
    /// Returns the prior state of points that moved, `None` if `i` is past the end.
    pub fn insert_line(&mut self, i: usize, line: Line) -> Option<Vec<PointState>> {
        if i > self.lines.len() {
            return None;
        }
        let before = self.points.clone();
        self.lines.insert(i, line);
        for p in self.points.iter_mut() {
            for l in p.on_lines.iter_mut() {
                if *l >= i {
                    *l += 1;
                }
            }
        }
        self.refresh();
        Some(self.changed_since(&before, |_| false))
    }

    /// Replace the line membership of point `i`. Returns the point's prior state.
    pub fn update_point_lines(&mut self, i: usize, on_lines: Vec<usize>) -> Option<PointState> {
        if i >= self.points.len() || !self.valid_lines(&on_lines) {
            return None;
        }
        let prior = PointState {
            index: i,
            pos: self.points[i].pos,
            on_lines: self.points[i].on_lines.clone(),
        };
        self.points[i].on_lines = Point::new(prior.pos, on_lines).on_lines;
        self.refresh();
        Some(prior)
    }

    /// Put points back into recorded states (position and membership), then
    /// re-pin. `false` and no change if any index or line is out of range.
    pub fn restore_points(&mut self, states: &[PointState]) -> bool {
        let valid = states
            .iter()
            .all(|s| s.index < self.points.len() && self.valid_lines(&s.on_lines));
        if !valid {
            return false;
        }
        for s in states {
            self.points[s.index] = Point::new(s.pos, s.on_lines.clone());
        }
        self.refresh();
        true
    }

    /// Move point `i` toward `pos`. Free points move there, points on one line
    /// land on the foot of the perpendicular. Points on ≥2 lines are pinned
    /// and do not move (`None`). Returns the prior position.
    pub fn move_point(&mut self, i: usize, pos: Vector2<f64>) -> Option<Vector2<f64>> {
        let p = self.points.get(i)?;
        let target = match p.on_lines.as_slice() {
            [] => pos,
            [l] => self.lines[*l].project(pos),
            _ => return None,
        };
        let prior = std::mem::replace(&mut self.points[i].pos, target);
        Some(prior)
    }

    /// Replace line `i`. Multi-line points on it are re-pinned, single-line
    /// points are projected onto the new line.
    pub fn move_line(&mut self, i: usize, anchor: Vector2<f64>, angle: f64) -> Option<MovedLine> {
        let slot = self.lines.get_mut(i)?;
        let prior = std::mem::replace(slot, Line::new(anchor, angle));
        let moved = self.lines[i];
        let before = self.points.clone();
        for p in self.points.iter_mut() {
            if p.lies_on(i) && p.on_lines.len() == 1 {
                p.pos = moved.project(p.pos);
            }
        }
        self.refresh();
        Some(MovedLine {
            index: i,
            prior,
            moved_points: self.changed_since(&before, |k| before[k].lies_on(i)),
        })
    }

    /// Indices of points within Euclidean distance `tol` of `pos`.
    pub fn points_at(&self, pos: Vector2<f64>, tol: f64) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| (p.pos - pos).norm() <= tol)
            .map(|(k, _)| k)
            .collect()
    }

    /// Indices of points declared on `line`.
    pub fn line_points(&self, line: usize) -> Vec<usize> {
        line_points(&self.points, line)
    }

    /// Coincident-position groups with ≥2 members, ordered by first index.
    pub fn multipoints(&self) -> Vec<Vec<usize>> {
        position_groups(&self.points, &self.cfg)
            .into_iter()
            .filter(|g| g.len() > 1)
            .collect()
    }

    /// Recompute clusters from the current lines and re-pin every multi-line point.
    pub(crate) fn refresh(&mut self) {
        self.intersections = compute_intersections(&self.lines, &self.cfg);
        for (k, p) in self.points.iter_mut().enumerate() {
            p.intersection = None;
            if !p.is_intersection() {
                continue;
            }
            match find_cluster_for(&self.intersections, &p.on_lines) {
                Some(c) => {
                    p.pos = self.intersections[c].pos;
                    p.intersection = Some(c);
                }
                None => {
                    tracing::warn!(
                        point = k,
                        lines = ?p.on_lines,
                        "no intersection realizes point's lines; left unpinned"
                    );
                }
            }
        }
    }

    /// Prior states of points whose position changed since `before`, plus
    /// those selected by `also`. Ascending by index.
    fn changed_since(&self, before: &[Point], also: impl Fn(usize) -> bool) -> Vec<PointState> {
        before
            .iter()
            .zip(&self.points)
            .enumerate()
            .filter(|(k, (old, new))| also(*k) || old.pos != new.pos)
            .map(|(k, (old, _))| PointState {
                index: k,
                pos: old.pos,
                on_lines: old.on_lines.clone(),
            })
            .collect()
    }

    pub(crate) fn from_parts(cfg: IncidenceCfg, points: Vec<Point>, lines: Vec<Line>) -> Self {
        let mut conf = Self {
            cfg,
            points,
            lines,
            intersections: Vec::new(),
        };
        conf.refresh();
        conf
    }
}

/// Indices of points declared on `line`.
pub fn line_points(points: &[Point], line: usize) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.lies_on(line))
        .map(|(k, _)| k)
        .collect()
}

/// All coincident-position groups (singletons included), ordered by first index;
/// members ascending.
pub fn position_groups(points: &[Point], cfg: &IncidenceCfg) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut slot = std::collections::HashMap::new();
    for (k, p) in points.iter().enumerate() {
        let key = cfg.position_key(p.pos);
        let s = *slot.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[s].push(k);
    }
    groups
}
