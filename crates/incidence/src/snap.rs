//! Snap resolution: what a cursor position attaches to.
//!
//! Radii are given in screen pixels and divided by the zoom `scale` at query
//! time, so the perceived radius is constant on screen.
//!
//! Cursor mode (`resolve_snap`), first tier with a hit wins:
//! 1. existing point within `point_px`
//! 2. intersection cluster within `intersection_px`
//! 3. perpendicular foot on a line within `line_px`
//!
//! Inside a tier the nearest candidate wins, ties going to the lower index.
//!
//! Endpoint mode (`resolve_endpoint_snap`) is used while drawing a line from
//! `start` toward the cursor: candidates qualify by their perpendicular
//! distance to that line, and the winner is the one nearest the cursor along it.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::model::types::{Intersection, Line, Point};
use crate::model::Configuration;

/// Screen-space snap radii.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapCfg {
    pub point_px: f64,
    pub intersection_px: f64,
    pub line_px: f64,
    /// Plane-unit distance under which an endpoint candidate counts as the start point.
    pub coincident_tol: f64,
}

impl Default for SnapCfg {
    fn default() -> Self {
        Self {
            point_px: 15.0,
            intersection_px: 15.0,
            line_px: 30.0,
            coincident_tol: 1e-6,
        }
    }
}

/// Attachment target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SnapTarget {
    Point {
        index: usize,
    },
    Intersection {
        index: usize,
    },
    Line {
        index: usize,
        projected_x: f64,
        projected_y: f64,
    },
}

impl SnapTarget {
    /// Plane position the target stands for.
    pub fn position(
        &self,
        points: &[Point],
        intersections: &[Intersection],
    ) -> Option<Vector2<f64>> {
        match *self {
            SnapTarget::Point { index } => points.get(index).map(|p| p.pos),
            SnapTarget::Intersection { index } => intersections.get(index).map(|c| c.pos),
            SnapTarget::Line {
                projected_x,
                projected_y,
                ..
            } => Some(Vector2::new(projected_x, projected_y)),
        }
    }
}

/// Index and distance of the nearest item within `radius`, ties to the lower index.
fn nearest_within<I>(items: I, radius: f64) -> Option<(usize, f64)>
where
    I: Iterator<Item = (usize, f64)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (k, d) in items {
        if d > radius {
            continue;
        }
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((k, d)),
        }
    }
    best
}

#[inline]
fn usable_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}

/// Cursor-mode snap at plane position `q` under zoom `scale`.
pub fn resolve_snap(
    q: Vector2<f64>,
    points: &[Point],
    lines: &[Line],
    intersections: &[Intersection],
    scale: f64,
    cfg: &SnapCfg,
) -> Option<SnapTarget> {
    if !usable_scale(scale) {
        return None;
    }
    let point_r = cfg.point_px / scale;
    if let Some((index, _)) = nearest_within(
        points.iter().map(|p| (p.pos - q).norm()).enumerate(),
        point_r,
    ) {
        return Some(SnapTarget::Point { index });
    }

    let inter_r = cfg.intersection_px / scale;
    if let Some((index, _)) = nearest_within(
        intersections.iter().map(|c| (c.pos - q).norm()).enumerate(),
        inter_r,
    ) {
        return Some(SnapTarget::Intersection { index });
    }

    let line_r = cfg.line_px / scale;
    let (index, _) = nearest_within(
        lines.iter().map(|l| l.distance_to(q)).enumerate(),
        line_r,
    )?;
    let foot = lines[index].project(q);
    Some(SnapTarget::Line {
        index,
        projected_x: foot.x,
        projected_y: foot.y,
    })
}

/// Endpoint-mode snap while drawing the line `start → cursor`.
///
/// Points qualify within `point_px`, clusters within `intersection_px`, both
/// measured perpendicular to the line being drawn. Candidates within
/// `coincident_tol` of any position in `excluded` (the line's own start
/// points) are skipped. Among qualifiers the one nearest the cursor along
/// the line wins; on equal distance points beat clusters.
pub fn resolve_endpoint_snap(
    start: Vector2<f64>,
    cursor: Vector2<f64>,
    excluded: &[Vector2<f64>],
    points: &[Point],
    intersections: &[Intersection],
    scale: f64,
    cfg: &SnapCfg,
) -> Option<SnapTarget> {
    if !usable_scale(scale) {
        return None;
    }
    let drawn = Line::through(start, cursor)?;
    let dir = drawn.direction();
    let t_cursor = dir.dot(&(cursor - start));
    let is_excluded = |p: Vector2<f64>| {
        excluded
            .iter()
            .any(|e| (e - p).norm() <= cfg.coincident_tol)
    };
    let along = |p: Vector2<f64>| (dir.dot(&(p - start)) - t_cursor).abs();

    let point_r = cfg.point_px / scale;
    let best_point = nearest_within(
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| !is_excluded(p.pos) && drawn.distance_to(p.pos) <= point_r)
            .map(|(k, p)| (k, along(p.pos))),
        f64::INFINITY,
    );

    let inter_r = cfg.intersection_px / scale;
    let best_inter = nearest_within(
        intersections
            .iter()
            .enumerate()
            .filter(|(_, c)| !is_excluded(c.pos) && drawn.distance_to(c.pos) <= inter_r)
            .map(|(k, c)| (k, along(c.pos))),
        f64::INFINITY,
    );

    match (best_point, best_inter) {
        (Some((p, dp)), Some((_, di))) if dp <= di => Some(SnapTarget::Point { index: p }),
        (_, Some((c, _))) => Some(SnapTarget::Intersection { index: c }),
        (Some((p, _)), None) => Some(SnapTarget::Point { index: p }),
        (None, None) => None,
    }
}

impl Configuration {
    /// Cursor-mode snap against this configuration.
    pub fn resolve_snap(&self, q: Vector2<f64>, scale: f64, cfg: &SnapCfg) -> Option<SnapTarget> {
        resolve_snap(
            q,
            self.points(),
            self.lines(),
            self.intersections(),
            scale,
            cfg,
        )
    }

    /// Endpoint-mode snap against this configuration.
    pub fn resolve_endpoint_snap(
        &self,
        start: Vector2<f64>,
        cursor: Vector2<f64>,
        excluded: &[Vector2<f64>],
        scale: f64,
        cfg: &SnapCfg,
    ) -> Option<SnapTarget> {
        resolve_endpoint_snap(
            start,
            cursor,
            excluded,
            self.points(),
            self.intersections(),
            scale,
            cfg,
        )
    }
}
