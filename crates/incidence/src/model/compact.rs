//! Compact persistence: a point is `[x, y, onLines]`, a line is `[x, y, angle]`.
//!
//! Only positions, angles and memberships are stored. `is_intersection` and
//! `intersection` are rebuilt on decode by re-running the clusterer.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::configuration::Configuration;
use super::types::{IncidenceCfg, Line, Point};

/// Rounding applied on encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactPrecision {
    pub coord_decimals: u32,
    pub angle_decimals: u32,
}

impl Default for CompactPrecision {
    fn default() -> Self {
        Self {
            coord_decimals: 1,
            angle_decimals: 4,
        }
    }
}

/// Serialized configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompactState {
    pub points: Vec<(f64, f64, Vec<usize>)>,
    pub lines: Vec<(f64, f64, f64)>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed configuration json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("point {point} references missing line {line}")]
    DanglingLine { point: usize, line: usize },
    #[error("{what} {index} has a non-finite coordinate")]
    NonFinite { what: &'static str, index: usize },
}

#[inline]
fn round_to(v: f64, decimals: u32) -> f64 {
    let s = 10f64.powi(decimals as i32);
    (v * s).round() / s
}

impl Configuration {
    pub fn to_compact(&self, prec: CompactPrecision) -> CompactState {
        let c = prec.coord_decimals;
        CompactState {
            points: self
                .points()
                .iter()
                .map(|p| (round_to(p.pos.x, c), round_to(p.pos.y, c), p.on_lines.clone()))
                .collect(),
            lines: self
                .lines()
                .iter()
                .map(|l| {
                    (
                        round_to(l.anchor.x, c),
                        round_to(l.anchor.y, c),
                        round_to(l.angle, prec.angle_decimals),
                    )
                })
                .collect(),
        }
    }

    /// Rebuild a configuration, then recluster and re-pin.
    pub fn from_compact(state: &CompactState, cfg: IncidenceCfg) -> Result<Self, DecodeError> {
        let mut lines = Vec::with_capacity(state.lines.len());
        for (index, &(x, y, angle)) in state.lines.iter().enumerate() {
            if !(x.is_finite() && y.is_finite() && angle.is_finite()) {
                return Err(DecodeError::NonFinite {
                    what: "line",
                    index,
                });
            }
            lines.push(Line::new(Vector2::new(x, y), angle));
        }
        let mut points = Vec::with_capacity(state.points.len());
        for (index, (x, y, on_lines)) in state.points.iter().enumerate() {
            if !(x.is_finite() && y.is_finite()) {
                return Err(DecodeError::NonFinite {
                    what: "point",
                    index,
                });
            }
            if let Some(&line) = on_lines.iter().find(|&&l| l >= lines.len()) {
                return Err(DecodeError::DanglingLine { point: index, line });
            }
            points.push(Point::new(Vector2::new(*x, *y), on_lines.clone()));
        }
        Ok(Self::from_parts(cfg, points, lines))
    }

    pub fn to_json(&self, prec: CompactPrecision) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_compact(prec))
    }

    pub fn from_json(s: &str, cfg: IncidenceCfg) -> Result<Self, DecodeError> {
        let state: CompactState = serde_json::from_str(s)?;
        Self::from_compact(&state, cfg)
    }
}
