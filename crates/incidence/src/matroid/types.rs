//! Result types reported by the matroid engine.

use std::fmt;

use serde::Serialize;

/// Minimal dependent set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Circuit {
    /// Two points at the same position.
    Coincident { members: [usize; 2] },
    /// Three points at distinct positions on one explicit line.
    Collinear { line: usize, members: [usize; 3] },
}

impl Circuit {
    /// Members in ascending order.
    pub fn members(&self) -> &[usize] {
        match self {
            Circuit::Coincident { members } => &members[..],
            Circuit::Collinear { members, .. } => &members[..],
        }
    }
}

/// Closed set together with its rank.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Flat {
    pub rank: usize,
    pub members: Vec<usize>,
}

/// `(p_γ ℓ_π)`: every point on `gamma` lines, every line through `pi` points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LeviCode {
    Regular {
        points: usize,
        gamma: usize,
        lines: usize,
        pi: usize,
    },
    Irregular,
}

impl fmt::Display for LeviCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeviCode::Regular {
                points,
                gamma,
                lines,
                pi,
            } => write!(f, "({points}_{gamma} {lines}_{pi})"),
            LeviCode::Irregular => f.write_str("irregular"),
        }
    }
}

/// Summary reported to a stats panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatroidStats {
    pub rank: usize,
    pub bases: Vec<Vec<usize>>,
    pub circuits: Vec<Circuit>,
    pub flats: Vec<Flat>,
    pub point_count: usize,
    pub line_count: usize,
    pub levi: LeviCode,
}
