//! Random configurations (replayable draws for benches, tests and the CLI).
//!
//! Model
//! - Draw `lines` lines with anchors uniform in `[-extent, extent]²` and
//!   angles uniform in `[0, π)`.
//! - Each point is then, by share: a copy of an existing point's position
//!   (a multipoint), a point pinned to a random crossing, a point on one random
//!   line, or a free point.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{Configuration, IncidenceCfg};

/// Sampler configuration. Shares are probabilities checked in order; the rest
/// of the mass goes to free points.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    pub lines: usize,
    pub points: usize,
    pub extent: f64,
    pub coincident_share: f64,
    pub intersection_share: f64,
    pub line_share: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            lines: 4,
            points: 8,
            extent: 10.0,
            coincident_share: 0.1,
            intersection_share: 0.4,
            line_share: 0.3,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a configuration; the same `(cfg, tok)` always yields the same result.
pub fn draw_configuration(cfg: SampleCfg, inc: IncidenceCfg, tok: ReplayToken) -> Configuration {
    let mut rng = tok.to_std_rng();
    let e = cfg.extent.abs().max(1e-9);
    let mut conf = Configuration::with_cfg(inc);
    for _ in 0..cfg.lines {
        let anchor = Vector2::new(rng.gen_range(-e..=e), rng.gen_range(-e..=e));
        conf.add_line(anchor, rng.gen_range(0.0..std::f64::consts::PI));
    }
    for _ in 0..cfg.points {
        let roll: f64 = rng.gen();
        let mut cut = cfg.coincident_share;
        if roll < cut && !conf.points().is_empty() {
            let k = rng.gen_range(0..conf.points().len());
            let pos = conf.points()[k].pos;
            conf.add_point(pos, Vec::new());
            continue;
        }
        cut += cfg.intersection_share;
        if roll < cut && !conf.intersections().is_empty() {
            let k = rng.gen_range(0..conf.intersections().len());
            let cluster = conf.intersections()[k].clone();
            conf.add_point(cluster.pos, cluster.lines);
            continue;
        }
        cut += cfg.line_share;
        if roll < cut && !conf.lines().is_empty() {
            let l = rng.gen_range(0..conf.lines().len());
            let line = conf.lines()[l];
            let pos = line.anchor + line.direction() * rng.gen_range(-e..=e);
            conf.add_point(pos, vec![l]);
            continue;
        }
        conf.add_point(
            Vector2::new(rng.gen_range(-e..=e), rng.gen_range(-e..=e)),
            Vec::new(),
        );
    }
    tracing::debug!(
        seed = tok.seed,
        index = tok.index,
        points = conf.points().len(),
        lines = conf.lines().len(),
        "configuration drawn"
    );
    conf
}
