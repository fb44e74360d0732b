//! Subcommand bodies. File IO and error context live here; `main` only parses
//! flags and prints.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use incidence::api::{
    draw_configuration, CompactPrecision, Configuration, IncidenceCfg, MatroidStats, ReplayToken,
    SampleCfg, SnapCfg, SnapTarget,
};
use incidence::Vec2;

#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: MatroidStats,
    /// Display form of the Levi code, e.g. `(9_3 9_3)`.
    pub levi_code: String,
}

fn load(input: &str, inc: IncidenceCfg) -> Result<Configuration> {
    let json = std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    let conf = Configuration::from_json(&json, inc).with_context(|| format!("decoding {input}"))?;
    tracing::info!(
        input,
        points = conf.points().len(),
        lines = conf.lines().len(),
        intersections = conf.intersections().len(),
        "configuration loaded"
    );
    Ok(conf)
}

fn store(conf: &Configuration, out: &str) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = conf.to_json(CompactPrecision::default())?;
    std::fs::write(out_path, json).with_context(|| format!("writing {out}"))?;
    tracing::info!(out, "configuration written");
    Ok(())
}

pub fn stats(input: &str, inc: IncidenceCfg) -> Result<StatsReport> {
    let stats = load(input, inc)?.matroid_stats();
    let levi_code = stats.levi.to_string();
    Ok(StatsReport { stats, levi_code })
}

pub fn snap(
    input: &str,
    inc: IncidenceCfg,
    x: f64,
    y: f64,
    scale: f64,
    cfg: &SnapCfg,
) -> Result<Option<SnapTarget>> {
    let conf = load(input, inc)?;
    let target = conf.resolve_snap(Vec2::new(x, y), scale, cfg);
    tracing::info!(x, y, scale, target = ?target, "snap");
    Ok(target)
}

pub fn normalize(input: &str, out: &str, inc: IncidenceCfg) -> Result<()> {
    let conf = load(input, inc)?;
    store(&conf, out)
}

pub fn random(
    lines: usize,
    points: usize,
    seed: u64,
    index: u64,
    out: &str,
    inc: IncidenceCfg,
) -> Result<()> {
    let cfg = SampleCfg {
        lines,
        points,
        ..SampleCfg::default()
    };
    let conf = draw_configuration(cfg, inc, ReplayToken::new(seed, index));
    store(&conf, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r#"{"points":[[0.0,0.0,[0,2]],[4.0,0.0,[0,1]],[0.0,3.0,[1,2]]],"lines":[[0.0,0.0,0.0],[4.0,0.0,2.4981],[0.0,0.0,1.5708]]}"#;

    fn write_input(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("in.json");
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn stats_reports_levi_code() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, TRIANGLE);
        let report = stats(&input, IncidenceCfg::default()).unwrap();
        assert_eq!(report.stats.rank, 3);
        assert_eq!(report.stats.bases, vec![vec![0, 1, 2]]);
        assert_eq!(report.levi_code, "(3_2 3_2)");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rank"], 3);
        assert_eq!(json["levi_code"], "(3_2 3_2)");
    }

    #[test]
    fn snap_prefers_points() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, TRIANGLE);
        let target = snap(
            &input,
            IncidenceCfg::default(),
            3.9,
            0.05,
            10.0,
            &SnapCfg::default(),
        )
        .unwrap();
        assert_eq!(target, Some(SnapTarget::Point { index: 1 }));
        let none = snap(
            &input,
            IncidenceCfg::default(),
            3.9,
            0.05,
            0.0,
            &SnapCfg::default(),
        )
        .unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn normalize_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, TRIANGLE);
        let once = dir.path().join("out/once.json");
        let once = once.to_string_lossy().into_owned();
        let twice = dir.path().join("out/twice.json");
        let twice = twice.to_string_lossy().into_owned();
        normalize(&input, &once, IncidenceCfg::default()).unwrap();
        normalize(&once, &twice, IncidenceCfg::default()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&once).unwrap(),
            std::fs::read_to_string(&twice).unwrap()
        );
    }

    #[test]
    fn random_replays_by_seed() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json").to_string_lossy().into_owned();
        let b = dir.path().join("b.json").to_string_lossy().into_owned();
        random(3, 6, 42, 0, &a, IncidenceCfg::default()).unwrap();
        random(3, 6, 42, 0, &b, IncidenceCfg::default()).unwrap();
        let body = std::fs::read_to_string(&a).unwrap();
        assert_eq!(body, std::fs::read_to_string(&b).unwrap());
        let conf = Configuration::from_json(&body, IncidenceCfg::default()).unwrap();
        assert_eq!(conf.lines().len(), 3);
        assert_eq!(conf.points().len(), 6);
    }

    #[test]
    fn missing_and_malformed_inputs_fail() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json").to_string_lossy().into_owned();
        assert!(stats(&missing, IncidenceCfg::default()).is_err());
        let bad = write_input(&dir, r#"{"points":[[0.0,0.0,[3]]],"lines":[]}"#);
        let err = stats(&bad, IncidenceCfg::default()).unwrap_err();
        assert!(format!("{err:#}").contains("missing line 3"));
    }
}
