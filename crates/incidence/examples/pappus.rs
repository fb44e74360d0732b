//! Pappus configuration (9_3): build it through the mutation API and report
//! its matroid statistics with timings.
//!
//! Two rows of three points, the six cross joins, and the three cross
//! intersections, which land on one common line.

use std::time::Instant;

use incidence::cluster::find_cluster_for;
use incidence::prelude::*;

fn main() {
    let conf = pappus();
    let start = Instant::now();
    let stats = conf.matroid_stats();
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    println!(
        "points={} lines={} clusters={}",
        stats.point_count,
        stats.line_count,
        conf.intersections().len()
    );
    println!(
        "rank={} bases={} circuits={} flats={} levi={}",
        stats.rank,
        stats.bases.len(),
        stats.circuits.len(),
        stats.flats.len(),
        stats.levi
    );
    println!("stats_time_ms={elapsed:.3}");
}

fn pappus() -> Configuration {
    let mut c = Configuration::new();
    let g = c.add_line(vector![0.0, 0.0], 0.0).index;
    let h = c.add_line(vector![0.0, 3.0], 0.0).index;
    let a: Vec<usize> = [0.0, 2.0, 5.0]
        .iter()
        .map(|&x| c.add_point(vector![x, 0.0], vec![g]).expect("line g exists"))
        .collect();
    let b: Vec<usize> = [1.0, 4.0, 6.0]
        .iter()
        .map(|&x| c.add_point(vector![x, 3.0], vec![h]).expect("line h exists"))
        .collect();

    let mut cross = [[0usize; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                cross[i][j] = c
                    .add_line_through(a[i], b[j])
                    .expect("distinct points")
                    .index;
            }
        }
    }

    let mut meets = Vec::new();
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        let mut lines = vec![cross[i][j], cross[j][i]];
        lines.sort_unstable();
        let k = find_cluster_for(c.intersections(), &lines).expect("cross joins meet");
        let pos = c.intersections()[k].pos;
        meets.push(c.add_point(pos, lines).expect("lines exist"));
    }

    let pappus_line = c
        .add_line_through(meets[0], meets[2])
        .expect("distinct meets")
        .index;
    let mut middle = c.point(meets[1]).expect("added above").on_lines.clone();
    middle.push(pappus_line);
    c.update_point_lines(meets[1], middle).expect("valid lines");
    c
}
