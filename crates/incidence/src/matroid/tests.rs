use super::*;
use crate::model::{Configuration, IncidenceCfg};
use crate::sample::{draw_configuration, ReplayToken, SampleCfg};
use nalgebra::vector;
use proptest::prelude::*;

fn free_points(coords: &[(f64, f64)]) -> Configuration {
    let mut c = Configuration::new();
    for &(x, y) in coords {
        c.add_point(vector![x, y], vec![]);
    }
    c
}

/// Triangle with vertices A(0,0) B(4,0) C(0,3), each on its two sides.
fn triangle() -> Configuration {
    let mut c = free_points(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
    c.add_line_through(0, 1).unwrap();
    c.add_line_through(1, 2).unwrap();
    c.add_line_through(2, 0).unwrap();
    c
}

fn flat_members(flats: &[Flat]) -> Vec<Vec<usize>> {
    flats.iter().map(|f| f.members.clone()).collect()
}

#[test]
fn empty_ground_set() {
    let c = Configuration::new();
    let m = c.matroid();
    assert_eq!(m.rank(), 0);
    assert!(m.bases().is_empty());
    assert!(m.circuits().is_empty());
    assert!(m.flats().is_empty());
    assert!(m.is_independent(&[]));
    assert_eq!(m.levi_code(), LeviCode::Irregular);
}

#[test]
fn only_explicit_lines_make_collinear_dependencies() {
    let mut c = free_points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    {
        let m = c.matroid();
        assert!(m.is_independent(&[0, 1]));
        assert!(m.is_independent(&[1, 2]));
        assert!(m.is_independent(&[0, 1, 2]));
        assert_eq!(m.rank(), 3);
        assert!(m.circuits().is_empty());
    }
    let l = c.add_line_through(0, 2).unwrap().index;
    c.update_point_lines(1, vec![l]).unwrap();
    let m = c.matroid();
    assert!(m.is_independent(&[0, 2]));
    assert!(!m.is_independent(&[0, 1, 2]));
    assert_eq!(m.rank(), 2);
    assert_eq!(
        m.circuits(),
        vec![Circuit::Collinear {
            line: 0,
            members: [0, 1, 2]
        }]
    );
}

#[test]
fn coincident_points_form_a_circuit() {
    let c = free_points(&[(5.0, 5.0), (5.0, 5.0)]);
    let m = c.matroid();
    assert!(m.circuits().contains(&Circuit::Coincident { members: [0, 1] }));
    assert!(!m.is_independent(&[0, 1]));
    assert_eq!(m.rank(), 1);
    assert_eq!(m.bases(), vec![vec![0], vec![1]]);
    assert_eq!(flat_members(&m.flats()), vec![vec![], vec![0, 1]]);
}

#[test]
fn four_on_a_line() {
    let mut c = free_points(&[(0.0, 0.0), (3.0, 0.0)]);
    let l = c.add_line_through(0, 1).unwrap().index;
    c.add_point(vector![1.0, 0.0], vec![l]);
    c.add_point(vector![2.0, 0.0], vec![l]);
    let m = c.matroid();

    let circuits = m.circuits();
    assert_eq!(circuits.len(), 4);
    assert!(circuits
        .iter()
        .all(|c| matches!(c, Circuit::Collinear { line: 0, .. })));
    assert_eq!(m.rank(), 2);
    assert_eq!(m.bases().len(), 6);
    assert_eq!(m.closure(&[0, 1]), vec![0, 1, 2, 3]);
    assert_eq!(
        flat_members(&m.flats()),
        vec![vec![], vec![0], vec![1], vec![2], vec![3], vec![0, 1, 2, 3]]
    );
    assert_eq!(
        m.levi_code(),
        LeviCode::Regular {
            points: 4,
            gamma: 1,
            lines: 1,
            pi: 4
        }
    );
}

#[test]
fn triples_with_a_coincident_pair_are_not_minimal() {
    let mut c = free_points(&[(0.0, 0.0), (2.0, 0.0)]);
    let l = c.add_line_through(0, 1).unwrap().index;
    c.add_point(vector![1.0, 0.0], vec![l]); // 2
    c.add_point(vector![0.0, 0.0], vec![l]); // 3, coincident with 0
    let circuits = c.matroid().circuits();
    assert_eq!(
        circuits,
        vec![
            Circuit::Coincident { members: [0, 3] },
            Circuit::Collinear {
                line: 0,
                members: [0, 1, 2]
            },
            Circuit::Collinear {
                line: 0,
                members: [1, 2, 3]
            },
        ]
    );
    for circuit in &circuits {
        assert_eq!(c.matroid().rank_of(circuit.members()), circuit.members().len() - 1);
    }
}

#[test]
fn triangle_structure() {
    let c = triangle();
    let m = c.matroid();
    assert_eq!(m.rank(), 3);
    assert!(m.circuits().is_empty());
    assert_eq!(m.bases(), vec![vec![0, 1, 2]]);
    assert_eq!(m.closure(&[0, 1]), vec![0, 1]);
    assert!(m.is_flat(&[0, 2]));
    assert!(m.is_flat(&[0, 1, 2]));
    assert_eq!(
        flat_members(&m.flats()),
        vec![
            vec![],
            vec![0],
            vec![1],
            vec![2],
            vec![0, 1],
            vec![0, 2],
            vec![1, 2],
            vec![0, 1, 2]
        ]
    );
    let levi = m.levi_code();
    assert_eq!(
        levi,
        LeviCode::Regular {
            points: 3,
            gamma: 2,
            lines: 3,
            pi: 2
        }
    );
    assert_eq!(levi.to_string(), "(3_2 3_2)");
}

#[test]
fn closure_pulls_in_coincident_partners_and_lines() {
    let mut c = free_points(&[(0.0, 0.0), (1.0, 0.0)]);
    let l = c.add_line_through(0, 1).unwrap().index;
    c.add_point(vector![2.0, 0.0], vec![l]); // 2
    c.add_point(vector![0.0, 0.0], vec![]); // 3, coincident with 0, not on the line
    c.add_point(vector![5.0, 5.0], vec![]); // 4
    let m = c.matroid();
    assert_eq!(m.closure(&[3]), vec![0, 3]);
    assert_eq!(m.closure(&[3, 1]), vec![0, 1, 2, 3]);
    assert_eq!(m.closure(&[4]), vec![4]);
    // rank 3: returned as given
    assert_eq!(m.closure(&[0, 1, 4]), vec![0, 1, 4]);
    assert!(!m.is_flat(&[0, 1, 4]));
    assert!(m.is_flat(&[0, 1, 2, 3]));
    // 3 sits on the line through its coincident partner 0
    assert_eq!(m.rank_of(&[0, 1, 2, 3]), 2);
    assert!(!m.is_independent(&[1, 2, 3]));
    assert!(m.circuits().contains(&Circuit::Collinear {
        line: 0,
        members: [1, 2, 3]
    }));
    assert_eq!(m.rank_of(&[0, 1, 2]), 2);
    assert_eq!(m.rank_of(&[0, 3]), 1);
    // indices past the ground set are filtered out
    assert_eq!(m.rank_of(&[0, 99]), 1);
    assert!(m.is_independent(&[0, 99]));
    assert_eq!(m.closure(&[4, 99]), vec![4]);
}

#[test]
fn irregular_degrees() {
    let c = {
        let mut c = triangle();
        c.add_point(vector![9.0, 9.0], vec![]);
        c
    };
    let m = c.matroid();
    assert_eq!(m.point_degrees(), vec![2, 2, 2, 0]);
    assert_eq!(m.line_degrees(), vec![2, 2, 2]);
    assert_eq!(m.levi_code(), LeviCode::Irregular);
    assert_eq!(LeviCode::Irregular.to_string(), "irregular");
}

#[test]
fn stats_bundle_everything() {
    let c = triangle();
    let stats = c.matroid_stats();
    assert_eq!(stats.rank, 3);
    assert_eq!(stats.point_count, 3);
    assert_eq!(stats.line_count, 3);
    assert_eq!(stats.flats.len(), 8);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["levi"]["kind"], "regular");
    assert_eq!(json["bases"][0], serde_json::json!([0, 1, 2]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matroid_sanity(seed in any::<u64>(), index in 0u64..8) {
        let cfg = SampleCfg { lines: 4, points: 7, ..SampleCfg::default() };
        let c = draw_configuration(cfg, IncidenceCfg::default(), ReplayToken::new(seed, index));
        let m = c.matroid();
        let r = m.rank();
        prop_assert!(r <= MAX_RANK);

        for b in m.bases() {
            prop_assert_eq!(b.len(), r);
            prop_assert_eq!(m.rank_of(&b), r);
        }
        for circuit in m.circuits() {
            let s = circuit.members();
            prop_assert!(!m.is_independent(s));
            for skip in 0..s.len() {
                let sub: Vec<usize> = s.iter().enumerate()
                    .filter(|(k, _)| *k != skip)
                    .map(|(_, &v)| v)
                    .collect();
                prop_assert!(m.is_independent(&sub));
            }
        }

        let flats = m.flats();
        for f in &flats {
            prop_assert!(m.is_flat(&f.members), "not closed: {:?}", f);
            prop_assert_eq!(m.rank_of(&f.members), f.rank);
        }
        for w in flats.windows(2) {
            prop_assert!(
                (w[0].members.len(), &w[0].members) < (w[1].members.len(), &w[1].members)
            );
        }

        let n = m.ground_set_len();
        for k in 0..n {
            let cl = m.closure(&[k]);
            prop_assert!(cl.contains(&k));
            prop_assert_eq!(m.closure(&cl), cl.clone());
            let with_next: Vec<usize> = vec![k, (k + 1) % n];
            prop_assert!(m.rank_of(&[k]) <= m.rank_of(&with_next));
        }
    }
}

#[test]
fn flats_stay_closed_when_clusters_disagree() {
    // a drawn configuration whose clustering puts two lines through two
    // shared positions
    let cfg = SampleCfg {
        lines: 5,
        points: 9,
        ..SampleCfg::default()
    };
    let c = draw_configuration(cfg, IncidenceCfg::default(), ReplayToken::new(216, 5));
    let m = c.matroid();
    for f in m.flats() {
        assert!(m.is_flat(&f.members), "not closed: {f:?}");
        assert_eq!(m.rank_of(&f.members), f.rank, "wrong rank: {f:?}");
    }
}

/// Pappus: rows A on y=0 and B on y=3, cross joins A_iB_j, and the three
/// cross meets on one line.
fn pappus() -> Configuration {
    let mut c = Configuration::new();
    let g = c.add_line(vector![0.0, 0.0], 0.0).index;
    let h = c.add_line(vector![0.0, 3.0], 0.0).index;
    let a: Vec<usize> = [0.0, 2.0, 5.0]
        .iter()
        .map(|&x| c.add_point(vector![x, 0.0], vec![g]).unwrap())
        .collect();
    let b: Vec<usize> = [1.0, 4.0, 6.0]
        .iter()
        .map(|&x| c.add_point(vector![x, 3.0], vec![h]).unwrap())
        .collect();
    let mut cross = [[0usize; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                cross[i][j] = c.add_line_through(a[i], b[j]).unwrap().index;
            }
        }
    }
    let mut meets = Vec::new();
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        let mut lines = vec![cross[i][j], cross[j][i]];
        lines.sort_unstable();
        let k = crate::cluster::find_cluster_for(c.intersections(), &lines).unwrap();
        let pos = c.intersections()[k].pos;
        meets.push(c.add_point(pos, lines).unwrap());
    }
    let l = c.add_line_through(meets[0], meets[2]).unwrap().index;
    let mut middle = c.point(meets[1]).unwrap().on_lines.clone();
    middle.push(l);
    c.update_point_lines(meets[1], middle).unwrap();
    c
}

#[test]
fn pappus_is_nine_three() {
    let c = pappus();
    assert_eq!(c.points().len(), 9);
    assert_eq!(c.lines().len(), 9);
    for p in c.points() {
        assert_eq!(p.on_lines.len(), 3);
        assert!(p.intersection.is_some());
    }
    let m = c.matroid();
    assert_eq!(m.rank(), 3);
    assert_eq!(m.circuits().len(), 9);
    assert_eq!(m.bases().len(), 84 - 9);
    assert_eq!(m.levi_code().to_string(), "(9_3 9_3)");
    // 9 lines as rank-2 flats, plus 36 - 9 * 3 = 9 pairs on no common line
    let rank2 = m.flats().iter().filter(|f| f.rank == 2).count();
    assert_eq!(rank2, 18);
}
