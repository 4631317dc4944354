mod util;

use mesh_weld::MeshWeldError;
use mesh_weld::algs::fuse::{fuse_points, match_points};
use mesh_weld::config::FuseConfig;
use mesh_weld::data::PointSet;
use mesh_weld::data::points::distance;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use util::{quad_patch, random_points};

#[test]
fn near_duplicate_collapses_onto_first() {
    let ps = PointSet::new(vec![[0.0, 0.0, 0.0], [1e-7, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let cfg = FuseConfig {
        tol_abs: 1e-5,
        tol_rel: 0.0,
        ..Default::default()
    };
    let fused = fuse_points(&ps, &cfg).unwrap();
    assert_eq!(fused.points.len(), 2);
    assert_eq!(fused.index, vec![0, 0, 1]);
    assert_eq!(fused.points[0], [0.0, 0.0, 0.0]);
    assert_eq!(fused.points[1], [1.0, 0.0, 0.0]);
}

#[test]
fn adjacent_patches_share_their_seam() {
    // two 3x3 patches touching along x = 3
    let (a, _) = quad_patch(3, 3, [0.0, 0.0]);
    let (b, _) = quad_patch(3, 3, [3.0, 0.0]);
    let ps = a.concat(&b);
    let fused = fuse_points(&ps, &FuseConfig::default()).unwrap();
    assert_eq!(fused.points.len(), 2 * 16 - 4);
    assert_eq!(fused.nremoved(), 4);
    // the seam nodes of the second patch map onto the first patch's nodes
    for j in 0..4 {
        assert_eq!(fused.index[16 + j * 4], fused.index[j * 4 + 3]);
    }
}

#[test]
fn coincident_cloud_is_one_point() {
    let ps = PointSet::new(vec![[2.5, -1.0, 4.0]; 50]);
    let fused = fuse_points(&ps, &FuseConfig::default()).unwrap();
    assert_eq!(fused.points.len(), 1);
    assert!(fused.index.iter().all(|&i| i == 0));
}

#[test]
fn collinear_points_do_not_blow_up_the_grid() {
    let ps = PointSet::new((0..1000).map(|i| [i as f64 * 1e-3, 0.0, 0.0]).collect());
    let fused = fuse_points(&ps, &FuseConfig::default().with_tol_rel(0.0)).unwrap();
    assert_eq!(fused.points.len(), 1000);
}

#[test]
fn repeat_pass_is_opt_in() {
    let mut rng = SmallRng::seed_from_u64(7);
    let base = random_points(3, 200, 10.0);
    let jittered: Vec<[f64; 3]> = base
        .iter()
        .map(|p| {
            [
                p[0] + rng.gen_range(-1e-4..1e-4),
                p[1] + rng.gen_range(-1e-4..1e-4),
                p[2],
            ]
        })
        .collect();
    let ps = base.concat(&PointSet::new(jittered));
    let cfg = FuseConfig::default().with_tol_abs(1e-3).with_tol_rel(0.0);
    let single = fuse_points(&ps, &cfg).unwrap();
    let repeated = fuse_points(&ps, &cfg.with_repeat(true)).unwrap();
    assert!(repeated.points.len() <= single.points.len());
    assert!(single.points.len() >= 200);
    assert_eq!(repeated.index.len(), 400);
}

#[test]
fn non_finite_input_is_rejected() {
    let ps = PointSet::new(vec![[0.0; 3], [f64::INFINITY, 0.0, 0.0]]);
    assert_eq!(
        fuse_points(&ps, &FuseConfig::default()),
        Err(MeshWeldError::NonFiniteCoordinate { point: 1 })
    );
}

#[test]
fn match_query_against_reference() {
    let reference = PointSet::new(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let query = PointSet::new(vec![[0.0, 1.0, 1e-9], [5.0, 5.0, 5.0], [1.0, 0.0, 0.0]]);
    let matched = match_points(&reference, &query, &FuseConfig::default()).unwrap();
    assert_eq!(matched, vec![Some(2), None, Some(1)]);
}

fn lattice_points() -> impl Strategy<Value = Vec<[f64; 3]>> {
    prop::collection::vec((0i32..4, 0i32..4, 0i32..3), 1..60)
        .prop_map(|v| v.into_iter().map(|(x, y, z)| [x as f64, y as f64, z as f64]).collect())
}

fn cloud() -> impl Strategy<Value = Vec<[f64; 3]>> {
    prop::collection::vec((0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0), 1..80)
        .prop_map(|v| v.into_iter().map(|(x, y, z)| [x, y, z]).collect())
}

proptest! {
    #[test]
    fn fusing_twice_changes_nothing(coords in lattice_points()) {
        let cfg = FuseConfig::default();
        let once = fuse_points(&PointSet::new(coords), &cfg).unwrap();
        let twice = fuse_points(&once.points, &cfg).unwrap();
        prop_assert_eq!(&twice.points, &once.points);
        prop_assert_eq!(twice.index, (0..once.points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn index_map_is_valid_and_within_tolerance(
        coords in cloud(),
        tol_abs in 0.0f64..0.3,
        shift in 0.0f64..0.99,
        ppc in 1usize..4,
    ) {
        let ps = PointSet::new(coords);
        let cfg = FuseConfig::default()
            .with_tol_abs(tol_abs)
            .with_shift(shift)
            .with_points_per_cell(ppc);
        let tol = cfg.tolerance(ps.diagonal());
        let fused = fuse_points(&ps, &cfg).unwrap();
        prop_assert_eq!(fused.index.len(), ps.len());
        for (i, &c) in fused.index.iter().enumerate() {
            prop_assert!(c < fused.points.len());
            prop_assert!(distance(&ps[i], &fused.points[c]) <= tol * (1.0 + 1e-12));
        }
        // every canonical point is used, in order of first appearance
        let mut seen = 0usize;
        for &c in &fused.index {
            prop_assert!(c <= seen);
            if c == seen {
                seen += 1;
            }
        }
        prop_assert_eq!(seen, fused.points.len());
    }
}
