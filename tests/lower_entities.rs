mod util;

use mesh_weld::MeshWeldError;
use mesh_weld::algs::adjacency_graph::{adjacency, invert, is_symmetric, node_adjacency};
use mesh_weld::algs::entities::extract_lower_entities;
use mesh_weld::algs::fuse::fuse_points;
use mesh_weld::algs::renumber::apply_index_map;
use mesh_weld::config::FuseConfig;
use mesh_weld::data::{ElementTable, PointSet};
use mesh_weld::topology::ElementType;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use util::{node_sets, quad_patch, tri_patch};

#[test]
fn fused_pair_reports_shared_edge_once() {
    // point 1 duplicates point 0; the second triangle uses it
    let ps = PointSet::new(vec![
        [0.0, 0.0, 0.0],
        [1e-7, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
    ]);
    let elems = ElementTable::from_rows(&[[0, 2, 3], [1, 3, 4]]).unwrap();
    let cfg = FuseConfig::default().with_tol_abs(1e-5);

    let head = fuse_points(&PointSet::new(ps.as_slice()[..3].to_vec()), &cfg).unwrap();
    assert_eq!(head.points.len(), 2);

    let fused = fuse_points(&ps, &cfg).unwrap();
    let welded = apply_index_map(&elems, &fused.index).unwrap();
    assert_eq!(welded.as_flat(), &[0, 1, 2, 0, 2, 3]);

    let edges = ElementType::Tri3.entity_pattern(1).unwrap();
    let low = extract_lower_entities(&welded, &edges).unwrap();
    assert_eq!(low.nentities(), 5);
    let owners = low.owners();
    let shared: Vec<usize> = (0..low.nentities())
        .filter(|&e| owners.degree(e) == 2)
        .collect();
    assert_eq!(shared.len(), 1);
    assert_eq!(owners.row(shared[0]), &[0, 1]);
    assert_eq!(node_sets(&low.entities.select(&shared).unwrap()), vec![vec![0, 2]]);
}

#[test]
fn quad_patch_counts() {
    let (_, quads) = quad_patch(3, 2, [0.0, 0.0]);
    let edges = extract_lower_entities(&quads, &ElementType::Quad4.entity_pattern(1).unwrap())
        .unwrap();
    // horizontal 3*3 + vertical 4*2
    assert_eq!(edges.nentities(), 17);
    let mult = edges.multiplicity();
    assert_eq!(mult.iter().filter(|&&m| m == 2).count(), 7);
    assert_eq!(mult.iter().filter(|&&m| m == 1).count(), 10);
}

#[test]
fn hexahedra_share_one_face() {
    let elems = ElementTable::from_rows(&[
        [0, 1, 4, 3, 6, 7, 10, 9],
        [1, 2, 5, 4, 7, 8, 11, 10],
    ])
    .unwrap();
    let faces = ElementType::Hex8.entity_pattern(2).unwrap();
    let low = extract_lower_entities(&elems, &faces).unwrap();
    assert_eq!(low.nentities(), 11);
    let adj = adjacency(&low.elem_entities).unwrap();
    assert_eq!(adj.row(0), &[1]);
    assert_eq!(adj.row(1), &[0]);
}

#[test]
fn fan_edge_keeps_all_owners() {
    // three triangles hinged on edge (0, 1)
    let elems = ElementTable::from_rows(&[[0, 1, 2], [1, 0, 3], [0, 1, 4]]).unwrap();
    let low = extract_lower_entities(&elems, &ElementType::Tri3.entity_pattern(1).unwrap())
        .unwrap();
    let owners = low.owners();
    let hinge = (0..low.nentities()).find(|&e| owners.degree(e) == 3).unwrap();
    assert_eq!(owners.row(hinge), &[0, 1, 2]);
    let padded = owners.to_padded(None).unwrap();
    assert!(padded.iter().all(|r| r.len() == 3));
    assert_eq!(
        owners.to_padded(Some(2)),
        Err(MeshWeldError::PaddedWidthTooSmall { width: 2, max_degree: 3 })
    );
}

#[test]
fn inverse_rejects_short_target_count() {
    let elems = ElementTable::from_rows(&[[0, 4]]).unwrap();
    assert!(matches!(
        invert(&elems, Some(3)),
        Err(MeshWeldError::TargetOutOfRange { row: 0, value: 4, ntargets: 3 })
    ));
    let inv = invert(&elems, Some(6)).unwrap();
    assert_eq!(inv.nrows(), 6);
    assert_eq!(inv.row(4), &[0]);
    assert!(inv.row(5).is_empty());
}

fn tri_table() -> impl Strategy<Value = Vec<[usize; 3]>> {
    prop::collection::vec([0usize..9, 0usize..9, 0usize..9], 1..16)
}

proptest! {
    #[test]
    fn entity_count_ignores_local_and_global_order(rows in tri_table(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut shuffled = rows.clone();
        for r in shuffled.iter_mut() {
            r.shuffle(&mut rng);
        }
        shuffled.shuffle(&mut rng);

        let pat = ElementType::Tri3.entity_pattern(1).unwrap();
        let a = extract_lower_entities(&ElementTable::from_rows(&rows).unwrap(), &pat).unwrap();
        let b = extract_lower_entities(&ElementTable::from_rows(&shuffled).unwrap(), &pat).unwrap();
        prop_assert_eq!(a.nentities(), b.nentities());
        prop_assert_eq!(node_sets(&a.entities), node_sets(&b.entities));
    }

    #[test]
    fn adjacency_is_symmetric(rows in tri_table()) {
        let elems = ElementTable::from_rows(&rows).unwrap();
        let pat = ElementType::Tri3.entity_pattern(1).unwrap();
        let low = extract_lower_entities(&elems, &pat).unwrap();
        let adj = adjacency(&low.elem_entities).unwrap();
        prop_assert_eq!(adj.nrows(), rows.len());
        prop_assert!(is_symmetric(&adj));
        for (e, row) in adj.rows().enumerate() {
            prop_assert!(!row.contains(&e));
            prop_assert!(row.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert!(is_symmetric(&node_adjacency(&elems, 9).unwrap()));
    }
}

#[test]
fn tri_patch_neighbour_degree() {
    let (_, tris) = tri_patch(4, 4, [0.0, 0.0]);
    let low = extract_lower_entities(&tris, &ElementType::Tri3.entity_pattern(1).unwrap())
        .unwrap();
    let adj = adjacency(&low.elem_entities).unwrap();
    assert!(is_symmetric(&adj));
    assert_eq!(adj.max_degree(), 3);
}
