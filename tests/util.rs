#![allow(dead_code)]
use mesh_weld::data::{ElementTable, PointSet};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// `nx × ny` unit quads with their lower-left corner at `origin`.
pub fn quad_patch(nx: usize, ny: usize, origin: [f64; 2]) -> (PointSet, ElementTable) {
    let mut coords = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            coords.push([origin[0] + i as f64, origin[1] + j as f64, 0.0]);
        }
    }
    let id = |i: usize, j: usize| j * (nx + 1) + i;
    let mut rows = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            rows.push([id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1)]);
        }
    }
    (
        PointSet::new(coords),
        ElementTable::from_rows(&rows).unwrap(),
    )
}

/// Same grid as [`quad_patch`], every quad split into two triangles.
pub fn tri_patch(nx: usize, ny: usize, origin: [f64; 2]) -> (PointSet, ElementTable) {
    let (points, quads) = quad_patch(nx, ny, origin);
    let mut rows = Vec::with_capacity(2 * quads.nelems());
    for q in quads.rows() {
        rows.push([q[0], q[1], q[2]]);
        rows.push([q[0], q[2], q[3]]);
    }
    (points, ElementTable::from_rows(&rows).unwrap())
}

/// Concatenate two meshes without sharing any node.
pub fn disjoint_union(
    a: &(PointSet, ElementTable),
    b: &(PointSet, ElementTable),
) -> (PointSet, ElementTable) {
    let shift = a.0.len();
    let mut flat = a.1.as_flat().to_vec();
    flat.extend(b.1.as_flat().iter().map(|&n| n + shift));
    (
        a.0.concat(&b.0),
        ElementTable::new(a.1.nplex(), flat).unwrap(),
    )
}

/// `n` points uniformly drawn in `[0, scale)^3`.
pub fn random_points(seed: u64, n: usize, scale: f64) -> PointSet {
    let mut rng = SmallRng::seed_from_u64(seed);
    PointSet::new(
        (0..n)
            .map(|_| {
                [
                    rng.r#gen::<f64>() * scale,
                    rng.r#gen::<f64>() * scale,
                    rng.r#gen::<f64>() * scale,
                ]
            })
            .collect(),
    )
}

/// Rows of a table with sorted node ids, sorted: the table as a set of node sets.
pub fn node_sets(table: &ElementTable) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = table
        .rows()
        .map(|r| {
            let mut r = r.to_vec();
            r.sort_unstable();
            r
        })
        .collect();
    rows.sort();
    rows
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
