use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use mesh_weld::algs::adjacency_graph::adjacency;
use mesh_weld::algs::entities::extract_lower_entities;
use mesh_weld::algs::fuse::fuse_points;
use mesh_weld::config::FuseConfig;
use mesh_weld::data::{ElementTable, PointSet};
use mesh_weld::topology::ElementType;

/// `n × n` triangulated patches, duplicated with small noise so half the
/// points fuse.
fn noisy_patch(n: usize, seed: u64) -> (PointSet, ElementTable) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let id = |i: usize, j: usize| j * (n + 1) + i;
    let mut coords = Vec::with_capacity(2 * (n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            coords.push([i as f64, j as f64, 0.0]);
        }
    }
    let base = coords.len();
    for k in 0..base {
        let p = coords[k];
        coords.push([p[0] + rng.gen_range(-1e-7..1e-7), p[1], p[2]]);
    }
    let mut rows = Vec::with_capacity(4 * n * n);
    for j in 0..n {
        for i in 0..n {
            let q = [id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1)];
            let off = if (i + j) % 2 == 0 { 0 } else { base };
            rows.push([q[0] + off, q[1] + off, q[2] + off]);
            rows.push([q[0] + off, q[2] + off, q[3] + off]);
        }
    }
    (
        PointSet::new(coords),
        ElementTable::from_rows(&rows).expect("valid rows"),
    )
}

fn bench_fuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuse_points");
    for &n in &[32usize, 128] {
        let (points, _) = noisy_patch(n, 1);
        for repeat in [false, true] {
            let cfg = FuseConfig::default().with_repeat(repeat);
            let name = if repeat { "two_pass" } else { "single_pass" };
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, _| {
                b.iter(|| black_box(fuse_points(&points, &cfg).expect("fuse")));
            });
        }
    }
    group.finish();
}

fn bench_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("lower_entities");
    let edges = ElementType::Tri3.entity_pattern(1).expect("edge pattern");
    for &n in &[32usize, 128] {
        let (points, elems) = noisy_patch(n, 2);
        let fused = fuse_points(&points, &FuseConfig::default()).expect("fuse");
        let welded = elems.remap_nodes(&fused.index).expect("remap");
        group.bench_with_input(BenchmarkId::new("extract_edges", n), &n, |b, _| {
            b.iter(|| black_box(extract_lower_entities(&welded, &edges).expect("extract")));
        });
        let low = extract_lower_entities(&welded, &edges).expect("extract");
        group.bench_with_input(BenchmarkId::new("edge_adjacency", n), &n, |b, _| {
            b.iter(|| black_box(adjacency(&low.elem_entities).expect("adjacency")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fuse, bench_entities);
criterion_main!(benches);
