//! Frontal walks: lockstep breadth-first propagation over an adjacency graph.
//!
//! Every item is `unvisited`, `in front` or `labelled`. Seeds start in the
//! front with `start_label`. Each step labels the unvisited neighbours of the
//! whole front with `label + front_inc` and makes them the new front. When the
//! front empties and `part_inc > 0`, the lowest-index unvisited item seeds a
//! new part at `label + part_inc`. No label above `max_val` is ever assigned:
//! the walk ends at the first step that would pass the bound (or overflow
//! `i64`), and items beyond it stay [`UNREACHED`].
//!
//! Typical uses:
//! - connected components: `front_inc = 0, part_inc = 1`
//! - distance layers from seeds: `front_inc = 1, part_inc = 0`
//! - bounded growth: `max_val = Some(n)`
//! - constrained partitioning: walk a filtered adjacency
//!   ([`adjacency_with_barrier`](crate::algs::adjacency_graph::adjacency_with_barrier)).

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use hashbrown::HashMap;

use crate::config::WalkConfig;
use crate::data::csr::Csr;
use crate::data::{Label, UNREACHED};
use crate::mesh_error::MeshWeldError;

/// Label every item of `adj` by frontal propagation from `seeds`.
///
/// With no seeds and `part_inc > 0` the walk starts at item 0. An
/// out-of-range seed is reported as [`MeshWeldError::SeedOutOfRange`].
pub fn frontal_walk(
    adj: &Csr,
    seeds: &[usize],
    cfg: &WalkConfig,
) -> Result<Vec<Label>, MeshWeldError> {
    cfg.validate()?;
    let n = adj.nrows();
    if let Some(&seed) = seeds.iter().find(|&&s| s >= n) {
        return Err(MeshWeldError::SeedOutOfRange { seed, nitems: n });
    }
    if let Some((a, &b)) = adj
        .rows()
        .enumerate()
        .find_map(|(a, row)| row.iter().find(|&&b| b >= n).map(|b| (a, b)))
    {
        return Err(MeshWeldError::TargetOutOfRange {
            row: a,
            value: b,
            ntargets: n,
        });
    }

    let mut labels = vec![UNREACHED; n];
    if n == 0 {
        return Ok(labels);
    }
    // `None` when the label overflows or passes `max_val`
    let step =
        |l: Label, inc: i64| l.checked_add(inc).filter(|&x| cfg.max_val.is_none_or(|m| x <= m));

    let mut label = cfg.start_label;
    let mut front: Vec<usize> = if seeds.is_empty() {
        if cfg.part_inc > 0 { vec![0] } else { Vec::new() }
    } else {
        let mut f = seeds.to_vec();
        f.sort_unstable();
        f.dedup();
        f
    };
    if cfg.max_val.is_some_and(|m| label > m) {
        return Ok(labels);
    }
    for &s in &front {
        labels[s] = label;
    }

    let mut nparts = 0usize;
    'walk: loop {
        if !front.is_empty() {
            nparts += 1;
        }
        while !front.is_empty() {
            let next = expand_front(adj, &front, &labels);
            if next.is_empty() {
                break;
            }
            // past the bound: stop without opening a new part
            let Some(next_label) = step(label, cfg.front_inc) else {
                break 'walk;
            };
            for &v in &next {
                labels[v] = next_label;
            }
            label = next_label;
            front = next;
        }

        if cfg.part_inc == 0 {
            break;
        }
        let Some(start) = labels.iter().position(|&l| l == UNREACHED) else {
            break;
        };
        let Some(part_label) = step(label, cfg.part_inc) else {
            break;
        };
        label = part_label;
        labels[start] = label;
        front = vec![start];
    }

    log::debug!(
        "frontal walk: {n} items, {nparts} parts, last label {label}, {} unreached",
        labels.iter().filter(|&&l| l == UNREACHED).count()
    );
    Ok(labels)
}

/// Unvisited neighbours of the front, sorted and deduplicated.
fn expand_front(adj: &Csr, front: &[usize], labels: &[Label]) -> Vec<usize> {
    #[cfg(feature = "rayon")]
    let mut next: Vec<usize> = front
        .par_iter()
        .flat_map_iter(|&u| adj.row(u).iter().copied().filter(|&v| labels[v] == UNREACHED))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let mut next: Vec<usize> = front
        .iter()
        .flat_map(|&u| adj.row(u).iter().copied().filter(|&v| labels[v] == UNREACHED))
        .collect();
    next.sort_unstable();
    next.dedup();
    next
}

/// Connected-component labels: `0, 1, 2, ...` in order of the lowest item of
/// each component. Isolated items form singleton components.
pub fn partition_by_connection(adj: &Csr) -> Result<Vec<Label>, MeshWeldError> {
    frontal_walk(adj, &[], &WalkConfig::components())
}

/// Items within `nsteps` adjacency steps of `seeds` (seeds included),
/// increasing.
pub fn grow_selection(
    adj: &Csr,
    seeds: &[usize],
    nsteps: usize,
) -> Result<Vec<usize>, MeshWeldError> {
    let labels = frontal_walk(adj, seeds, &WalkConfig::bounded(nsteps as i64))?;
    Ok(labels
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l != UNREACHED)
        .map(|(i, _)| i)
        .collect())
}

/// Group items by label, in increasing label order. Unreached items are
/// omitted.
pub fn split_by_labels(labels: &[Label]) -> Vec<(Label, Vec<usize>)> {
    let mut groups: HashMap<Label, Vec<usize>> = HashMap::new();
    for (i, &l) in labels.iter().enumerate() {
        if l != UNREACHED {
            groups.entry(l).or_default().push(i);
        }
    }
    let mut out: Vec<(Label, Vec<usize>)> = groups.into_iter().collect();
    out.sort_unstable_by_key(|(l, _)| *l);
    out
}
