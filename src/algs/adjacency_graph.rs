//! Inverse incidence tables and adjacency graphs.
//!
//! Provides utilities for entity-to-owner inversion, element-to-element
//! adjacency (via shared entities) and node-to-node adjacency (via shared
//! elements).
//!
//! Determinism:
//! - Owner lists and neighbor lists are always sorted and deduplicated.
//! - Adjacency is symmetric and self-free.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use itertools::Itertools;

use crate::algs::entities::extract_lower_entities;
use crate::data::csr::{Csr, PAD};
use crate::data::elements::ElementTable;
use crate::mesh_error::MeshWeldError;
use crate::topology::element_type::SubPattern;

/// Value used for absent neighbours in padded tables.
pub const NO_NEIGHBOUR: i64 = PAD;

/// Invert a higher→lower incidence table.
///
/// Row `t` of the result lists every row of `incidence` that references
/// target `t`, in increasing order. `ntargets` defaults to `max + 1`; an
/// explicit value smaller than that is an error. Targets referenced by more
/// than two rows keep all their owners.
pub fn invert(incidence: &ElementTable, ntargets: Option<usize>) -> Result<Csr, MeshWeldError> {
    let needed = incidence.max_node().map_or(0, |m| m + 1);
    let ntargets = ntargets.unwrap_or(needed);
    let as_csr = Csr::from_parts(
        (0..=incidence.nelems())
            .map(|i| i * incidence.nplex())
            .collect(),
        incidence.as_flat().to_vec(),
    )?;
    as_csr.transpose(ntargets)
}

/// Fixed-width inverse, padded with [`PAD`] (`-1`).
pub fn invert_padded(
    incidence: &ElementTable,
    ntargets: Option<usize>,
) -> Result<Vec<Vec<i64>>, MeshWeldError> {
    invert(incidence, ntargets)?.to_padded(None)
}

/// Neighbours of `me` through the shared `targets` listed in `inverse`,
/// increasing and deduplicated.
fn neighbours_through(
    targets: impl Iterator<Item = usize>,
    inverse: &Csr,
    me: usize,
) -> impl Iterator<Item = usize> {
    targets
        .flat_map(move |t| inverse.row(t).iter().copied())
        .filter(move |&o| o != me)
        .sorted_unstable()
        .dedup()
}

/// Element adjacency through shared targets of an incidence table.
///
/// Two rows are adjacent when they reference at least one common value.
/// Pass an element→entity table (e.g. [`LowerEntities::elem_entities`]) for
/// adjacency through edges/faces, or the element→node table itself for
/// adjacency through nodes.
///
/// [`LowerEntities::elem_entities`]: crate::algs::entities::LowerEntities::elem_entities
pub fn adjacency(incidence: &ElementTable) -> Result<Csr, MeshWeldError> {
    let inverse = invert(incidence, None)?;
    let n = incidence.nelems();

    let targets = |e: usize| incidence.row(e).iter().copied();

    #[cfg(feature = "rayon")]
    let adj = {
        let lists: Vec<Vec<usize>> = (0..n)
            .into_par_iter()
            .map(|e| neighbours_through(targets(e), &inverse, e).collect())
            .collect();
        Csr::from_rows(&lists)
    };
    #[cfg(not(feature = "rayon"))]
    let adj = Csr::from_row_iter((0..n).map(|e| neighbours_through(targets(e), &inverse, e)));

    Ok(adj)
}

/// Fixed-width adjacency, padded with [`PAD`] (`-1`).
pub fn adjacency_padded(incidence: &ElementTable) -> Result<Vec<Vec<i64>>, MeshWeldError> {
    adjacency(incidence)?.to_padded(None)
}

/// Element adjacency through the lower entities described by `pattern`.
pub fn adjacency_by_pattern(
    elems: &ElementTable,
    pattern: &SubPattern,
) -> Result<Csr, MeshWeldError> {
    let low = extract_lower_entities(elems, pattern)?;
    adjacency(&low.elem_entities)
}

/// Element adjacency that ignores blocked entities.
///
/// `blocked[t] = true` removes target `t` as a connection: two elements are
/// neighbours only if they share an unblocked target. Used to walk a mesh
/// without crossing feature curves or internal boundaries.
pub fn adjacency_with_barrier(
    incidence: &ElementTable,
    blocked: &[bool],
) -> Result<Csr, MeshWeldError> {
    let needed = incidence.max_node().map_or(0, |m| m + 1);
    if blocked.len() < needed {
        return Err(MeshWeldError::MaskLengthMismatch {
            expected: needed,
            found: blocked.len(),
        });
    }
    let inverse = invert(incidence, Some(blocked.len()))?;
    Ok(Csr::from_row_iter((0..incidence.nelems()).map(|e| {
        let open = incidence.row(e).iter().copied().filter(move |&t| !blocked[t]);
        neighbours_through(open, &inverse, e)
    })))
}

/// Keep only the adjacency edges accepted by `keep(a, b)`.
///
/// `keep` should be symmetric to preserve the symmetry of `adj`.
pub fn filter_adjacency(adj: &Csr, keep: impl Fn(usize, usize) -> bool) -> Csr {
    let keep = &keep;
    Csr::from_row_iter(
        adj.rows()
            .enumerate()
            .map(|(a, row)| row.iter().copied().filter(move |&b| keep(a, b))),
    )
}

/// Node-to-node adjacency: nodes joined by at least one element.
///
/// `npoints` fixes the number of rows; isolated nodes get empty rows.
pub fn node_adjacency(elems: &ElementTable, npoints: usize) -> Result<Csr, MeshWeldError> {
    elems.validate(npoints)?;
    let node_elems = invert(elems, Some(npoints))?;
    Ok(Csr::from_row_iter((0..npoints).map(|v| {
        node_elems
            .row(v)
            .iter()
            .flat_map(move |&e| elems.row(e).iter().copied())
            .filter(move |&w| w != v)
            .sorted_unstable()
            .dedup()
    })))
}

/// `true` when every edge `a → b` has its mirror `b → a`.
pub fn is_symmetric(adj: &Csr) -> bool {
    adj.rows()
        .enumerate()
        .all(|(a, row)| row.iter().all(|&b| b < adj.nrows() && adj.row(b).contains(&a)))
}
