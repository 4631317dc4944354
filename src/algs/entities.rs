//! Lower-entity extraction (edges of triangles, faces of tetrahedra, ...).
//!
//! Every element is expanded through a [`SubPattern`] into raw entity rows of
//! global node ids. Rows are canonicalized by sorting their node ids, so that
//! `(3, 7)` and `(7, 3)` compare equal, then deduplicated with the shared
//! stable sort/run primitive using exact integer comparison.
//!
//! Entity ids follow the lexicographic order of the sorted node tuples, which
//! makes them independent of element order. The node row stored for an entity
//! keeps the orientation of its first occurrence (lowest element, lowest slot),
//! which does depend on element order: callers must not assume identical node
//! rows across independent runs with permuted elements.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::algs::sort_runs::{Runs, sort_runs_by_key};
use crate::data::csr::Csr;
use crate::data::elements::ElementTable;
use crate::mesh_error::MeshWeldError;
use crate::topology::element_type::SubPattern;

/// Output of [`extract_lower_entities`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LowerEntities {
    /// `nelems × nsub` table: element rows expressed in entity ids.
    pub elem_entities: ElementTable,
    /// `nentities × subplex` table of entity node ids.
    pub entities: ElementTable,
    /// Entity → raw occurrences `elem * nsub + slot`, increasing.
    occurrences: Csr,
}

impl LowerEntities {
    #[inline]
    pub fn nentities(&self) -> usize {
        self.entities.nelems()
    }

    /// Entities per element.
    #[inline]
    pub fn nsub(&self) -> usize {
        self.elem_entities.nplex()
    }

    /// `(element, local slot)` pairs referencing entity `e`.
    pub fn owner_slots(&self, e: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let nsub = self.nsub();
        self.occurrences.row(e).iter().map(move |&r| (r / nsub, r % nsub))
    }

    /// Entity → owning elements (ragged, never truncated). An element that
    /// references the same entity twice is listed once.
    pub fn owners(&self) -> Csr {
        let nsub = self.nsub();
        let rows: Vec<Vec<usize>> = self
            .occurrences
            .rows()
            .map(|occ| {
                let mut elems: Vec<usize> = occ.iter().map(|&r| r / nsub).collect();
                elems.dedup();
                elems
            })
            .collect();
        Csr::from_rows(&rows)
    }

    /// Number of element slots referencing each entity.
    pub fn multiplicity(&self) -> Vec<usize> {
        (0..self.nentities())
            .map(|e| self.occurrences.degree(e))
            .collect()
    }
}

/// Raw expansion of an element table through a pattern:
/// `(nelems * nsub) × subplex` rows in global node ids.
pub fn expand_pattern(
    elems: &ElementTable,
    pattern: &SubPattern,
) -> Result<ElementTable, MeshWeldError> {
    if pattern.nplex() != elems.nplex() {
        return Err(MeshWeldError::PlexitudeMismatch {
            expected: elems.nplex(),
            found: pattern.nplex(),
        });
    }
    let mut raw = Vec::with_capacity(elems.nelems() * pattern.nsub() * pattern.subplex());
    for row in elems.rows() {
        for ent in pattern.entities() {
            raw.extend(ent.iter().map(|&slot| row[slot]));
        }
    }
    ElementTable::new(pattern.subplex(), raw)
}

/// Sorted copy of every row, the canonical form used for comparison.
fn canonical_rows(table: &ElementTable) -> Vec<usize> {
    let sort_row = |row: &[usize]| {
        let mut r = row.to_vec();
        r.sort_unstable();
        r
    };
    #[cfg(feature = "rayon")]
    let rows: Vec<Vec<usize>> = table
        .as_flat()
        .par_chunks(table.nplex())
        .map(sort_row)
        .collect();
    #[cfg(not(feature = "rayon"))]
    let rows: Vec<Vec<usize>> = table.rows().map(sort_row).collect();
    rows.concat()
}

/// Group rows of `table` that hold the same node set.
fn runs_by_node_set(table: &ElementTable) -> Runs {
    let canon = canonical_rows(table);
    let keys: Vec<&[usize]> = canon.chunks_exact(table.nplex()).collect();
    sort_runs_by_key(&keys)
}

/// Extract and deduplicate the lower entities of `elems` described by `pattern`.
pub fn extract_lower_entities(
    elems: &ElementTable,
    pattern: &SubPattern,
) -> Result<LowerEntities, MeshWeldError> {
    let raw = expand_pattern(elems, pattern)?;
    let runs = runs_by_node_set(&raw);

    let ids = runs.run_of();
    let mut nodes = Vec::with_capacity(runs.nruns() * raw.nplex());
    for first in runs.leaders() {
        nodes.extend_from_slice(raw.row(first));
    }
    let occurrences = Csr::from_parts(runs.offsets.clone(), runs.perm.clone())?;

    log::debug!(
        "extracted {} unique entities from {} raw rows",
        runs.nruns(),
        raw.nelems()
    );

    Ok(LowerEntities {
        elem_entities: ElementTable::new(pattern.nsub(), ids)?,
        entities: ElementTable::new(raw.nplex(), nodes)?,
        occurrences,
    })
}

/// Indices of elements to keep after removing duplicates.
///
/// With `permutations = true` rows holding the same node set in any order are
/// duplicates; otherwise only identical rows are. The first occurrence (lowest
/// index) is kept; the result is increasing.
pub fn remove_duplicate_elements(elems: &ElementTable, permutations: bool) -> Vec<usize> {
    let runs = if permutations {
        runs_by_node_set(elems)
    } else {
        let keys: Vec<&[usize]> = elems.rows().collect();
        sort_runs_by_key(&keys)
    };
    let mut keep = runs.leaders();
    keep.sort_unstable();
    keep
}

/// Indices of elements with a repeated node (collapsed elements).
pub fn degenerate_elements(elems: &ElementTable) -> Vec<usize> {
    elems
        .rows()
        .enumerate()
        .filter(|(_, row)| {
            let mut r = row.to_vec();
            r.sort_unstable();
            r.windows(2).any(|w| w[0] == w[1])
        })
        .map(|(i, _)| i)
        .collect()
}
