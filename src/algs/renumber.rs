//! Renumbering utilities for point sets and element tables.
//!
//! These are the compaction steps that follow a fuse: element tables are
//! remapped through the fuse index map, unused points are dropped, and
//! elements may be reordered by an explicit permutation.

use crate::data::elements::ElementTable;
use crate::data::points::PointSet;
use crate::mesh_error::MeshWeldError;

/// Remap an element table through a per-point index map (e.g.
/// [`Fused::index`](crate::algs::fuse::Fused::index)).
pub fn apply_index_map(
    elems: &ElementTable,
    index: &[usize],
) -> Result<ElementTable, MeshWeldError> {
    if let Some(max) = elems.max_node() {
        if max >= index.len() {
            return Err(MeshWeldError::IndexMapLengthMismatch {
                expected: max + 1,
                found: index.len(),
            });
        }
    }
    elems.remap_nodes(index)
}

/// Result of [`compact`].
#[derive(Clone, Debug, PartialEq)]
pub struct Compacted {
    pub points: PointSet,
    pub elements: ElementTable,
    /// New index of every old point, `None` for dropped points.
    pub old_to_new: Vec<Option<usize>>,
    /// Old index of every kept point.
    pub new_to_old: Vec<usize>,
}

/// Drop points not referenced by `elems` and renumber the rest, keeping their
/// relative order.
pub fn compact(points: &PointSet, elems: &ElementTable) -> Result<Compacted, MeshWeldError> {
    elems.validate(points.len())?;
    let new_to_old = elems.used_nodes();
    let mut old_to_new = vec![None; points.len()];
    let mut dense = vec![0usize; points.len()];
    for (new, &old) in new_to_old.iter().enumerate() {
        old_to_new[old] = Some(new);
        dense[old] = new;
    }
    log::debug!(
        "compact: kept {} of {} points",
        new_to_old.len(),
        points.len()
    );
    Ok(Compacted {
        points: points.select(&new_to_old)?,
        elements: elems.remap_nodes(&dense)?,
        old_to_new,
        new_to_old,
    })
}

/// Inverse of a permutation of `0..n`.
pub fn invert_permutation(permutation: &[usize]) -> Result<Vec<usize>, MeshWeldError> {
    let n = permutation.len();
    let mut inverse = vec![usize::MAX; n];
    for (new, &old) in permutation.iter().enumerate() {
        if old >= n {
            return Err(MeshWeldError::InvalidPermutation(format!(
                "entry {old} out of range for {n} items"
            )));
        }
        if inverse[old] != usize::MAX {
            return Err(MeshWeldError::InvalidPermutation(format!(
                "duplicate entry {old}"
            )));
        }
        inverse[old] = new;
    }
    Ok(inverse)
}

/// Reorder elements: row `i` of the result is row `permutation[i]` of `elems`.
pub fn renumber_elements(
    elems: &ElementTable,
    permutation: &[usize],
) -> Result<ElementTable, MeshWeldError> {
    if permutation.len() != elems.nelems() {
        return Err(MeshWeldError::InvalidPermutation(format!(
            "expected {} elements, got {}",
            elems.nelems(),
            permutation.len()
        )));
    }
    invert_permutation(permutation)?;
    elems.select(permutation)
}

/// Reorder points and remap the element table consistently: point `i` of the
/// result is point `permutation[i]` of the input.
pub fn renumber_points(
    points: &PointSet,
    elems: &ElementTable,
    permutation: &[usize],
) -> Result<(PointSet, ElementTable), MeshWeldError> {
    if permutation.len() != points.len() {
        return Err(MeshWeldError::InvalidPermutation(format!(
            "expected {} points, got {}",
            points.len(),
            permutation.len()
        )));
    }
    let old_to_new = invert_permutation(permutation)?;
    Ok((points.select(permutation)?, elems.remap_nodes(&old_to_new)?))
}
