//! Border classification utilities.
//!
//! These helpers classify lower entities as border, interior or non-manifold
//! from the number of elements owning them, and derive the border elements and
//! border nodes of an element table.

use crate::algs::entities::{LowerEntities, extract_lower_entities};
use crate::data::Label;
use crate::data::csr::Csr;
use crate::data::elements::ElementTable;
use crate::mesh_error::MeshWeldError;
use crate::topology::element_type::SubPattern;

/// Label values for border classification.
#[derive(Clone, Copy, Debug)]
pub struct BorderLabelValues {
    pub border: Label,
    pub interior: Label,
}

impl Default for BorderLabelValues {
    fn default() -> Self {
        Self {
            border: 1,
            interior: 0,
        }
    }
}

/// Classified entity sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BorderClassification {
    /// Entities with exactly one owner.
    pub border: Vec<usize>,
    /// Entities with two or more owners.
    pub interior: Vec<usize>,
    /// Subset of `interior` with more than two owners.
    pub non_manifold: Vec<usize>,
}

/// Classify entities by the number of owners in an entity → owner table.
///
/// Entities with **zero or one** owner are border; two or more are interior.
/// Entities with more than two owners are also reported as non-manifold.
pub fn classify_entities(owners: &Csr) -> BorderClassification {
    let mut out = BorderClassification::default();
    for (e, row) in owners.rows().enumerate() {
        match row.len() {
            0 | 1 => out.border.push(e),
            2 => out.interior.push(e),
            count => {
                log::warn!("Non-manifold entity detected: entity={e} owners={count}");
                out.interior.push(e);
                out.non_manifold.push(e);
            }
        }
    }
    out
}

/// Per-entity border/interior labels.
pub fn label_entities(owners: &Csr, values: BorderLabelValues) -> Vec<Label> {
    owners
        .rows()
        .map(|row| {
            if row.len() <= 1 {
                values.border
            } else {
                values.interior
            }
        })
        .collect()
}

/// Border of an element table: the lower entities owned by a single element,
/// as a node table in first-seen orientation.
///
/// For a surface of triangles and the edge pattern this is the set of free
/// edges; for tetrahedra and the face pattern, the outer skin.
pub fn border(elems: &ElementTable, pattern: &SubPattern) -> Result<ElementTable, MeshWeldError> {
    let low = extract_lower_entities(elems, pattern)?;
    let cls = classify_entities(&low.owners());
    low.entities.select(&cls.border)
}

/// Border entities together with the full extraction, for callers that need
/// both.
pub fn border_entities(
    elems: &ElementTable,
    pattern: &SubPattern,
) -> Result<(LowerEntities, Vec<usize>), MeshWeldError> {
    let low = extract_lower_entities(elems, pattern)?;
    let cls = classify_entities(&low.owners());
    Ok((low, cls.border))
}

/// Elements owning at least one border entity, increasing.
pub fn border_elements(
    elems: &ElementTable,
    pattern: &SubPattern,
) -> Result<Vec<usize>, MeshWeldError> {
    let (low, border) = border_entities(elems, pattern)?;
    let mut out: Vec<usize> = border
        .iter()
        .flat_map(|&e| low.owner_slots(e).map(|(elem, _)| elem))
        .collect();
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

/// Nodes lying on a border entity, increasing.
pub fn border_nodes(
    elems: &ElementTable,
    pattern: &SubPattern,
) -> Result<Vec<usize>, MeshWeldError> {
    Ok(border(elems, pattern)?.used_nodes())
}

/// Entities owned by more than two elements.
pub fn non_manifold_entities(
    elems: &ElementTable,
    pattern: &SubPattern,
) -> Result<Vec<usize>, MeshWeldError> {
    let low = extract_lower_entities(elems, pattern)?;
    Ok(classify_entities(&low.owners()).non_manifold)
}
