//! Element type metadata and lower-entity patterns.
//!
//! A [`SubPattern`] lists, for one element, which local node tuples form a
//! lower entity. For a triangle the edge pattern is `[(0,1), (1,2), (2,0)]`.
//!
//! # Local node ordering
//! - **Line2**: `[v0, v1]`.
//! - **Tri3**: `[v0, v1, v2]` (counter-clockwise).
//! - **Quad4**: `[v0, v1, v2, v3]` (counter-clockwise).
//! - **Tet4**: `[v0, v1, v2, v3]`.
//! - **Hex8**: bottom face `[0, 1, 2, 3]`, top face `[4, 5, 6, 7]`.

use crate::mesh_error::MeshWeldError;

/// Element types with a built-in entity catalog.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ElementType {
    /// 0D point element.
    Point,
    /// 2-node segment.
    Line2,
    /// 3-node triangle.
    Tri3,
    /// 4-node quadrilateral.
    Quad4,
    /// 4-node tetrahedron.
    Tet4,
    /// 8-node hexahedron.
    Hex8,
}

const LINE2_NODES: &[&[usize]] = &[&[0], &[1]];
const TRI3_NODES: &[&[usize]] = &[&[0], &[1], &[2]];
const TRI3_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 0]];
const QUAD4_NODES: &[&[usize]] = &[&[0], &[1], &[2], &[3]];
const QUAD4_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 3], &[3, 0]];
const TET4_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 0], &[0, 3], &[1, 3], &[2, 3]];
const TET4_FACES: &[&[usize]] = &[&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]];
const HEX8_NODES: &[&[usize]] = &[&[0], &[1], &[2], &[3], &[4], &[5], &[6], &[7]];
const HEX8_EDGES: &[&[usize]] = &[
    &[0, 1],
    &[1, 2],
    &[2, 3],
    &[3, 0],
    &[4, 5],
    &[5, 6],
    &[6, 7],
    &[7, 4],
    &[0, 4],
    &[1, 5],
    &[2, 6],
    &[3, 7],
];
const HEX8_FACES: &[&[usize]] = &[
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];

impl ElementType {
    /// Number of nodes per element.
    pub fn nplex(self) -> usize {
        match self {
            ElementType::Point => 1,
            ElementType::Line2 => 2,
            ElementType::Tri3 => 3,
            ElementType::Quad4 | ElementType::Tet4 => 4,
            ElementType::Hex8 => 8,
        }
    }

    /// Topological dimension.
    pub fn dimension(self) -> usize {
        match self {
            ElementType::Point => 0,
            ElementType::Line2 => 1,
            ElementType::Tri3 | ElementType::Quad4 => 2,
            ElementType::Tet4 | ElementType::Hex8 => 3,
        }
    }

    /// Pattern of the entities of dimension `level`.
    ///
    /// Level `0` yields the nodes, level `dimension()` the element itself.
    pub fn entity_pattern(self, level: usize) -> Result<SubPattern, MeshWeldError> {
        let dim = self.dimension();
        if level > dim {
            return Err(MeshWeldError::InvalidEntityLevel {
                level,
                dimension: dim,
            });
        }
        if level == dim {
            return SubPattern::identity(self.nplex());
        }
        let rows: &[&[usize]] = match (self, level) {
            (ElementType::Line2, 0) => LINE2_NODES,
            (ElementType::Tri3, 0) => TRI3_NODES,
            (ElementType::Tri3, 1) => TRI3_EDGES,
            (ElementType::Quad4, 0) | (ElementType::Tet4, 0) => QUAD4_NODES,
            (ElementType::Quad4, 1) => QUAD4_EDGES,
            (ElementType::Tet4, 1) => TET4_EDGES,
            (ElementType::Tet4, 2) => TET4_FACES,
            (ElementType::Hex8, 0) => HEX8_NODES,
            (ElementType::Hex8, 1) => HEX8_EDGES,
            (ElementType::Hex8, 2) => HEX8_FACES,
            _ => {
                return Err(MeshWeldError::InvalidEntityLevel {
                    level,
                    dimension: dim,
                });
            }
        };
        SubPattern::new(rows, self.nplex())
    }

    /// Pattern of the border entities (dimension `dimension() - 1`).
    pub fn border_pattern(self) -> Result<SubPattern, MeshWeldError> {
        match self.dimension() {
            0 => Err(MeshWeldError::InvalidEntityLevel {
                level: 0,
                dimension: 0,
            }),
            d => self.entity_pattern(d - 1),
        }
    }
}

/// Local-node tuples forming the lower entities of one element.
///
/// Stored as a flat `nsub × subplex` table; every slot is below the
/// element plexitude `nplex`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubPattern {
    nplex: usize,
    subplex: usize,
    slots: Vec<usize>,
}

impl SubPattern {
    /// Build from rows, validating rectangular shape and slot range.
    pub fn new<R: AsRef<[usize]>>(rows: &[R], nplex: usize) -> Result<Self, MeshWeldError> {
        let subplex = rows.first().map_or(0, |r| r.as_ref().len());
        if subplex == 0 {
            return Err(MeshWeldError::EmptyPlexitude);
        }
        let mut slots = Vec::with_capacity(rows.len() * subplex);
        for (entity, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != subplex {
                return Err(MeshWeldError::RaggedPattern {
                    entity,
                    expected: subplex,
                    found: r.len(),
                });
            }
            if let Some(&slot) = r.iter().find(|&&s| s >= nplex) {
                return Err(MeshWeldError::PatternSlotOutOfRange {
                    entity,
                    slot,
                    nplex,
                });
            }
            slots.extend_from_slice(r);
        }
        Ok(Self {
            nplex,
            subplex,
            slots,
        })
    }

    /// The whole element as its own single entity.
    pub fn identity(nplex: usize) -> Result<Self, MeshWeldError> {
        let row: Vec<usize> = (0..nplex).collect();
        Self::new(&[row], nplex)
    }

    /// Plexitude of the elements this pattern applies to.
    #[inline]
    pub fn nplex(&self) -> usize {
        self.nplex
    }

    /// Nodes per entity.
    #[inline]
    pub fn subplex(&self) -> usize {
        self.subplex
    }

    /// Entities per element.
    #[inline]
    pub fn nsub(&self) -> usize {
        self.slots.len() / self.subplex
    }

    #[inline]
    pub fn entity(&self, k: usize) -> &[usize] {
        &self.slots[k * self.subplex..(k + 1) * self.subplex]
    }

    pub fn entities(&self) -> std::slice::ChunksExact<'_, usize> {
        self.slots.chunks_exact(self.subplex)
    }
}
