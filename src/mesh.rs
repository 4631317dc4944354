//! [`Mesh`]: a point set with one homogeneous element table.
//!
//! `Mesh` ties the individual algorithms together: fusing points and remapping
//! the table, compaction, lower-entity extraction at a given level, adjacency
//! and frontal walks over elements, and border queries. Every method returns a
//! new value; a `Mesh` is never mutated in place.

use crate::algs::adjacency_graph::{adjacency, adjacency_with_barrier, node_adjacency};
use crate::algs::boundary::{self, BorderLabelValues};
use crate::algs::entities::{
    LowerEntities, degenerate_elements, extract_lower_entities, remove_duplicate_elements,
};
use crate::algs::frontal::{frontal_walk, partition_by_connection};
use crate::algs::fuse::{Fused, fuse_points};
use crate::algs::renumber::{Compacted, apply_index_map, compact};
use crate::config::{FuseConfig, WalkConfig};
use crate::data::Label;
use crate::data::csr::Csr;
use crate::data::elements::ElementTable;
use crate::data::points::PointSet;
use crate::mesh_error::MeshWeldError;
use crate::topology::element_type::{ElementType, SubPattern};

/// Points plus elements of a single type.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    points: PointSet,
    elements: ElementTable,
    etype: Option<ElementType>,
}

impl Mesh {
    /// Build and validate a mesh. `etype` is required for queries above
    /// level 0; it must agree with the table plexitude.
    pub fn new(
        points: PointSet,
        elements: ElementTable,
        etype: Option<ElementType>,
    ) -> Result<Self, MeshWeldError> {
        let mesh = Self {
            points,
            elements,
            etype,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks node indices, plexitude against the element type and
    /// coordinate finiteness.
    pub fn validate(&self) -> Result<(), MeshWeldError> {
        if let Some(t) = self.etype {
            if t.nplex() != self.elements.nplex() {
                return Err(MeshWeldError::PlexitudeMismatch {
                    expected: t.nplex(),
                    found: self.elements.nplex(),
                });
            }
        }
        self.elements.validate(self.points.len())?;
        self.points.validate_finite()
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn elements(&self) -> &ElementTable {
        &self.elements
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.etype
    }

    pub fn npoints(&self) -> usize {
        self.points.len()
    }

    pub fn nelems(&self) -> usize {
        self.elements.nelems()
    }

    /// Decompose into parts.
    pub fn into_parts(self) -> (PointSet, ElementTable, Option<ElementType>) {
        (self.points, self.elements, self.etype)
    }

    /// Fuse near-duplicate points and remap the table through the index map.
    ///
    /// The fused mesh may contain degenerate elements when an element had two
    /// nodes within tolerance; see [`Mesh::degenerate_elements`].
    pub fn fuse(&self, cfg: &FuseConfig) -> Result<(Mesh, Fused), MeshWeldError> {
        let fused = fuse_points(&self.points, cfg)?;
        let elements = apply_index_map(&self.elements, &fused.index)?;
        log::debug!(
            "mesh fuse: {} -> {} points",
            self.points.len(),
            fused.points.len()
        );
        let mesh = Mesh {
            points: fused.points.clone(),
            elements,
            etype: self.etype,
        };
        Ok((mesh, fused))
    }

    /// Drop points not used by any element.
    pub fn compact(&self) -> Result<(Mesh, Compacted), MeshWeldError> {
        let c = compact(&self.points, &self.elements)?;
        let mesh = Mesh {
            points: c.points.clone(),
            elements: c.elements.clone(),
            etype: self.etype,
        };
        Ok((mesh, c))
    }

    /// Keep the first of every group of elements over the same nodes.
    ///
    /// Returns the mesh and the kept element indices.
    pub fn remove_duplicate_elements(
        &self,
        permutations: bool,
    ) -> Result<(Mesh, Vec<usize>), MeshWeldError> {
        let keep = remove_duplicate_elements(&self.elements, permutations);
        let mesh = Mesh {
            points: self.points.clone(),
            elements: self.elements.select(&keep)?,
            etype: self.etype,
        };
        Ok((mesh, keep))
    }

    pub fn degenerate_elements(&self) -> Vec<usize> {
        degenerate_elements(&self.elements)
    }

    fn require_type(&self) -> Result<ElementType, MeshWeldError> {
        self.etype.ok_or_else(|| {
            MeshWeldError::InvalidConfig(
                "mesh has no element type; entity patterns unknown".into(),
            )
        })
    }

    /// Entity pattern of dimension `level` for this mesh's element type.
    pub fn pattern(&self, level: usize) -> Result<SubPattern, MeshWeldError> {
        self.require_type()?.entity_pattern(level)
    }

    /// Unique lower entities of dimension `level`.
    pub fn lower_entities(&self, level: usize) -> Result<LowerEntities, MeshWeldError> {
        extract_lower_entities(&self.elements, &self.pattern(level)?)
    }

    /// Element adjacency through shared entities of dimension `level`.
    ///
    /// Level 0 connects elements sharing a node and works without an element
    /// type.
    pub fn adjacency(&self, level: usize) -> Result<Csr, MeshWeldError> {
        if level == 0 {
            return adjacency(&self.elements);
        }
        let low = self.lower_entities(level)?;
        adjacency(&low.elem_entities)
    }

    /// Element adjacency through entities of dimension `level`, except the
    /// entities flagged in `blocked` (indexed by entity id of that level).
    pub fn adjacency_with_barrier(
        &self,
        level: usize,
        blocked: &[bool],
    ) -> Result<Csr, MeshWeldError> {
        if level == 0 {
            return adjacency_with_barrier(&self.elements, blocked);
        }
        let low = self.lower_entities(level)?;
        adjacency_with_barrier(&low.elem_entities, blocked)
    }

    /// Node-to-node adjacency over the whole point set.
    pub fn node_adjacency(&self) -> Result<Csr, MeshWeldError> {
        node_adjacency(&self.elements, self.points.len())
    }

    /// Frontal walk over elements connected through entities of dimension `level`.
    pub fn frontal_walk(
        &self,
        level: usize,
        seeds: &[usize],
        cfg: &WalkConfig,
    ) -> Result<Vec<Label>, MeshWeldError> {
        frontal_walk(&self.adjacency(level)?, seeds, cfg)
    }

    /// Connected-component label per element, through entities of dimension `level`.
    pub fn partition_by_connection(&self, level: usize) -> Result<Vec<Label>, MeshWeldError> {
        partition_by_connection(&self.adjacency(level)?)
    }

    /// Border entities (free edges of a surface, skin of a volume) as a node table.
    pub fn border(&self) -> Result<ElementTable, MeshWeldError> {
        boundary::border(&self.elements, &self.require_type()?.border_pattern()?)
    }

    /// Elements touching the border through a border entity.
    pub fn border_elements(&self) -> Result<Vec<usize>, MeshWeldError> {
        boundary::border_elements(&self.elements, &self.require_type()?.border_pattern()?)
    }

    /// Nodes on the border.
    pub fn border_nodes(&self) -> Result<Vec<usize>, MeshWeldError> {
        boundary::border_nodes(&self.elements, &self.require_type()?.border_pattern()?)
    }

    /// Border-level entities with a border/interior label each, indexed like
    /// `entities` of the returned extraction.
    pub fn border_labels(
        &self,
        values: BorderLabelValues,
    ) -> Result<(LowerEntities, Vec<Label>), MeshWeldError> {
        let pattern = self.require_type()?.border_pattern()?;
        let low = extract_lower_entities(&self.elements, &pattern)?;
        let labels = boundary::label_entities(&low.owners(), values);
        Ok((low, labels))
    }

    /// Border entities owned by more than two elements.
    pub fn non_manifold_entities(&self) -> Result<Vec<usize>, MeshWeldError> {
        boundary::non_manifold_entities(&self.elements, &self.require_type()?.border_pattern()?)
    }
}
