#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-weld
//!
//! mesh-weld is a topology-reconstruction library for unstructured meshes. It turns a
//! loose collection of coordinates and element tables (for example a mesh assembled
//! from separately generated patches) into connected topology.
//!
//! ## Features
//! - Grid-hashed fusion of near-duplicate points with an absolute/relative tolerance
//! - Extraction of unique lower entities (edges, faces) from element tables
//! - Inverse incidence tables and element/node adjacency graphs in CSR form
//! - Frontal walks for connected components, distance layers and bounded growth
//! - Border detection, compaction and renumbering
//! - Optional `rayon` feature for parallel sorting, canonicalization and front expansion
//!
//! ## Determinism
//!
//! All outputs are deterministic: sorts are stable, runs are processed in key order and
//! parallel paths merge results in the same order as the serial ones.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mesh-weld = "0.1"
//! # Optional features:
//! # features = ["rayon"]
//! ```
//!
//! ```
//! use mesh_weld::prelude::*;
//!
//! let points = PointSet::new(vec![
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [1.0, 0.0, 0.0],
//! ]);
//! let elems = ElementTable::from_rows(&[[0, 1, 2], [3, 2, 1]]).unwrap();
//! let mesh = Mesh::new(points, elems, Some(ElementType::Tri3)).unwrap();
//! let (fused, _) = mesh.fuse(&FuseConfig::default()).unwrap();
//! assert_eq!(fused.npoints(), 3);
//! ```

pub mod algs;
pub mod config;
pub mod data;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

pub use mesh::Mesh;
pub use mesh_error::MeshWeldError;

/// A convenient prelude to import the most-used types and entry points:
pub mod prelude {
    pub use crate::algs::adjacency_graph::{adjacency, invert, node_adjacency};
    pub use crate::algs::boundary::{BorderLabelValues, border, border_elements, border_nodes};
    pub use crate::algs::entities::{LowerEntities, extract_lower_entities};
    pub use crate::algs::frontal::{frontal_walk, partition_by_connection};
    pub use crate::algs::fuse::{Fused, fuse_points, match_points};
    pub use crate::config::{EngineConfig, FuseConfig, WalkConfig};
    pub use crate::data::{BoundingBox, Csr, ElementTable, Label, PointSet, UNREACHED};
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::MeshWeldError;
    pub use crate::topology::element_type::{ElementType, SubPattern};
}
