//! Re-export public algorithms.

pub mod adjacency_graph;
pub mod boundary;
pub mod entities;
pub mod frontal;
pub mod fuse;
pub mod grid;
pub mod renumber;
pub mod sort_runs;

pub use adjacency_graph::{adjacency, invert, node_adjacency};
pub use boundary::{
    BorderLabelValues, border, border_elements, border_nodes, classify_entities, label_entities,
};
pub use entities::{LowerEntities, extract_lower_entities};
pub use frontal::{frontal_walk, partition_by_connection};
pub use fuse::{Fused, fuse_points, match_points};
pub use grid::Grid;
pub use renumber::{apply_index_map, compact};
pub use sort_runs::{Runs, stable_argsort};
