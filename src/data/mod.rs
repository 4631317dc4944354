//! Data containers: geometric coordinates, integer topology tables and ragged
//! (CSR) tables.
//!
//! Coordinates and topology are kept in distinct types so that float payloads
//! and integer keys never share an array abstraction.

pub mod csr;
pub mod elements;
pub mod points;

pub use csr::{Csr, PAD};
pub use elements::ElementTable;
pub use points::{BoundingBox, Point3, PointSet};

/// Per-item walk label; [`UNREACHED`] marks items the walk never labelled.
pub type Label = i64;

/// Label of an item not reached by a frontal walk.
pub const UNREACHED: Label = -1;
