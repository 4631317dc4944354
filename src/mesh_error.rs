//! MeshWeldError: Unified error type for mesh-weld public APIs
//!
//! Shape and range problems are detected eagerly at each component boundary so
//! that a bad element table never reaches the adjacency builders. Every variant
//! carries the expected and actual values needed to diagnose the input without
//! re-running.
//!
//! Degenerate geometry (coincident or collinear point sets) is *not* an error:
//! the grid indexer clamps cell sizes instead.

use thiserror::Error;

/// Unified error type for mesh-weld operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshWeldError {
    // ----- invalid shape ---------------------------------------------------
    /// An element references a node outside `[0, npoints)`.
    #[error("Element {element} slot {slot} references node {node}, beyond {npoints} points")]
    NodeIndexOutOfRange {
        element: usize,
        slot: usize,
        node: usize,
        npoints: usize,
    },
    /// Two tables (or a table and a pattern) disagree on the plexitude.
    #[error("Plexitude mismatch: expected {expected} nodes per row, found {found}")]
    PlexitudeMismatch { expected: usize, found: usize },
    /// A table was declared with zero nodes per row.
    #[error("Element table plexitude must be at least 1")]
    EmptyPlexitude,
    /// Flat coordinate buffer length does not fit the declared dimension.
    #[error("Coordinate buffer length mismatch: expected a multiple of {expected}, found {found}")]
    CoordinateLengthMismatch { expected: usize, found: usize },
    /// An index map does not cover every point it is applied to.
    #[error("Index map length mismatch: expected {expected} entries, found {found}")]
    IndexMapLengthMismatch { expected: usize, found: usize },
    /// An incidence value lies outside the declared number of targets.
    #[error("Row {row} holds value {value}, outside the {ntargets} declared targets")]
    TargetOutOfRange {
        row: usize,
        value: usize,
        ntargets: usize,
    },
    /// A sub-entity pattern names a local slot the element does not have.
    #[error("Pattern entity {entity} uses local slot {slot}, but elements have {nplex} nodes")]
    PatternSlotOutOfRange {
        entity: usize,
        slot: usize,
        nplex: usize,
    },
    /// Sub-entity pattern rows must all have the same length.
    #[error("Pattern entity {entity} has {found} slots, expected {expected}")]
    RaggedPattern {
        entity: usize,
        expected: usize,
        found: usize,
    },
    /// CSR offsets are not a monotone prefix array over the value buffer.
    #[error("Invalid CSR offsets: {0}")]
    InvalidOffsets(String),
    /// A renumbering is not a permutation of `0..n`.
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),
    /// A ragged table has a row longer than the requested padded width.
    #[error("Row of {max_degree} entries does not fit padded width {width}")]
    PaddedWidthTooSmall { width: usize, max_degree: usize },
    /// A per-entity or per-edge mask does not match the table it filters.
    #[error("Mask length mismatch: expected {expected}, found {found}")]
    MaskLengthMismatch { expected: usize, found: usize },

    // ----- usage errors ----------------------------------------------------
    /// A frontal-walk seed is not a valid item index.
    #[error("Seed {seed} is out of range for {nitems} items")]
    SeedOutOfRange { seed: usize, nitems: usize },
    /// The requested entity level does not exist for the element's dimension.
    #[error("Entity level {level} is invalid for elements of dimension {dimension}")]
    InvalidEntityLevel { level: usize, dimension: usize },
    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// A coordinate is NaN or infinite.
    #[error("Point {point} has a non-finite coordinate")]
    NonFiniteCoordinate { point: usize },
}
