//! Element type catalog and lower-entity patterns.

pub mod element_type;

pub use element_type::{ElementType, SubPattern};
