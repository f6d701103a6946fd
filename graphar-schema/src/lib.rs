#![deny(missing_docs)]

//! The metadata model for GraphAr archives
//!
//! This crate describes vertex types, edge types and whole graphs as closed, immutable values.
//! Every value is validated once, at construction, so readers can rely on its invariants: chunk
//! sizes are positive, each property lives in exactly one property group, and each adjacency
//! list ordering is declared at most once per edge type.
//!
//! With the `serde` feature enabled the types (de)serialize using the field names of GraphAr's
//! metadata files, and deserialization runs through the same validating constructors.

pub use adj_list::*;
pub use data_type::*;
pub use edge::*;
pub use file_type::*;
pub use graph::*;
pub use property::*;
pub use vertex::*;

mod adj_list;
pub mod columns;
mod data_type;
mod edge;
mod file_type;
mod graph;
mod property;
#[cfg(feature = "serde")]
mod serde;
mod vertex;
