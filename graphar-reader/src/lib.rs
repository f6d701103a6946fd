//! Read GraphAr archives into Arrow tables.
//!
//! A read starts from a schema value ([`graphar_schema::VertexInfo`] or
//! [`graphar_schema::EdgeInfo`]) and a set of chunk coordinates. The reader validates the request
//! against the schema, resolves the chunk paths through [`graphar_layout::ChunkLayout`], loads
//! every chunk through a [`graphar_io::ChunkLoader`] and assembles one table:
//!
//! * chunks of one property group are concatenated in chunk order,
//! * property groups are joined by row position,
//! * adjacency lists are located through their CSR offset chunks.
//!
//! The independent chunk loads of one read run according to the [`ExecutionMode`] of the
//! reader's [`ReadOptions`], and are always reassembled in chunk order.

pub use archive::*;
pub use edge::*;
pub use exec::*;
pub use offset::*;
pub use options::*;
pub use vertex::*;

mod archive;
mod assemble;
mod edge;
mod exec;
mod metadata;
mod offset;
mod options;
#[cfg(test)]
mod tests;
mod vertex;
