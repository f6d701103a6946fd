//! Loading GraphAr chunk files as Arrow record batches.
//!
//! Readers never decode bytes themselves. They resolve chunk paths and hand each one to a
//! [`ChunkLoader`], which returns the chunk as a single [`RecordBatch`] whose rows are in on-disk
//! order. This crate defines that contract and ships two loaders:
//!
//! * [`LocalChunkLoader`] reads Parquet and CSV chunks from the local filesystem.
//! * [`InMemoryChunkLoader`] serves batches that were staged in memory.

use std::path::Path;

use arrow_array::RecordBatch;
use graphar_error::GarResult;
use graphar_schema::FileType;

pub use local::*;
pub use memory::*;
pub use options::*;

mod local;
mod memory;
mod options;

/// Turns one chunk path into one table.
///
/// Implementations must be shareable across threads, since readers may load independent chunks
/// of one request in parallel.
pub trait ChunkLoader: Send + Sync {
    /// Load the chunk at `path`, decoded as `file_type`.
    ///
    /// A missing path fails with [`graphar_error::GarError::ChunkNotFound`]. Formats the loader
    /// cannot decode fail with [`graphar_error::GarError::UnsupportedFormat`].
    fn load(&self, path: &Path, file_type: FileType, options: &LoadOptions)
    -> GarResult<RecordBatch>;

    /// Whether a chunk exists at `path`, without loading it.
    fn exists(&self, path: &Path) -> bool;
}
