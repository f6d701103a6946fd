use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use arrow_array::RecordBatch;
use arrow_select::concat::concat_batches;
use graphar_error::{GarResult, gar_bail};
use graphar_schema::FileType;
use hashbrown::HashMap;
use log::trace;
use parking_lot::RwLock;

use crate::{ChunkLoader, LoadOptions};

/// Serves chunks that were staged in memory, keyed by path.
///
/// Batches are stored already decoded, so the requested file type is not checked. Every call to
/// [`ChunkLoader::load`] is counted, whether or not it succeeds.
#[derive(Default)]
pub struct InMemoryChunkLoader {
    chunks: RwLock<HashMap<PathBuf, RecordBatch>>,
    loads: AtomicUsize,
}

impl InMemoryChunkLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `batch` at `path`, returning the batch it replaces.
    pub fn insert<P: Into<PathBuf>>(&self, path: P, batch: RecordBatch) -> Option<RecordBatch> {
        self.chunks.write().insert(path.into(), batch)
    }

    pub fn remove(&self, path: &Path) -> Option<RecordBatch> {
        self.chunks.write().remove(path)
    }

    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.read().is_empty()
    }

    /// The number of times [`ChunkLoader::load`] was called.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl ChunkLoader for InMemoryChunkLoader {
    fn load(
        &self,
        path: &Path,
        _file_type: FileType,
        options: &LoadOptions,
    ) -> GarResult<RecordBatch> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        trace!("loading staged chunk {}", path.display());

        let chunks = self.chunks.read();
        if let Some(batch) = chunks.get(path) {
            return Ok(batch.clone());
        }

        if options.recursive() {
            let mut nested = chunks
                .iter()
                .filter(|(staged, _)| staged.starts_with(path))
                .collect::<Vec<_>>();
            nested.sort_by(|(a, _), (b, _)| a.cmp(b));
            if let Some((_, first)) = nested.first() {
                return Ok(concat_batches(
                    &first.schema(),
                    nested.iter().map(|(_, batch)| *batch),
                )?);
            }
        }

        gar_bail!(ChunkNotFound: "{}", path.display())
    }

    fn exists(&self, path: &Path) -> bool {
        self.chunks.read().contains_key(path)
    }
}
