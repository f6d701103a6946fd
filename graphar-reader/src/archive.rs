use std::path::{Path, PathBuf};
use std::sync::Arc;

use graphar_error::{GarResult, gar_err};
use graphar_io::{ChunkLoader, LocalChunkLoader};
use graphar_schema::{AdjListType, GraphInfo};

use crate::{EdgeReader, ReadOptions, VertexReader};

/// A whole graph: its metadata, where its chunks live and how to load them.
///
/// Readers handed out by an archive borrow the archive's metadata and share its loader.
pub struct GraphArchive {
    info: GraphInfo,
    root: PathBuf,
    loader: Arc<dyn ChunkLoader>,
    options: ReadOptions,
}

impl GraphArchive {
    /// An archive whose chunk paths resolve under `root` joined with the graph's prefix.
    pub fn new<P: AsRef<Path>>(info: GraphInfo, root: P, loader: Arc<dyn ChunkLoader>) -> Self {
        let root = root.as_ref().join(info.prefix());
        Self {
            info,
            root,
            loader,
            options: ReadOptions::default(),
        }
    }

    /// An archive on the local filesystem.
    pub fn open_local<P: AsRef<Path>>(info: GraphInfo, root: P) -> Self {
        Self::new(info, root, Arc::new(LocalChunkLoader))
    }

    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn info(&self) -> &GraphInfo {
        &self.info
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// A reader for the vertex type `label`.
    pub fn vertex_reader(&self, label: &str) -> GarResult<VertexReader<'_>> {
        let info = self
            .info
            .vertex_info(label)
            .ok_or_else(|| gar_err!("graph {} has no vertex type {}", self.info.name(), label))?;
        Ok(VertexReader::new(
            info,
            &self.root,
            self.loader.clone(),
            self.options.clone(),
        ))
    }

    /// A reader for the edge type `(src_label, edge_label, dst_label)` in ordering `adj_type`.
    pub fn edge_reader(
        &self,
        src_label: &str,
        edge_label: &str,
        dst_label: &str,
        adj_type: AdjListType,
    ) -> GarResult<EdgeReader<'_>> {
        let info = self
            .info
            .edge_info(src_label, edge_label, dst_label)
            .ok_or_else(|| {
                gar_err!(
                    "graph {} has no edge type {}_{}_{}",
                    self.info.name(),
                    src_label,
                    edge_label,
                    dst_label
                )
            })?;
        EdgeReader::try_new(
            info,
            adj_type,
            &self.root,
            self.loader.clone(),
            self.options.clone(),
        )
    }
}
