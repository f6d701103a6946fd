use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::RecordBatch;
use arrow_schema::Schema;
use graphar_error::{GarResult, gar_bail};
use graphar_io::ChunkLoader;
use graphar_layout::{ChunkLayout, chunk_count};
use graphar_schema::{PropertyGroup, VertexInfo, columns};
use itertools::Itertools;
use log::{debug, trace};

use crate::assemble::{concat, join_by_position, with_index_column};
use crate::metadata::read_counter;
use crate::ReadOptions;

/// Reads the property chunks of one vertex type.
///
/// A reader borrows its [`VertexInfo`] and holds no other state than its configuration, so any
/// number of reads can be issued against it, from any number of threads.
pub struct VertexReader<'a> {
    info: &'a VertexInfo,
    layout: ChunkLayout,
    loader: Arc<dyn ChunkLoader>,
    options: ReadOptions,
}

impl<'a> VertexReader<'a> {
    pub fn new<P: Into<PathBuf>>(
        info: &'a VertexInfo,
        root: P,
        loader: Arc<dyn ChunkLoader>,
        options: ReadOptions,
    ) -> Self {
        Self {
            info,
            layout: ChunkLayout::new(root),
            loader,
            options,
        }
    }

    pub fn info(&self) -> &'a VertexInfo {
        self.info
    }

    pub fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    /// The total number of vertices, read from the `vertex_count` counter chunk.
    pub fn vertex_count(&self) -> GarResult<u64> {
        read_counter(
            self.loader.as_ref(),
            &self.layout.vertex_count(self.info),
            &self.options,
        )
    }

    /// The number of vertex chunks.
    pub fn chunk_count(&self) -> GarResult<u64> {
        Ok(chunk_count(self.vertex_count()?, self.info.chunk_size()))
    }

    /// One chunk of one property group, without an index column.
    pub fn read_vertex_property_chunk(
        &self,
        group: &PropertyGroup,
        chunk: u64,
    ) -> GarResult<RecordBatch> {
        self.check_group(group)?;
        self.load_chunk(group, chunk)
    }

    /// Every chunk of one property group, concatenated in chunk order. With `with_index`, a
    /// leading `_graphArVertexIndex` column holds each row's vertex id.
    pub fn read_vertex_property_group(
        &self,
        group: &PropertyGroup,
        with_index: bool,
    ) -> GarResult<RecordBatch> {
        self.check_group(group)?;
        let chunks = self.chunk_count()?;
        debug!(
            "reading property group {} of vertex {} across {} chunks",
            group,
            self.info.label(),
            chunks
        );

        let table = self.load_group(group, chunks)?;
        finish(table, with_index)
    }

    /// Several property groups joined column-wise, columns in the order the groups are given.
    /// Every group is validated before any chunk is loaded.
    pub fn read_multiple_vertex_property_groups(
        &self,
        groups: &[PropertyGroup],
        with_index: bool,
    ) -> GarResult<RecordBatch> {
        if groups.is_empty() {
            gar_bail!(
                "at least one property group must be requested for vertex {}",
                self.info.label()
            );
        }
        for group in groups {
            self.check_group(group)?;
        }

        let chunks = self.chunk_count()?;
        debug!(
            "reading property groups [{}] of vertex {} across {} chunks",
            groups.iter().join(", "),
            self.info.label(),
            chunks
        );

        let tables = groups
            .iter()
            .map(|group| self.load_group(group, chunks))
            .collect::<GarResult<Vec<_>>>()?;
        finish(join_by_position(&tables)?, with_index)
    }

    /// Every declared property group, in declaration order.
    pub fn read_all_vertex_property_groups(&self, with_index: bool) -> GarResult<RecordBatch> {
        self.read_multiple_vertex_property_groups(self.info.property_groups(), with_index)
    }

    fn check_group(&self, group: &PropertyGroup) -> GarResult<()> {
        if !self.info.has_property_group(group) {
            gar_bail!(
                UnknownPropertyGroup: "{} is not a property group of vertex {}",
                group,
                self.info.label()
            );
        }
        Ok(())
    }

    fn load_chunk(&self, group: &PropertyGroup, chunk: u64) -> GarResult<RecordBatch> {
        let path = self.layout.vertex_property_chunk(self.info, group, chunk);
        trace!("loading vertex chunk {}", path.display());
        let options = self
            .options
            .load_options_for(group.file_type(), || group.arrow_schema());
        self.loader.load(&path, group.file_type(), &options)
    }

    fn load_group(&self, group: &PropertyGroup, chunks: u64) -> GarResult<RecordBatch> {
        let tables = self
            .options
            .execution_mode()
            .run((0..chunks).collect(), |chunk| self.load_chunk(group, chunk))?;
        concat(&tables, || {
            group
                .arrow_schema()
                .unwrap_or_else(|| Arc::new(Schema::empty()))
        })
    }
}

fn finish(table: RecordBatch, with_index: bool) -> GarResult<RecordBatch> {
    if with_index {
        with_index_column(table, columns::VERTEX_INDEX, 0)
    } else {
        Ok(table)
    }
}
