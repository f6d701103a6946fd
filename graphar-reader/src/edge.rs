use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::RecordBatch;
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use graphar_error::{GarResult, gar_bail, gar_err};
use graphar_io::ChunkLoader;
use graphar_layout::{ChunkLayout, chunk_count};
use graphar_schema::{AdjList, AdjListType, EdgeInfo, PropertyGroup, columns};
use itertools::Itertools;
use log::{debug, trace};

use crate::assemble::{concat, join_by_position, with_index_column};
use crate::metadata::read_counter;
use crate::offset::covering_sub_chunks;
use crate::{OffsetTable, ReadOptions};

/// An edge chunk coordinate: (vertex chunk, sub-chunk).
type EdgeCoordinate = (u64, u64);

/// Which of the aligned edge chunk families to load.
#[derive(Clone, Copy)]
enum EdgeChunks<'g> {
    AdjList,
    Properties(&'g PropertyGroup),
}

/// Reads the chunks of one edge type, stored in one adjacency list ordering.
///
/// Construction fails with `UnsupportedAdjListType` unless the edge type declares the ordering.
/// After that the reader is stateless: every read is a function of the coordinates it is given.
pub struct EdgeReader<'a> {
    info: &'a EdgeInfo,
    adj_list: &'a AdjList,
    layout: ChunkLayout,
    loader: Arc<dyn ChunkLoader>,
    options: ReadOptions,
}

impl<'a> EdgeReader<'a> {
    pub fn try_new<P: Into<PathBuf>>(
        info: &'a EdgeInfo,
        adj_type: AdjListType,
        root: P,
        loader: Arc<dyn ChunkLoader>,
        options: ReadOptions,
    ) -> GarResult<Self> {
        let adj_list = info.adj_list(adj_type)?;
        Ok(Self {
            info,
            adj_list,
            layout: ChunkLayout::new(root),
            loader,
            options,
        })
    }

    pub fn info(&self) -> &'a EdgeInfo {
        self.info
    }

    pub fn adj_list(&self) -> &'a AdjList {
        self.adj_list
    }

    pub fn adj_list_type(&self) -> AdjListType {
        self.adj_list.adj_type()
    }

    pub fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    /// The number of vertices of the grouping vertex type, read from the ordering's
    /// `vertex_count` counter chunk.
    pub fn vertex_count(&self) -> GarResult<u64> {
        read_counter(
            self.loader.as_ref(),
            &self.layout.edge_vertex_count(self.info, self.adj_list),
            &self.options,
        )
    }

    /// The number of vertex chunks of the grouping vertex type.
    pub fn vertex_chunk_count(&self) -> GarResult<u64> {
        Ok(chunk_count(
            self.vertex_count()?,
            self.info.vertex_chunk_size(self.adj_list_type()),
        ))
    }

    /// The number of adjacency list sub-chunks in `vertex_chunk`.
    ///
    /// Taken from the `edge_count<n>` counter when present. Otherwise sub-chunk paths are probed
    /// in ascending order until one is absent.
    pub fn sub_chunk_count(&self, vertex_chunk: u64) -> GarResult<u64> {
        let counter = self.layout.edge_count(self.info, self.adj_list, vertex_chunk);
        if self.loader.exists(&counter) {
            let edges = read_counter(self.loader.as_ref(), &counter, &self.options)?;
            return Ok(chunk_count(edges, self.info.chunk_size()));
        }

        let mut sub_chunks = 0;
        while self.loader.exists(&self.layout.adj_list_chunk(
            self.info,
            self.adj_list,
            vertex_chunk,
            sub_chunks,
        )) {
            sub_chunks += 1;
        }
        trace!(
            "probed {} sub-chunks in vertex chunk {} of {}",
            sub_chunks,
            vertex_chunk,
            self.info.concat_key()
        );
        Ok(sub_chunks)
    }

    /// The number of edges in `vertex_chunk`: from the `edge_count<n>` counter, else from the
    /// offset chunk of an ordered list.
    pub fn edge_count_for_vertex_chunk(&self, vertex_chunk: u64) -> GarResult<u64> {
        let counter = self.layout.edge_count(self.info, self.adj_list, vertex_chunk);
        if self.loader.exists(&counter) {
            return read_counter(self.loader.as_ref(), &counter, &self.options);
        }
        if self.adj_list_type().has_offsets() {
            return Ok(self.read_offset_table(vertex_chunk)?.edge_count());
        }
        gar_bail!(
            MetadataMissing: "no edge count for vertex chunk {} of {} {}",
            vertex_chunk,
            self.info.concat_key(),
            self.adj_list_type()
        )
    }

    /// The number of edges across every vertex chunk.
    pub fn edge_count(&self) -> GarResult<u64> {
        let vertex_chunks = self.vertex_chunk_count()?;
        let counts = self
            .options
            .execution_mode()
            .run((0..vertex_chunks).collect(), |vertex_chunk| {
                self.edge_count_for_vertex_chunk(vertex_chunk)
            })?;
        Ok(counts.into_iter().sum())
    }

    /// The offset chunk of `vertex_chunk`: a single `_graphArOffset` column with one more row
    /// than the chunk has vertices. Only ordered adjacency lists have offsets.
    pub fn read_offset(&self, vertex_chunk: u64) -> GarResult<RecordBatch> {
        if !self.adj_list_type().has_offsets() {
            gar_bail!(
                UnsupportedAdjListType: "{} has no offsets, only ordered adjacency lists do",
                self.adj_list_type()
            );
        }
        let path = self.layout.offset_chunk(self.info, self.adj_list, vertex_chunk);
        trace!("loading offset chunk {}", path.display());
        let file_type = self.adj_list.file_type();
        let options = self
            .options
            .load_options_for(file_type, || Some(offset_schema()));
        self.loader
            .load(&path, file_type, &options)
            .map_err(|err| {
                if err.is_chunk_not_found() {
                    gar_err!(MetadataMissing: "offset chunk {} is absent", path.display())
                } else {
                    err
                }
            })
    }

    /// The decoded offset chunk of `vertex_chunk`.
    pub fn read_offset_table(&self, vertex_chunk: u64) -> GarResult<OffsetTable> {
        OffsetTable::try_new(vertex_chunk, &self.read_offset(vertex_chunk)?)
    }

    /// One adjacency list sub-chunk: `_graphArSrcIndex`, `_graphArDstIndex` in on-disk order.
    pub fn read_adj_list_chunk(&self, vertex_chunk: u64, sub_chunk: u64) -> GarResult<RecordBatch> {
        self.load_chunk(EdgeChunks::AdjList, (vertex_chunk, sub_chunk))
    }

    /// Every adjacency list sub-chunk of `vertex_chunk`, in sub-chunk order. With `with_index`, a
    /// leading `_graphArEdgeIndex` column numbers the rows from zero within the vertex chunk.
    pub fn read_adj_list_for_vertex_chunk(
        &self,
        vertex_chunk: u64,
        with_index: bool,
    ) -> GarResult<RecordBatch> {
        let coordinates = self.coordinates_for_vertex_chunk(vertex_chunk)?;
        debug!(
            "reading adjacency list of {} {} for vertex chunk {}",
            self.info.concat_key(),
            self.adj_list_type(),
            vertex_chunk
        );
        let table = self.load_chunks(EdgeChunks::AdjList, &coordinates)?;
        finish(table, with_index)
    }

    /// The adjacency list of every vertex chunk, in (vertex chunk, sub-chunk) order. With
    /// `with_index`, the leading `_graphArEdgeIndex` column is global.
    pub fn read_all_adj_list(&self, with_index: bool) -> GarResult<RecordBatch> {
        let coordinates = self.all_coordinates()?;
        debug!(
            "reading adjacency list of {} {} across {} sub-chunks",
            self.info.concat_key(),
            self.adj_list_type(),
            coordinates.len()
        );
        let table = self.load_chunks(EdgeChunks::AdjList, &coordinates)?;
        finish(table, with_index)
    }

    /// The edges of the `vertex_id`-th vertex of the grouping type, taken from an ordered
    /// adjacency list. Only the sub-chunks covering the vertex's edges are loaded.
    pub fn read_adj_list_for_vertex(&self, vertex_id: u64) -> GarResult<RecordBatch> {
        if !self.adj_list_type().has_offsets() {
            gar_bail!(
                UnsupportedAdjListType: "{} has no offsets to locate the edges of vertex {}",
                self.adj_list_type(),
                vertex_id
            );
        }
        let vertex_count = self.vertex_count()?;
        if vertex_id >= vertex_count {
            gar_bail!(
                "vertex {} is out of range, {} has {} {} vertices",
                vertex_id,
                self.info.concat_key(),
                vertex_count,
                self.info.grouping_label(self.adj_list_type())
            );
        }

        let chunk_size = self.info.vertex_chunk_size(self.adj_list_type());
        let vertex_chunk = vertex_id / chunk_size;
        let offsets = self.read_offset_table(vertex_chunk)?;
        let Some(rows) = offsets.edge_range(vertex_id % chunk_size) else {
            gar_bail!(
                MetadataMissing: "offset chunk {} describes {} vertices, not vertex {}",
                vertex_chunk,
                offsets.vertex_count(),
                vertex_id
            );
        };

        if rows.is_empty() {
            trace!("vertex {} has no edges in {}", vertex_id, self.info.concat_key());
            return Ok(RecordBatch::new_empty(adj_list_schema()));
        }

        let sub_chunks = covering_sub_chunks(&rows, self.info.chunk_size());
        debug!(
            "reading edges {}..{} of vertex {} from sub-chunks {}..{}",
            rows.start, rows.end, vertex_id, sub_chunks.start, sub_chunks.end
        );
        let coordinates = sub_chunks
            .clone()
            .map(|sub_chunk| (vertex_chunk, sub_chunk))
            .collect::<Vec<_>>();
        let table = self.load_chunks(EdgeChunks::AdjList, &coordinates)?;

        let skip = rows.start - sub_chunks.start * self.info.chunk_size();
        let (Ok(offset), Ok(length)) = (
            usize::try_from(skip),
            usize::try_from(rows.end - rows.start),
        ) else {
            gar_bail!(
                "edge range {}..{} of vertex {} overflows",
                rows.start,
                rows.end,
                vertex_id
            );
        };
        if offset + length > table.num_rows() {
            gar_bail!(
                MisalignedChunks: "offsets of vertex chunk {} point past its {} loaded edges",
                vertex_chunk,
                table.num_rows()
            );
        }
        Ok(table.slice(offset, length))
    }

    /// One sub-chunk of an edge property group, row-aligned with the adjacency list sub-chunk at
    /// the same coordinate.
    pub fn read_edge_property_chunk(
        &self,
        group: &PropertyGroup,
        vertex_chunk: u64,
        sub_chunk: u64,
    ) -> GarResult<RecordBatch> {
        self.check_group(group)?;
        self.load_chunk(EdgeChunks::Properties(group), (vertex_chunk, sub_chunk))
    }

    /// Every sub-chunk of one property group in `vertex_chunk`. The optional edge index is
    /// zero-based within the vertex chunk, as for the adjacency list.
    pub fn read_edge_property_group_for_vertex_chunk(
        &self,
        group: &PropertyGroup,
        vertex_chunk: u64,
        with_index: bool,
    ) -> GarResult<RecordBatch> {
        self.check_group(group)?;
        let coordinates = self.coordinates_for_vertex_chunk(vertex_chunk)?;
        finish(
            self.load_chunks(EdgeChunks::Properties(group), &coordinates)?,
            with_index,
        )
    }

    /// Every sub-chunk of one property group, across every vertex chunk.
    pub fn read_edge_property_group(
        &self,
        group: &PropertyGroup,
        with_index: bool,
    ) -> GarResult<RecordBatch> {
        self.check_group(group)?;
        let coordinates = self.all_coordinates()?;
        finish(
            self.load_chunks(EdgeChunks::Properties(group), &coordinates)?,
            with_index,
        )
    }

    /// Several property groups of `vertex_chunk` joined column-wise, in the order given.
    pub fn read_multiple_edge_property_groups_for_vertex_chunk(
        &self,
        groups: &[PropertyGroup],
        vertex_chunk: u64,
    ) -> GarResult<RecordBatch> {
        self.check_groups(groups)?;
        let coordinates = self.coordinates_for_vertex_chunk(vertex_chunk)?;
        self.join_groups(groups, &coordinates)
    }

    /// Several property groups joined column-wise, across every vertex chunk.
    pub fn read_multiple_edge_property_groups(
        &self,
        groups: &[PropertyGroup],
    ) -> GarResult<RecordBatch> {
        self.check_groups(groups)?;
        let coordinates = self.all_coordinates()?;
        self.join_groups(groups, &coordinates)
    }

    /// Every property group of the ordering for `vertex_chunk`, in declaration order.
    pub fn read_all_edge_property_groups_for_vertex_chunk(
        &self,
        vertex_chunk: u64,
    ) -> GarResult<RecordBatch> {
        self.read_multiple_edge_property_groups_for_vertex_chunk(
            self.adj_list.property_groups(),
            vertex_chunk,
        )
    }

    /// Every property group of the ordering, across every vertex chunk.
    pub fn read_all_edge_property_groups(&self) -> GarResult<RecordBatch> {
        self.read_multiple_edge_property_groups(self.adj_list.property_groups())
    }

    /// The adjacency list of `vertex_chunk` joined with every property group of the ordering.
    pub fn read_edges_for_vertex_chunk(
        &self,
        vertex_chunk: u64,
        with_index: bool,
    ) -> GarResult<RecordBatch> {
        let coordinates = self.coordinates_for_vertex_chunk(vertex_chunk)?;
        debug!(
            "reading edges of {} {} for vertex chunk {}",
            self.info.concat_key(),
            self.adj_list_type(),
            vertex_chunk
        );
        finish(self.assemble_edges(&coordinates)?, with_index)
    }

    /// Every edge, ordered by vertex chunk, then sub-chunk, then row.
    pub fn read_edges(&self, with_index: bool) -> GarResult<RecordBatch> {
        let coordinates = self.all_coordinates()?;
        debug!(
            "reading edges of {} {} across {} sub-chunks",
            self.info.concat_key(),
            self.adj_list_type(),
            coordinates.len()
        );
        finish(self.assemble_edges(&coordinates)?, with_index)
    }

    fn check_group(&self, group: &PropertyGroup) -> GarResult<()> {
        if !self.adj_list.has_property_group(group) {
            gar_bail!(
                UnknownPropertyGroup: "{} is not a property group of {} {}",
                group,
                self.info.concat_key(),
                self.adj_list_type()
            );
        }
        Ok(())
    }

    fn check_groups(&self, groups: &[PropertyGroup]) -> GarResult<()> {
        if groups.is_empty() {
            gar_bail!(
                "at least one property group must be requested for {} {}",
                self.info.concat_key(),
                self.adj_list_type()
            );
        }
        groups.iter().try_for_each(|group| self.check_group(group))
    }

    fn coordinates_for_vertex_chunk(&self, vertex_chunk: u64) -> GarResult<Vec<EdgeCoordinate>> {
        let sub_chunks = self.sub_chunk_count(vertex_chunk)?;
        Ok((0..sub_chunks)
            .map(|sub_chunk| (vertex_chunk, sub_chunk))
            .collect())
    }

    fn all_coordinates(&self) -> GarResult<Vec<EdgeCoordinate>> {
        let vertex_chunks = self.vertex_chunk_count()?;
        let per_chunk = self
            .options
            .execution_mode()
            .run((0..vertex_chunks).collect(), |vertex_chunk| {
                self.coordinates_for_vertex_chunk(vertex_chunk)
            })?;
        Ok(per_chunk.into_iter().flatten().collect())
    }

    fn load_chunk(&self, chunks: EdgeChunks<'_>, coordinate: EdgeCoordinate) -> GarResult<RecordBatch> {
        let (vertex_chunk, sub_chunk) = coordinate;
        let (path, file_type, options) = match chunks {
            EdgeChunks::AdjList => (
                self.layout
                    .adj_list_chunk(self.info, self.adj_list, vertex_chunk, sub_chunk),
                self.adj_list.file_type(),
                self.options
                    .load_options_for(self.adj_list.file_type(), || Some(adj_list_schema())),
            ),
            EdgeChunks::Properties(group) => (
                self.layout.edge_property_chunk(
                    self.info,
                    self.adj_list,
                    group,
                    vertex_chunk,
                    sub_chunk,
                ),
                group.file_type(),
                self.options
                    .load_options_for(group.file_type(), || group.arrow_schema()),
            ),
        };
        trace!("loading edge chunk {}", path.display());
        self.loader.load(&path, file_type, &options)
    }

    fn load_chunks(
        &self,
        chunks: EdgeChunks<'_>,
        coordinates: &[EdgeCoordinate],
    ) -> GarResult<RecordBatch> {
        let tables = self
            .options
            .execution_mode()
            .run(coordinates.to_vec(), |coordinate| {
                self.load_chunk(chunks, coordinate)
            })?;
        concat(&tables, || match chunks {
            EdgeChunks::AdjList => adj_list_schema(),
            EdgeChunks::Properties(group) => group
                .arrow_schema()
                .unwrap_or_else(|| Arc::new(Schema::empty())),
        })
    }

    fn join_groups(
        &self,
        groups: &[PropertyGroup],
        coordinates: &[EdgeCoordinate],
    ) -> GarResult<RecordBatch> {
        debug!(
            "reading property groups [{}] of {} {} across {} sub-chunks",
            groups.iter().join(", "),
            self.info.concat_key(),
            self.adj_list_type(),
            coordinates.len()
        );
        let tables = groups
            .iter()
            .map(|group| self.load_chunks(EdgeChunks::Properties(group), coordinates))
            .collect::<GarResult<Vec<_>>>()?;
        join_by_position(&tables)
    }

    fn assemble_edges(&self, coordinates: &[EdgeCoordinate]) -> GarResult<RecordBatch> {
        let mut tables = vec![self.load_chunks(EdgeChunks::AdjList, coordinates)?];
        for group in self.adj_list.property_groups() {
            tables.push(self.load_chunks(EdgeChunks::Properties(group), coordinates)?);
        }
        join_by_position(&tables)
    }
}

fn finish(table: RecordBatch, with_index: bool) -> GarResult<RecordBatch> {
    if with_index {
        with_index_column(table, columns::EDGE_INDEX, 0)
    } else {
        Ok(table)
    }
}

fn offset_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![Field::new(
        columns::OFFSET,
        DataType::Int64,
        false,
    )]))
}

fn adj_list_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(columns::SRC_INDEX, DataType::Int64, false),
        Field::new(columns::DST_INDEX, DataType::Int64, false),
    ]))
}
