use std::ops::Range;

use arrow_array::RecordBatch;
use graphar_error::{GarResult, gar_bail, gar_err};
use graphar_schema::columns;
use itertools::Itertools;

use crate::metadata::integer_values;

/// The decoded offset chunk of one vertex chunk of an ordered adjacency list.
///
/// This is the CSR row-pointer array of the vertex chunk's edge partition: entry `i` is the row,
/// within the partition, of the first edge of the chunk's `i`-th vertex, and the final entry is the
/// number of edges in the partition. The table therefore has one more entry than the chunk has
/// vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    vertex_chunk: u64,
    offsets: Vec<u64>,
}

impl OffsetTable {
    /// Decode an offset table from the `_graphArOffset` column of an offset chunk, or from its
    /// only column when no column has that name.
    pub fn try_new(vertex_chunk: u64, table: &RecordBatch) -> GarResult<Self> {
        let column = match table.column_by_name(columns::OFFSET) {
            Some(column) => column,
            None if table.num_columns() == 1 => table.column(0),
            None => gar_bail!(
                MetadataMissing: "offset chunk {} has no {} column",
                vertex_chunk,
                columns::OFFSET
            ),
        };
        let offsets = integer_values(column.as_ref()).ok_or_else(|| {
            gar_err!(
                MetadataMissing: "offsets of vertex chunk {} are not non-negative integers",
                vertex_chunk
            )
        })?;
        Self::from_offsets(vertex_chunk, offsets)
    }

    pub fn from_offsets(vertex_chunk: u64, offsets: Vec<u64>) -> GarResult<Self> {
        if offsets.is_empty() {
            gar_bail!(MetadataMissing: "offset chunk {} is empty", vertex_chunk);
        }
        if let Some((a, b)) = offsets.iter().tuple_windows().find(|(a, b)| a > b) {
            gar_bail!(
                MetadataMissing: "offsets of vertex chunk {} decrease from {} to {}",
                vertex_chunk,
                a,
                b
            );
        }
        Ok(Self {
            vertex_chunk,
            offsets,
        })
    }

    pub fn vertex_chunk(&self) -> u64 {
        self.vertex_chunk
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// The number of vertices the offsets describe.
    pub fn vertex_count(&self) -> u64 {
        self.offsets.len() as u64 - 1
    }

    /// The number of edges in the vertex chunk's partition.
    pub fn edge_count(&self) -> u64 {
        self.offsets.last().copied().unwrap_or_default()
    }

    /// The partition rows holding the edges of the `local_vertex`-th vertex of the chunk.
    pub fn edge_range(&self, local_vertex: u64) -> Option<Range<u64>> {
        let idx = usize::try_from(local_vertex).ok()?;
        let start = *self.offsets.get(idx)?;
        let end = *self.offsets.get(idx + 1)?;
        Some(start..end)
    }
}

/// The sub-chunks of `chunk_size` rows that cover `rows`.
pub(crate) fn covering_sub_chunks(rows: &Range<u64>, chunk_size: u64) -> Range<u64> {
    if rows.is_empty() || chunk_size == 0 {
        return 0..0;
    }
    rows.start / chunk_size..(rows.end - 1) / chunk_size + 1
}
