#![deny(missing_docs)]

//! Physical layout of a GraphAr archive.
//!
//! Every read in GraphAr starts by resolving a logical request into chunk file paths. The
//! resolution is pure: it only joins path segments, and never touches storage. Whether a path
//! exists is for the loader to find out.
//!
//! ```text
//! <root>/<vertex prefix>/<group prefix>/chunk<n>
//! <root>/<vertex prefix>/vertex_count
//! <root>/<edge prefix>/<adj prefix>/adj_list/part<v>/chunk<s>
//! <root>/<edge prefix>/<adj prefix>/offset/chunk<v>
//! <root>/<edge prefix>/<adj prefix>/<group prefix>/part<v>/chunk<s>
//! <root>/<edge prefix>/<adj prefix>/vertex_count
//! <root>/<edge prefix>/<adj prefix>/edge_count<v>
//! ```

use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::path::{Path, PathBuf};

use graphar_schema::{AdjList, EdgeInfo, PropertyGroup, VertexInfo};

/// File name of the vertex counter chunk.
pub const VERTEX_COUNT_FILE: &str = "vertex_count";
/// File name prefix of the per-vertex-chunk edge counter chunks.
pub const EDGE_COUNT_FILE_PREFIX: &str = "edge_count";
/// Directory holding the adjacency list chunks of an ordering.
pub const ADJ_LIST_DIR: &str = "adj_list";
/// Directory holding the offset chunks of an ordering.
pub const OFFSET_DIR: &str = "offset";

const CHUNK_FILE_PREFIX: &str = "chunk";
const PART_DIR_PREFIX: &str = "part";

/// The position of a chunk within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChunkCoordinate {
    /// A vertex chunk, or any other chunk indexed by vertex chunk alone.
    Vertex(u64),
    /// An edge sub-chunk within the partition of one vertex chunk.
    Edge {
        /// The vertex chunk of the grouping endpoint
        vertex_chunk: u64,
        /// The bounded-size slice of that vertex chunk's edges
        sub_chunk: u64,
    },
}

impl ChunkCoordinate {
    /// The path of this chunk relative to its group directory.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Self::Vertex(chunk) => PathBuf::from(format!("{CHUNK_FILE_PREFIX}{chunk}")),
            Self::Edge {
                vertex_chunk,
                sub_chunk,
            } => Path::new(&format!("{PART_DIR_PREFIX}{vertex_chunk}"))
                .join(format!("{CHUNK_FILE_PREFIX}{sub_chunk}")),
        }
    }
}

impl Display for ChunkCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex(chunk) => write!(f, "chunk {chunk}"),
            Self::Edge {
                vertex_chunk,
                sub_chunk,
            } => write!(f, "vertex chunk {vertex_chunk}, sub-chunk {sub_chunk}"),
        }
    }
}

/// Resolves schema elements and chunk coordinates to paths under one archive root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkLayout {
    root: PathBuf,
}

impl ChunkLayout {
    /// A layout rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The archive root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<prefix>/<group_prefix>/<coordinate>`.
    pub fn resolve<G: AsRef<Path>>(
        &self,
        prefix: &str,
        group_prefix: G,
        coordinate: ChunkCoordinate,
    ) -> PathBuf {
        self.root
            .join(prefix)
            .join(group_prefix)
            .join(coordinate.relative_path())
    }

    /// The directory holding every chunk of a vertex property group.
    pub fn vertex_property_dir(&self, vertex: &VertexInfo, group: &PropertyGroup) -> PathBuf {
        self.root.join(vertex.prefix()).join(group.prefix())
    }

    /// One chunk of a vertex property group.
    pub fn vertex_property_chunk(
        &self,
        vertex: &VertexInfo,
        group: &PropertyGroup,
        chunk: u64,
    ) -> PathBuf {
        self.resolve(vertex.prefix(), group.prefix(), ChunkCoordinate::Vertex(chunk))
    }

    /// The counter chunk holding the number of vertices of a vertex type.
    pub fn vertex_count(&self, vertex: &VertexInfo) -> PathBuf {
        self.root.join(vertex.prefix()).join(VERTEX_COUNT_FILE)
    }

    /// One sub-chunk of an adjacency list.
    pub fn adj_list_chunk(
        &self,
        edge: &EdgeInfo,
        adj: &AdjList,
        vertex_chunk: u64,
        sub_chunk: u64,
    ) -> PathBuf {
        self.resolve(
            edge.prefix(),
            Path::new(adj.prefix()).join(ADJ_LIST_DIR),
            ChunkCoordinate::Edge {
                vertex_chunk,
                sub_chunk,
            },
        )
    }

    /// The offset chunk of one vertex chunk of an ordered adjacency list.
    pub fn offset_chunk(&self, edge: &EdgeInfo, adj: &AdjList, vertex_chunk: u64) -> PathBuf {
        self.resolve(
            edge.prefix(),
            Path::new(adj.prefix()).join(OFFSET_DIR),
            ChunkCoordinate::Vertex(vertex_chunk),
        )
    }

    /// One sub-chunk of an edge property group, aligned with the adjacency list sub-chunk at the
    /// same coordinate.
    pub fn edge_property_chunk(
        &self,
        edge: &EdgeInfo,
        adj: &AdjList,
        group: &PropertyGroup,
        vertex_chunk: u64,
        sub_chunk: u64,
    ) -> PathBuf {
        self.resolve(
            edge.prefix(),
            Path::new(adj.prefix()).join(group.prefix()),
            ChunkCoordinate::Edge {
                vertex_chunk,
                sub_chunk,
            },
        )
    }

    /// The counter chunk holding the number of vertices of the grouping vertex type.
    pub fn edge_vertex_count(&self, edge: &EdgeInfo, adj: &AdjList) -> PathBuf {
        self.root
            .join(edge.prefix())
            .join(adj.prefix())
            .join(VERTEX_COUNT_FILE)
    }

    /// The counter chunk holding the number of edges in one vertex chunk.
    pub fn edge_count(&self, edge: &EdgeInfo, adj: &AdjList, vertex_chunk: u64) -> PathBuf {
        self.root
            .join(edge.prefix())
            .join(adj.prefix())
            .join(format!("{EDGE_COUNT_FILE_PREFIX}{vertex_chunk}"))
    }
}

/// The number of chunks of `chunk_size` rows needed to hold `total` rows.
pub fn chunk_count(total: u64, chunk_size: u64) -> u64 {
    if chunk_size == 0 {
        return 0;
    }
    total.div_ceil(chunk_size)
}

/// The global row range covered by chunk `index`, clamped to `total`.
pub fn chunk_row_range(total: u64, chunk_size: u64, index: u64) -> Range<u64> {
    let start = index.saturating_mul(chunk_size).min(total);
    let end = start.saturating_add(chunk_size).min(total);
    start..end
}

#[cfg(test)]
mod tests {
    use graphar_schema::{AdjListType, DataType, FileType, Property};
    use rstest::rstest;

    use super::*;

    fn person() -> (VertexInfo, PropertyGroup) {
        let group = PropertyGroup::try_new(
            vec![Property::new("id", DataType::Int64).with_primary(true)],
            FileType::Parquet,
            None,
        )
        .unwrap();
        let info = VertexInfo::try_new("person", 100, vec![group.clone()], None, None).unwrap();
        (info, group)
    }

    fn knows() -> (EdgeInfo, PropertyGroup) {
        let group = PropertyGroup::try_new(
            vec![Property::new("creationDate", DataType::String)],
            FileType::Parquet,
            None,
        )
        .unwrap();
        let adj = AdjList::try_new(
            AdjListType::OrderedBySource,
            FileType::Parquet,
            vec![group.clone()],
            None,
        )
        .unwrap();
        let info = EdgeInfo::builder("person", "knows", "person")
            .chunk_size(1024)
            .src_chunk_size(100)
            .dst_chunk_size(100)
            .adj_list(adj)
            .build()
            .unwrap();
        (info, group)
    }

    #[test]
    fn vertex_paths() {
        let layout = ChunkLayout::new("/data/ldbc");
        let (person, id) = person();

        assert_eq!(
            layout.vertex_property_chunk(&person, &id, 9),
            PathBuf::from("/data/ldbc/vertex/person/id/chunk9")
        );
        assert_eq!(
            layout.vertex_count(&person),
            PathBuf::from("/data/ldbc/vertex/person/vertex_count")
        );
        assert_eq!(
            layout.vertex_property_dir(&person, &id),
            PathBuf::from("/data/ldbc/vertex/person/id")
        );
    }

    #[test]
    fn edge_paths() {
        let layout = ChunkLayout::new("/data/ldbc");
        let (knows, creation) = knows();
        let adj = knows.adj_list(AdjListType::OrderedBySource).unwrap();

        assert_eq!(
            layout.adj_list_chunk(&knows, adj, 2, 1),
            PathBuf::from("/data/ldbc/edge/person_knows_person/ordered_by_source/adj_list/part2/chunk1")
        );
        assert_eq!(
            layout.offset_chunk(&knows, adj, 0),
            PathBuf::from("/data/ldbc/edge/person_knows_person/ordered_by_source/offset/chunk0")
        );
        assert_eq!(
            layout.edge_property_chunk(&knows, adj, &creation, 2, 1),
            PathBuf::from(
                "/data/ldbc/edge/person_knows_person/ordered_by_source/creationDate/part2/chunk1"
            )
        );
        assert_eq!(
            layout.edge_vertex_count(&knows, adj),
            PathBuf::from("/data/ldbc/edge/person_knows_person/ordered_by_source/vertex_count")
        );
        assert_eq!(
            layout.edge_count(&knows, adj, 3),
            PathBuf::from("/data/ldbc/edge/person_knows_person/ordered_by_source/edge_count3")
        );
    }

    #[test]
    fn resolve_is_deterministic() {
        let layout = ChunkLayout::new("root");
        let coordinate = ChunkCoordinate::Edge {
            vertex_chunk: 4,
            sub_chunk: 0,
        };
        assert_eq!(
            layout.resolve("edge/e/", "g/", coordinate),
            layout.resolve("edge/e/", "g/", coordinate)
        );
        assert_eq!(coordinate.to_string(), "vertex chunk 4, sub-chunk 0");
    }

    #[rstest]
    #[case(903, 100, 10)]
    #[case(900, 100, 9)]
    #[case(0, 100, 0)]
    #[case(6626, 1024, 7)]
    #[case(5, 0, 0)]
    fn counts_chunks(#[case] total: u64, #[case] chunk_size: u64, #[case] expected: u64) {
        assert_eq!(chunk_count(total, chunk_size), expected);
    }

    #[rstest]
    #[case(903, 100, 0, 0..100)]
    #[case(903, 100, 9, 900..903)]
    #[case(903, 100, 10, 903..903)]
    fn row_ranges(
        #[case] total: u64,
        #[case] chunk_size: u64,
        #[case] index: u64,
        #[case] expected: Range<u64>,
    ) {
        assert_eq!(chunk_row_range(total, chunk_size, index), expected);
    }
}
