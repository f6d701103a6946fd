//! Names of the columns that GraphAr stores or injects next to user properties.

/// The global vertex id, injected when vertex tables are read with an index.
pub const VERTEX_INDEX: &str = "_graphArVertexIndex";
/// The edge position, injected when edge tables are read with an index.
pub const EDGE_INDEX: &str = "_graphArEdgeIndex";
/// The source vertex id of an adjacency list row.
pub const SRC_INDEX: &str = "_graphArSrcIndex";
/// The destination vertex id of an adjacency list row.
pub const DST_INDEX: &str = "_graphArDstIndex";
/// The single column of an offset chunk.
pub const OFFSET: &str = "_graphArOffset";
/// The single column of a counter chunk.
pub const COUNT: &str = "count";
