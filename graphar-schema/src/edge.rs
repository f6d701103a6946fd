use graphar_error::{GarResult, gar_bail, gar_err};
use itertools::Itertools;

use crate::{AdjList, AdjListType, AlignedBy, PropertyGroup};

/// The schema of one edge type: a (source, edge, destination) label triple and the
/// adjacency list orderings it is stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(try_from = "crate::serde::EdgeInfoRaw", into = "crate::serde::EdgeInfoRaw")
)]
pub struct EdgeInfo {
    src_label: String,
    edge_label: String,
    dst_label: String,
    chunk_size: u64,
    src_chunk_size: u64,
    dst_chunk_size: u64,
    directed: bool,
    prefix: String,
    adj_lists: Vec<AdjList>,
    version: Option<String>,
}

impl EdgeInfo {
    /// Start building an edge type for the given label triple.
    pub fn builder<S: Into<String>>(src_label: S, edge_label: S, dst_label: S) -> EdgeInfoBuilder {
        EdgeInfoBuilder {
            src_label: src_label.into(),
            edge_label: edge_label.into(),
            dst_label: dst_label.into(),
            chunk_size: 0,
            src_chunk_size: 0,
            dst_chunk_size: 0,
            directed: false,
            prefix: None,
            adj_lists: Vec::new(),
            version: None,
        }
    }

    /// The source vertex label.
    pub fn src_label(&self) -> &str {
        &self.src_label
    }

    /// The edge label.
    pub fn edge_label(&self) -> &str {
        &self.edge_label
    }

    /// The destination vertex label.
    pub fn dst_label(&self) -> &str {
        &self.dst_label
    }

    /// `<src>_<edge>_<dst>`, the key identifying this edge type within a graph.
    pub fn concat_key(&self) -> String {
        format!("{}_{}_{}", self.src_label, self.edge_label, self.dst_label)
    }

    /// The maximum number of edges per adjacency list sub-chunk.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// The vertex chunk size of the source vertex type.
    pub fn src_chunk_size(&self) -> u64 {
        self.src_chunk_size
    }

    /// The vertex chunk size of the destination vertex type.
    pub fn dst_chunk_size(&self) -> u64 {
        self.dst_chunk_size
    }

    /// Whether edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// The directory, relative to the archive root, holding this type's data.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The format version string, if declared.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The declared adjacency lists.
    pub fn adj_lists(&self) -> &[AdjList] {
        &self.adj_lists
    }

    /// Whether the given ordering is declared.
    pub fn has_adj_list_type(&self, adj_type: AdjListType) -> bool {
        self.adj_lists.iter().any(|a| a.adj_type() == adj_type)
    }

    /// The declaration of the given ordering.
    pub fn adj_list(&self, adj_type: AdjListType) -> GarResult<&AdjList> {
        self.adj_lists
            .iter()
            .find(|a| a.adj_type() == adj_type)
            .ok_or_else(|| {
                gar_err!(
                    UnsupportedAdjListType: "{adj_type} is not declared for edge {}",
                    self.concat_key()
                )
            })
    }

    /// The property groups stored with the given ordering.
    pub fn property_groups(&self, adj_type: AdjListType) -> GarResult<&[PropertyGroup]> {
        self.adj_list(adj_type).map(AdjList::property_groups)
    }

    /// Whether `group` is declared for the given ordering specifically.
    pub fn has_property_group(&self, group: &PropertyGroup, adj_type: AdjListType) -> bool {
        self.adj_list(adj_type)
            .is_ok_and(|adj| adj.has_property_group(group))
    }

    /// The chunk size of the vertex type that partitions the given ordering.
    pub fn vertex_chunk_size(&self, adj_type: AdjListType) -> u64 {
        match adj_type.aligned_by() {
            AlignedBy::Src => self.src_chunk_size,
            AlignedBy::Dst => self.dst_chunk_size,
        }
    }

    /// The label of the vertex type that partitions the given ordering.
    pub fn grouping_label(&self, adj_type: AdjListType) -> &str {
        match adj_type.aligned_by() {
            AlignedBy::Src => &self.src_label,
            AlignedBy::Dst => &self.dst_label,
        }
    }
}

/// Builder for [`EdgeInfo`]; every invariant is checked in [`EdgeInfoBuilder::build`].
#[derive(Debug, Clone)]
pub struct EdgeInfoBuilder {
    src_label: String,
    edge_label: String,
    dst_label: String,
    chunk_size: u64,
    src_chunk_size: u64,
    dst_chunk_size: u64,
    directed: bool,
    prefix: Option<String>,
    adj_lists: Vec<AdjList>,
    version: Option<String>,
}

impl EdgeInfoBuilder {
    /// The maximum number of edges per adjacency list sub-chunk.
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// The vertex chunk size of the source vertex type.
    pub fn src_chunk_size(mut self, src_chunk_size: u64) -> Self {
        self.src_chunk_size = src_chunk_size;
        self
    }

    /// The vertex chunk size of the destination vertex type.
    pub fn dst_chunk_size(mut self, dst_chunk_size: u64) -> Self {
        self.dst_chunk_size = dst_chunk_size;
        self
    }

    /// Whether edges are directed.
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Override the default `edge/<src>_<edge>_<dst>/` prefix.
    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Declare an adjacency list ordering.
    pub fn adj_list(mut self, adj_list: AdjList) -> Self {
        self.adj_lists.push(adj_list);
        self
    }

    /// Declare several adjacency list orderings.
    pub fn adj_lists<I: IntoIterator<Item = AdjList>>(mut self, adj_lists: I) -> Self {
        self.adj_lists.extend(adj_lists);
        self
    }

    /// The format version string.
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Validate and build the edge type.
    pub fn build(self) -> GarResult<EdgeInfo> {
        if self.src_label.is_empty() || self.edge_label.is_empty() || self.dst_label.is_empty() {
            gar_bail!(InvalidSchema: "edge labels must not be empty");
        }
        let key = format!("{}_{}_{}", self.src_label, self.edge_label, self.dst_label);
        for (name, size) in [
            ("chunk_size", self.chunk_size),
            ("src_chunk_size", self.src_chunk_size),
            ("dst_chunk_size", self.dst_chunk_size),
        ] {
            if size == 0 {
                gar_bail!(InvalidSchema: "edge {key} has a {name} of 0");
            }
        }
        if self.adj_lists.is_empty() {
            gar_bail!(InvalidSchema: "edge {key} declares no adjacency list");
        }
        if let Some(adj_type) = self.adj_lists.iter().map(AdjList::adj_type).duplicates().next() {
            gar_bail!(InvalidSchema: "edge {key} declares {adj_type} twice");
        }
        if let Some(prefix) = self.adj_lists.iter().map(AdjList::prefix).duplicates().next() {
            gar_bail!(InvalidSchema: "edge {key} stores two adjacency lists under {prefix}");
        }

        let prefix = match self.prefix {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => format!("edge/{key}/"),
        };

        Ok(EdgeInfo {
            src_label: self.src_label,
            edge_label: self.edge_label,
            dst_label: self.dst_label,
            chunk_size: self.chunk_size,
            src_chunk_size: self.src_chunk_size,
            dst_chunk_size: self.dst_chunk_size,
            directed: self.directed,
            prefix,
            adj_lists: self.adj_lists,
            version: self.version,
        })
    }
}
