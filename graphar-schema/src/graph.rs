use graphar_error::{GarResult, gar_bail};
use itertools::Itertools;

use crate::{EdgeInfo, VertexInfo};

/// The schema of a whole graph archive: its vertex types and edge types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(
        try_from = "crate::serde::GraphInfoRaw",
        into = "crate::serde::GraphInfoRaw"
    )
)]
pub struct GraphInfo {
    name: String,
    prefix: String,
    vertices: Vec<VertexInfo>,
    edges: Vec<EdgeInfo>,
    version: Option<String>,
}

impl GraphInfo {
    /// Create a graph schema.
    ///
    /// Vertex labels and edge triples must be unique, and every edge endpoint must name a
    /// declared vertex type. `prefix` defaults to the empty string, i.e. the archive root.
    pub fn try_new<S: Into<String>>(
        name: S,
        vertices: Vec<VertexInfo>,
        edges: Vec<EdgeInfo>,
        prefix: Option<String>,
        version: Option<String>,
    ) -> GarResult<Self> {
        let name = name.into();
        if let Some(label) = vertices.iter().map(VertexInfo::label).duplicates().next() {
            gar_bail!(InvalidSchema: "graph {name} declares vertex {label} twice");
        }
        if let Some(key) = edges.iter().map(EdgeInfo::concat_key).duplicates().next() {
            gar_bail!(InvalidSchema: "graph {name} declares edge {key} twice");
        }
        for edge in &edges {
            for label in [edge.src_label(), edge.dst_label()] {
                if !vertices.iter().any(|v| v.label() == label) {
                    gar_bail!(
                        InvalidSchema: "edge {} refers to undeclared vertex {label}",
                        edge.concat_key()
                    );
                }
            }
        }

        Ok(Self {
            name,
            prefix: prefix.unwrap_or_default(),
            vertices,
            edges,
            version,
        })
    }

    /// The graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The directory, relative to the archive root, that the type prefixes are relative to.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The format version string, if declared.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The declared vertex types.
    pub fn vertices(&self) -> &[VertexInfo] {
        &self.vertices
    }

    /// The declared edge types.
    pub fn edges(&self) -> &[EdgeInfo] {
        &self.edges
    }

    /// The vertex type with the given label.
    pub fn vertex_info(&self, label: &str) -> Option<&VertexInfo> {
        self.vertices.iter().find(|v| v.label() == label)
    }

    /// The edge type with the given label triple.
    pub fn edge_info(&self, src_label: &str, edge_label: &str, dst_label: &str) -> Option<&EdgeInfo> {
        self.edges.iter().find(|e| {
            e.src_label() == src_label && e.edge_label() == edge_label && e.dst_label() == dst_label
        })
    }
}
