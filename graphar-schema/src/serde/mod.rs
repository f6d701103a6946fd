//! Field-level (de)serialization of the schema model.
//!
//! Each validated type round-trips through a plain "raw" mirror whose fields use GraphAr's
//! metadata names; deserialization then goes through the validating constructor.

use ::serde::{Deserialize, Serialize};
use graphar_error::GarError;

use crate::{
    AdjList, AdjListType, AlignedBy, EdgeInfo, FileType, GraphInfo, Property, PropertyGroup,
    VertexInfo,
};

#[derive(Serialize, Deserialize)]
pub(crate) struct PropertyGroupRaw {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default)]
    file_type: FileType,
    properties: Vec<Property>,
}

impl TryFrom<PropertyGroupRaw> for PropertyGroup {
    type Error = GarError;

    fn try_from(raw: PropertyGroupRaw) -> Result<Self, Self::Error> {
        PropertyGroup::try_new(raw.properties, raw.file_type, raw.prefix)
    }
}

impl From<PropertyGroup> for PropertyGroupRaw {
    fn from(group: PropertyGroup) -> Self {
        Self {
            prefix: Some(group.prefix().to_string()),
            file_type: group.file_type(),
            properties: group.properties().to_vec(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct AdjListRaw {
    ordered: bool,
    aligned_by: AlignedBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default)]
    file_type: FileType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    property_groups: Vec<PropertyGroup>,
}

impl TryFrom<AdjListRaw> for AdjList {
    type Error = GarError;

    fn try_from(raw: AdjListRaw) -> Result<Self, Self::Error> {
        AdjList::try_new(
            AdjListType::new(raw.ordered, raw.aligned_by),
            raw.file_type,
            raw.property_groups,
            raw.prefix,
        )
    }
}

impl From<AdjList> for AdjListRaw {
    fn from(adj: AdjList) -> Self {
        Self {
            ordered: adj.adj_type().is_ordered(),
            aligned_by: adj.adj_type().aligned_by(),
            prefix: Some(adj.prefix().to_string()),
            file_type: adj.file_type(),
            property_groups: adj.property_groups().to_vec(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct VertexInfoRaw {
    label: String,
    chunk_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default)]
    property_groups: Vec<PropertyGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl TryFrom<VertexInfoRaw> for VertexInfo {
    type Error = GarError;

    fn try_from(raw: VertexInfoRaw) -> Result<Self, Self::Error> {
        VertexInfo::try_new(
            raw.label,
            raw.chunk_size,
            raw.property_groups,
            raw.prefix,
            raw.version,
        )
    }
}

impl From<VertexInfo> for VertexInfoRaw {
    fn from(info: VertexInfo) -> Self {
        Self {
            label: info.label().to_string(),
            chunk_size: info.chunk_size(),
            prefix: Some(info.prefix().to_string()),
            property_groups: info.property_groups().to_vec(),
            version: info.version().map(str::to_string),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct EdgeInfoRaw {
    src_label: String,
    edge_label: String,
    dst_label: String,
    chunk_size: u64,
    src_chunk_size: u64,
    dst_chunk_size: u64,
    #[serde(default)]
    directed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    adj_lists: Vec<AdjList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl TryFrom<EdgeInfoRaw> for EdgeInfo {
    type Error = GarError;

    fn try_from(raw: EdgeInfoRaw) -> Result<Self, Self::Error> {
        let mut builder = EdgeInfo::builder(raw.src_label, raw.edge_label, raw.dst_label)
            .chunk_size(raw.chunk_size)
            .src_chunk_size(raw.src_chunk_size)
            .dst_chunk_size(raw.dst_chunk_size)
            .directed(raw.directed)
            .adj_lists(raw.adj_lists);
        if let Some(prefix) = raw.prefix {
            builder = builder.prefix(prefix);
        }
        if let Some(version) = raw.version {
            builder = builder.version(version);
        }
        builder.build()
    }
}

impl From<EdgeInfo> for EdgeInfoRaw {
    fn from(info: EdgeInfo) -> Self {
        Self {
            src_label: info.src_label().to_string(),
            edge_label: info.edge_label().to_string(),
            dst_label: info.dst_label().to_string(),
            chunk_size: info.chunk_size(),
            src_chunk_size: info.src_chunk_size(),
            dst_chunk_size: info.dst_chunk_size(),
            directed: info.is_directed(),
            prefix: Some(info.prefix().to_string()),
            adj_lists: info.adj_lists().to_vec(),
            version: info.version().map(str::to_string),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct GraphInfoRaw {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default)]
    vertices: Vec<VertexInfo>,
    #[serde(default)]
    edges: Vec<EdgeInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl TryFrom<GraphInfoRaw> for GraphInfo {
    type Error = GarError;

    fn try_from(raw: GraphInfoRaw) -> Result<Self, Self::Error> {
        GraphInfo::try_new(raw.name, raw.vertices, raw.edges, raw.prefix, raw.version)
    }
}

impl From<GraphInfo> for GraphInfoRaw {
    fn from(info: GraphInfo) -> Self {
        Self {
            name: info.name().to_string(),
            prefix: Some(info.prefix().to_string()).filter(|p| !p.is_empty()),
            vertices: info.vertices().to_vec(),
            edges: info.edges().to_vec(),
            version: info.version().map(str::to_string),
        }
    }
}
