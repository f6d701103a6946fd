use graphar_error::{GarResult, gar_bail};
use hashbrown::HashMap;

use crate::property::index_properties;
use crate::{Property, PropertyGroup};

/// The schema of one vertex type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(
        try_from = "crate::serde::VertexInfoRaw",
        into = "crate::serde::VertexInfoRaw"
    )
)]
pub struct VertexInfo {
    label: String,
    chunk_size: u64,
    prefix: String,
    property_groups: Vec<PropertyGroup>,
    version: Option<String>,
    property_index: HashMap<String, usize>,
}

impl VertexInfo {
    /// Create a vertex type.
    ///
    /// If `prefix` is `None` it defaults to `vertex/<label>/`.
    pub fn try_new<S: Into<String>>(
        label: S,
        chunk_size: u64,
        property_groups: Vec<PropertyGroup>,
        prefix: Option<String>,
        version: Option<String>,
    ) -> GarResult<Self> {
        let label = label.into();
        if label.is_empty() {
            gar_bail!(InvalidSchema: "vertex label must not be empty");
        }
        if chunk_size == 0 {
            gar_bail!(InvalidSchema: "vertex {label} has a chunk_size of 0");
        }
        let property_index = index_properties(&property_groups)?;
        let prefix = match prefix {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => format!("vertex/{label}/"),
        };

        Ok(Self {
            label,
            chunk_size,
            prefix,
            property_groups,
            version,
            property_index,
        })
    }

    /// The vertex label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The maximum number of vertices per chunk.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// The directory, relative to the archive root, holding this type's data.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The format version string, if declared.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The declared property groups, in declaration order.
    pub fn property_groups(&self) -> &[PropertyGroup] {
        &self.property_groups
    }

    /// Whether `group` is one of this type's declared groups.
    pub fn has_property_group(&self, group: &PropertyGroup) -> bool {
        self.property_groups.contains(group)
    }

    /// The group that stores the named property, if any.
    pub fn property_group(&self, property: &str) -> Option<&PropertyGroup> {
        self.property_index
            .get(property)
            .map(|&idx| &self.property_groups[idx])
    }

    /// Whether a property with the given name is declared.
    pub fn has_property(&self, property: &str) -> bool {
        self.property_index.contains_key(property)
    }

    /// The primary key property, if one is declared.
    pub fn primary_key(&self) -> Option<&Property> {
        self.property_groups
            .iter()
            .flat_map(PropertyGroup::properties)
            .find(|p| p.is_primary())
    }

    /// The number of chunks needed to hold `vertex_count` vertices.
    pub fn chunk_count(&self, vertex_count: u64) -> u64 {
        vertex_count.div_ceil(self.chunk_size)
    }
}
