use std::fmt::{Display, Formatter};
use std::str::FromStr;

use graphar_error::{GarError, GarResult, gar_bail};
use hashbrown::HashMap;

use crate::property::index_properties;
use crate::{FileType, PropertyGroup};

/// The endpoint by which the edges of an adjacency list are partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum AlignedBy {
    /// Edges are grouped by their source vertex
    Src,
    /// Edges are grouped by their destination vertex
    Dst,
}

/// One physical layout of an edge type's adjacency list: the grouping endpoint crossed with
/// whether edges are sorted within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AdjListType {
    /// Grouped by source, unsorted within a group
    UnorderedBySource,
    /// Grouped by destination, unsorted within a group
    UnorderedByDest,
    /// Grouped by source, sorted within a group
    OrderedBySource,
    /// Grouped by destination, sorted within a group
    OrderedByDest,
}

impl AdjListType {
    /// Every adjacency list type.
    pub const ALL: [AdjListType; 4] = [
        Self::UnorderedBySource,
        Self::UnorderedByDest,
        Self::OrderedBySource,
        Self::OrderedByDest,
    ];

    /// Combine the two axes into an adjacency list type.
    pub const fn new(ordered: bool, aligned_by: AlignedBy) -> Self {
        match (ordered, aligned_by) {
            (true, AlignedBy::Src) => Self::OrderedBySource,
            (true, AlignedBy::Dst) => Self::OrderedByDest,
            (false, AlignedBy::Src) => Self::UnorderedBySource,
            (false, AlignedBy::Dst) => Self::UnorderedByDest,
        }
    }

    /// Whether edges are sorted within each vertex group.
    pub const fn is_ordered(&self) -> bool {
        matches!(self, Self::OrderedBySource | Self::OrderedByDest)
    }

    /// The endpoint edges are grouped by.
    pub const fn aligned_by(&self) -> AlignedBy {
        match self {
            Self::OrderedBySource | Self::UnorderedBySource => AlignedBy::Src,
            Self::OrderedByDest | Self::UnorderedByDest => AlignedBy::Dst,
        }
    }

    /// Whether the layout stores a CSR offset chunk per vertex chunk.
    ///
    /// Only sorted layouts do; an unsorted group has no contiguous per-vertex edge range.
    pub const fn has_offsets(&self) -> bool {
        self.is_ordered()
    }

    /// The name used for this type in GraphAr metadata and directory names.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnorderedBySource => "unordered_by_source",
            Self::UnorderedByDest => "unordered_by_dest",
            Self::OrderedBySource => "ordered_by_source",
            Self::OrderedByDest => "ordered_by_dest",
        }
    }
}

impl FromStr for AdjListType {
    type Err = GarError;

    fn from_str(s: &str) -> GarResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| graphar_error::gar_err!(UnsupportedAdjListType: "{s}"))
    }
}

impl Display for AdjListType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The declaration of one adjacency list ordering of an edge type, together with the
/// property groups stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(try_from = "crate::serde::AdjListRaw", into = "crate::serde::AdjListRaw")
)]
pub struct AdjList {
    adj_type: AdjListType,
    prefix: String,
    file_type: FileType,
    property_groups: Vec<PropertyGroup>,
    property_index: HashMap<String, usize>,
}

impl AdjList {
    /// Declare an adjacency list.
    ///
    /// If `prefix` is `None` it defaults to the type name followed by `/`, e.g. `ordered_by_source/`.
    pub fn try_new(
        adj_type: AdjListType,
        file_type: FileType,
        property_groups: Vec<PropertyGroup>,
        prefix: Option<String>,
    ) -> GarResult<Self> {
        let property_index = index_properties(&property_groups)?;
        let prefix = match prefix {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => format!("{}/", adj_type.as_str()),
        };
        if property_groups
            .iter()
            .any(|pg| pg.prefix().trim_end_matches('/') == "adj_list")
        {
            gar_bail!(InvalidSchema: "property group prefix adj_list collides with the adjacency list directory");
        }

        Ok(Self {
            adj_type,
            prefix,
            file_type,
            property_groups,
            property_index,
        })
    }

    /// The ordering this adjacency list is stored in.
    pub fn adj_type(&self) -> AdjListType {
        self.adj_type
    }

    /// The directory, relative to the edge type's prefix, that holds this ordering.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The format of the adjacency list and offset chunks.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// The property groups stored in this ordering, in declaration order.
    pub fn property_groups(&self) -> &[PropertyGroup] {
        &self.property_groups
    }

    /// Whether `group` is one of this ordering's declared groups.
    pub fn has_property_group(&self, group: &PropertyGroup) -> bool {
        self.property_groups.contains(group)
    }

    /// The group that stores the named property, if any.
    pub fn property_group(&self, property: &str) -> Option<&PropertyGroup> {
        self.property_index
            .get(property)
            .map(|&idx| &self.property_groups[idx])
    }
}
