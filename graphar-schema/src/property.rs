use std::fmt::{Display, Formatter};
use std::sync::Arc;

use arrow_schema::{Field, Schema, SchemaRef};
use graphar_error::{GarResult, gar_bail};
use hashbrown::HashMap;
use itertools::Itertools;

use crate::{DataType, FileType};

/// A single named, typed property of a vertex or edge type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Property {
    name: String,
    data_type: DataType,
    #[cfg_attr(feature = "serde", serde(default))]
    is_primary: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    is_nullable: Option<bool>,
}

impl Property {
    /// A non-primary property with unspecified nullability.
    pub fn new<S: Into<String>>(name: S, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_primary: false,
            is_nullable: None,
        }
    }

    /// Mark this property as the primary key of its type.
    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// Declare the nullability of this property explicitly.
    pub fn with_nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = Some(is_nullable);
        self
    }

    /// The property name, which is also its column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The logical type of the property.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Whether this property is the primary key.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// The declared nullability, if any.
    pub fn is_nullable(&self) -> Option<bool> {
        self.is_nullable
    }

    /// The effective nullability: primary keys default to non-nullable, everything else to nullable.
    pub fn nullable(&self) -> bool {
        self.is_nullable.unwrap_or(!self.is_primary)
    }
}

/// A set of properties that are always stored together in the same chunk files.
///
/// Equality is structural: two groups are the same group only if they agree on prefix,
/// file type and the ordered list of properties. Readers rely on this to reject groups
/// that were built by hand instead of taken from a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(
        try_from = "crate::serde::PropertyGroupRaw",
        into = "crate::serde::PropertyGroupRaw"
    )
)]
pub struct PropertyGroup {
    prefix: String,
    file_type: FileType,
    properties: Vec<Property>,
}

impl PropertyGroup {
    /// Create a property group.
    ///
    /// If `prefix` is `None` it defaults to the property names joined by `_`, followed by `/`.
    pub fn try_new(
        properties: Vec<Property>,
        file_type: FileType,
        prefix: Option<String>,
    ) -> GarResult<Self> {
        if properties.is_empty() {
            gar_bail!(InvalidSchema: "a property group must contain at least one property");
        }
        if let Some(name) = properties.iter().map(Property::name).duplicates().next() {
            gar_bail!(InvalidSchema: "property {name} appears twice in the same group");
        }

        let prefix = match prefix {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => format!("{}/", properties.iter().map(Property::name).join("_")),
        };

        Ok(Self {
            prefix,
            file_type,
            properties,
        })
    }

    /// The directory, relative to the owning type's prefix, that holds this group's chunks.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The format of this group's chunk files.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// The properties of this group, in column order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The number of properties, which is the number of columns in each chunk.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Always false: groups are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether the group contains a property with the given name.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name() == name)
    }

    /// The Arrow schema of a chunk of this group, if every property type has a static mapping.
    pub fn arrow_schema(&self) -> Option<SchemaRef> {
        self.properties
            .iter()
            .map(|p| {
                p.data_type()
                    .to_arrow()
                    .map(|dt| Field::new(p.name(), dt, p.nullable()))
            })
            .collect::<Option<Vec<_>>>()
            .map(|fields| Arc::new(Schema::new(fields)))
    }
}

impl Display for PropertyGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]({})",
            self.prefix,
            self.properties.iter().map(Property::name).join(", "),
            self.file_type
        )
    }
}

/// Build the property name -> group position map for a list of groups, rejecting any
/// property that is claimed by more than one group.
pub(crate) fn index_properties(groups: &[PropertyGroup]) -> GarResult<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (idx, group) in groups.iter().enumerate() {
        for property in group.properties() {
            if index.insert(property.name().to_string(), idx).is_some() {
                gar_bail!(InvalidSchema: "property {} belongs to more than one group", property.name());
            }
        }
    }
    if let Some(prefix) = groups.iter().map(PropertyGroup::prefix).duplicates().next() {
        gar_bail!(InvalidSchema: "two property groups share the prefix {prefix}");
    }
    Ok(index)
}
