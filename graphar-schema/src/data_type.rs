use std::fmt::{Display, Formatter};
use std::str::FromStr;

use graphar_error::{GarError, GarResult, gar_bail};

/// The logical type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DataType {
    /// A boolean
    Bool,
    /// A signed 32-bit integer
    Int32,
    /// A signed 64-bit integer
    Int64,
    /// A 32-bit float
    Float,
    /// A 64-bit float
    Double,
    /// A UTF-8 string
    String,
    /// A list whose element type is decided by the file that stores it
    List,
}

impl DataType {
    /// The name used for this type in GraphAr metadata.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::List => "list",
        }
    }

    /// The Arrow type a column of this type decodes to.
    ///
    /// Lists carry no element type in the metadata, so they have no static mapping and
    /// their columns must be typed by the file they are read from.
    pub fn to_arrow(&self) -> Option<arrow_schema::DataType> {
        use arrow_schema::DataType as Arrow;

        match self {
            Self::Bool => Some(Arrow::Boolean),
            Self::Int32 => Some(Arrow::Int32),
            Self::Int64 => Some(Arrow::Int64),
            Self::Float => Some(Arrow::Float32),
            Self::Double => Some(Arrow::Float64),
            Self::String => Some(Arrow::Utf8),
            Self::List => None,
        }
    }
}

impl FromStr for DataType {
    type Err = GarError;

    fn from_str(s: &str) -> GarResult<Self> {
        Ok(match s {
            "bool" => Self::Bool,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "float" => Self::Float,
            "double" => Self::Double,
            "string" => Self::String,
            "list" => Self::List,
            _ => gar_bail!(InvalidSchema: "unknown data type {s}"),
        })
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
