use std::fmt::{Display, Formatter};
use std::str::FromStr;

use graphar_error::{GarError, GarResult, gar_bail};

/// The on-disk format of a chunk file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FileType {
    /// Delimited text with a header row
    Csv,
    /// Apache Parquet
    #[default]
    Parquet,
    /// Apache ORC
    Orc,
}

impl FileType {
    /// The name used for this format in GraphAr metadata.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
            Self::Orc => "orc",
        }
    }
}

impl FromStr for FileType {
    type Err = GarError;

    fn from_str(s: &str) -> GarResult<Self> {
        Ok(match s {
            "csv" => Self::Csv,
            "parquet" => Self::Parquet,
            "orc" => Self::Orc,
            _ => gar_bail!(UnsupportedFormat: "{s}"),
        })
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
