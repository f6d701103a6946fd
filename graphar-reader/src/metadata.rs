//! Counter chunks and integer columns.

use std::path::Path;

use arrow_array::Array;
use arrow_array::cast::AsArray;
use arrow_array::types::{Int32Type, Int64Type, UInt32Type, UInt64Type};
use arrow_schema::DataType;
use graphar_error::{GarResult, gar_bail, gar_err};
use graphar_io::ChunkLoader;
use log::trace;

use crate::ReadOptions;

/// Read the single value of a counter chunk: one row, one integer column.
pub(crate) fn read_counter(
    loader: &dyn ChunkLoader,
    path: &Path,
    options: &ReadOptions,
) -> GarResult<u64> {
    trace!("reading counter {}", path.display());
    let table = loader
        .load(path, options.counter_file_type(), options.load_options())
        .map_err(|err| {
            if err.is_chunk_not_found() {
                gar_err!(MetadataMissing: "counter {} is absent", path.display())
            } else {
                err
            }
        })?;

    let Some(column) = table.columns().first() else {
        gar_bail!(MetadataMissing: "counter {} has no columns", path.display());
    };
    let values = integer_values(column.as_ref())
        .ok_or_else(|| gar_err!(MetadataMissing: "counter {} is not an integer column", path.display()))?;
    values
        .first()
        .copied()
        .ok_or_else(|| gar_err!(MetadataMissing: "counter {} is empty", path.display()))
}

/// The values of a non-null, non-negative integer array.
pub(crate) fn integer_values(array: &dyn Array) -> Option<Vec<u64>> {
    if array.null_count() > 0 {
        return None;
    }
    match array.data_type() {
        DataType::Int64 => array
            .as_primitive::<Int64Type>()
            .values()
            .iter()
            .map(|v| u64::try_from(*v).ok())
            .collect(),
        DataType::Int32 => array
            .as_primitive::<Int32Type>()
            .values()
            .iter()
            .map(|v| u64::try_from(*v).ok())
            .collect(),
        DataType::UInt64 => Some(array.as_primitive::<UInt64Type>().values().to_vec()),
        DataType::UInt32 => Some(
            array
                .as_primitive::<UInt32Type>()
                .values()
                .iter()
                .map(|v| u64::from(*v))
                .collect(),
        ),
        _ => None,
    }
}
