//! Row-position assembly of chunk tables.

use std::sync::Arc;

use arrow_array::{ArrayRef, Int64Array, RecordBatch, RecordBatchOptions};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use arrow_select::concat::concat_batches;
use graphar_error::{GarResult, gar_bail, gar_err};
use hashbrown::HashSet;

/// Concatenate chunk tables in the given order. With no tables, the result is an empty table of
/// `fallback`'s schema.
pub(crate) fn concat<F>(tables: &[RecordBatch], fallback: F) -> GarResult<RecordBatch>
where
    F: FnOnce() -> SchemaRef,
{
    let schema = tables.first().map(RecordBatch::schema).unwrap_or_else(fallback);
    Ok(concat_batches(&schema, tables)?)
}

/// Join tables column-wise: row `i` of the result is row `i` of every input. Columns keep the
/// order of the inputs.
pub(crate) fn join_by_position(tables: &[RecordBatch]) -> GarResult<RecordBatch> {
    let Some(first) = tables.first() else {
        gar_bail!("at least one table is required for a join");
    };
    let num_rows = first.num_rows();

    let mut names = HashSet::new();
    let mut fields = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();
    for table in tables {
        if table.num_rows() != num_rows {
            gar_bail!(
                MisalignedChunks: "cannot join a table of {} rows with a table of {} rows",
                table.num_rows(),
                num_rows
            );
        }
        for (field, column) in table.schema().fields().iter().zip(table.columns()) {
            if !names.insert(field.name().clone()) {
                gar_bail!(MisalignedChunks: "column {} appears in more than one table", field.name());
            }
            fields.push(field.clone());
            columns.push(column.clone());
        }
    }

    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &RecordBatchOptions::new().with_row_count(Some(num_rows)),
    )?)
}

/// Prepend a non-nullable Int64 column named `name` holding `start, start + 1, ...`.
pub(crate) fn with_index_column(table: RecordBatch, name: &str, start: u64) -> GarResult<RecordBatch> {
    let start = i64::try_from(start).map_err(|_| gar_err!("index {} overflows an int64", start))?;
    let len = i64::try_from(table.num_rows())
        .map_err(|_| gar_err!("{} rows overflow an int64 index", table.num_rows()))?;
    let index: ArrayRef = Arc::new(Int64Array::from_iter_values(start..start + len));

    let schema = table.schema();
    let fields = std::iter::once(Arc::new(Field::new(name, DataType::Int64, false)))
        .chain(schema.fields().iter().cloned())
        .collect::<Vec<_>>();
    let columns = std::iter::once(index)
        .chain(table.columns().iter().cloned())
        .collect::<Vec<_>>();

    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone())),
        columns,
        &RecordBatchOptions::new().with_row_count(Some(table.num_rows())),
    )?)
}
