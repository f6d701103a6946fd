use arrow_array::RecordBatch;
use arrow_cast::pretty::pretty_format_batches;

/// Render at most `limit` rows of `table`, followed by a row count.
pub fn render_table(table: &RecordBatch, limit: Option<usize>) -> anyhow::Result<String> {
    let shown = limit.map_or(table.num_rows(), |limit| limit.min(table.num_rows()));
    let rendered = pretty_format_batches(&[table.slice(0, shown)])?;
    Ok(format!(
        "{rendered}\n{} of {} rows",
        shown,
        table.num_rows()
    ))
}
