use graphar::GraphArchive;

use crate::display::render_table;

pub fn exec_vertices(
    archive: &GraphArchive,
    label: &str,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let reader = archive.vertex_reader(label)?;
    if reader.info().property_groups().is_empty() {
        anyhow::bail!("vertex {label} declares no property groups");
    }
    let table = reader.read_all_vertex_property_groups(true)?;
    println!("{}", render_table(&table, limit)?);
    Ok(())
}
