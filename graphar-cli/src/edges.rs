use graphar::GraphArchive;
use graphar::schema::AdjListType;

use crate::display::render_table;

pub struct EdgeArgs {
    pub src_label: String,
    pub edge_label: String,
    pub dst_label: String,
    pub adj_list_type: AdjListType,
    pub vertex_chunk: Option<u64>,
    pub limit: Option<usize>,
}

pub fn exec_edges(archive: &GraphArchive, args: EdgeArgs) -> anyhow::Result<()> {
    let reader = archive.edge_reader(
        &args.src_label,
        &args.edge_label,
        &args.dst_label,
        args.adj_list_type,
    )?;
    let table = match args.vertex_chunk {
        Some(vertex_chunk) => reader.read_edges_for_vertex_chunk(vertex_chunk, true)?,
        None => reader.read_edges(true)?,
    };
    println!("{}", render_table(&table, args.limit)?);
    Ok(())
}
