use graphar::GraphArchive;
use tracing::warn;

pub fn exec_info(archive: &GraphArchive) -> anyhow::Result<()> {
    let graph = archive.info();
    println!("graph {} at {}", graph.name(), archive.root().display());

    for vertex in graph.vertices() {
        let count = match archive.vertex_reader(vertex.label())?.vertex_count() {
            Ok(count) => count.to_string(),
            Err(err) => {
                warn!("cannot count vertices of {}: {}", vertex.label(), err);
                "?".to_string()
            }
        };
        println!(
            "vertex {}: {} vertices, chunks of {}",
            vertex.label(),
            count,
            vertex.chunk_size()
        );
        for group in vertex.property_groups() {
            println!("  {group}");
        }
    }

    for edge in graph.edges() {
        println!(
            "edge {}: sub-chunks of {} edges, {}",
            edge.concat_key(),
            edge.chunk_size(),
            if edge.is_directed() {
                "directed"
            } else {
                "undirected"
            }
        );
        for adj in edge.adj_lists() {
            let reader = archive.edge_reader(
                edge.src_label(),
                edge.edge_label(),
                edge.dst_label(),
                adj.adj_type(),
            )?;
            let count = match reader.edge_count() {
                Ok(count) => count.to_string(),
                Err(err) => {
                    warn!(
                        "cannot count edges of {} {}: {}",
                        edge.concat_key(),
                        adj.adj_type(),
                        err
                    );
                    "?".to_string()
                }
            };
            println!("  {} ({}): {} edges", adj.adj_type(), adj.file_type(), count);
            for group in adj.property_groups() {
                println!("    {group}");
            }
        }
    }

    Ok(())
}
