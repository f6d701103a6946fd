use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use graphar::schema::GraphInfo;

/// Read and validate a graph's metadata from a JSON file.
pub fn load_graph_info(path: &Path) -> anyhow::Result<GraphInfo> {
    let file = File::open(path)
        .with_context(|| format!("cannot open graph metadata {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid graph metadata in {}", path.display()))
}
