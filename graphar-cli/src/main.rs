mod display;
mod edges;
mod info;
mod logging;
mod metadata;
mod vertices;

use std::path::PathBuf;

use clap::Parser;
use graphar::schema::AdjListType;
use graphar::{ExecutionMode, GraphArchive, ReadOptions};
use tracing::info;

use crate::edges::{EdgeArgs, exec_edges};
use crate::info::exec_info;
use crate::logging::{env_filter, setup_logger};
use crate::metadata::load_graph_info;
use crate::vertices::exec_vertices;

#[derive(clap::Parser)]
#[command(name = "gar", version, about = "Inspect GraphAr archives")]
struct Cli {
    /// Root directory of the archive
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Graph metadata in JSON, defaults to <root>/graph.json
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Load chunks on a thread pool of this many threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Log each read (-v) or every chunk load (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Print the vertex and edge types of the graph, with their sizes.
    Info,
    /// Print the properties of every vertex of one type.
    Vertices {
        label: String,

        /// Print at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print the edges of one edge type, with their properties.
    Edges {
        src_label: String,
        edge_label: String,
        dst_label: String,

        /// One of ordered_by_source, ordered_by_dest, unordered_by_source, unordered_by_dest
        #[arg(short, long, default_value = "ordered_by_source")]
        adj_list_type: AdjListType,

        /// Only read the edges of this vertex chunk
        #[arg(long)]
        vertex_chunk: Option<u64>,

        /// Print at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logger(env_filter(cli.verbose)?)?;

    let graph_path = cli
        .graph
        .clone()
        .unwrap_or_else(|| cli.root.join("graph.json"));
    let graph = load_graph_info(&graph_path)?;
    info!(
        "opened graph {} from {}",
        graph.name(),
        graph_path.display()
    );

    let mut options = ReadOptions::default();
    if let Some(threads) = cli.threads {
        options = options.with_execution_mode(ExecutionMode::rayon(threads)?);
    }
    let archive = GraphArchive::open_local(graph, &cli.root).with_options(options);

    match cli.command {
        Commands::Info => exec_info(&archive)?,
        Commands::Vertices { label, limit } => exec_vertices(&archive, &label, limit)?,
        Commands::Edges {
            src_label,
            edge_label,
            dst_label,
            adj_list_type,
            vertex_chunk,
            limit,
        } => exec_edges(
            &archive,
            EdgeArgs {
                src_label,
                edge_label,
                dst_label,
                adj_list_type,
                vertex_chunk,
                limit,
            },
        )?,
    };

    Ok(())
}
