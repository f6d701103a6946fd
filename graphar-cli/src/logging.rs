use std::io::IsTerminal;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Crates whose `log` records follow `--verbose`. Everything else stays at `warn`.
const GRAPHAR_TARGETS: [&str; 3] = ["graphar_reader", "graphar_io", "gar"];

/// Install the stderr subscriber. The library crates log through the `log` facade, and their
/// records reach it through the `tracing-log` bridge.
pub fn setup_logger(filter: EnvFilter) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .map_err(|err| anyhow!("cannot install logger: {err}"))
}

/// `RUST_LOG` when it is set. Otherwise GraphAr logs at `info`, one logical read per line at
/// `-v` and every chunk load at `-vv`.
pub fn env_filter(verbosity: u8) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(directives(verbosity))?)
}

fn directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    std::iter::once("warn".to_string())
        .chain(GRAPHAR_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}
